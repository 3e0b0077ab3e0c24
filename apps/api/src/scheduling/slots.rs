//! Business-hour interview slots.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

use crate::models::interview::Interview;

/// Slots start on the hour from 09:00; the last one starts at 16:00.
pub const BUSINESS_HOURS: (u32, u32) = (9, 17);
pub const DEFAULT_SEARCH_DAYS: u32 = 7;
pub const MAX_OFFERED_SLOTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotView {
    pub datetime: NaiveDateTime,
    pub date: String,
    pub time: String,
    pub day_of_week: String,
    pub available: bool,
}

impl SlotView {
    pub fn new(slot: NaiveDateTime, available: bool) -> Self {
        SlotView {
            datetime: slot,
            date: slot.format("%Y-%m-%d").to_string(),
            time: slot.format("%H:%M").to_string(),
            day_of_week: slot.format("%A").to_string(),
            available,
        }
    }
}

pub fn is_working_day(weekday: Weekday) -> bool {
    !matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Hourly slots on working days over `days` calendar days, starting at `start`'s date.
/// The time of day of `start` is ignored.
pub fn generate_time_slots(start: NaiveDateTime, days: u32) -> Vec<NaiveDateTime> {
    let (open, close) = BUSINESS_HOURS;
    start
        .date()
        .iter_days()
        .take(days as usize)
        .filter(|date| is_working_day(date.weekday()))
        .flat_map(|date| (open..close).filter_map(move |hour| date.and_hms_opt(hour, 0, 0)))
        .collect()
}

/// Whether `at` is the start of a business-hour slot.
pub fn is_business_slot(at: NaiveDateTime) -> bool {
    let (open, close) = BUSINESS_HOURS;
    is_working_day(at.weekday())
        && (open..close).contains(&at.hour())
        && at.minute() == 0
        && at.second() == 0
        && at.nanosecond() == 0
}

/// Whether an interview other than `except_id` already holds `at`.
pub fn is_booked(booked: &[Interview], at: NaiveDateTime, except_id: Option<&str>) -> bool {
    booked.iter().any(|interview| {
        interview.holds_slot()
            && interview.scheduled_time == at
            && Some(interview.id.as_str()) != except_id
    })
}

/// Up to ten free slots at or after `from`, searching one week ahead.
pub fn find_available_slots(booked: &[Interview], from: NaiveDateTime) -> Vec<NaiveDateTime> {
    generate_time_slots(from, DEFAULT_SEARCH_DAYS)
        .into_iter()
        .filter(|slot| *slot >= from && !is_booked(booked, *slot, None))
        .take(MAX_OFFERED_SLOTS)
        .collect()
}

/// Every upcoming slot over `days` days, flagged free or taken.
pub fn slot_overview(booked: &[Interview], now: NaiveDateTime, days: u32) -> Vec<SlotView> {
    generate_time_slots(now, days)
        .into_iter()
        .filter(|slot| *slot >= now)
        .map(|slot| SlotView::new(slot, !is_booked(booked, slot, None)))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::models::interview::{InterviewStatus, InterviewType};

    // 2026-10-16 is a Friday.
    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn booking(id: &str, time: NaiveDateTime, status: InterviewStatus) -> Interview {
        Interview {
            id: id.to_string(),
            candidate_id: "c1".to_string(),
            job_id: "j1".to_string(),
            scheduled_time: time,
            status,
            interview_type: InterviewType::Video,
            duration_minutes: 60,
            location: "Virtual Meeting".to_string(),
            interviewer: None,
            notes: None,
            cancellation_reason: None,
            feedback: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_generate_skips_weekends() {
        // Fri, Sat, Sun, Mon
        let slots = generate_time_slots(at(16, 13, 30), 4);
        assert_eq!(slots.len(), 16);
        assert_eq!(slots[0], at(16, 9, 0));
        assert_eq!(slots[7], at(16, 16, 0));
        assert_eq!(slots[8], at(19, 9, 0));
        assert!(slots.iter().all(|s| is_working_day(s.weekday())));
    }

    #[test]
    fn test_generate_full_week() {
        assert_eq!(generate_time_slots(at(19, 0, 0), 7).len(), 5 * 8);
    }

    #[test]
    fn test_business_slot_check() {
        assert!(is_business_slot(at(19, 9, 0)));
        assert!(is_business_slot(at(19, 16, 0)));
        assert!(!is_business_slot(at(19, 17, 0)));
        assert!(!is_business_slot(at(19, 9, 30)));
        assert!(!is_business_slot(at(18, 10, 0)));
    }

    #[test]
    fn test_find_available_slots_excludes_booked_and_past() {
        let booked = vec![
            booking("a", at(16, 15, 0), InterviewStatus::Scheduled),
            booking("b", at(16, 16, 0), InterviewStatus::Cancelled),
        ];
        let slots = find_available_slots(&booked, at(16, 13, 30));
        assert_eq!(slots[0], at(16, 14, 0));
        assert_eq!(slots[1], at(16, 16, 0));
        assert_eq!(slots[2], at(19, 9, 0));
        assert_eq!(slots.len(), MAX_OFFERED_SLOTS);
    }

    #[test]
    fn test_is_booked_ignores_self() {
        let booked = vec![booking("a", at(19, 10, 0), InterviewStatus::Scheduled)];
        assert!(is_booked(&booked, at(19, 10, 0), None));
        assert!(!is_booked(&booked, at(19, 10, 0), Some("a")));
    }

    #[test]
    fn test_slot_overview_flags_taken_slots() {
        let booked = vec![booking("a", at(19, 10, 0), InterviewStatus::Scheduled)];
        let views = slot_overview(&booked, at(19, 9, 30), 1);
        assert_eq!(views.len(), 7);
        assert_eq!(views[0].time, "10:00");
        assert!(!views[0].available);
        assert!(views[1].available);
        assert_eq!(views[0].day_of_week, "Monday");
        assert_eq!(views[0].date, "2026-10-19");
    }
}
