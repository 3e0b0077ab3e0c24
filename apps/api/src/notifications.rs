//! Candidate-facing messages.
//!
//! Messages are composed from fixed templates, logged and returned to the
//! caller. No mail or SMS channel is attached.

use chrono::{NaiveDateTime, Utc};
use tracing::info;

use crate::models::candidate::{Candidate, CandidateStatus, Decision, FinalDecision};
use crate::models::interview::Interview;
use crate::models::notification::{Notification, NotificationKind};
use crate::models::prefixed_id;

const SIGNATURE: &str = "Best regards,\nHR Team";
const SENT: &str = "sent";

pub fn interview_confirmation(candidate: &Candidate, interview: &Interview) -> Notification {
    let body = [
        "We are pleased to confirm your interview for the position you applied for.".to_string(),
        interview_details(interview),
        "Please ensure you are available at the scheduled time. If you need to reschedule, \
         please contact us at least 24 hours in advance."
            .to_string(),
    ];
    compose(
        NotificationKind::InterviewConfirmation,
        candidate,
        "Interview Confirmation",
        letter(candidate, &body),
    )
}

pub fn interview_reminder(candidate: &Candidate, interview: &Interview) -> Notification {
    let body = [
        "This is a friendly reminder about your upcoming interview.".to_string(),
        interview_details(interview),
        "Please join the meeting on time. We look forward to speaking with you.".to_string(),
    ];
    compose(
        NotificationKind::InterviewReminder,
        candidate,
        "Interview Reminder",
        letter(candidate, &body),
    )
}

/// A custom message, when given, replaces the whole letter.
pub fn status_update(
    candidate: &Candidate,
    status: CandidateStatus,
    custom_message: Option<&str>,
) -> Notification {
    let message = match custom_message.map(str::trim).filter(|m| !m.is_empty()) {
        Some(custom) => custom.to_string(),
        None => letter(
            candidate,
            &[
                status_message(status).to_string(),
                "If you have any questions, please don't hesitate to contact us.".to_string(),
            ],
        ),
    };
    compose(
        NotificationKind::StatusUpdate,
        candidate,
        "Application Status Update",
        message,
    )
}

pub fn decision_notification(candidate: &Candidate, decision: &FinalDecision) -> Notification {
    let notes = decision.notes.trim().to_string();
    let body: Vec<String> = match decision.decision {
        Decision::Hire => vec![
            "Congratulations! We are pleased to offer you the position.".to_string(),
            decision
                .salary_offer
                .filter(|salary| *salary > 0)
                .map(|salary| format!("Salary Offer: ${}", format_thousands(salary)))
                .unwrap_or_default(),
            notes,
            "Please review the offer and respond within 5 business days.".to_string(),
        ],
        Decision::Reject => vec![
            "Thank you for your interest in our company and for taking the time to interview with us."
                .to_string(),
            "After careful consideration, we have decided to move forward with other candidates \
             for this position."
                .to_string(),
            notes,
            "We wish you the best in your future endeavors.".to_string(),
        ],
        Decision::Hold => vec![
            "Thank you for your interest in our company.".to_string(),
            "Your application is currently on hold while we complete our review process.".to_string(),
            notes,
            "We will be in touch with you soon.".to_string(),
        ],
    };
    compose(
        NotificationKind::DecisionNotification,
        candidate,
        "Application Decision",
        letter(candidate, &body),
    )
}

pub fn custom_message(candidate: &Candidate, subject: &str, message: &str) -> Notification {
    compose(
        NotificationKind::CustomMessage,
        candidate,
        subject,
        message.to_string(),
    )
}

fn status_message(status: CandidateStatus) -> &'static str {
    match status {
        CandidateStatus::Approved => {
            "Congratulations! Your application has been approved for the next stage."
        }
        CandidateStatus::Rejected => {
            "Thank you for your interest. Unfortunately, we have decided to move forward with other candidates."
        }
        CandidateStatus::OnHold => {
            "Your application is currently on hold. We will update you as soon as possible."
        }
        CandidateStatus::Interviewed => {
            "Thank you for taking the time to interview with us. We will be in touch soon."
        }
        CandidateStatus::Hired => "Congratulations! We are pleased to offer you the position.",
        _ => "Your application status has been updated.",
    }
}

fn interview_details(interview: &Interview) -> String {
    format!(
        "Interview Details:\n- Date: {}\n- Time: {}\n- Duration: {} minutes\n- Location: {}",
        format_date(&interview.scheduled_time),
        format_time(&interview.scheduled_time),
        interview.duration_minutes,
        interview.location
    )
}

/// "October 19, 2026"
pub fn format_date(at: &NaiveDateTime) -> String {
    at.format("%B %d, %Y").to_string()
}

/// "09:00 AM"
pub fn format_time(at: &NaiveDateTime) -> String {
    at.format("%I:%M %p").to_string()
}

fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Greeting, non-empty paragraphs, signature.
fn letter(candidate: &Candidate, paragraphs: &[String]) -> String {
    let name = if candidate.name.trim().is_empty() {
        "Candidate"
    } else {
        candidate.name.as_str()
    };

    let mut parts = vec![format!("Dear {name},")];
    parts.extend(
        paragraphs
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(String::from),
    );
    parts.push(SIGNATURE.to_string());
    parts.join("\n\n")
}

fn compose(
    kind: NotificationKind,
    candidate: &Candidate,
    subject: &str,
    message: String,
) -> Notification {
    let notification = Notification {
        id: prefixed_id("NOT"),
        kind,
        recipient: candidate.email.clone(),
        subject: subject.to_string(),
        message,
        status: SENT.to_string(),
        sent_at: Utc::now(),
    };
    info!(
        notification_id = %notification.id,
        candidate_id = %candidate.id,
        kind = ?kind,
        "Notification composed for {}",
        notification.recipient
    );
    notification
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::models::interview::{
        InterviewStatus, InterviewType, DEFAULT_DURATION_MINUTES, DEFAULT_LOCATION,
    };

    fn candidate() -> Candidate {
        Candidate {
            id: "c1".to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            skills: Default::default(),
            experience: None,
            education: None,
            resume_path: None,
            job_id: None,
            status: CandidateStatus::New,
            review: None,
            final_decision: None,
            created_at: Utc::now(),
        }
    }

    fn interview() -> Interview {
        Interview {
            id: "INT_12345678".to_string(),
            candidate_id: "c1".to_string(),
            job_id: "j1".to_string(),
            scheduled_time: NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap(),
            status: InterviewStatus::Scheduled,
            interview_type: InterviewType::Video,
            duration_minutes: DEFAULT_DURATION_MINUTES,
            location: DEFAULT_LOCATION.to_string(),
            interviewer: None,
            notes: None,
            cancellation_reason: None,
            feedback: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_confirmation_template() {
        let n = interview_confirmation(&candidate(), &interview());
        assert_eq!(n.kind, NotificationKind::InterviewConfirmation);
        assert_eq!(n.recipient, "jane@example.com");
        assert_eq!(n.subject, "Interview Confirmation");
        assert_eq!(n.status, "sent");
        assert!(n.id.starts_with("NOT_"));
        assert!(n.message.starts_with("Dear Jane Doe,\n\n"));
        assert!(n.message.contains("- Date: October 19, 2026"));
        assert!(n.message.contains("- Time: 02:00 PM"));
        assert!(n.message.contains("- Duration: 60 minutes"));
        assert!(n.message.contains("- Location: Virtual Meeting"));
        assert!(n.message.ends_with("Best regards,\nHR Team"));
    }

    #[test]
    fn test_reminder_template() {
        let n = interview_reminder(&candidate(), &interview());
        assert_eq!(n.subject, "Interview Reminder");
        assert!(n.message.contains("friendly reminder"));
    }

    #[test]
    fn test_status_update_uses_status_message() {
        let n = status_update(&candidate(), CandidateStatus::OnHold, None);
        assert!(n.message.contains("currently on hold"));
        let fallback = status_update(&candidate(), CandidateStatus::Pending, None);
        assert!(fallback
            .message
            .contains("Your application status has been updated."));
    }

    #[test]
    fn test_status_update_custom_message_replaces_letter() {
        let n = status_update(&candidate(), CandidateStatus::Approved, Some("See you Monday"));
        assert_eq!(n.message, "See you Monday");
    }

    #[test]
    fn test_hire_decision_formats_salary() {
        let decision = FinalDecision {
            decision: Decision::Hire,
            salary_offer: Some(1_250_000),
            notes: "Start date to follow.".to_string(),
            decided_at: Utc::now(),
        };
        let n = decision_notification(&candidate(), &decision);
        assert_eq!(n.subject, "Application Decision");
        assert!(n.message.contains("Salary Offer: $1,250,000"));
        assert!(n.message.contains("Start date to follow."));
        assert!(n.message.contains("respond within 5 business days"));
    }

    #[test]
    fn test_reject_decision_skips_empty_notes() {
        let decision = FinalDecision {
            decision: Decision::Reject,
            salary_offer: None,
            notes: String::new(),
            decided_at: Utc::now(),
        };
        let n = decision_notification(&candidate(), &decision);
        assert!(n.message.contains("move forward with other candidates"));
        assert!(!n.message.contains("\n\n\n"));
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(85_000), "85,000");
        assert_eq!(format_thousands(1_000_000), "1,000,000");
    }

    #[test]
    fn test_custom_message() {
        let n = custom_message(&candidate(), "Hello", "Body");
        assert_eq!(n.kind, NotificationKind::CustomMessage);
        assert_eq!(n.subject, "Hello");
        assert_eq!(n.message, "Body");
    }
}
