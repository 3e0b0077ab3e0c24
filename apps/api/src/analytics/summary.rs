//! Aggregate counters over the whole store.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::candidate::{Candidate, CandidateStatus, Decision};
use crate::models::interview::{Interview, InterviewStatus};
use crate::models::job::{Job, JobStatus};
use crate::models::title_case;

const UNKNOWN_DEPARTMENT: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_candidates: usize,
    pub active_jobs: usize,
    pub scheduled_interviews: usize,
    /// Candidates nobody has looked at yet.
    pub pending_reviews: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub total_candidates: usize,
    pub total_jobs: usize,
    pub total_interviews: usize,
    pub hired_candidates: usize,
    pub candidate_status_distribution: BTreeMap<String, usize>,
    pub jobs_by_department: BTreeMap<String, usize>,
    pub interview_status_distribution: BTreeMap<String, usize>,
}

pub fn dashboard_stats(
    candidates: &[Candidate],
    jobs: &[Job],
    interviews: &[Interview],
) -> DashboardStats {
    DashboardStats {
        total_candidates: candidates.len(),
        active_jobs: jobs.iter().filter(|j| j.status == JobStatus::Active).count(),
        scheduled_interviews: interviews
            .iter()
            .filter(|i| i.status == InterviewStatus::Scheduled)
            .count(),
        pending_reviews: candidates
            .iter()
            .filter(|c| c.status == CandidateStatus::New)
            .count(),
    }
}

fn tally<'a>(labels: impl Iterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label.to_string()).or_default() += 1;
    }
    counts
}

pub fn summarize(candidates: &[Candidate], jobs: &[Job], interviews: &[Interview]) -> AnalyticsSummary {
    AnalyticsSummary {
        total_candidates: candidates.len(),
        total_jobs: jobs.len(),
        total_interviews: interviews.len(),
        hired_candidates: candidates
            .iter()
            .filter(|c| matches!(&c.final_decision, Some(d) if d.decision == Decision::Hire))
            .count(),
        candidate_status_distribution: tally(candidates.iter().map(|c| c.status.as_str())),
        jobs_by_department: tally(jobs.iter().map(|j| {
            let department = j.department.trim();
            if department.is_empty() {
                UNKNOWN_DEPARTMENT
            } else {
                department
            }
        })),
        interview_status_distribution: tally(interviews.iter().map(|i| i.status.as_str())),
    }
}

/// Plain-text report. Sections with no data are left out.
pub fn recruitment_report(summary: &AnalyticsSummary, generated_at: NaiveDateTime) -> String {
    let rule = "-".repeat(20);
    let mut lines = vec![
        "RECRUITMENT REPORT".to_string(),
        "=".repeat(50),
        format!("Generated on: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        String::new(),
        "SUMMARY".to_string(),
        rule.clone(),
        format!("Total Candidates: {}", summary.total_candidates),
        format!("Total Jobs: {}", summary.total_jobs),
        format!("Total Interviews: {}", summary.total_interviews),
        String::new(),
    ];

    if !summary.candidate_status_distribution.is_empty() {
        lines.push("CANDIDATE ANALYSIS".to_string());
        lines.push(rule.clone());
        for (status, count) in &summary.candidate_status_distribution {
            lines.push(format!("{}: {count}", title_case(status)));
        }
        lines.push(String::new());
    }

    if !summary.jobs_by_department.is_empty() {
        lines.push("JOB ANALYSIS".to_string());
        lines.push(rule.clone());
        for (department, count) in &summary.jobs_by_department {
            lines.push(format!("{department}: {count} jobs"));
        }
        lines.push(String::new());
    }

    if !summary.interview_status_distribution.is_empty() {
        lines.push("INTERVIEW SUMMARY".to_string());
        lines.push(rule);
        for (status, count) in &summary.interview_status_distribution {
            lines.push(format!("{}: {count}", title_case(status)));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::models::candidate::FinalDecision;
    use crate::models::interview::InterviewType;
    use crate::models::job::ExperienceLevel;

    fn candidate(id: &str, status: CandidateStatus, hired: bool) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: id.to_string(),
            email: String::new(),
            phone: None,
            skills: Default::default(),
            experience: None,
            education: None,
            resume_path: None,
            job_id: None,
            status,
            review: None,
            final_decision: hired.then(|| FinalDecision {
                decision: Decision::Hire,
                salary_offer: None,
                notes: String::new(),
                decided_at: Utc::now(),
            }),
            created_at: Utc::now(),
        }
    }

    fn job(id: &str, department: &str, status: JobStatus) -> Job {
        Job {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            requirements: vec![],
            skills_required: vec![],
            experience_level: ExperienceLevel::Entry,
            department: department.to_string(),
            status,
            created_at: Utc::now(),
        }
    }

    fn interview(id: &str, status: InterviewStatus) -> Interview {
        Interview {
            id: id.to_string(),
            candidate_id: "c1".to_string(),
            job_id: "j1".to_string(),
            scheduled_time: NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
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

    fn fixture() -> (Vec<Candidate>, Vec<Job>, Vec<Interview>) {
        (
            vec![
                candidate("a", CandidateStatus::New, false),
                candidate("b", CandidateStatus::New, false),
                candidate("c", CandidateStatus::InterviewRequired, false),
                candidate("d", CandidateStatus::Hired, true),
            ],
            vec![
                job("j1", "Engineering", JobStatus::Active),
                job("j2", "Engineering", JobStatus::Closed),
                job("j3", "", JobStatus::Active),
            ],
            vec![
                interview("i1", InterviewStatus::Scheduled),
                interview("i2", InterviewStatus::Cancelled),
            ],
        )
    }

    #[test]
    fn test_dashboard_counts() {
        let (candidates, jobs, interviews) = fixture();
        assert_eq!(
            dashboard_stats(&candidates, &jobs, &interviews),
            DashboardStats {
                total_candidates: 4,
                active_jobs: 2,
                scheduled_interviews: 1,
                pending_reviews: 2,
            }
        );
    }

    #[test]
    fn test_summary_distributions() {
        let (candidates, jobs, interviews) = fixture();
        let summary = summarize(&candidates, &jobs, &interviews);
        assert_eq!(summary.hired_candidates, 1);
        assert_eq!(summary.candidate_status_distribution["new"], 2);
        assert_eq!(summary.candidate_status_distribution["interview_required"], 1);
        assert_eq!(summary.jobs_by_department["Engineering"], 2);
        assert_eq!(summary.jobs_by_department["Unknown"], 1);
        assert_eq!(summary.interview_status_distribution["cancelled"], 1);
    }

    #[test]
    fn test_report_layout() {
        let (candidates, jobs, interviews) = fixture();
        let summary = summarize(&candidates, &jobs, &interviews);
        let at = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(8, 5, 0)
            .unwrap();
        let report = recruitment_report(&summary, at);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "RECRUITMENT REPORT");
        assert_eq!(lines[1], "=".repeat(50));
        assert_eq!(lines[2], "Generated on: 2026-10-18 08:05:00");
        assert!(report.contains("Total Candidates: 4\nTotal Jobs: 3\nTotal Interviews: 2"));
        assert!(report.contains("Interview Required: 1"));
        assert!(report.contains("Engineering: 2 jobs"));
        assert!(report.ends_with("INTERVIEW SUMMARY\n--------------------\nCancelled: 1\nScheduled: 1"));
    }

    #[test]
    fn test_report_skips_empty_sections() {
        let summary = summarize(&[], &[], &[]);
        let at = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let report = recruitment_report(&summary, at);
        assert!(report.contains("Total Interviews: 0"));
        assert!(!report.contains("CANDIDATE ANALYSIS"));
        assert!(!report.contains("INTERVIEW SUMMARY"));
    }
}
