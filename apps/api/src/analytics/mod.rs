// Recruitment analytics: dashboard counters, summaries and the plain-text report.

pub mod handlers;
pub mod summary;
