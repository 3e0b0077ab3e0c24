// Job postings: creation, listing and status changes.

pub mod handlers;
pub mod postings;
