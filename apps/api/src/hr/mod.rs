// HR workflow: candidate presentation, review actions, final decisions and reports.

pub mod handlers;
pub mod review;
