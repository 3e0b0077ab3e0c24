// Candidate screening: weighted match scoring, ranking and hard-constraint filtering.
// Pure and synchronous. Handlers load records from the store and call in here.

pub mod filter;
pub mod handlers;
pub mod scoring;
