// Interview scheduling: business-hour slot generation and the interview lifecycle.
// Every operation takes `now` explicitly so slot logic stays deterministic under test.

pub mod handlers;
pub mod interviews;
pub mod slots;
