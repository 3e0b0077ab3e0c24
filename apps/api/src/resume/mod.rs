// Resume intake: document text extraction, field heuristics, candidate creation.
// The heuristics are pure; only intake and handlers touch the store or the LLM.

pub mod experience;
pub mod fields;
pub mod handlers;
pub mod intake;
pub mod prompts;
pub mod text;

pub use text::ExtractionError;
