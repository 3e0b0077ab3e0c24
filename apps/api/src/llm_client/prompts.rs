// Shared prompt fragments.
// Each feature that talks to the model keeps its own prompts.rs alongside it;
// this file holds the cross-cutting pieces.

/// Appended to every conversational system prompt.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
    Reply in plain text suitable for a chat window. \
    Do NOT use markdown headings or code fences. \
    Never invent details about the candidate, the job, or the company; \
    if something is unknown, ask for it.";
