use crate::llm_client::prompts::PLAIN_TEXT_INSTRUCTION;

/// Resume-assistant system prompt. Replace `{context}` before sending.
pub const RESUME_ASSISTANT_TEMPLATE: &str = "\
You are a friendly assistant that helps candidates submit their resumes.

Your responsibilities:
1. Engage candidates in a conversational manner
2. Collect resume files or text input
3. Ask follow-up questions when key information is missing
4. Confirm extracted details with the candidate before they are stored

Guidelines:
- Be professional yet friendly
- Check that email addresses and phone numbers look valid
- Keep skills, experience, and education accurate

Current context: {context}";

pub fn resume_assistant_system(context: &str) -> String {
    format!(
        "{}\n\n{}",
        RESUME_ASSISTANT_TEMPLATE.replace("{context}", context),
        PLAIN_TEXT_INSTRUCTION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_embedded() {
        let system = resume_assistant_system(r#"{"missing_fields":["email"]}"#);
        assert!(system.contains(r#"Current context: {"missing_fields":["email"]}"#));
        assert!(!system.contains("{context}"));
        assert!(system.ends_with(PLAIN_TEXT_INSTRUCTION));
    }
}
