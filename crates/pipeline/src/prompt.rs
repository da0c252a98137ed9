//! Prompt construction.
//!
//! Deterministic concatenation: persona block, assembled context labeled as
//! a knowledge base, the student's question (original un-normalized text for
//! readability), and a fixed closing instruction. The only variation is a
//! cosmetic style hint keyed on question length.

/// Word count above which the style hint asks for a detailed answer.
const DETAILED_THRESHOLD: usize = 8;

/// Builds completion-service prompts from a fixed persona.
pub struct PromptBuilder {
    persona: String,
}

impl PromptBuilder {
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
        }
    }

    /// Merge persona, context, and question into a single prompt.
    pub fn build(&self, question: &str, context: &str) -> String {
        let style = if question.split_whitespace().count() > DETAILED_THRESHOLD {
            "comprehensive and detailed"
        } else {
            "clear and focused"
        };

        format!(
            "{persona}\n\n\
             CONVERSATION CONTEXT:\n\
             You are assisting a prospective student with university admission queries. \
             Provide helpful, accurate, and encouraging responses.\n\n\
             KNOWLEDGE BASE:\n\
             {context}\n\n\
             STUDENT'S QUESTION: \"{question}\"\n\n\
             RESPONSE GUIDELINES:\n\
             - Style: {style}\n\
             - Start with a direct answer to the specific question\n\
             - Provide specific details (numbers, dates, requirements) when available\n\
             - Structure information with bullet points or numbered lists for clarity\n\
             - Include practical next steps or actionable advice\n\
             - If information is incomplete, guide the student to official sources\n\
             - End with an encouraging note and an offer to help with related questions",
            persona = self.persona,
            context = context,
            question = question,
            style = style,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> PromptBuilder {
        PromptBuilder::new("You are an admission counselor.")
    }

    #[test]
    fn prompt_sections_in_order() {
        let prompt = builder().build("What are the fees?", "Fee Structure Information: {}");

        let persona_pos = prompt.find("admission counselor").unwrap();
        let kb_pos = prompt.find("KNOWLEDGE BASE:").unwrap();
        let question_pos = prompt.find("STUDENT'S QUESTION:").unwrap();
        let guidelines_pos = prompt.find("RESPONSE GUIDELINES:").unwrap();

        assert!(persona_pos < kb_pos);
        assert!(kb_pos < question_pos);
        assert!(question_pos < guidelines_pos);
    }

    #[test]
    fn question_appears_verbatim() {
        let prompt = builder().build("What is the fee structure for B.Tech?", "");
        assert!(prompt.contains("\"What is the fee structure for B.Tech?\""));
    }

    #[test]
    fn short_question_gets_concise_hint() {
        let prompt = builder().build("What are the fees?", "");
        assert!(prompt.contains("clear and focused"));
        assert!(!prompt.contains("comprehensive and detailed"));
    }

    #[test]
    fn long_question_gets_detailed_hint() {
        let prompt = builder().build(
            "Can you explain the complete admission process including eligibility and important dates?",
            "",
        );
        assert!(prompt.contains("comprehensive and detailed"));
    }

    #[test]
    fn deterministic_output() {
        let b = builder();
        let a = b.build("hostel fees?", "context block");
        let c = b.build("hostel fees?", "context block");
        assert_eq!(a, c);
    }
}
