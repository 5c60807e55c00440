//! Builds the Q/A completion prompt.
//!
//! The utterance is framed as a question and the answer line is seeded with
//! a persona hint, so the model completes the `A:` line in character and the
//! `"\n"` stop sequence ends generation at the end of that line:
//!
//! ```text
//! Q: What time is it
//! A: (But add a hint of snark and sarcasm)
//! ```

/// Builds completion prompts around a fixed persona hint.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    persona: String,
}

impl PromptBuilder {
    /// `persona` is placed after `A:`; pass an empty string for a neutral
    /// assistant.
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
        }
    }

    /// Wrap `utterance` in the Q/A frame.
    pub fn build(&self, utterance: &str) -> String {
        if self.persona.is_empty() {
            format!("Q: {utterance}\nA:")
        } else {
            format!("Q: {utterance}\nA: {}", self.persona)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_the_utterance_with_persona() {
        let builder = PromptBuilder::new("(But add a hint of snark and sarcasm)");
        assert_eq!(
            builder.build("What time is it"),
            "Q: What time is it\nA: (But add a hint of snark and sarcasm)"
        );
    }

    #[test]
    fn empty_persona_leaves_a_bare_answer_line() {
        let builder = PromptBuilder::new("");
        assert_eq!(builder.build("hello"), "Q: hello\nA:");
    }

    #[test]
    fn utterance_is_passed_through_verbatim() {
        let builder = PromptBuilder::new("x");
        let prompt = builder.build("is  spacing   kept?");
        assert!(prompt.contains("is  spacing   kept?"));
    }
}
