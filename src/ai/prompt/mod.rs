//! Prompt Builder System
//!
//! Provider-agnostic prompt construction for both flows:
//!
//! - [`build_generation_prompt`]: structured lecture generation
//! - [`build_action_prompt`] / [`system_instruction`]: text actions on a
//!   selection or a whole HTML document
//!
//! Every builder here is a pure function of its input. Sections are rendered
//! in insertion order, so the same request always yields the same bytes.

mod action;
mod generation;

pub use action::{action_description, build_action_prompt, system_instruction};
pub use generation::{
    GENERATION_SYSTEM_PROMPT, build_generation_prompt, generation_system_prompt,
};

/// Prompt section types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSection {
    /// Raw text section with optional header
    Text {
        header: Option<String>,
        content: String,
    },
    /// Dash-prefixed list under a header
    Bullets { header: String, items: Vec<String> },
    /// Numbered list under a header
    Numbered { header: String, items: Vec<String> },
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add text section
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.sections.push(PromptSection::Text {
            header: None,
            content: content.into(),
        });
        self
    }

    /// Add text section with header
    pub fn section(mut self, header: &str, content: impl Into<String>) -> Self {
        self.sections.push(PromptSection::Text {
            header: Some(header.to_string()),
            content: content.into(),
        });
        self
    }

    /// Add bullet list; empty items are dropped
    pub fn bullets<I, S>(mut self, header: &str, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections.push(PromptSection::Bullets {
            header: header.to_string(),
            items: non_empty(items),
        });
        self
    }

    /// Add numbered list
    pub fn numbered<I, S>(mut self, header: &str, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections.push(PromptSection::Numbered {
            header: header.to_string(),
            items: non_empty(items),
        });
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Text { header, content } => {
                    if let Some(h) = header {
                        prompt.push_str(&h);
                        prompt.push('\n');
                    }
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
                PromptSection::Bullets { header, items } => {
                    prompt.push_str(&header);
                    prompt.push('\n');
                    for item in items {
                        prompt.push_str(&format!("- {}\n", item));
                    }
                    prompt.push('\n');
                }
                PromptSection::Numbered { header, items } => {
                    prompt.push_str(&header);
                    prompt.push('\n');
                    for (i, item) in items.iter().enumerate() {
                        prompt.push_str(&format!("{}. {}\n", i + 1, item));
                    }
                    prompt.push('\n');
                }
            }
        }

        prompt.trim_end().to_string()
    }
}

fn non_empty<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items
        .into_iter()
        .map(Into::into)
        .filter(|s: &String| !s.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_renders_in_order() {
        let prompt = PromptBuilder::new()
            .text("Intro line.")
            .bullets("Rules:", ["first", "", "second"])
            .numbered("Steps:", ["one", "two"])
            .section("TAIL:", "done")
            .build();

        assert_eq!(
            prompt,
            "Intro line.\n\nRules:\n- first\n- second\n\nSteps:\n1. one\n2. two\n\nTAIL:\ndone"
        );
    }

    #[test]
    fn test_empty_builder() {
        assert_eq!(PromptBuilder::new().build(), "");
    }
}
