//! Lecture generation prompt.

use super::PromptBuilder;
use crate::types::{GenerationRequest, OutputFormat};

/// System prompt for the generate flow
pub const GENERATION_SYSTEM_PROMPT: &str = "You are an educational content creator specialized in creating engaging lecture content. Your task is to generate well-structured educational material in clean HTML based on the prompt below.";

const DOCUMENT_SYSTEM_PROMPT: &str = "You are an educational content creator specialized in creating engaging lecture content. Your task is to generate well-structured educational material as a JSON document for a rich text editor based on the prompt below.";

/// System prompt matching the requested output format
pub fn generation_system_prompt(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Html => GENERATION_SYSTEM_PROMPT,
        OutputFormat::Document => DOCUMENT_SYSTEM_PROMPT,
    }
}

const HTML_FORMAT_RULES: [&str; 9] = [
    "Use semantic HTML tags: <h1> for main title, <h2> for section headers, <h3> for subsections",
    "Use <p> for paragraphs, <ul>/<ol> with <li> for lists",
    "Create clean bullet points without quotes or full italics - format list items naturally",
    "Use <strong> for bold text, <em> for emphasis (but do not italicize entire bullet points)",
    "Use <blockquote> for quotes or important callouts",
    "For code examples, use <pre><code>...</code></pre>",
    "Keep the HTML structure clean and simple",
    "Do not include any explanations or markdown - just the HTML content",
    "Do not include <!DOCTYPE>, <html>, <head>, or <body> tags",
];

const DOCUMENT_FORMAT_RULES: [&str; 7] = [
    "The root object must be {\"type\": \"doc\", \"content\": [...]}",
    "Block nodes: heading (attrs.level 1-3), paragraph, bulletList, orderedList, taskList, listItem, taskItem (attrs.checked), codeBlock (attrs.language), blockquote, horizontalRule",
    "Inline text is {\"type\": \"text\", \"text\": \"...\"} with optional marks: bold, italic, code",
    "Separate sections with a horizontalRule node",
    "Every listItem and taskItem wraps its text in a paragraph node",
    "Do not wrap the JSON in markdown code fences",
    "Do not include any explanations - just the JSON object",
];

/// Render the lecture-generation prompt.
///
/// Pure function of the request: section types keep the caller's order and
/// the additional-instructions line is omitted when blank.
pub fn build_generation_prompt(request: &GenerationRequest) -> String {
    let audience = request.target_audience.trim();
    let types = request
        .section_types
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let structure = [
        format!("Create exactly {} content sections", request.section_count),
        format!("Include a mix of these section types: {}", types),
        if request.include_header {
            "Include an engaging header/introduction section".to_string()
        } else {
            "Skip the header/introduction".to_string()
        },
        if request.include_footer {
            "Include a summary/conclusion section".to_string()
        } else {
            "Skip the summary/conclusion".to_string()
        },
        if request.include_emojis {
            "Include relevant emojis to make the content engaging".to_string()
        } else {
            "Do not include emojis".to_string()
        },
        match request.output_format {
            OutputFormat::Html => {
                "Insert a thin horizontal line (<hr>) between each section for better visual separation"
                    .to_string()
            }
            OutputFormat::Document => {
                "Insert a horizontal rule between each section for better visual separation"
                    .to_string()
            }
        },
    ];

    let additional = request.additional_instructions.trim();
    let guidelines = [
        request.section_length.guidance().to_string(),
        request.tone.guidance().to_string(),
        format!("Target audience: {}", audience),
        if additional.is_empty() {
            String::new()
        } else {
            format!("Additional instructions: {}", additional)
        },
    ];

    let builder = PromptBuilder::new()
        .text(format!(
            "Create an educational lecture on \"{}\" for {}.",
            request.topic.trim(),
            audience
        ))
        .bullets("Structure:", structure)
        .bullets("Content guidelines:", guidelines);

    match request.output_format {
        OutputFormat::Html => builder
            .bullets(
                "IMPORTANT FORMAT INSTRUCTIONS:\nReturn your response as clean HTML that can be directly used in a rich text editor.",
                HTML_FORMAT_RULES,
            )
            .build(),
        OutputFormat::Document => builder
            .bullets(
                "IMPORTANT FORMAT INSTRUCTIONS:\nReturn your response as a single JSON object in the rich text editor's document format.",
                DOCUMENT_FORMAT_RULES,
            )
            .build(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProviderKind, SectionLength, SectionType, Tone};
    use proptest::prelude::*;

    fn photosynthesis() -> GenerationRequest {
        GenerationRequest {
            topic: "Photosynthesis".to_string(),
            section_count: 3,
            section_types: vec![SectionType::Paragraph, SectionType::BulletList],
            tone: Tone::Professional,
            model: ProviderKind::OpenAi,
            ..Default::default()
        }
    }

    #[test]
    fn test_structural_directives() {
        let prompt = build_generation_prompt(&photosynthesis());

        assert!(prompt.contains("exactly 3 content sections"));
        assert!(prompt.contains("paragraph, bulletList"));
        assert!(prompt.contains("\"Photosynthesis\" for students"));
        assert!(prompt.contains("Include an engaging header/introduction section"));
        assert!(prompt.contains("Skip the summary/conclusion"));
        assert!(prompt.contains("Do not include emojis"));
        assert!(prompt.contains("<hr>"));
    }

    #[test]
    fn test_guidance_and_format_block() {
        let mut req = photosynthesis();
        req.section_length = SectionLength::Long;
        req.tone = Tone::Humorous;
        let prompt = build_generation_prompt(&req);

        assert!(prompt.contains("Create detailed sections (4+ paragraphs"));
        assert!(prompt.contains("Include appropriate humor"));
        assert!(prompt.contains("Do not include <!DOCTYPE>, <html>, <head>, or <body> tags"));
        assert!(prompt.contains("<pre><code>...</code></pre>"));
    }

    #[test]
    fn test_additional_instructions_only_when_present() {
        let mut req = photosynthesis();
        let prompt = build_generation_prompt(&req);
        assert!(!prompt.contains("Additional instructions"));

        req.additional_instructions = "Mention chlorophyll".to_string();
        let prompt = build_generation_prompt(&req);
        assert!(prompt.contains("- Additional instructions: Mention chlorophyll"));
    }

    #[test]
    fn test_toggles() {
        let mut req = photosynthesis();
        req.include_header = false;
        req.include_footer = true;
        req.include_emojis = true;
        let prompt = build_generation_prompt(&req);

        assert!(prompt.contains("Skip the header/introduction"));
        assert!(prompt.contains("Include a summary/conclusion section"));
        assert!(prompt.contains("Include relevant emojis"));
    }

    #[test]
    fn test_document_format_swaps_output_block() {
        let mut req = photosynthesis();
        req.output_format = OutputFormat::Document;
        let prompt = build_generation_prompt(&req);

        assert!(prompt.contains("\"type\": \"doc\""));
        assert!(!prompt.contains("clean HTML"));
        assert!(prompt.contains("exactly 3 content sections"));
        assert!(generation_system_prompt(OutputFormat::Document).contains("JSON document"));
    }

    proptest! {
        #[test]
        fn prop_generation_prompt_is_deterministic(
            topic in "[A-Za-z ]{1,40}",
            count in 1u8..=10,
            emojis in any::<bool>(),
        ) {
            let req = GenerationRequest {
                topic,
                section_count: count,
                include_emojis: emojis,
                ..Default::default()
            };
            let first = build_generation_prompt(&req);
            let second = build_generation_prompt(&req.clone());
            prop_assert_eq!(&first, &second);
            let expected = format!("exactly {} content sections", count);
            prop_assert!(first.contains(&expected));
        }
    }
}
