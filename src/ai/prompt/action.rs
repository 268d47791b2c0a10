//! Text action prompts and system instructions.

use super::PromptBuilder;
use crate::types::{Action, ActionRequest};

const ASSISTANT_ROLE: &str = "You are an educational content assistant that helps improve text for lectures and educational materials.";

const STRUCTURE_RULES: [&str; 6] = [
    "Return the COMPLETE HTML with the same structure and tags",
    "Modify ONLY the text content within the HTML tags",
    "Do not add, remove, or change any HTML tags",
    "Do not change any attributes of HTML elements",
    "Maintain all headings, lists, paragraphs and other structural elements",
    "Return only the modified HTML document with no additional commentary",
];

/// Render the user prompt for a text action.
///
/// Document-scoped requests embed the full HTML with preservation rules.
/// Selection requests embed the text in the action's template; unknown
/// actions fall back to a plain passthrough.
pub fn build_action_prompt(request: &ActionRequest) -> String {
    if let Some(html) = request.document_html() {
        return build_document_prompt(request, html);
    }

    let text = request.text.as_str();
    let (instruction, closing) = match &request.action {
        Action::Simplify => (
            "Simplify the following text to make it easier to understand while preserving its educational value:",
            "Provide only the simplified text without additional commentary.",
        ),
        Action::Improve => (
            "Improve the writing quality of the following educational text. Enhance clarity, flow, and engagement while preserving the educational content:",
            "Provide only the improved text without additional commentary.",
        ),
        Action::Shorten => (
            "Make the following educational text more concise while preserving the key information and concepts:",
            "Provide only the shortened text without additional commentary.",
        ),
        Action::Expand => (
            "Expand the following educational text with more details, examples, or explanations to enhance understanding:",
            "Provide only the expanded text without additional commentary.",
        ),
        Action::Translate => (
            "Translate the following educational text to Spanish (if the text appears to already be in Spanish or another non-English language, translate it to English):",
            "Provide only the translated text without additional commentary.",
        ),
        Action::Rewrite => (
            "Rewrite the following educational text to improve engagement while maintaining its educational value. Use a more conversational tone:",
            "Provide only the rewritten text without additional commentary.",
        ),
        Action::Custom | Action::DocCustom => {
            let instruction = request.custom_instruction().unwrap_or_default();
            return format!(
                "{}\n\nApply this to the following text:\n\n{}\n\nProvide only the resulting text without additional commentary.",
                instruction, text
            );
        }
        _ => return format!("Process the following text: {}", text),
    };

    format!("{}\n\n{}\n\n{}", instruction, text, closing)
}

fn build_document_prompt(request: &ActionRequest, html: &str) -> String {
    let description = match (&request.action, request.custom_instruction()) {
        (Action::DocCustom | Action::Custom, Some(instruction)) => instruction.to_string(),
        (action, _) => action_description(action).to_string(),
    };

    PromptBuilder::new()
        .text("I have an educational document in HTML format that needs to be modified according to the specified action.")
        .section("CURRENT HTML STRUCTURE:", html)
        .text(format!("REQUESTED ACTION: {}", description))
        .numbered("IMPORTANT INSTRUCTIONS:", STRUCTURE_RULES)
        .text("Your task is to update the text content while preserving the HTML structure perfectly.")
        .build()
}

/// Human description of a document action
pub fn action_description(action: &Action) -> &'static str {
    match action {
        Action::DocImprove => {
            "Improve the overall writing quality of this document. Enhance clarity, flow, and engagement while preserving the educational content."
        }
        Action::DocSimplify => {
            "Simplify this document to make it easier to understand while preserving its educational value."
        }
        Action::DocShorten => {
            "Create a concise summary of this document while preserving the key information and concepts."
        }
        Action::DocProofread => {
            "Proofread this document and correct any grammar, spelling, or punctuation errors while preserving the content and meaning."
        }
        Action::DocTranslate => {
            "Translate this document to Spanish (if it appears to be in Spanish or another non-English language, translate it to English)."
        }
        _ => "Process this document",
    }
}

/// System instruction for a text action, including the assistant role
pub fn system_instruction(request: &ActionRequest) -> String {
    let task = match &request.action {
        Action::Simplify => {
            "Your task is to transform complex text into simpler, more accessible language while maintaining educational value.".to_string()
        }
        Action::Improve => {
            "Your task is to enhance writing quality, clarity, and engagement of educational text.".to_string()
        }
        Action::Shorten => {
            "Your task is to make text more concise while preserving key educational information.".to_string()
        }
        Action::Expand => {
            "Your task is to extend text with more details, examples, or explanations to enhance understanding.".to_string()
        }
        Action::Translate => {
            "Your task is to accurately translate educational text while preserving meaning and tone.".to_string()
        }
        Action::Rewrite => {
            "Your task is to transform text to be more engaging while maintaining educational value.".to_string()
        }
        Action::DocImprove => {
            "Your task is to enhance the overall quality, clarity, and engagement of educational documents while preserving the exact HTML structure.".to_string()
        }
        Action::DocSimplify => {
            "Your task is to make educational documents more accessible while preserving learning objectives and the exact HTML structure.".to_string()
        }
        Action::DocShorten => {
            "Your task is to create concise summaries of educational documents that capture key points while maintaining the exact HTML structure.".to_string()
        }
        Action::DocProofread => {
            "Your task is to correct grammar, spelling, and punctuation while preserving content, meaning, and the exact HTML structure.".to_string()
        }
        Action::DocTranslate => {
            "Your task is to translate educational documents while preserving structure, meaning, and tone.".to_string()
        }
        Action::Custom | Action::DocCustom => format!(
            "You are an expert language model. Perform the following task on the input text based on the user's instruction:\n\"{}\"\nEnsure your response aligns precisely with the user's intent while maintaining clarity and coherence.",
            request.custom_instruction().unwrap_or_default()
        ),
        Action::Other(_) => {
            "When working with HTML content, maintain the exact same HTML structure, modifying only the text content within tags.".to_string()
        }
    };

    format!("{} {}", ASSISTANT_ROLE, task)
}
