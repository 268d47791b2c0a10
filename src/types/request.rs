//! Request Types
//!
//! Call-scoped inputs to the content service. Nothing here is persisted or
//! mutated after construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{ContentError, Result};
use crate::constants::generation::{DEFAULT_SECTION_COUNT, MAX_SECTION_COUNT, MIN_SECTION_COUNT};

// =============================================================================
// Provider Kind
// =============================================================================

/// Supported text-generation providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    Gemini,
    #[serde(rename = "deepseek")]
    DeepSeek,
    Claude,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::OpenAi,
        ProviderKind::Gemini,
        ProviderKind::DeepSeek,
        ProviderKind::Claude,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Claude => "claude",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "gemini" => Ok(ProviderKind::Gemini),
            "deepseek" => Ok(ProviderKind::DeepSeek),
            "claude" => Ok(ProviderKind::Claude),
            _ => Err(ContentError::UnknownProvider(s.to_string())),
        }
    }
}

// =============================================================================
// Generation Options
// =============================================================================

/// Block types the editor schema accepts as a generated section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionType {
    Paragraph,
    Heading,
    BulletList,
    OrderedList,
    TaskList,
    CodeBlock,
    Blockquote,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Paragraph => "paragraph",
            SectionType::Heading => "heading",
            SectionType::BulletList => "bulletList",
            SectionType::OrderedList => "orderedList",
            SectionType::TaskList => "taskList",
            SectionType::CodeBlock => "codeBlock",
            SectionType::Blockquote => "blockquote",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "paragraph" => Ok(SectionType::Paragraph),
            "heading" => Ok(SectionType::Heading),
            "bulletList" => Ok(SectionType::BulletList),
            "orderedList" => Ok(SectionType::OrderedList),
            "taskList" => Ok(SectionType::TaskList),
            "codeBlock" => Ok(SectionType::CodeBlock),
            "blockquote" => Ok(SectionType::Blockquote),
            _ => Err(format!(
                "Unknown section type: {}. Valid values: paragraph, heading, bulletList, orderedList, taskList, codeBlock, blockquote",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SectionLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SectionLength {
    /// Length guidance line for the generation prompt
    pub fn guidance(&self) -> &'static str {
        match self {
            SectionLength::Short => {
                "Keep sections concise (1-2 paragraphs or 3-5 bullet points per section)."
            }
            SectionLength::Medium => {
                "Use moderate length (2-3 paragraphs or 5-8 bullet points per section)."
            }
            SectionLength::Long => {
                "Create detailed sections (4+ paragraphs or 8+ bullet points per section)."
            }
        }
    }
}

impl FromStr for SectionLength {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "short" => Ok(SectionLength::Short),
            "medium" => Ok(SectionLength::Medium),
            "long" => Ok(SectionLength::Long),
            _ => Err(format!(
                "Unknown section length: {}. Valid values: short, medium, long",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Friendly,
    Enthusiastic,
    Humorous,
    Technical,
}

impl Tone {
    /// Tone guidance line for the generation prompt
    pub fn guidance(&self) -> &'static str {
        match self {
            Tone::Professional => {
                "Use formal language and structure appropriate for academic settings."
            }
            Tone::Casual => {
                "Use relaxed, conversational language while maintaining educational value."
            }
            Tone::Friendly => "Maintain a warm, approachable tone with supportive language.",
            Tone::Enthusiastic => {
                "Use dynamic, engaging language with excitement about the topic."
            }
            Tone::Humorous => {
                "Include appropriate humor while maintaining educational integrity."
            }
            Tone::Technical => "Focus on precise terminology and detailed explanations.",
        }
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "professional" => Ok(Tone::Professional),
            "casual" => Ok(Tone::Casual),
            "friendly" => Ok(Tone::Friendly),
            "enthusiastic" => Ok(Tone::Enthusiastic),
            "humorous" => Ok(Tone::Humorous),
            "technical" => Ok(Tone::Technical),
            _ => Err(format!(
                "Unknown tone: {}. Valid values: professional, casual, friendly, enthusiastic, humorous, technical",
                s
            )),
        }
    }
}

/// Shape of the generation result the caller wants back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// HTML fragment ready for the editor's HTML parser
    #[default]
    Html,
    /// Document tree in the editor's JSON schema
    Document,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "document" | "json" => Ok(OutputFormat::Document),
            _ => Err(format!(
                "Unknown output format: {}. Valid values: html, document",
                s
            )),
        }
    }
}

// =============================================================================
// Generation Request
// =============================================================================

/// Structured lecture-generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationRequest {
    pub topic: String,
    pub section_count: u8,
    /// Allowed section types, in the order they are presented to the model
    pub section_types: Vec<SectionType>,
    pub section_length: SectionLength,
    pub tone: Tone,
    pub target_audience: String,
    pub include_header: bool,
    pub include_footer: bool,
    pub include_emojis: bool,
    pub model: ProviderKind,
    pub additional_instructions: String,
    pub output_format: OutputFormat,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            topic: String::new(),
            section_count: DEFAULT_SECTION_COUNT,
            section_types: vec![
                SectionType::Paragraph,
                SectionType::BulletList,
                SectionType::CodeBlock,
            ],
            section_length: SectionLength::default(),
            tone: Tone::default(),
            target_audience: "students".to_string(),
            include_header: true,
            include_footer: false,
            include_emojis: false,
            model: ProviderKind::default(),
            additional_instructions: String::new(),
            output_format: OutputFormat::default(),
        }
    }
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Default::default()
        }
    }

    /// Check request bounds. Returns `ContentError::InvalidRequest` on failure.
    pub fn validate(&self) -> Result<()> {
        if self.topic.trim().is_empty() {
            return Err(ContentError::invalid("topic must not be empty"));
        }

        if !(MIN_SECTION_COUNT..=MAX_SECTION_COUNT).contains(&self.section_count) {
            return Err(ContentError::invalid(format!(
                "section count must be between {} and {}, got {}",
                MIN_SECTION_COUNT, MAX_SECTION_COUNT, self.section_count
            )));
        }

        if self.section_types.is_empty() {
            return Err(ContentError::invalid(
                "at least one section type must be selected",
            ));
        }

        for (i, section_type) in self.section_types.iter().enumerate() {
            if self.section_types[..i].contains(section_type) {
                return Err(ContentError::invalid(format!(
                    "section type '{}' is listed more than once",
                    section_type
                )));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Actions
// =============================================================================

/// Named text transformation
///
/// Selection actions operate on highlighted text; `Doc*` actions rewrite the
/// whole document while keeping its markup. Unknown identifiers are kept
/// verbatim in `Other` so the prompt layer can fall back gracefully.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    Simplify,
    Improve,
    Shorten,
    Expand,
    Translate,
    Rewrite,
    Custom,
    DocImprove,
    DocSimplify,
    DocShorten,
    DocProofread,
    DocTranslate,
    DocCustom,
    Other(String),
}

impl Action {
    /// Selection-scoped actions offered by the bubble menu
    pub const SELECTION: [Action; 6] = [
        Action::Simplify,
        Action::Improve,
        Action::Shorten,
        Action::Expand,
        Action::Translate,
        Action::Rewrite,
    ];

    /// Document-scoped actions offered by the toolbar
    pub const DOCUMENT: [Action; 5] = [
        Action::DocImprove,
        Action::DocSimplify,
        Action::DocShorten,
        Action::DocProofread,
        Action::DocTranslate,
    ];

    pub fn parse(s: &str) -> Self {
        match s {
            "simplify" => Action::Simplify,
            "improve" => Action::Improve,
            "shorten" => Action::Shorten,
            "expand" => Action::Expand,
            "translate" => Action::Translate,
            "rewrite" => Action::Rewrite,
            "custom" | "custom_prompt" => Action::Custom,
            "doc_improve" => Action::DocImprove,
            "doc_simplify" => Action::DocSimplify,
            "doc_shorten" => Action::DocShorten,
            "doc_proofread" => Action::DocProofread,
            "doc_translate" => Action::DocTranslate,
            "doc_custom" => Action::DocCustom,
            other => Action::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Action::Simplify => "simplify",
            Action::Improve => "improve",
            Action::Shorten => "shorten",
            Action::Expand => "expand",
            Action::Translate => "translate",
            Action::Rewrite => "rewrite",
            Action::Custom => "custom",
            Action::DocImprove => "doc_improve",
            Action::DocSimplify => "doc_simplify",
            Action::DocShorten => "doc_shorten",
            Action::DocProofread => "doc_proofread",
            Action::DocTranslate => "doc_translate",
            Action::DocCustom => "doc_custom",
            Action::Other(s) => s,
        }
    }

    /// Whether the action is one of the whole-document variants
    pub fn is_document(&self) -> bool {
        matches!(
            self,
            Action::DocImprove
                | Action::DocSimplify
                | Action::DocShorten
                | Action::DocProofread
                | Action::DocTranslate
                | Action::DocCustom
        )
    }

    /// Whether the caller must supply the instruction text
    pub fn is_custom(&self) -> bool {
        matches!(self, Action::Custom | Action::DocCustom)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Action::parse(s))
    }
}

impl From<String> for Action {
    fn from(s: String) -> Self {
        Action::parse(&s)
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.as_str().to_string()
    }
}

// =============================================================================
// Action Request
// =============================================================================

/// Text-transformation request for a selection or a whole document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub action: Action,
    /// Selected text, or the document's plain text for document actions
    pub text: String,
    pub is_selection_based: bool,
    /// Full document HTML (document actions only)
    #[serde(default)]
    pub html_content: Option<String>,
    #[serde(default)]
    pub model: ProviderKind,
    /// Caller instruction for `custom` / `doc_custom`
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

impl ActionRequest {
    /// Request scoped to a text selection
    pub fn selection(action: Action, text: impl Into<String>) -> Self {
        Self {
            action,
            text: text.into(),
            is_selection_based: true,
            html_content: None,
            model: ProviderKind::default(),
            custom_prompt: None,
        }
    }

    /// Request scoped to the whole document
    pub fn document(action: Action, text: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            action,
            text: text.into(),
            is_selection_based: false,
            html_content: Some(html.into()),
            model: ProviderKind::default(),
            custom_prompt: None,
        }
    }

    pub fn with_model(mut self, model: ProviderKind) -> Self {
        self.model = model;
        self
    }

    pub fn with_custom_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.custom_prompt = Some(prompt.into());
        self
    }

    /// HTML to rewrite, when the request targets the whole document
    pub fn document_html(&self) -> Option<&str> {
        if self.is_selection_based {
            return None;
        }
        self.html_content.as_deref()
    }

    pub fn is_document_scoped(&self) -> bool {
        self.document_html().is_some()
    }

    /// Non-blank caller instruction, if any
    pub fn custom_instruction(&self) -> Option<&str> {
        self.custom_prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        if self.action.is_custom() && self.custom_instruction().is_none() {
            return Err(ContentError::invalid(format!(
                "action '{}' requires a non-empty custom prompt",
                self.action
            )));
        }

        let has_input = match self.document_html() {
            Some(html) => !html.trim().is_empty(),
            None => !self.text.trim().is_empty(),
        };
        if !has_input {
            return Err(ContentError::invalid("No text to process"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;

    #[test]
    fn test_provider_kind_round_trip_names() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.as_str().parse::<ProviderKind>().unwrap(), kind);
        }
        assert_eq!("OpenAI".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
    }

    #[test]
    fn test_unknown_provider_is_configuration_error() {
        let err = "mistral".parse::<ProviderKind>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_section_type_serde_uses_schema_names() {
        let json = serde_json::to_string(&SectionType::BulletList).unwrap();
        assert_eq!(json, "\"bulletList\"");
        assert_eq!(
            "codeBlock".parse::<SectionType>().unwrap(),
            SectionType::CodeBlock
        );
        assert!("table".parse::<SectionType>().is_err());
    }

    #[test]
    fn test_generation_defaults() {
        let req = GenerationRequest::default();
        assert_eq!(req.section_count, 3);
        assert_eq!(req.target_audience, "students");
        assert!(req.include_header);
        assert!(!req.include_footer);
        assert_eq!(req.model, ProviderKind::OpenAi);
    }

    #[test]
    fn test_generation_validation() {
        assert!(GenerationRequest::new("Rust").validate().is_ok());
        assert!(GenerationRequest::new("   ").validate().is_err());

        let mut req = GenerationRequest::new("Rust");
        req.section_count = 0;
        assert!(req.validate().is_err());
        req.section_count = 11;
        assert!(req.validate().is_err());
        req.section_count = 10;
        assert!(req.validate().is_ok());

        req.section_types.clear();
        let err = req.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_duplicate_section_types_rejected() {
        let mut request = GenerationRequest::new("Photosynthesis");
        request.section_types = vec![
            SectionType::Paragraph,
            SectionType::BulletList,
            SectionType::Paragraph,
        ];
        let err = request.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("paragraph"));
    }

    #[test]
    fn test_generation_request_from_camel_case_json() {
        let req: GenerationRequest = serde_json::from_str(
            r#"{"topic":"Cells","sectionCount":2,"sectionTypes":["heading"],"model":"claude"}"#,
        )
        .unwrap();
        assert_eq!(req.section_count, 2);
        assert_eq!(req.section_types, vec![SectionType::Heading]);
        assert_eq!(req.model, ProviderKind::Claude);
        assert_eq!(req.tone, Tone::Professional);
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(Action::parse("simplify"), Action::Simplify);
        assert_eq!(Action::parse("doc_proofread"), Action::DocProofread);
        assert_eq!(
            Action::parse("summon"),
            Action::Other("summon".to_string())
        );
        assert!(Action::DocCustom.is_document());
        assert!(Action::DocCustom.is_custom());
        assert!(!Action::Rewrite.is_document());
        assert_eq!(Action::Other("x".into()).as_str(), "x");
    }

    #[test]
    fn test_custom_requires_prompt() {
        let req = ActionRequest::selection(Action::Custom, "Cells divide.")
            .with_custom_prompt("  ");
        let err = req.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let ok = ActionRequest::selection(Action::Custom, "Cells divide.")
            .with_custom_prompt("Add a pun");
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_document_scope() {
        let doc = ActionRequest::document(Action::DocImprove, "Hi", "<p>Hi</p>");
        assert!(doc.is_document_scoped());

        let mut sel = ActionRequest::selection(Action::Improve, "Hi");
        sel.html_content = Some("<p>Hi</p>".into());
        assert!(!sel.is_document_scoped());
    }

    #[test]
    fn test_empty_input_rejected() {
        let req = ActionRequest::selection(Action::Simplify, "");
        assert!(req.validate().is_err());
        let doc = ActionRequest::document(Action::DocImprove, "text", " ");
        assert!(doc.validate().is_err());
    }
}
