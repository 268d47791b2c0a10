//! AI Integration Layer
//!
//! Prompt construction, provider request formatting, response extraction and
//! sanitization, tied together by [`ContentService`].

pub mod document;
pub mod prompt;
pub mod provider;
pub mod sanitize;
pub mod service;

pub use document::{DocNode, Mark, parse_document};
pub use prompt::{
    GENERATION_SYSTEM_PROMPT, PromptBuilder, PromptSection, build_action_prompt,
    build_generation_prompt, generation_system_prompt, system_instruction,
};
pub use provider::{
    Endpoint, Provider, ProviderRegistry, ProviderSpec, RequestFormat, RequestOptions,
};
pub use sanitize::{sanitize_html, strip_json_fences};
pub use service::{ContentBackend, ContentService, FlowStage, GenerationResult};
