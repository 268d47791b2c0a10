//! LLM Provider Abstraction
//!
//! Each supported provider is one variant of the closed [`Provider`] enum.
//! Every variant implements the same two operations, shaping a request
//! envelope and pulling generated text back out of the response, through
//! [`RequestFormat`]. Variants are selected once, when the
//! [`ProviderRegistry`] is built from configuration.
//!
//! ## Modules
//!
//! - `openai`: Chat Completions format (OpenAI, DeepSeek)
//! - `gemini`: single-content generateContent format
//! - `claude`: Anthropic Messages format
//! - `registry`: endpoints, credentials and headers per provider

mod claude;
mod gemini;
mod openai;
mod registry;

pub use claude::ClaudeMessages;
pub use gemini::GeminiContents;
pub use openai::ChatCompletions;
pub use registry::{Endpoint, ProviderRegistry, ProviderSpec};

use serde_json::Value;

use crate::types::{ProviderKind, Result};

// =============================================================================
// Request Options
// =============================================================================

/// Sampling parameters attached to one request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestOptions {
    pub temperature: f64,
    /// Omitted from chat requests when `None`; Claude falls back to its default
    pub max_tokens: Option<u32>,
}

impl RequestOptions {
    pub fn new(temperature: f64) -> Self {
        Self {
            temperature,
            max_tokens: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

// =============================================================================
// Request Format Trait
// =============================================================================

/// Provider-specific wire format
pub trait RequestFormat: Send + Sync {
    /// Shape the provider-agnostic instruction and prompt into the provider's JSON body
    fn format_request(&self, system: &str, prompt: &str, options: &RequestOptions) -> Result<Value>;

    /// Pull generated text out of a response body; `""` when the path is missing
    fn extract_text(&self, body: &Value) -> String;

    /// Model name sent with (or routed by) the request
    fn model(&self) -> &str;
}

// =============================================================================
// Provider
// =============================================================================

/// Closed set of supported providers
#[derive(Debug, Clone)]
pub enum Provider {
    OpenAi(ChatCompletions),
    Gemini(GeminiContents),
    DeepSeek(ChatCompletions),
    Claude(ClaudeMessages),
}

impl Provider {
    /// Build the variant for `kind` bound to `model`
    pub fn new(kind: ProviderKind, model: impl Into<String>, claude_max_tokens: u32) -> Self {
        match kind {
            ProviderKind::OpenAi => Provider::OpenAi(ChatCompletions::new(model)),
            ProviderKind::Gemini => Provider::Gemini(GeminiContents::new(model)),
            ProviderKind::DeepSeek => Provider::DeepSeek(ChatCompletions::new(model)),
            ProviderKind::Claude => {
                Provider::Claude(ClaudeMessages::new(model, claude_max_tokens))
            }
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            Provider::OpenAi(_) => ProviderKind::OpenAi,
            Provider::Gemini(_) => ProviderKind::Gemini,
            Provider::DeepSeek(_) => ProviderKind::DeepSeek,
            Provider::Claude(_) => ProviderKind::Claude,
        }
    }

    fn format(&self) -> &dyn RequestFormat {
        match self {
            Provider::OpenAi(f) | Provider::DeepSeek(f) => f as &dyn RequestFormat,
            Provider::Gemini(f) => f,
            Provider::Claude(f) => f,
        }
    }

    pub fn format_request(&self, system: &str, prompt: &str, options: &RequestOptions) -> Result<Value> {
        self.format().format_request(system, prompt, options)
    }

    pub fn extract_text(&self, body: &Value) -> String {
        self.format().extract_text(body)
    }

    pub fn model(&self) -> &str {
        self.format().model()
    }
}
