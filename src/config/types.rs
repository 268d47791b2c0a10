//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/quillcraft/) and project (.quillcraft/) level configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{provider as p, sampling};
use crate::types::{ContentError, ProviderKind, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Provider used when a request does not name one
    pub default_provider: ProviderKind,

    /// Sampling and transport settings shared by every provider
    pub generation: GenerationSettings,

    /// Per-provider credentials and overrides
    pub providers: ProvidersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            default_provider: ProviderKind::OpenAi,
            generation: GenerationSettings::default(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `ContentError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(ContentError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.generation.temperature
            )));
        }

        if self.generation.timeout_secs == Some(0) {
            return Err(ContentError::Config(
                "timeout_secs must be greater than 0 when set".to_string(),
            ));
        }

        if self.generation.action_max_tokens == 0 || self.generation.claude_max_tokens == 0 {
            return Err(ContentError::Config(
                "max token limits must be greater than 0".to_string(),
            ));
        }

        for kind in ProviderKind::ALL {
            if let Some(endpoint) = &self.providers.get(kind).endpoint {
                url::Url::parse(endpoint).map_err(|e| {
                    ContentError::Config(format!(
                        "invalid {} endpoint '{}': {}",
                        kind, endpoint, e
                    ))
                })?;
            }
        }

        Ok(())
    }
}

// =============================================================================
// Generation Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Sampling temperature for every request
    pub temperature: f64,

    /// `max_tokens` for text actions
    pub action_max_tokens: u32,

    /// `max_tokens` for Claude generation requests (the API requires one)
    pub claude_max_tokens: u32,

    /// HTTP timeout; the client default applies when unset
    pub timeout_secs: Option<u64>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: sampling::DEFAULT_TEMPERATURE,
            action_max_tokens: sampling::ACTION_MAX_TOKENS,
            claude_max_tokens: sampling::CLAUDE_MAX_TOKENS,
            timeout_secs: None,
        }
    }
}

// =============================================================================
// Provider Settings
// =============================================================================

/// Settings for one provider
///
/// The API key is never serialized and is redacted in debug output.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Endpoint override (Gemini: the models base URL)
    pub endpoint: Option<String>,

    /// Model override
    pub model: Option<String>,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}

impl ProviderSettings {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub openai: ProviderSettings,
    pub gemini: ProviderSettings,
    pub deepseek: ProviderSettings,
    pub claude: ProviderSettings,
}

impl ProvidersConfig {
    pub fn get(&self, kind: ProviderKind) -> &ProviderSettings {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::DeepSeek => &self.deepseek,
            ProviderKind::Claude => &self.claude,
        }
    }

    pub fn get_mut(&mut self, kind: ProviderKind) -> &mut ProviderSettings {
        match kind {
            ProviderKind::OpenAi => &mut self.openai,
            ProviderKind::Gemini => &mut self.gemini,
            ProviderKind::DeepSeek => &mut self.deepseek,
            ProviderKind::Claude => &mut self.claude,
        }
    }
}

/// Built-in endpoint and model for a provider
pub fn builtin_defaults(kind: ProviderKind) -> (&'static str, &'static str) {
    match kind {
        ProviderKind::OpenAi => (p::OPENAI_ENDPOINT, p::OPENAI_DEFAULT_MODEL),
        ProviderKind::Gemini => (p::GEMINI_API_BASE, p::GEMINI_DEFAULT_MODEL),
        ProviderKind::DeepSeek => (p::DEEPSEEK_ENDPOINT, p::DEEPSEEK_DEFAULT_MODEL),
        ProviderKind::Claude => (p::CLAUDE_ENDPOINT, p::CLAUDE_DEFAULT_MODEL),
    }
}

// =============================================================================
// Tests
// =============================================================================
