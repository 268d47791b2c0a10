//! Global Constants
//!
//! Centralized constants for provider wiring and request tuning.

/// Provider endpoints and defaults
pub mod provider {
    pub const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
    pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4-turbo";

    /// Gemini puts the model in the path and the API key in the `key` query parameter
    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
    pub const GEMINI_DEFAULT_MODEL: &str = "gemini-2.0-flash";

    pub const DEEPSEEK_ENDPOINT: &str = "https://api.deepseek.com/v1/chat/completions";
    pub const DEEPSEEK_DEFAULT_MODEL: &str = "deepseek-chat";

    pub const CLAUDE_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
    pub const CLAUDE_DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";
    pub const ANTHROPIC_VERSION: &str = "2023-06-01";
}

/// Sampling and length parameters
pub mod sampling {
    /// Temperature used by both flows
    pub const DEFAULT_TEMPERATURE: f64 = 0.7;

    /// `max_tokens` sent with text-action requests
    pub const ACTION_MAX_TOKENS: u32 = 1500;

    /// Claude rejects requests without `max_tokens`
    pub const CLAUDE_MAX_TOKENS: u32 = 4000;
}

/// Generation request bounds
pub mod generation {
    pub const MIN_SECTION_COUNT: u8 = 1;
    pub const MAX_SECTION_COUNT: u8 = 10;
    pub const DEFAULT_SECTION_COUNT: u8 = 3;
}

/// Environment variable names
pub mod env {
    /// Prefix for nested config overrides, e.g. `QUILLCRAFT_GENERATION__TEMPERATURE`
    pub const CONFIG_PREFIX: &str = "QUILLCRAFT_";

    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    pub const DEEPSEEK_API_KEY: &str = "DEEPSEEK_API_KEY";
    pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
}
