//! Unified Error Type System
//!
//! Centralized error type for the content service.
//!
//! ## Error Kinds
//!
//! - **Configuration**: Unknown provider/action, invalid request, missing key
//! - **Network**: The request never completed
//! - **Provider**: Non-2xx response from the provider
//! - **Parse**: Response body unusable (not JSON, empty text, bad document)
//!
//! Every error is scoped to a single call. Nothing here is retried.

use thiserror::Error;

use super::request::ProviderKind;

// =============================================================================
// Error Kinds
// =============================================================================

/// Coarse error tag surfaced to callers for user-facing messaging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Programmer or setup error - should not occur in correctly wired callers
    Configuration,
    /// Transport failure before a response arrived
    Network,
    /// Provider answered with a failure status
    Provider,
    /// Provider answered but the payload is unusable
    Parse,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Network => write!(f, "NETWORK"),
            Self::Provider => write!(f, "PROVIDER"),
            Self::Parse => write!(f, "PARSE"),
        }
    }
}

impl ErrorKind {
    /// Whether the message can be shown to an end user as-is.
    ///
    /// Configuration errors point at wiring mistakes and are better logged.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Configuration)
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ContentError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown provider: {0}. Supported: openai, gemini, deepseek, claude")]
    UnknownProvider(String),

    #[error("No API key configured for {0}")]
    MissingApiKey(ProviderKind),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // -------------------------------------------------------------------------
    // Call Errors
    // -------------------------------------------------------------------------
    #[error("{provider} request failed: {message}")]
    Network {
        provider: ProviderKind,
        message: String,
    },

    #[error("{provider} API error ({status}): {body}")]
    Provider {
        provider: ProviderKind,
        status: u16,
        body: String,
    },

    #[error("Failed to parse {provider} response: {message}")]
    Parse {
        provider: ProviderKind,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, ContentError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl ContentError {
    /// Create an invalid request error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a parse error for a provider
    pub fn parse(provider: ProviderKind, message: impl Into<String>) -> Self {
        Self::Parse {
            provider,
            message: message.into(),
        }
    }

    /// Map a transport error from reqwest
    pub fn network(provider: ProviderKind, err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("timed out: {}", err)
        } else if err.is_connect() {
            format!("could not connect: {}", err)
        } else {
            err.to_string()
        };
        Self::Network { provider, message }
    }

    /// Tag used by callers to pick a user-facing message
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_)
            | Self::UnknownProvider(_)
            | Self::MissingApiKey(_)
            | Self::InvalidRequest(_) => ErrorKind::Configuration,
            Self::Io(_) => ErrorKind::Configuration,
            Self::Network { .. } => ErrorKind::Network,
            Self::Provider { .. } => ErrorKind::Provider,
            Self::Parse { .. } | Self::Json(_) => ErrorKind::Parse,
        }
    }

    /// Provider involved in the failure, if any
    pub fn provider(&self) -> Option<ProviderKind> {
        match self {
            Self::MissingApiKey(p) => Some(*p),
            Self::Network { provider, .. }
            | Self::Provider { provider, .. }
            | Self::Parse { provider, .. } => Some(*provider),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
