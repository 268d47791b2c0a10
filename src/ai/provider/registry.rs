//! Provider Registry
//!
//! Immutable table of endpoint, model, credentials and header rules for each
//! provider. Built once from [`Config`] and shared read-only by every call.
//!
//! API keys are held as `SecretString` and only exposed while building the
//! outgoing headers or URL.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

use super::{Provider, RequestOptions};
use crate::config::{Config, builtin_defaults};
use crate::constants::provider::ANTHROPIC_VERSION;
use crate::types::{ContentError, ProviderKind, Result};

// =============================================================================
// Endpoint
// =============================================================================

/// How a provider's request URL is derived
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Same URL for every request
    Fixed(String),
    /// `{base}/{model}:generateContent?key={api_key}`
    ModelWithKeyQuery { base: String },
}

impl Endpoint {
    pub fn resolve(&self, model: &str, api_key: &SecretString) -> Result<Url> {
        match self {
            Endpoint::Fixed(url) => Url::parse(url)
                .map_err(|e| ContentError::Config(format!("invalid endpoint '{}': {}", url, e))),
            Endpoint::ModelWithKeyQuery { base } => {
                let raw = format!("{}/{}:generateContent", base.trim_end_matches('/'), model);
                let mut url = Url::parse(&raw).map_err(|e| {
                    ContentError::Config(format!("invalid endpoint '{}': {}", raw, e))
                })?;
                url.query_pairs_mut()
                    .append_pair("key", api_key.expose_secret());
                Ok(url)
            }
        }
    }

    /// Endpoint text safe for logs (never includes the key)
    pub fn display(&self, model: &str) -> String {
        match self {
            Endpoint::Fixed(url) => url.clone(),
            Endpoint::ModelWithKeyQuery { base } => {
                format!("{}/{}:generateContent", base.trim_end_matches('/'), model)
            }
        }
    }
}

// =============================================================================
// Provider Spec
// =============================================================================

/// Everything needed to call one provider
pub struct ProviderSpec {
    provider: Provider,
    endpoint: Endpoint,
    api_key: Option<SecretString>,
}

impl std::fmt::Debug for ProviderSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSpec")
            .field("provider", &self.provider.kind())
            .field("model", &self.provider.model())
            .field("endpoint", &self.endpoint.display(self.provider.model()))
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ProviderSpec {
    pub fn new(provider: Provider, endpoint: Endpoint, api_key: Option<SecretString>) -> Self {
        Self {
            provider,
            endpoint,
            api_key,
        }
    }

    pub fn kind(&self) -> ProviderKind {
        self.provider.kind()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&SecretString> {
        self.api_key
            .as_ref()
            .ok_or(ContentError::MissingApiKey(self.kind()))
    }

    /// Fully resolved request URL
    pub fn url(&self) -> Result<Url> {
        self.endpoint.resolve(self.model(), self.api_key()?)
    }

    /// Request headers including provider auth
    pub fn headers(&self) -> Result<HeaderMap> {
        let key = self.api_key()?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        match self.kind() {
            ProviderKind::OpenAi | ProviderKind::DeepSeek => {
                let bearer = format!("Bearer {}", key.expose_secret());
                headers.insert(AUTHORIZATION, self.secret_header(&bearer)?);
            }
            ProviderKind::Claude => {
                headers.insert(
                    HeaderName::from_static("x-api-key"),
                    self.secret_header(key.expose_secret())?,
                );
                headers.insert(
                    HeaderName::from_static("anthropic-version"),
                    HeaderValue::from_static(ANTHROPIC_VERSION),
                );
            }
            // Key travels in the query string
            ProviderKind::Gemini => {}
        }

        Ok(headers)
    }

    fn secret_header(&self, value: &str) -> Result<HeaderValue> {
        let mut header = HeaderValue::from_str(value).map_err(|_| {
            ContentError::Config(format!(
                "API key for {} contains characters not allowed in a header",
                self.kind()
            ))
        })?;
        header.set_sensitive(true);
        Ok(header)
    }
}

// =============================================================================
// Registry
// =============================================================================

/// One spec per provider, built once at startup
#[derive(Debug)]
pub struct ProviderRegistry {
    default_provider: ProviderKind,
    openai: ProviderSpec,
    gemini: ProviderSpec,
    deepseek: ProviderSpec,
    claude: ProviderSpec,
}

impl ProviderRegistry {
    pub fn from_config(config: &Config) -> Self {
        let build = |kind: ProviderKind| {
            let settings = config.providers.get(kind);
            let (default_endpoint, default_model) = builtin_defaults(kind);
            let base = settings
                .endpoint
                .clone()
                .unwrap_or_else(|| default_endpoint.to_string());
            let model = settings
                .model
                .clone()
                .unwrap_or_else(|| default_model.to_string());

            let endpoint = match kind {
                ProviderKind::Gemini => Endpoint::ModelWithKeyQuery { base },
                _ => Endpoint::Fixed(base),
            };

            ProviderSpec::new(
                Provider::new(kind, model, config.generation.claude_max_tokens),
                endpoint,
                settings.api_key.clone().map(SecretString::from),
            )
        };

        Self {
            default_provider: config.default_provider,
            openai: build(ProviderKind::OpenAi),
            gemini: build(ProviderKind::Gemini),
            deepseek: build(ProviderKind::DeepSeek),
            claude: build(ProviderKind::Claude),
        }
    }

    pub fn default_provider(&self) -> ProviderKind {
        self.default_provider
    }

    pub fn spec(&self, kind: ProviderKind) -> &ProviderSpec {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::DeepSeek => &self.deepseek,
            ProviderKind::Claude => &self.claude,
        }
    }

    /// Look up a provider by its key (`openai`, `gemini`, `deepseek`, `claude`)
    pub fn get(&self, key: &str) -> Result<&ProviderSpec> {
        let kind: ProviderKind = key.parse()?;
        Ok(self.spec(kind))
    }

    /// Keyed request formatting; unknown keys are a configuration error
    pub fn format_request(
        &self,
        key: &str,
        system: &str,
        prompt: &str,
        options: &RequestOptions,
    ) -> Result<Value> {
        self.get(key)?
            .provider()
            .format_request(system, prompt, options)
    }

    /// Keyed text extraction; `""` when the provider's path is missing
    pub fn extract_text(&self, key: &str, body: &Value) -> Result<String> {
        Ok(self.get(key)?.provider().extract_text(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;

    fn config_with_keys() -> Config {
        let mut config = Config::default();
        for kind in ProviderKind::ALL {
            config.providers.get_mut(kind).api_key = Some(format!("{}-key", kind));
        }
        config
    }

    #[test]
    fn test_builtin_endpoints_and_models() {
        let registry = ProviderRegistry::from_config(&config_with_keys());

        let openai = registry.spec(ProviderKind::OpenAi);
        assert_eq!(openai.model(), "gpt-4-turbo");
        assert_eq!(
            openai.url().unwrap().as_str(),
            "https://api.openai.com/v1/chat/completions"
        );

        let deepseek = registry.get("deepseek").unwrap();
        assert_eq!(deepseek.model(), "deepseek-chat");

        let gemini = registry.spec(ProviderKind::Gemini);
        assert_eq!(
            gemini.url().unwrap().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key=gemini-key"
        );
    }

    #[test]
    fn test_unknown_key_is_configuration_error() {
        let registry = ProviderRegistry::from_config(&Config::default());
        let err = registry.get("mistral").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = registry
            .format_request("mistral", "s", "p", &RequestOptions::new(0.7))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_auth_headers() {
        let registry = ProviderRegistry::from_config(&config_with_keys());

        let openai = registry.spec(ProviderKind::OpenAi).headers().unwrap();
        assert_eq!(openai[AUTHORIZATION], "Bearer openai-key");
        assert!(openai[AUTHORIZATION].is_sensitive());
        assert_eq!(openai[CONTENT_TYPE], "application/json");

        let claude = registry.spec(ProviderKind::Claude).headers().unwrap();
        assert_eq!(claude["x-api-key"], "claude-key");
        assert_eq!(claude["anthropic-version"], "2023-06-01");
        assert!(claude.get(AUTHORIZATION).is_none());

        let gemini = registry.spec(ProviderKind::Gemini).headers().unwrap();
        assert_eq!(gemini.len(), 1);
    }

    #[test]
    fn test_missing_key() {
        let registry = ProviderRegistry::from_config(&Config::default());
        let spec = registry.spec(ProviderKind::Claude);
        assert!(!spec.has_api_key());
        assert!(matches!(
            spec.headers().unwrap_err(),
            ContentError::MissingApiKey(ProviderKind::Claude)
        ));
        assert!(spec.url().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = config_with_keys();
        config.providers.openai.model = Some("gpt-4o".to_string());
        config.providers.gemini.endpoint = Some("http://localhost:9000/models/".to_string());
        config.default_provider = ProviderKind::Gemini;

        let registry = ProviderRegistry::from_config(&config);
        assert_eq!(registry.default_provider(), ProviderKind::Gemini);
        assert_eq!(registry.spec(ProviderKind::OpenAi).model(), "gpt-4o");
        assert_eq!(
            registry.spec(ProviderKind::Gemini).url().unwrap().as_str(),
            "http://localhost:9000/models/gemini-2.0-flash:generateContent?key=gemini-key"
        );
    }

    #[test]
    fn test_debug_and_display_hide_key() {
        let registry = ProviderRegistry::from_config(&config_with_keys());
        let spec = registry.spec(ProviderKind::Gemini);
        let debug = format!("{:?}", spec);
        assert!(!debug.contains("gemini-key"));
        assert!(!spec.endpoint().display(spec.model()).contains("key="));
    }

    #[test]
    fn test_keyed_extract() {
        let registry = ProviderRegistry::from_config(&Config::default());
        let body = serde_json::json!({"content": [{"text": "ok"}]});
        assert_eq!(registry.extract_text("claude", &body).unwrap(), "ok");
        assert_eq!(registry.extract_text("openai", &body).unwrap(), "");
    }
}
