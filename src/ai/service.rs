//! Content Service
//!
//! Orchestrates one generation or action call end to end:
//!
//! ```text
//! Idle → PromptBuilt → RequestSent → ResponseReceived → Sanitized → Done
//!                                                   ↘ Failed
//! ```
//!
//! Requests are validated and the provider body is built before any network
//! I/O, so configuration mistakes never reach the wire. Each call either
//! yields one result or one [`ContentError`]; there are no retries.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::document::{DocNode, parse_document};
use super::prompt::{
    build_action_prompt, build_generation_prompt, generation_system_prompt, system_instruction,
};
use super::provider::{ProviderRegistry, ProviderSpec, RequestOptions};
use super::sanitize::sanitize_html;
use crate::config::Config;
use crate::editor::{self, EditorHandle};
use crate::types::{
    Action, ActionRequest, ContentError, GenerationRequest, OutputFormat, ProviderKind, Result,
};

// =============================================================================
// Flow Stage
// =============================================================================

/// Progress of a single call, logged at each transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStage {
    Idle,
    PromptBuilt,
    RequestSent,
    ResponseReceived,
    Sanitized,
    Done,
    Failed,
}

impl std::fmt::Display for FlowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::PromptBuilt => "prompt_built",
            Self::RequestSent => "request_sent",
            Self::ResponseReceived => "response_received",
            Self::Sanitized => "sanitized",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

// =============================================================================
// Results
// =============================================================================

/// Output of the generate flow
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    /// Sanitized HTML fragment
    Html(String),
    /// Parsed editor document tree
    Document(DocNode),
}

impl GenerationResult {
    pub fn as_html(&self) -> Option<&str> {
        match self {
            Self::Html(html) => Some(html),
            Self::Document(_) => None,
        }
    }

    /// Text form for writing to a file or stdout
    pub fn render(&self) -> Result<String> {
        match self {
            Self::Html(html) => Ok(html.clone()),
            Self::Document(doc) => Ok(serde_json::to_string_pretty(doc)?),
        }
    }
}

// =============================================================================
// Backend Trait
// =============================================================================

/// The two content operations, as seen by editor integrations
#[async_trait]
pub trait ContentBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult>;

    async fn process_action(&self, request: &ActionRequest) -> Result<String>;
}

// =============================================================================
// Content Service
// =============================================================================

/// Multi-provider content orchestrator
///
/// Cheap to share behind an `Arc`: the registry is immutable and the HTTP
/// client is pooled.
#[derive(Debug, Clone)]
pub struct ContentService {
    registry: Arc<ProviderRegistry>,
    client: reqwest::Client,
    temperature: f64,
    action_max_tokens: u32,
}

impl ContentService {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.generation.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ContentError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            registry: Arc::new(ProviderRegistry::from_config(config)),
            client,
            temperature: config.generation.temperature,
            action_max_tokens: config.generation.action_max_tokens,
        })
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn default_provider(&self) -> ProviderKind {
        self.registry.default_provider()
    }

    // -------------------------------------------------------------------------
    // Generate flow
    // -------------------------------------------------------------------------

    /// Provider body the generate flow would send, without sending it
    pub fn preview_generation(&self, request: &GenerationRequest) -> Result<Value> {
        self.prepare_generation(request).map(|(_, body)| body)
    }

    /// Generate a lecture as an HTML fragment or a document tree
    #[instrument(
        skip(self, request),
        fields(request_id = %Uuid::new_v4(), provider = %request.model)
    )]
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        debug!(stage = %FlowStage::Idle, topic = %request.topic, "Generation requested");

        let result: Result<GenerationResult> = async {
            let (spec, body) = self.prepare_generation(request)?;
            let text = self.send(spec, &body).await?;

            let result = match request.output_format {
                OutputFormat::Html => {
                    let html = sanitize_html(&text);
                    debug!(stage = %FlowStage::Sanitized, chars = html.len(), "HTML sanitized");
                    GenerationResult::Html(html)
                }
                OutputFormat::Document => {
                    let doc = parse_document(spec.kind(), &text)?;
                    debug!(
                        stage = %FlowStage::Sanitized,
                        blocks = doc.block_count(),
                        "Document parsed"
                    );
                    GenerationResult::Document(doc)
                }
            };
            Ok(result)
        }
        .await;

        finish(result)
    }

    fn prepare_generation(&self, request: &GenerationRequest) -> Result<(&ProviderSpec, Value)> {
        request.validate()?;
        let spec = self.registry.spec(request.model);

        let prompt = build_generation_prompt(request);
        debug!(stage = %FlowStage::PromptBuilt, chars = prompt.len(), "Generation prompt built");

        // Chat providers pick their own length limit for lectures
        let options = RequestOptions::new(self.temperature);
        let system = generation_system_prompt(request.output_format);
        let body = spec.provider().format_request(system, &prompt, &options)?;
        Ok((spec, body))
    }

    // -------------------------------------------------------------------------
    // Action flow
    // -------------------------------------------------------------------------

    /// Provider body the action flow would send, without sending it
    pub fn preview_action(&self, request: &ActionRequest) -> Result<Value> {
        self.prepare_action(request).map(|(_, body)| body)
    }

    /// Run a text action. Document-scoped output is sanitized; selection
    /// output is returned exactly as the provider produced it.
    #[instrument(
        skip(self, request),
        fields(request_id = %Uuid::new_v4(), provider = %request.model, action = %request.action)
    )]
    pub async fn process_action(&self, request: &ActionRequest) -> Result<String> {
        debug!(
            stage = %FlowStage::Idle,
            document = request.is_document_scoped(),
            "Action requested"
        );

        let result: Result<String> = async {
            let (spec, body) = self.prepare_action(request)?;
            let text = self.send(spec, &body).await?;

            if request.is_document_scoped() {
                let html = sanitize_html(&text);
                debug!(stage = %FlowStage::Sanitized, chars = html.len(), "HTML sanitized");
                Ok(html)
            } else {
                Ok(text)
            }
        }
        .await;

        finish(result)
    }

    fn prepare_action(&self, request: &ActionRequest) -> Result<(&ProviderSpec, Value)> {
        request.validate()?;
        let spec = self.registry.spec(request.model);

        let system = system_instruction(request);
        let prompt = build_action_prompt(request);
        debug!(stage = %FlowStage::PromptBuilt, chars = prompt.len(), "Action prompt built");

        let options = RequestOptions::new(self.temperature).with_max_tokens(self.action_max_tokens);
        let body = spec.provider().format_request(&system, &prompt, &options)?;
        Ok((spec, body))
    }

    // -------------------------------------------------------------------------
    // Editor integration
    // -------------------------------------------------------------------------

    /// Run `action` against the editor's selection or document and write the
    /// result back
    pub async fn apply_action<E>(
        &self,
        editor: &mut E,
        action: Action,
        model: ProviderKind,
        custom_prompt: Option<&str>,
    ) -> Result<String>
    where
        E: EditorHandle + ?Sized,
    {
        editor::apply_action(self, editor, action, model, custom_prompt).await
    }

    /// Replace the editor's document with a freshly generated lecture
    pub async fn insert_generated<E>(
        &self,
        editor: &mut E,
        request: &GenerationRequest,
    ) -> Result<String>
    where
        E: EditorHandle + ?Sized,
    {
        editor::insert_generated(self, editor, request).await
    }

    // -------------------------------------------------------------------------
    // Transport
    // -------------------------------------------------------------------------

    async fn send(&self, spec: &ProviderSpec, body: &Value) -> Result<String> {
        let provider = spec.kind();
        // Both fail with a configuration error when the key is missing
        let url = spec.url()?;
        let headers = spec.headers()?;

        info!(
            "Calling {} (model: {}, endpoint: {})",
            provider,
            spec.model(),
            spec.endpoint().display(spec.model())
        );

        let start = Instant::now();
        debug!(stage = %FlowStage::RequestSent, "Request sent");

        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| ContentError::network(provider, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response.text().await);
            return Err(ContentError::Provider {
                provider,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ContentError::network(provider, &e))?;
        let payload: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ContentError::parse(provider, format!("response body is not JSON: {}", e)))?;

        debug!(
            stage = %FlowStage::ResponseReceived,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Response received"
        );

        let text = spec.provider().extract_text(&payload);
        if text.trim().is_empty() {
            return Err(ContentError::parse(
                provider,
                "response contained no usable content",
            ));
        }
        Ok(text)
    }
}

/// Body text for a provider error; a failed read is kept in the detail
fn error_body<E: std::fmt::Display>(body: std::result::Result<String, E>) -> String {
    body.unwrap_or_else(|e| format!("<unreadable body: {}>", e))
}

fn finish<T>(result: Result<T>) -> Result<T> {
    match &result {
        Ok(_) => debug!(stage = %FlowStage::Done, "Call completed"),
        Err(e) => warn!(stage = %FlowStage::Failed, kind = %e.kind(), "{}", e),
    }
    result
}

#[async_trait]
impl ContentBackend for ContentService {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        ContentService::generate(self, request).await
    }

    async fn process_action(&self, request: &ActionRequest) -> Result<String> {
        ContentService::process_action(self, request).await
    }
}
