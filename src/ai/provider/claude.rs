//! Anthropic Messages format
//!
//! The Messages API takes the system prompt as a top-level field and
//! rejects requests without `max_tokens`.

use serde::Serialize;
use serde_json::Value;

use super::{RequestFormat, RequestOptions};
use crate::types::Result;

#[derive(Debug, Clone)]
pub struct ClaudeMessages {
    model: String,
    default_max_tokens: u32,
}

impl ClaudeMessages {
    pub fn new(model: impl Into<String>, default_max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            default_max_tokens,
        }
    }
}

impl RequestFormat for ClaudeMessages {
    fn format_request(&self, system: &str, prompt: &str, options: &RequestOptions) -> Result<Value> {
        let request = MessagesRequest {
            model: &self.model,
            system,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: options.temperature,
            max_tokens: options.max_tokens.unwrap_or(self.default_max_tokens),
        };
        Ok(serde_json::to_value(request)?)
    }

    fn extract_text(&self, body: &Value) -> String {
        body.pointer("/content/0/text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    system: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}
