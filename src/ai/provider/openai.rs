//! Chat Completions format
//!
//! Request envelope and response extraction shared by OpenAI and DeepSeek,
//! which expose the same `/chat/completions` schema.

use serde::Serialize;
use serde_json::Value;

use super::{RequestFormat, RequestOptions};
use crate::types::Result;

/// Chat Completions formatter bound to one model
#[derive(Debug, Clone)]
pub struct ChatCompletions {
    model: String,
}

impl ChatCompletions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

impl RequestFormat for ChatCompletions {
    fn format_request(&self, system: &str, prompt: &str, options: &RequestOptions) -> Result<Value> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };
        Ok(serde_json::to_value(request)?)
    }

    fn extract_text(&self, body: &Value) -> String {
        body.pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Request types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}
