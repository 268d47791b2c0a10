//! Gemini generateContent format
//!
//! Gemini takes a single content array with no system/user split, so the
//! system instruction is prepended to the prompt.

use serde::Serialize;
use serde_json::Value;

use super::{RequestFormat, RequestOptions};
use crate::types::Result;

#[derive(Debug, Clone)]
pub struct GeminiContents {
    model: String,
}

impl GeminiContents {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

impl RequestFormat for GeminiContents {
    fn format_request(&self, system: &str, prompt: &str, _options: &RequestOptions) -> Result<Value> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: format!("{}\n\n{}", system, prompt),
                }],
            }],
        };
        Ok(serde_json::to_value(request)?)
    }

    fn extract_text(&self, body: &Value) -> String {
        body.pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}
