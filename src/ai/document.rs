//! Editor Document Tree
//!
//! Typed mirror of the editor's JSON document schema, used when a caller
//! asks for a document tree instead of an HTML fragment.
//!
//! Parsing is lenient about wrapping (code fences, BOM, prose around the
//! object) and strict about shape: the root must be a `doc` node and every
//! `text` node must carry text.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::sanitize::strip_json_fences;
use crate::types::{ContentError, ProviderKind, Result};

/// One node of the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocNode {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<DocNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

/// Inline formatting on a text node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub mark_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Map<String, Value>>,
}

impl DocNode {
    pub fn is_text(&self) -> bool {
        self.node_type == "text"
    }

    /// Concatenated text of this subtree, blocks separated by newlines
    pub fn plain_text(&self) -> String {
        if let Some(text) = &self.text {
            return text.clone();
        }
        let separator = if self
            .content
            .first()
            .is_some_and(|child| child.is_text())
        {
            ""
        } else {
            "\n"
        };
        self.content
            .iter()
            .map(DocNode::plain_text)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Number of top-level blocks
    pub fn block_count(&self) -> usize {
        self.content.len()
    }

    fn validate(&self, path: &str) -> std::result::Result<(), String> {
        if self.node_type.is_empty() {
            return Err(format!("node at {} has an empty type", path));
        }
        if self.is_text() && self.text.as_deref().is_none_or(str::is_empty) {
            return Err(format!("text node at {} has no text", path));
        }
        for (i, child) in self.content.iter().enumerate() {
            child.validate(&format!("{}/{}", path, i))?;
        }
        Ok(())
    }
}

/// Parse model output into a validated `doc` tree
pub fn parse_document(provider: ProviderKind, raw: &str) -> Result<DocNode> {
    let cleaned = strip_json_fences(raw);
    let cleaned = cleaned.trim().trim_start_matches('\u{feff}');

    let value: Value = match serde_json::from_str(cleaned) {
        Ok(value) => value,
        Err(e) => {
            debug!("Document JSON parse failed ({}), trying embedded object", e);
            let extracted = extract_object(cleaned).ok_or_else(|| {
                ContentError::parse(provider, format!("response is not a JSON document: {}", e))
            })?;
            warn!("Document JSON extracted from mixed content");
            serde_json::from_str(extracted).map_err(|e| {
                ContentError::parse(provider, format!("response is not a JSON document: {}", e))
            })?
        }
    };

    let root: DocNode = serde_json::from_value(value)
        .map_err(|e| ContentError::parse(provider, format!("invalid document node: {}", e)))?;

    if root.node_type != "doc" {
        return Err(ContentError::parse(
            provider,
            format!("document root must be 'doc', got '{}'", root.node_type),
        ));
    }
    root.validate("doc")
        .map_err(|msg| ContentError::parse(provider, msg))?;

    Ok(root)
}

/// Slice from the first `{` to the last `}`
fn extract_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let end = s.rfind('}')?;
    (end > start).then(|| &s[start..=end])
}
