//! Editor Integration
//!
//! The content service never touches an editor directly. Integrations
//! implement [`EditorHandle`] and the helpers here read the selection or the
//! document, run the action and write the result back.

mod file;

pub use file::HtmlFileEditor;

use regex::Regex;
use std::sync::LazyLock;

use crate::ai::{ContentBackend, GenerationResult};
use crate::types::{
    Action, ActionRequest, ContentError, GenerationRequest, OutputFormat, ProviderKind, Result,
};

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Minimal surface an editor exposes to content actions
pub trait EditorHandle {
    /// Currently selected text, `None` when nothing is selected
    fn selection_text(&self) -> Option<String>;

    /// Full document as HTML
    fn document_html(&self) -> String;

    /// Full document as plain text
    fn document_text(&self) -> String {
        let html = self.document_html();
        TAG.replace_all(&html, " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn replace_selection(&mut self, text: &str) -> Result<()>;

    fn replace_document(&mut self, html: &str) -> Result<()>;
}

/// Build the request `action` would send for the editor's current state.
///
/// Document actions read the whole HTML; every other action works on the
/// selection.
pub fn action_request<E>(
    editor: &E,
    action: Action,
    model: ProviderKind,
    custom_prompt: Option<&str>,
) -> Result<ActionRequest>
where
    E: EditorHandle + ?Sized,
{
    let request = if action.is_document() {
        let html = editor.document_html();
        if html.trim().is_empty() {
            return Err(ContentError::invalid("No text to process"));
        }
        ActionRequest::document(action, editor.document_text(), html)
    } else {
        let text = editor
            .selection_text()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ContentError::invalid("Please select some text first"))?;
        ActionRequest::selection(action, text)
    };

    let mut request = request.with_model(model);
    request.custom_prompt = custom_prompt.map(str::to_string);
    Ok(request)
}

/// Run `action` on the editor and write the output back
pub async fn apply_action<B, E>(
    backend: &B,
    editor: &mut E,
    action: Action,
    model: ProviderKind,
    custom_prompt: Option<&str>,
) -> Result<String>
where
    B: ContentBackend + ?Sized,
    E: EditorHandle + ?Sized,
{
    let request = action_request(editor, action, model, custom_prompt)?;

    let output = backend.process_action(&request).await?;
    if request.is_document_scoped() {
        editor.replace_document(&output)?;
    } else {
        editor.replace_selection(&output)?;
    }
    Ok(output)
}

/// Generate a lecture and replace the editor's document with it.
///
/// Always requests HTML, whatever `output_format` the request carries.
pub async fn insert_generated<B, E>(
    backend: &B,
    editor: &mut E,
    request: &GenerationRequest,
) -> Result<String>
where
    B: ContentBackend + ?Sized,
    E: EditorHandle + ?Sized,
{
    let mut request = request.clone();
    request.output_format = OutputFormat::Html;

    let html = match backend.generate(&request).await? {
        GenerationResult::Html(html) => html,
        GenerationResult::Document(doc) => serde_json::to_string(&doc)?,
    };
    editor.replace_document(&html)?;
    Ok(html)
}
