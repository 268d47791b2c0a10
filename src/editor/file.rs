//! File-backed editor used by the CLI

use std::fs;
use std::path::{Path, PathBuf};

use super::{EditorHandle, TAG};
use crate::types::{ContentError, Result};

/// An HTML document loaded from disk (or given inline) with an optional
/// text selection
#[derive(Debug, Clone, Default)]
pub struct HtmlFileEditor {
    source: Option<PathBuf>,
    html: Option<String>,
    selection: Option<String>,
}

impl HtmlFileEditor {
    pub fn open(path: &Path) -> Result<Self> {
        let html = fs::read_to_string(path)?;
        Ok(Self {
            source: Some(path.to_path_buf()),
            html: Some(html),
            selection: None,
        })
    }

    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            ..Self::default()
        }
    }

    /// Editor holding only a selection, with no surrounding document
    pub fn from_selection(text: impl Into<String>) -> Self {
        Self {
            selection: Some(text.into()),
            ..Self::default()
        }
    }

    /// Select `text`; it must occur in the loaded document
    pub fn select(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        if let Some(html) = &self.html
            && find_in_text(html, &text).is_none()
        {
            return Err(ContentError::invalid(format!(
                "Selected text not found in {}",
                self.describe()
            )));
        }
        self.selection = Some(text);
        Ok(())
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Document HTML when one is loaded, otherwise the selection
    pub fn contents(&self) -> &str {
        self.html
            .as_deref()
            .or(self.selection.as_deref())
            .unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.contents())?;
        Ok(())
    }

    fn describe(&self) -> String {
        match &self.source {
            Some(path) => path.display().to_string(),
            None => "document".to_string(),
        }
    }
}

/// Byte offset of the first occurrence of `needle` inside a text node.
/// Tag names and attribute values never match.
fn find_in_text(html: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let tags = TAG
        .find_iter(html)
        .map(|m| (m.start(), m.end()))
        .chain(std::iter::once((html.len(), html.len())));

    let mut text_start = 0;
    for (tag_start, tag_end) in tags {
        if let Some(pos) = html[text_start..tag_start].find(needle) {
            return Some(text_start + pos);
        }
        text_start = tag_end;
    }
    None
}

impl EditorHandle for HtmlFileEditor {
    fn selection_text(&self) -> Option<String> {
        self.selection.clone()
    }

    fn document_html(&self) -> String {
        self.html.clone().unwrap_or_default()
    }

    fn replace_selection(&mut self, text: &str) -> Result<()> {
        if let (Some(html), Some(selected)) = (&mut self.html, &self.selection)
            && let Some(offset) = find_in_text(html, selected)
        {
            html.replace_range(offset..offset + selected.len(), text);
        }
        self.selection = Some(text.to_string());
        Ok(())
    }

    fn replace_document(&mut self, html: &str) -> Result<()> {
        self.html = Some(html.to_string());
        self.selection = None;
        Ok(())
    }
}
