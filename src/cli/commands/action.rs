//! Action Command
//!
//! Usage:
//!   quillcraft action <ACTION> [--text S | --file F] [--model M] [--prompt S] [--output FILE]
//!
//! Selection actions work on `--text` (or stdin). With `--file` as well, the
//! text is replaced inside the file's HTML. `doc_*` actions rewrite the
//! whole HTML from `--file` (or stdin).

use std::path::{Path, PathBuf};

use crate::cli::{CommandContext, read_stdin, write_output};
use crate::editor::HtmlFileEditor;
use crate::types::{Action, ContentError, ProviderKind, Result};

/// Action flags as parsed from the command line
#[derive(Debug, Clone)]
pub struct ActionOptions {
    pub action: Action,
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub model: Option<ProviderKind>,
    pub prompt: Option<String>,
}

impl ActionOptions {
    /// Load the editor the action will run against
    pub fn open_editor(&self) -> Result<HtmlFileEditor> {
        if self.action.is_document() {
            return match &self.file {
                Some(path) => HtmlFileEditor::open(path),
                None => Ok(HtmlFileEditor::from_html(read_stdin()?)),
            };
        }

        match (&self.file, &self.text) {
            (Some(path), Some(text)) => {
                let mut editor = HtmlFileEditor::open(path)?;
                editor.select(text.clone())?;
                Ok(editor)
            }
            (Some(_), None) => Err(ContentError::invalid(format!(
                "'{}' works on a selection; pass --text to select within --file",
                self.action
            ))),
            (None, Some(text)) => Ok(HtmlFileEditor::from_selection(text.clone())),
            (None, None) => Ok(HtmlFileEditor::from_selection(read_stdin()?)),
        }
    }
}

pub async fn run(
    ctx: &CommandContext,
    options: ActionOptions,
    output: Option<&Path>,
) -> Result<()> {
    let mut editor = options.open_editor()?;
    let model = ctx.provider(options.model);

    ctx.service
        .apply_action(&mut editor, options.action, model, options.prompt.as_deref())
        .await?;

    write_output(editor.contents(), output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorHandle;
    use tempfile::TempDir;

    fn options(action: &str) -> ActionOptions {
        ActionOptions {
            action: Action::parse(action),
            text: None,
            file: None,
            model: None,
            prompt: None,
        }
    }

    #[test]
    fn test_selection_from_text() {
        let mut opts = options("simplify");
        opts.text = Some("Mitochondria produce ATP.".to_string());
        let editor = opts.open_editor().unwrap();
        assert_eq!(
            editor.selection_text().as_deref(),
            Some("Mitochondria produce ATP.")
        );
    }

    #[test]
    fn test_selection_within_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lecture.html");
        std::fs::write(&path, "<p>Mitochondria produce ATP.</p>").unwrap();

        let mut opts = options("improve");
        opts.file = Some(path.clone());
        assert!(opts.open_editor().is_err());

        opts.text = Some("produce ATP".to_string());
        let editor = opts.open_editor().unwrap();
        assert_eq!(editor.document_html(), "<p>Mitochondria produce ATP.</p>");

        opts.text = Some("absent".to_string());
        assert!(opts.open_editor().is_err());
    }

    #[test]
    fn test_document_action_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lecture.html");
        std::fs::write(&path, "<h1>Cells</h1>").unwrap();

        let mut opts = options("doc_proofread");
        opts.file = Some(path);
        let editor = opts.open_editor().unwrap();
        assert_eq!(editor.document_html(), "<h1>Cells</h1>");
        assert!(editor.selection_text().is_none());
    }
}
