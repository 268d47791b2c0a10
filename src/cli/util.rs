//! CLI Common Utilities
//!
//! Shared setup and I/O for command handlers.

use std::io::Read;
use std::path::Path;

use super::ui::Output;
use crate::ai::ContentService;
use crate::config::{Config, ConfigLoader};
use crate::types::{ContentError, ProviderKind, Result};

/// Command execution context
///
/// Loaded once per invocation: resolved configuration plus the service
/// built from it.
pub struct CommandContext {
    pub config: Config,
    pub service: ContentService,
}

impl CommandContext {
    /// Load configuration (with an optional explicit file) and build the service
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = ConfigLoader::load_with(config_path)?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let service = ContentService::new(&config)?;
        Ok(Self { config, service })
    }

    /// Requested provider, or the configured default
    pub fn provider(&self, requested: Option<ProviderKind>) -> ProviderKind {
        requested.unwrap_or(self.config.default_provider)
    }
}

/// Read all of stdin; empty input is an error
pub fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    if buf.trim().is_empty() {
        return Err(ContentError::invalid("No text to process"));
    }
    Ok(buf)
}

/// Write command output to `path`, or stdout when none is given
pub fn write_output(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
            Output::new().success(&format!("Wrote {}", path.display()));
        }
        None => println!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_output_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/lecture.html");
        write_output("<p>x</p>", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<p>x</p>");
    }

    #[test]
    fn test_provider_falls_back_to_default() {
        let mut config = Config::default();
        config.default_provider = ProviderKind::Gemini;
        let ctx = CommandContext::from_config(config).unwrap();

        assert_eq!(ctx.provider(None), ProviderKind::Gemini);
        assert_eq!(ctx.provider(Some(ProviderKind::Claude)), ProviderKind::Claude);
    }
}
