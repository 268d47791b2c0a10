//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/quillcraft/config.toml)
//! 3. Project config (.quillcraft/config.toml)
//! 4. Environment variables (QUILLCRAFT_* prefix, `__` separates nesting)
//! 5. Provider-native API key variables for keys still unset

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::constants::env as env_vars;
use crate::types::{ContentError, ProviderKind, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_with(None)
    }

    /// Same as [`ConfigLoader::load`], with an explicit file merged after the project config
    pub fn load_with(explicit: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Merge global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Merge project config
        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ContentError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            debug!("Loading config from: {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        // e.g. QUILLCRAFT_PROVIDERS__OPENAI__MODEL -> providers.openai.model
        figment = figment.merge(Env::prefixed(env_vars::CONFIG_PREFIX).split("__"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| ContentError::Config(format!("Configuration error: {}", e)))?;

        Self::apply_env_keys(&mut config, |name| std::env::var(name).ok());

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| ContentError::Config(format!("Configuration error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Fill API keys that no config layer set from the provider's own variable
    pub fn apply_env_keys<F>(config: &mut Config, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for kind in ProviderKind::ALL {
            let settings = config.providers.get_mut(kind);
            if settings.api_key.is_some() {
                continue;
            }
            if let Some(key) = lookup(Self::api_key_var(kind)).filter(|k| !k.trim().is_empty()) {
                debug!("Using {} for {}", Self::api_key_var(kind), kind);
                settings.api_key = Some(key);
            }
        }
    }

    /// Provider-native environment variable holding the API key
    pub fn api_key_var(kind: ProviderKind) -> &'static str {
        match kind {
            ProviderKind::OpenAi => env_vars::OPENAI_API_KEY,
            ProviderKind::Gemini => env_vars::GEMINI_API_KEY,
            ProviderKind::DeepSeek => env_vars::DEEPSEEK_API_KEY,
            ProviderKind::Claude => env_vars::ANTHROPIC_API_KEY,
        }
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/quillcraft/ on Linux)
    pub fn global_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "quillcraft")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join("config.toml")
    }

    /// Get project data directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(".quillcraft")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Render the effective configuration. API keys never appear in the output.
    pub fn render_config(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| ContentError::Config(e.to_string()))
        }
    }

    /// Show current effective configuration
    pub fn show_config(explicit: Option<&Path>, as_json: bool) -> Result<()> {
        let config = Self::load_with(explicit)?;
        println!("{}", Self::render_config(&config, as_json)?);

        for kind in ProviderKind::ALL {
            let state = if config.providers.get(kind).api_key.is_some() {
                "set"
            } else {
                "missing"
            };
            println!("# {} api key: {}", kind, state);
        }
        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            ContentError::Config("Cannot determine global config directory".to_string())
        })?;
        Self::write_default(&global_dir, force)?;
        Ok(global_dir)
    }

    /// Initialize project configuration
    pub fn init_project(force: bool) -> Result<PathBuf> {
        let project_dir = Self::project_dir();
        Self::write_default(&project_dir, force)?;
        Ok(project_dir)
    }

    /// Create `dir/config.toml` with the commented default template
    pub fn write_default(dir: &Path, force: bool) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let config_path = dir.join("config.toml");
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_config())?;
            info!("Created config: {}", config_path.display());
        } else {
            info!("Config exists: {}", config_path.display());
        }
        Ok(config_path)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Default config file content (TOML)
    fn default_config() -> String {
        r#"# quillcraft configuration
# Project settings in .quillcraft/config.toml override the global file.
# API keys may also come from OPENAI_API_KEY, GEMINI_API_KEY,
# DEEPSEEK_API_KEY and ANTHROPIC_API_KEY.

version = "1.0"
default_provider = "openai"

[generation]
temperature = 0.7
action_max_tokens = 1500
claude_max_tokens = 4000
# timeout_secs = 120

[providers.openai]
# api_key = ""
# model = "gpt-4-turbo"

[providers.gemini]
# api_key = ""
# model = "gemini-2.0-flash"

[providers.deepseek]
# api_key = ""
# model = "deepseek-chat"

[providers.claude]
# api_key = ""
# model = "claude-3-5-sonnet-latest"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_template_parses() {
        let temp_dir = TempDir::new().unwrap();
        let path = ConfigLoader::write_default(temp_dir.path(), false).unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.default_provider, ProviderKind::OpenAi);
        assert_eq!(config.generation.claude_max_tokens, 4000);
    }

    #[test]
    fn test_write_default_keeps_existing_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "version = \"custom\"\n").unwrap();

        ConfigLoader::write_default(temp_dir.path(), false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "version = \"custom\"\n");

        ConfigLoader::write_default(temp_dir.path(), true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("[providers.claude]"));
    }

    #[test]
    fn test_load_from_file_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
default_provider = "claude"

[generation]
temperature = 0.2
timeout_secs = 30

[providers.claude]
api_key = "sk-ant-test"
model = "claude-3-haiku"
"#,
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.default_provider, ProviderKind::Claude);
        assert_eq!(config.generation.temperature, 0.2);
        assert_eq!(config.generation.timeout_secs, Some(30));
        assert_eq!(
            config.providers.claude.api_key.as_deref(),
            Some("sk-ant-test")
        );
        assert_eq!(config.providers.claude.model.as_deref(), Some("claude-3-haiku"));
        assert!(config.providers.openai.api_key.is_none());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[generation]\ntemperature = 9.0\n").unwrap();

        let err = ConfigLoader::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ContentError::Config(_)));
    }

    #[test]
    fn test_env_keys_fill_only_missing() {
        let mut config = Config::default();
        config.providers.openai.api_key = Some("from-file".to_string());

        ConfigLoader::apply_env_keys(&mut config, |name| match name {
            "OPENAI_API_KEY" => Some("from-env".to_string()),
            "GEMINI_API_KEY" => Some("gemini-env".to_string()),
            "DEEPSEEK_API_KEY" => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(config.providers.openai.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.providers.gemini.api_key.as_deref(), Some("gemini-env"));
        assert!(config.providers.deepseek.api_key.is_none());
        assert!(config.providers.claude.api_key.is_none());
    }

    #[test]
    fn test_render_config_hides_keys() {
        let mut config = Config::default();
        config.providers.openai.api_key = Some("sk-hidden".to_string());

        let toml_out = ConfigLoader::render_config(&config, false).unwrap();
        let json_out = ConfigLoader::render_config(&config, true).unwrap();
        assert!(!toml_out.contains("sk-hidden"));
        assert!(!json_out.contains("sk-hidden"));
        assert!(toml_out.contains("[generation]"));
    }
}
