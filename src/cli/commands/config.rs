//! Config Command
//!
//! Manage quillcraft configuration.
//!
//! Usage:
//!   quillcraft config show [-f json]
//!   quillcraft config path
//!   quillcraft config init [--global] [--force]

use std::path::Path;

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::types::{ContentError, Result};

/// Show the merged effective configuration
pub fn show(explicit: Option<&Path>, format: &str) -> Result<()> {
    let as_json = match format {
        "json" => true,
        "toml" | "text" => false,
        other => {
            return Err(ContentError::invalid(format!(
                "Unknown format '{}'. Valid values: toml, json",
                other
            )));
        }
    };
    ConfigLoader::show_config(explicit, as_json)
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Write a commented default config file
pub fn init(global: bool, force: bool) -> Result<()> {
    let out = Output::new();
    let dir = if global {
        ConfigLoader::init_global(force)?
    } else {
        ConfigLoader::init_project(force)?
    };

    let scope = if global { "global" } else { "project" };
    out.success(&format!("Initialized {} configuration", scope));
    out.detail("Directory", &dir.display().to_string());
    out.detail("Config", &dir.join("config.toml").display().to_string());
    Ok(())
}
