//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/quillcraft/config.toml)
//! 3. Project config (.quillcraft/config.toml)
//! 4. Environment variables (QUILLCRAFT_*, then provider-native API key vars)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
