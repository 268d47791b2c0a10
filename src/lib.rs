//! Quillcraft - AI Content Service for Lecture Editing
//!
//! Generates structured lecture content and applies text transformations
//! (simplify, improve, translate, whole-document proofreading and more)
//! through hosted LLM providers, returning HTML fragments a rich-text editor
//! can insert directly.
//!
//! ## Core Features
//!
//! - **Multi-Provider**: OpenAI, Gemini, DeepSeek and Claude behind one flow
//! - **Deterministic Prompts**: pure builders for generation and actions
//! - **Sanitized Output**: document wrappers and code fences stripped
//! - **Editor Seam**: actions read and write through [`editor::EditorHandle`]
//!
//! ## Quick Start
//!
//! ```ignore
//! use quillcraft::{ActionRequest, Action, ConfigLoader, ContentService};
//!
//! let config = ConfigLoader::load()?;
//! let service = ContentService::new(&config)?;
//! let request = ActionRequest::selection(Action::Simplify, "Mitochondria are ...");
//! let simpler = service.process_action(&request).await?;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: prompts, provider formats, sanitization, orchestration
//! - [`config`]: layered configuration
//! - [`editor`]: editor integration seam
//! - [`types`]: request types and errors

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod editor;
pub mod types;

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{ContentError, ErrorKind, Result};

// Requests
pub use types::{
    Action, ActionRequest, GenerationRequest, OutputFormat, ProviderKind, SectionLength,
    SectionType, Tone,
};

// Service
pub use ai::{ContentBackend, ContentService, DocNode, GenerationResult, ProviderRegistry};
