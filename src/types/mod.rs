pub mod error;
pub mod request;

pub use error::{ContentError, ErrorKind, Result};
pub use request::{
    Action, ActionRequest, GenerationRequest, OutputFormat, ProviderKind, SectionLength,
    SectionType, Tone,
};
