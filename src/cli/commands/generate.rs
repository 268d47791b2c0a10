//! Generate Command
//!
//! Usage:
//!   quillcraft generate --topic T [--sections N] [--types a,b] [--length L]
//!       [--tone T] [--audience A] [--no-header] [--footer] [--emojis]
//!       [--model M] [--instructions S] [--format html|document] [--output FILE]

use std::path::Path;
use tracing::info;

use crate::cli::{CommandContext, write_output};
use crate::types::{
    GenerationRequest, OutputFormat, ProviderKind, Result, SectionLength, SectionType, Tone,
};

/// Generation flags as parsed from the command line
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub topic: String,
    pub sections: u8,
    pub types: Vec<SectionType>,
    pub length: SectionLength,
    pub tone: Tone,
    pub audience: String,
    pub header: bool,
    pub footer: bool,
    pub emojis: bool,
    pub model: Option<ProviderKind>,
    pub instructions: Option<String>,
    pub format: OutputFormat,
}

impl GenerateOptions {
    pub fn into_request(self, model: ProviderKind) -> GenerationRequest {
        let defaults = GenerationRequest::default();
        GenerationRequest {
            topic: self.topic,
            section_count: self.sections,
            section_types: if self.types.is_empty() {
                defaults.section_types
            } else {
                self.types
            },
            section_length: self.length,
            tone: self.tone,
            target_audience: self.audience,
            include_header: self.header,
            include_footer: self.footer,
            include_emojis: self.emojis,
            model,
            additional_instructions: self.instructions.unwrap_or_default(),
            output_format: self.format,
        }
    }
}

pub async fn run(
    ctx: &CommandContext,
    options: GenerateOptions,
    output: Option<&Path>,
) -> Result<()> {
    let model = ctx.provider(options.model);
    let request = options.into_request(model);
    info!(
        "Generating {} sections on \"{}\" with {}",
        request.section_count, request.topic, model
    );

    let result = ctx.service.generate(&request).await?;
    write_output(&result.render()?, output)
}
