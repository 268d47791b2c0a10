//! Prompt Command
//!
//! Print the provider request body a command would send, without sending it.
//!
//! Usage:
//!   quillcraft prompt generate <generate flags>
//!   quillcraft prompt action <ACTION> <action flags>

use serde_json::Value;

use super::action::ActionOptions;
use super::generate::GenerateOptions;
use crate::cli::CommandContext;
use crate::editor;
use crate::types::Result;

pub fn generation(ctx: &CommandContext, options: GenerateOptions) -> Result<()> {
    let model = ctx.provider(options.model);
    let body = ctx.service.preview_generation(&options.into_request(model))?;
    print_body(&body)
}

pub fn action(ctx: &CommandContext, options: ActionOptions) -> Result<()> {
    let editor = options.open_editor()?;
    let request = editor::action_request(
        &editor,
        options.action,
        ctx.provider(options.model),
        options.prompt.as_deref(),
    )?;
    let body = ctx.service.preview_action(&request)?;
    print_body(&body)
}

fn print_body(body: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(body)?);
    Ok(())
}
