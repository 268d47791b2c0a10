use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quillcraft::cli::CommandContext;
use quillcraft::cli::commands::{self, action::ActionOptions, generate::GenerateOptions};
use quillcraft::{Action, OutputFormat, ProviderKind, SectionLength, SectionType, Tone};

#[derive(Parser)]
#[command(name = "quillcraft")]
#[command(version, about = "AI content generation and text actions for lecture editing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, global = true, help = "Extra config file merged last")]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a structured lecture
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
        #[arg(long, short, help = "Write the result to a file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Apply a text action to a selection or a whole document
    Action {
        #[command(flatten)]
        args: ActionArgs,
        #[arg(long, short, help = "Write the result to a file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Print the provider request body without sending it
    Prompt {
        #[command(subcommand)]
        target: PromptTarget,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(long, short, help = "Lecture topic")]
    topic: String,
    #[arg(long, short, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=10))]
    sections: u8,
    #[arg(
        long,
        value_delimiter = ',',
        help = "Section types: paragraph, heading, bulletList, orderedList, taskList, codeBlock, blockquote"
    )]
    types: Vec<SectionType>,
    #[arg(long, default_value = "medium", help = "short, medium, long")]
    length: SectionLength,
    #[arg(
        long,
        default_value = "professional",
        help = "professional, casual, friendly, enthusiastic, humorous, technical"
    )]
    tone: Tone,
    #[arg(long, default_value = "students")]
    audience: String,
    #[arg(long, help = "Omit the title header")]
    no_header: bool,
    #[arg(long, help = "Add a summary footer")]
    footer: bool,
    #[arg(long, help = "Use emojis in headings")]
    emojis: bool,
    #[arg(long, short, help = "Provider: openai, gemini, deepseek, claude")]
    model: Option<ProviderKind>,
    #[arg(long, help = "Additional instructions for the model")]
    instructions: Option<String>,
    #[arg(long, short, default_value = "html", help = "html or document")]
    format: OutputFormat,
}

impl From<GenerateArgs> for GenerateOptions {
    fn from(args: GenerateArgs) -> Self {
        Self {
            topic: args.topic,
            sections: args.sections,
            types: args.types,
            length: args.length,
            tone: args.tone,
            audience: args.audience,
            header: !args.no_header,
            footer: args.footer,
            emojis: args.emojis,
            model: args.model,
            instructions: args.instructions,
            format: args.format,
        }
    }
}

#[derive(Args)]
struct ActionArgs {
    #[arg(help = "simplify, improve, shorten, expand, translate, rewrite, custom, doc_*")]
    action: Action,
    #[arg(long, help = "Selected text (stdin when omitted)")]
    text: Option<String>,
    #[arg(long, help = "HTML document file")]
    file: Option<PathBuf>,
    #[arg(long, short, help = "Provider: openai, gemini, deepseek, claude")]
    model: Option<ProviderKind>,
    #[arg(long, short, help = "Instruction for custom / doc_custom")]
    prompt: Option<String>,
}

impl From<ActionArgs> for ActionOptions {
    fn from(args: ActionArgs) -> Self {
        Self {
            action: args.action,
            text: args.text,
            file: args.file,
            model: args.model,
            prompt: args.prompt,
        }
    }
}

#[derive(Subcommand)]
enum PromptTarget {
    /// Request body for `generate`
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },
    /// Request body for `action`
    Action {
        #[command(flatten)]
        args: ActionArgs,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'f', long, default_value = "toml", help = "Output format: toml, json")]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mquillcraft encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Generate { args, output } => {
            let ctx = CommandContext::load(config_path)?;
            let rt = Runtime::new()?;
            rt.block_on(commands::generate::run(&ctx, args.into(), output.as_deref()))?;
        }
        Commands::Action { args, output } => {
            let ctx = CommandContext::load(config_path)?;
            let rt = Runtime::new()?;
            rt.block_on(commands::action::run(&ctx, args.into(), output.as_deref()))?;
        }
        Commands::Prompt { target } => {
            let ctx = CommandContext::load(config_path)?;
            match target {
                PromptTarget::Generate { args } => commands::prompt::generation(&ctx, args.into())?,
                PromptTarget::Action { args } => commands::prompt::action(&ctx, args.into())?,
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => commands::config::show(config_path, &format)?,
            ConfigAction::Path => commands::config::path()?,
            ConfigAction::Init { global, force } => commands::config::init(global, force)?,
        },
    }

    Ok(())
}
