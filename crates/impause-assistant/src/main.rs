//! Compose and print the assistant configuration for a conversation.
//!
//! Useful for inspecting exactly what an agent runtime will receive for a
//! given household's locale settings.
//!
//! # Examples
//!
//! ```sh
//! # Instructions for a euro household with the default capabilities
//! impause-assistant --currency EUR --date-format "%d.%m.%Y"
//!
//! # Full bundle as JSON, as of a fixed date
//! impause-assistant --currency USD --date 2024-03-15 --format json
//!
//! # Context and assistant config from files
//! impause-assistant --context chat.json --config assistant.json -v
//! ```

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use impause_assistant::clock::{Clock, SystemClock};
use impause_assistant::{
    AssistantConfig, Composer, ConfigError, ConversationContext, DateFormat, Household, User,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing::warn;

/// Compose and print the assistant configuration for a conversation.
#[derive(Parser)]
#[command(name = "impause-assistant")]
struct Cli {
    // ── Context ────────────────────────────────────────────────
    /// JSON file holding a full conversation context. Overrides the
    /// household and user flags below.
    #[arg(long)]
    context: Option<PathBuf>,

    /// Household currency ISO code
    #[arg(long, default_value = "USD")]
    currency: String,

    /// Household default date format (strftime pattern)
    #[arg(long, default_value = "%m-%d-%Y")]
    date_format: DateFormat,

    /// User's own date format preference (strftime pattern)
    #[arg(long)]
    user_date_format: Option<DateFormat>,

    // ── Composition ────────────────────────────────────────────
    /// Assistant config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Compose as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    date: Option<NaiveDate>,

    // ── Output ─────────────────────────────────────────────────
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log resolution and rendering details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Instructions followed by the capability names
    Text,
    /// The whole bundle as JSON
    Json,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        warn!("Composition failed: {e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = match &cli.config {
        Some(path) => AssistantConfig::load(path).map_err(|e| e.to_string())?,
        None => AssistantConfig::default(),
    };
    let ctx = match &cli.context {
        Some(path) => load_context(path).map_err(|e| e.to_string())?,
        None => ConversationContext::new(
            "cli",
            User {
                id: "cli-user".into(),
                date_format: cli.user_date_format,
            },
            Household {
                id: "cli-household".into(),
                currency: cli.currency.clone(),
                date_format: cli.date_format,
            },
        ),
    };
    let date = cli.date.unwrap_or_else(|| SystemClock.today());

    let bundle = Composer::from_config(&config)
        .compose_configuration_on(&ctx, date)
        .map_err(|e| e.to_string())?;

    match cli.format {
        OutputFormat::Text => {
            println!("{}", bundle.instructions());
            println!();
            println!("Capabilities:");
            for name in bundle.capability_names() {
                println!("  - {name}");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&bundle)
                .map_err(|e| format!("failed to serialize bundle: {e}"))?;
            println!("{json}");
        }
    }
    Ok(())
}

fn load_context(path: &Path) -> Result<ConversationContext, ConfigError> {
    let load_err = |reason: String| ConfigError::ConfigLoad {
        path: path.display().to_string(),
        reason,
    };
    let data = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
    serde_json::from_str(&data).map_err(|e| load_err(e.to_string()))
}
