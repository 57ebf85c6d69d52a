//! Settings of a roundup run.
//!
//! Sources, lowest priority first: the TOML file (`config/roundup.toml` or
//! `--config`), `ROUNDUP_*` environment variables, command-line arguments.
use clap::Parser;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/roundup.toml";
const ENV_PREFIX: &str = "ROUNDUP";

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub token: String,
    pub savings_goal: String,
    /// Log level for the workspace crates.
    pub level: String,
    /// Deadline of each HTTP request.
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: bank_client::DEFAULT_BASE_URL.to_string(),
            token: String::new(),
            savings_goal: String::new(),
            level: "info".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "roundup",
    about = "Rounds up last week's card spending into a savings goal"
)]
struct Args {
    /// API access token (or `ROUNDUP_TOKEN`).
    token: Option<String>,
    /// Savings goal receiving the roundups (or `ROUNDUP_SAVINGS_GOAL`).
    savings_goal: Option<String>,
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. https://api.starlingbank.com).
    #[arg(long)]
    base_url: Option<String>,
    /// Override log level.
    #[arg(long)]
    level: Option<String>,
    /// Override the per-request timeout, in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

pub fn load() -> Result<Settings> {
    load_from(Args::parse(), config::Environment::with_prefix(ENV_PREFIX))
}

/// Values stay strings until deserialized, so identifiers such as `007` are
/// kept verbatim.
fn load_from(args: Args, env: config::Environment) -> Result<Settings> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(env);
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(token) = args.token {
        settings.token = token;
    }
    if let Some(savings_goal) = args.savings_goal {
        settings.savings_goal = savings_goal;
    }
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(level) = args.level {
        settings.level = level;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.timeout_secs = timeout_secs;
    }

    if settings.token.trim().is_empty() {
        return Err(AppError::Usage(
            "missing API token: usage: roundup <API_TOKEN> <SAVINGS_GOAL_UID>".to_string(),
        ));
    }
    if settings.savings_goal.trim().is_empty() {
        return Err(AppError::Usage(
            "missing savings goal: usage: roundup <API_TOKEN> <SAVINGS_GOAL_UID>".to_string(),
        ));
    }

    Ok(settings)
}
