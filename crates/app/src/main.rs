use std::{process::ExitCode, time::Duration};

use bank_client::Client;
use engine::{AccountRoundup, RoundupService, SystemClock};

use crate::{error::Result, settings::Settings};

mod error;
mod settings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let settings = match settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "roundup={level},bank_client={level},engine={level}",
            level = settings.level
        ))
        .init();

    match run(&settings).await {
        Ok(report) => {
            for roundup in &report {
                print_roundup(roundup);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("roundup failed: {err}");
            println!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: &Settings) -> Result<Vec<AccountRoundup>> {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()?;
    let client = Client::with_http(http, &settings.base_url, settings.token.as_str())?;
    tracing::info!("Using bank API at {}", client.base_url());

    let report = RoundupService::new(&client, SystemClock)
        .execute(&settings.savings_goal)
        .await?;
    Ok(report)
}

fn print_roundup(roundup: &AccountRoundup) {
    match roundup.transfer_uid {
        Some(transfer_uid) => println!(
            "{}: saved {} (transfer {transfer_uid})",
            roundup.account_uid, roundup.amount
        ),
        None => println!("{}: nothing to round up", roundup.account_uid),
    }
}
