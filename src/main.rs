mod api;
mod config;
mod ddns;
mod error;
mod state;
#[cfg(test)]
mod tests;

use std::process::ExitCode;

use anyhow::{Context, Result};
use api::FastApiClient;
use clap::Parser;
use config::{Cli, Settings};
use ddns::{Ddns, Outcome};
use error::Stage;
use log::debug;
use state::FileStateStore;

const EXIT_FAILURE: u8 = 1;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    config::load_env_file(config::ENV_FILE);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let cli = Cli::parse();
    let result = run(
        &cli,
        |key| std::env::var(key).ok(),
        FileStateStore::default(),
    )
    .await;

    let (code, message) = report(&result);
    println!("{}", message);
    ExitCode::from(code)
}

async fn run<F>(cli: &Cli, env: F, store: FileStateStore) -> Result<Outcome>
where
    F: Fn(&str) -> Option<String>,
{
    let settings = Settings::resolve(cli, env)?;
    let client = FastApiClient::new(&settings.base_url)?;

    match Ddns::new(client, store, settings.access_salt).run().await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            let label = match e.stage() {
                Some(Stage::Register) => "Initialization failed",
                Some(Stage::Update) => "Update failed",
                None => "Startup failed",
            };
            Err(e).context(label)
        }
    }
}

/// Exit code and the line printed for a finished run.
fn report(result: &Result<Outcome>) -> (u8, String) {
    match result {
        Ok(Outcome::Registered(state)) => (
            0,
            format!(
                "Initialization complete, record information saved ({})",
                state.record().record_name
            ),
        ),
        Ok(Outcome::Updated) => (0, "Record updated successfully".to_string()),
        Err(e) => {
            let kind = e.downcast_ref::<error::Error>().map(error::Error::kind);
            debug!("Failure class: {:?}", kind);
            (EXIT_FAILURE, format!("Error: {:#}", e))
        }
    }
}
