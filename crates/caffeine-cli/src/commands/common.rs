//! Helpers shared by the data commands.

use std::future::Future;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;

use caffeine_core::intake::read_intake_history;
use caffeine_core::{CaffeineApi, Config, IntakeEvent};

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Where intake data comes from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// JSON file with `[{date, caffeine_mg}]` records ("-" for stdin).
    /// Without it the configured API is queried.
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
}

impl SourceArgs {
    pub fn load(&self, config: &Config) -> CliResult<Vec<IntakeEvent>> {
        match &self.file {
            Some(path) if path.as_os_str() == "-" => Ok(read_intake_history(std::io::stdin().lock())?),
            Some(path) => {
                let file = std::fs::File::open(path)
                    .map_err(|e| format!("cannot open {}: {e}", path.display()))?;
                Ok(read_intake_history(file)?)
            }
            None => {
                let api = CaffeineApi::from_config(&config.api)?;
                Ok(block_on(api.fetch_intake_history())??)
            }
        }
    }
}

/// Reference instant for the chart: `--now` if given, else the clock.
pub fn reference_now(now: Option<DateTime<Utc>>) -> DateTime<Utc> {
    now.unwrap_or_else(Utc::now)
}

/// Run a future to completion on a fresh runtime.
pub fn block_on<F: Future>(future: F) -> CliResult<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}
