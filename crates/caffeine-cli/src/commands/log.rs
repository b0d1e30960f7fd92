//! Caffeine log commands backed by the REST API.

use chrono::Local;
use clap::Subcommand;

use caffeine_core::{CaffeineApi, Config, NewCaffeineLog};

use super::common::{block_on, CliResult};

#[derive(Subcommand)]
pub enum LogAction {
    /// Log a drink
    Add {
        /// Caffeine in milligrams
        #[arg(long)]
        mg: f64,
        /// Beverage name
        #[arg(long)]
        name: Option<String>,
        /// Serving size (e.g. "12 oz")
        #[arg(long)]
        serving: Option<String>,
    },
    /// List logged drinks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: LogAction) -> CliResult {
    let config = Config::load_or_default();
    let api = CaffeineApi::from_config(&config.api)?;

    match action {
        LogAction::Add { mg, name, serving } => {
            let mut log = NewCaffeineLog::new(mg);
            if let Some(name) = name {
                log = log.with_beverage_name(name);
            }
            if let Some(serving) = serving {
                log = log.with_serving_size(serving);
            }
            let created = block_on(api.create_log(&log))??;
            println!(
                "Logged {} ({:.0} mg) id={}",
                created.display_name(),
                created.caffeine_mg,
                created.id
            );
        }
        LogAction::List { json } => {
            let logs = block_on(api.fetch_logs())??;
            if json {
                println!("{}", serde_json::to_string_pretty(&logs)?);
                return Ok(());
            }
            if logs.is_empty() {
                println!("No caffeine logs yet");
                return Ok(());
            }
            for log in &logs {
                println!(
                    "{}  {:>6.0} mg  {}{}",
                    log.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    log.caffeine_mg,
                    log.display_name(),
                    log.serving_size
                        .as_deref()
                        .map(|s| format!(" ({s})"))
                        .unwrap_or_default()
                );
            }
        }
    }
    Ok(())
}
