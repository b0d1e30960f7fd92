//! One-shot question to the AI assistant.

use clap::Args;

use caffeine_core::{CaffeineApi, Config};

use super::common::{block_on, CliResult};

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Message for the assistant (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,
}

pub fn run(args: ChatArgs) -> CliResult {
    let config = Config::load_or_default();
    let api = CaffeineApi::from_config(&config.api)?;

    let reply = block_on(api.chat(&args.message.join(" ")))??;
    println!("{reply}");
    Ok(())
}
