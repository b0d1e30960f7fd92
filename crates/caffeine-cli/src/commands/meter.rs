//! Daily caffeine meter command.

use chrono::{NaiveDate, Utc};
use clap::Args;

use caffeine_core::Config;

use super::common::{CliResult, SourceArgs};

const GAUGE_WIDTH: usize = 30;

#[derive(Args, Debug)]
pub struct MeterArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Day to report (YYYY-MM-DD, UTC); defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Print the reading as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: MeterArgs) -> CliResult {
    let config = Config::load_or_default();
    let events = args.source.load(&config)?;
    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let reading = config.daily_meter().reading_for(&events, date);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reading)?);
        return Ok(());
    }

    println!("\nCaffeine Meter ({})\n", reading.date);
    println!("  {}", reading.render_gauge(GAUGE_WIDTH));
    println!("  Drinks logged: {}", reading.drink_count);
    if reading.is_over_allowance() {
        println!(
            "  ⚠ Over the daily allowance by {:.0} mg",
            -reading.remaining_allowance_mg
        );
    } else {
        println!(
            "  Remaining allowance: {:.0} mg",
            reading.remaining_allowance_mg
        );
    }
    Ok(())
}
