//! Intake markers on the decay curve.

use chrono::{DateTime, Local, Utc};
use clap::Args;

use caffeine_core::{align_intakes, Config, MatchKind, TimeRange};

use super::common::{reference_now, CliResult, SourceArgs};

#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// Time range (1d, 7d or 30d); defaults to chart.default_range
    #[arg(long, short = 'r')]
    pub range: Option<TimeRange>,
    #[command(flatten)]
    pub source: SourceArgs,
    /// Center the window on this RFC 3339 instant instead of the clock
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,
    /// Print markers as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: AnnotateArgs) -> CliResult {
    let config = Config::load_or_default();
    let range = args.range.unwrap_or(config.chart.default_range);
    let now = reference_now(args.now);

    let events = args.source.load(&config)?;
    let samples = config.curve_generator()?.generate_at(&events, range, now);
    let markers = align_intakes(&events, &samples);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&markers)?);
        return Ok(());
    }

    if markers.is_empty() {
        println!("No caffeine data available");
        return Ok(());
    }

    println!("{:<18} {:>10} {:>12}  {}", "Intake", "Amount", "On curve", "Match");
    for marker in &markers {
        let matched = match marker.matched {
            MatchKind::Exact => "exact",
            MatchKind::Nearest => "nearest",
            MatchKind::Synthetic => "none",
        };
        println!(
            "{:<18} {:>7.1} mg {:>9.2} mg  {}",
            marker
                .intake
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M"),
            marker.intake.amount_mg,
            marker.sample.remaining_mg,
            matched
        );
    }
    Ok(())
}
