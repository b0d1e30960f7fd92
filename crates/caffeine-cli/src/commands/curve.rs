//! Decay curve command.

use chrono::{DateTime, Local, Utc};
use clap::Args;
use serde::Serialize;

use caffeine_core::{
    align_intakes, AnnotatedIntake, Config, CurveSummary, DecaySample, TimeRange,
    CAFFEINE_HALF_LIFE_HOURS,
};

use super::common::{reference_now, CliResult, SourceArgs};

const CHART_ROWS: usize = 24;
const BAR_WIDTH: usize = 40;

#[derive(Args, Debug)]
pub struct CurveArgs {
    /// Time range (1d, 7d or 30d); defaults to chart.default_range
    #[arg(long, short = 'r')]
    pub range: Option<TimeRange>,
    #[command(flatten)]
    pub source: SourceArgs,
    /// Center the window on this RFC 3339 instant instead of the clock
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,
    /// Print every sample as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct CurveReport<'a> {
    range: TimeRange,
    now: DateTime<Utc>,
    half_life_hours: f64,
    summary: CurveSummary,
    samples: &'a [DecaySample],
}

pub fn run(args: CurveArgs) -> CliResult {
    let config = Config::load_or_default();
    let range = args.range.unwrap_or(config.chart.default_range);
    let now = reference_now(args.now);

    let events = args.source.load(&config)?;
    let samples = config.curve_generator()?.generate_at(&events, range, now);
    let summary = CurveSummary::from_samples(&samples, now);

    if args.json {
        let report = CurveReport {
            range,
            now,
            half_life_hours: CAFFEINE_HALF_LIFE_HOURS,
            summary,
            samples: &samples,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if events.is_empty() {
        println!("No caffeine data available");
        return Ok(());
    }

    let markers = align_intakes(&events, &samples);
    println!("{}", render_chart(&samples, &markers, range, CHART_ROWS));

    println!("Summary:");
    if let Some(current) = summary.current {
        println!("  Caffeine remaining now: {:.2} mg", current.remaining_mg);
    }
    if let Some(peak) = summary.peak {
        println!(
            "  Peak: {:.2} mg at {}",
            peak.remaining_mg,
            peak.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        );
    }
    println!("  Intakes: {}", events.len());

    Ok(())
}

/// Horizontal bar chart, one row per bucket of consecutive samples.
///
/// Each row shows the highest level in its bucket; `●` marks buckets that
/// contain an intake marker.
pub fn render_chart(
    samples: &[DecaySample],
    markers: &[AnnotatedIntake],
    range: TimeRange,
    rows: usize,
) -> String {
    let mut output = format!("\nCaffeine Over Time ({}):\n", range.label());
    output.push_str(&"─".repeat(BAR_WIDTH + 24));
    output.push('\n');

    if samples.is_empty() || rows == 0 {
        return output;
    }

    let peak = samples
        .iter()
        .map(|s| s.remaining_mg)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    let chunk_size = samples.len().div_ceil(rows);

    for chunk in samples.chunks(chunk_size) {
        let level = chunk
            .iter()
            .map(|s| s.remaining_mg)
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        let first = chunk[0].timestamp;
        let last = chunk[chunk.len() - 1].timestamp;
        let has_marker = markers
            .iter()
            .any(|m| m.sample.timestamp >= first && m.sample.timestamp <= last);

        let bar_length = if peak > 0.0 {
            ((level / peak) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let label = range.format_axis_label(&first.with_timezone(&Local));

        output.push_str(&format!(
            "{:>8} {}{} {} {:.1} mg\n",
            label,
            "█".repeat(bar_length),
            " ".repeat(BAR_WIDTH - bar_length),
            if has_marker { "●" } else { " " },
            level
        ));
    }

    output.push_str(&"─".repeat(BAR_WIDTH + 24));
    output.push_str("\n● Intake\n");
    output
}
