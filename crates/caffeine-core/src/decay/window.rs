//! Chart windows and the sampling grid laid over them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Named chart window, symmetric around the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::OneDay, TimeRange::SevenDays, TimeRange::ThirtyDays];

    /// Short identifier ("1d", "7d", "30d").
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::OneDay => "1d",
            TimeRange::SevenDays => "7d",
            TimeRange::ThirtyDays => "30d",
        }
    }

    /// Human-readable name for menus and headings.
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::OneDay => "Today",
            TimeRange::SevenDays => "Last 7 days",
            TimeRange::ThirtyDays => "Last 30 days",
        }
    }

    /// Distance covered on each side of "now".
    pub fn half_span(&self) -> Duration {
        match self {
            TimeRange::OneDay => Duration::hours(24),
            TimeRange::SevenDays => Duration::hours(7 * 24),
            TimeRange::ThirtyDays => Duration::hours(30 * 24),
        }
    }

    /// Horizontal axis label: clock time for a single day, calendar day otherwise.
    pub fn format_axis_label<Tz>(&self, ts: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self {
            TimeRange::OneDay => ts.format("%I:%M %p").to_string(),
            TimeRange::SevenDays | TimeRange::ThirtyDays => ts.format("%b %-d").to_string(),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1d" | "today" | "day" => Ok(TimeRange::OneDay),
            "7d" | "week" => Ok(TimeRange::SevenDays),
            "30d" | "month" => Ok(TimeRange::ThirtyDays),
            _ => Err(ValidationError::UnknownTimeRange(s.to_string())),
        }
    }
}

/// Regular grid of sample instants covering `[center - span, center + span]`.
///
/// The grid is anchored on `center`, so `center` itself is always a sample.
/// When the span is not a whole number of steps the outermost partial step
/// on each side is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingGrid {
    center: DateTime<Utc>,
    steps_per_side: i64,
    step: Duration,
}

impl SamplingGrid {
    /// `step` must be positive; callers go through `DecayCurveGenerator`,
    /// which guarantees it.
    pub(crate) fn new(center: DateTime<Utc>, half_span: Duration, step: Duration) -> Self {
        let step_ms = step.num_milliseconds().max(1);
        Self {
            center,
            steps_per_side: half_span.num_milliseconds() / step_ms,
            step,
        }
    }

    pub fn center(&self) -> DateTime<Utc> {
        self.center
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// First sample instant.
    pub fn start(&self) -> DateTime<Utc> {
        self.center - self.step * self.steps_per_side as i32
    }

    /// Last sample instant.
    pub fn end(&self) -> DateTime<Utc> {
        self.center + self.step * self.steps_per_side as i32
    }

    /// Number of samples on the grid.
    pub fn len(&self) -> usize {
        (self.steps_per_side * 2 + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Sample instants in ascending order.
    pub fn instants(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        (-self.steps_per_side..=self.steps_per_side).map(move |k| self.center + self.step * k as i32)
    }
}
