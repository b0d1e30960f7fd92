//! Decay curve generation.
//!
//! Every intake decays independently with caffeine's half-life and the
//! remaining amounts superpose:
//!
//! ```text
//! remaining(t) = Σ amount_e × 0.5^((t - t_e) / half_life)    for all t_e <= t
//! ```
//!
//! The curve is evaluated on a regular grid around "now" and each point is
//! rounded to two decimals.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::window::{SamplingGrid, TimeRange};
use crate::error::ValidationError;
use crate::intake::IntakeEvent;

/// Physiological half-life of caffeine, in hours.
pub const CAFFEINE_HALF_LIFE_HOURS: f64 = 5.0;

/// Default spacing between samples, in minutes.
pub const DEFAULT_SAMPLE_STEP_MINUTES: u32 = 5;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// One point on the decay curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecaySample {
    /// Grid instant
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    /// Caffeine remaining across all intakes, rounded to 0.01 mg
    #[serde(rename = "caffeine_remaining_mg")]
    pub remaining_mg: f64,
}

impl DecaySample {
    pub fn new(timestamp: DateTime<Utc>, remaining_mg: f64) -> Self {
        Self {
            timestamp,
            remaining_mg,
        }
    }
}

/// Unrounded caffeine remaining at `at`.
///
/// Intakes later than `at` contribute nothing. Elapsed time is measured in
/// fractional hours. Non-finite amounts propagate into the result.
pub fn remaining_at(events: &[IntakeEvent], at: DateTime<Utc>) -> f64 {
    events
        .iter()
        .filter_map(|event| {
            let elapsed_hours = (at - event.timestamp).num_milliseconds() as f64 / MILLIS_PER_HOUR;
            (elapsed_hours >= 0.0)
                .then(|| event.amount_mg * 0.5_f64.powf(elapsed_hours / CAFFEINE_HALF_LIFE_HOURS))
        })
        .fold(0.0, |acc, v| acc + v)
}

/// Round to two decimal places.
pub fn round_mg(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Produces decay curves on a fixed-step grid.
#[derive(Debug, Clone)]
pub struct DecayCurveGenerator {
    step: Duration,
}

impl Default for DecayCurveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DecayCurveGenerator {
    /// Generator with the default 5-minute step.
    pub fn new() -> Self {
        Self {
            step: Duration::minutes(DEFAULT_SAMPLE_STEP_MINUTES as i64),
        }
    }

    /// Generator with a custom step. The step must be at least one minute.
    pub fn with_step_minutes(minutes: u32) -> Result<Self, ValidationError> {
        if minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "sample_step_minutes".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(Self {
            step: Duration::minutes(minutes as i64),
        })
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Sampling grid for `range` centered on `now`.
    pub fn grid(&self, range: TimeRange, now: DateTime<Utc>) -> SamplingGrid {
        SamplingGrid::new(now, range.half_span(), self.step)
    }

    /// Generate the curve for `range` around the current wall-clock time.
    pub fn generate(&self, events: &[IntakeEvent], range: TimeRange) -> Vec<DecaySample> {
        self.generate_at(events, range, Utc::now())
    }

    /// Generate the curve for `range` around an explicit `now`.
    pub fn generate_at(
        &self,
        events: &[IntakeEvent],
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> Vec<DecaySample> {
        let grid = self.grid(range, now);
        let samples: Vec<DecaySample> = grid
            .instants()
            .map(|t| DecaySample::new(t, round_mg(remaining_at(events, t))))
            .collect();

        tracing::debug!(
            range = %range,
            events = events.len(),
            samples = samples.len(),
            "generated decay curve"
        );
        samples
    }
}

/// Headline numbers of a generated curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSummary {
    /// Sample closest to the reference instant
    pub current: Option<DecaySample>,
    /// Highest sample (earliest one on ties)
    pub peak: Option<DecaySample>,
}

impl CurveSummary {
    pub fn from_samples(samples: &[DecaySample], now: DateTime<Utc>) -> Self {
        let current = samples
            .iter()
            .min_by_key(|s| (s.timestamp - now).num_milliseconds().unsigned_abs())
            .copied();
        let peak = samples.iter().fold(None::<DecaySample>, |best, s| match best {
            Some(b) if b.remaining_mg >= s.remaining_mg => Some(b),
            _ => Some(*s),
        });
        Self { current, peak }
    }
}
