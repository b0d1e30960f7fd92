//! Daily caffeine meter.
//!
//! Sums what was logged on one calendar day (UTC) and compares it with a
//! daily allowance.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::intake::IntakeEvent;

/// Commonly cited safe daily intake for healthy adults, in milligrams.
pub const DEFAULT_DAILY_ALLOWANCE_MG: f64 = 400.0;

/// Meter state for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterReading {
    pub date: NaiveDate,
    /// Total caffeine logged that day
    pub intake_mg: f64,
    pub allowance_mg: f64,
    /// `allowance_mg - intake_mg`; negative once the allowance is exceeded
    pub remaining_allowance_mg: f64,
    pub drink_count: usize,
}

impl MeterReading {
    pub fn is_over_allowance(&self) -> bool {
        self.intake_mg > self.allowance_mg
    }

    /// Share of the allowance consumed (0.0 when the allowance is zero).
    pub fn fraction_used(&self) -> f64 {
        if self.allowance_mg > 0.0 {
            self.intake_mg / self.allowance_mg
        } else {
            0.0
        }
    }

    /// Render a one-line gauge, e.g. `[██████░░░░░░░░░] 160 / 400 mg`.
    pub fn render_gauge(&self, width: usize) -> String {
        let filled = ((self.fraction_used().clamp(0.0, 1.0)) * width as f64).round() as usize;
        format!(
            "[{}{}] {:.0} / {:.0} mg",
            "█".repeat(filled),
            "░".repeat(width - filled),
            self.intake_mg,
            self.allowance_mg
        )
    }
}

/// Computes meter readings.
#[derive(Debug, Clone)]
pub struct DailyMeter {
    allowance_mg: f64,
}

impl Default for DailyMeter {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_ALLOWANCE_MG)
    }
}

impl DailyMeter {
    pub fn new(allowance_mg: f64) -> Self {
        Self { allowance_mg }
    }

    pub fn allowance_mg(&self) -> f64 {
        self.allowance_mg
    }

    /// Reading for an explicit UTC calendar day.
    pub fn reading_for(&self, events: &[IntakeEvent], date: NaiveDate) -> MeterReading {
        let todays: Vec<&IntakeEvent> = events
            .iter()
            .filter(|e| e.timestamp.date_naive() == date)
            .collect();
        let intake_mg = todays.iter().fold(0.0, |acc, e| acc + e.amount_mg);

        MeterReading {
            date,
            intake_mg,
            allowance_mg: self.allowance_mg,
            remaining_allowance_mg: self.allowance_mg - intake_mg,
            drink_count: todays.len(),
        }
    }

    /// Reading for the UTC day containing `now`.
    pub fn reading_at(&self, events: &[IntakeEvent], now: DateTime<Utc>) -> MeterReading {
        self.reading_for(events, now.date_naive())
    }
}
