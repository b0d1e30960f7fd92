//! Pairing intakes with curve samples for chart markers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::curve::DecaySample;
use crate::intake::IntakeEvent;

/// How an intake found its sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// A sample falls in the same UTC minute as the intake
    Exact,
    /// Closest sample by absolute time difference
    Nearest,
    /// No samples were available; a zero sample was made up at the intake time
    Synthetic,
}

/// An intake paired with the curve sample it is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedIntake {
    pub intake: IntakeEvent,
    pub sample: DecaySample,
    pub matched: MatchKind,
}

fn minute_of(ts: DateTime<Utc>) -> i64 {
    ts.timestamp().div_euclid(60)
}

/// Sample with the smallest absolute distance to `at`; first one wins ties.
pub fn nearest_sample(samples: &[DecaySample], at: DateTime<Utc>) -> Option<&DecaySample> {
    let mut best: Option<(&DecaySample, u64)> = None;
    for sample in samples {
        let diff = (sample.timestamp - at).num_milliseconds().unsigned_abs();
        match best {
            Some((_, best_diff)) if diff >= best_diff => {}
            _ => best = Some((sample, diff)),
        }
    }
    best.map(|(sample, _)| sample)
}

/// Align one intake against the curve.
pub fn align_intake(intake: &IntakeEvent, samples: &[DecaySample]) -> AnnotatedIntake {
    let minute = minute_of(intake.timestamp);
    if let Some(sample) = samples.iter().find(|s| minute_of(s.timestamp) == minute) {
        return AnnotatedIntake {
            intake: *intake,
            sample: *sample,
            matched: MatchKind::Exact,
        };
    }

    match nearest_sample(samples, intake.timestamp) {
        Some(sample) => AnnotatedIntake {
            intake: *intake,
            sample: *sample,
            matched: MatchKind::Nearest,
        },
        None => AnnotatedIntake {
            intake: *intake,
            sample: DecaySample::new(intake.timestamp, 0.0),
            matched: MatchKind::Synthetic,
        },
    }
}

/// Align every intake against the curve, one annotation per intake, in input order.
pub fn align_intakes(intakes: &[IntakeEvent], samples: &[DecaySample]) -> Vec<AnnotatedIntake> {
    let annotated: Vec<AnnotatedIntake> = intakes
        .iter()
        .map(|intake| align_intake(intake, samples))
        .collect();

    let fallbacks = annotated
        .iter()
        .filter(|a| a.matched != MatchKind::Exact)
        .count();
    if fallbacks > 0 {
        tracing::debug!(
            intakes = intakes.len(),
            fallbacks,
            "some intakes had no sample in the same minute"
        );
    }
    annotated
}
