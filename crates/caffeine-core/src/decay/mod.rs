//! Caffeine decay estimation.
//!
//! Turns a list of intakes into a regularly sampled curve of caffeine
//! remaining in the body, and places each intake on that curve.

mod aligner;
mod curve;
mod window;

pub use aligner::{align_intake, align_intakes, nearest_sample, AnnotatedIntake, MatchKind};
pub use curve::{
    remaining_at, round_mg, CurveSummary, DecayCurveGenerator, DecaySample,
    CAFFEINE_HALF_LIFE_HOURS, DEFAULT_SAMPLE_STEP_MINUTES,
};
pub use window::{SamplingGrid, TimeRange};
