//! # Caffeine Core Library
//!
//! This library provides the core logic of the caffeine tracker. The CLI
//! binary is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Decay**: Estimates caffeine remaining in the body over time from a list
//!   of intakes, using caffeine's 5-hour half-life, and places each intake on
//!   the resulting curve
//! - **Meter**: Daily intake total against a configurable allowance
//! - **API**: REST client for fetching and creating intake logs
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`DecayCurveGenerator`]: Regularly sampled decay curve
//! - [`align_intakes`]: Intake-to-sample alignment for chart markers
//! - [`DailyMeter`]: Daily caffeine meter
//! - [`CaffeineApi`]: Backend client
//! - [`Config`]: Application configuration management

pub mod api;
pub mod decay;
pub mod error;
pub mod intake;
pub mod meter;
pub mod storage;

pub use api::CaffeineApi;
pub use decay::{
    align_intakes, AnnotatedIntake, CurveSummary, DecayCurveGenerator, DecaySample, MatchKind,
    TimeRange, CAFFEINE_HALF_LIFE_HOURS,
};
pub use error::{ApiError, ConfigError, CoreError, ValidationError};
pub use intake::{CaffeineLog, IntakeEvent, NewCaffeineLog};
pub use meter::{DailyMeter, MeterReading};
pub use storage::Config;
