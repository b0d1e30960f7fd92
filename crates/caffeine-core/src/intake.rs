//! Intake records as the backend serves them.
//!
//! Two shapes come over the wire: the slim `{date, caffeine_mg}` history used
//! for the decay chart, and the full `CaffeineLog` row with nutrition facts.
//! Both reduce to an [`IntakeEvent`], which is all the decay estimator needs.

use std::io::Read;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ValidationError};

/// One real-world caffeine consumption.
///
/// Several events may share a timestamp (two drinks at once).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntakeEvent {
    /// When the drink was consumed
    #[serde(rename = "date", alias = "timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Caffeine consumed, in milligrams
    #[serde(rename = "caffeine_mg", alias = "amount_mg")]
    pub amount_mg: f64,
}

impl IntakeEvent {
    pub fn new(timestamp: DateTime<Utc>, amount_mg: f64) -> Self {
        Self {
            timestamp,
            amount_mg,
        }
    }

    /// Reject negative and non-finite amounts.
    ///
    /// `index` is the position of the record in its batch and is only used
    /// for the error message.
    pub fn validate(&self, index: usize) -> Result<(), ValidationError> {
        if !self.amount_mg.is_finite() || self.amount_mg < 0.0 {
            return Err(ValidationError::InvalidAmount {
                index,
                amount: self.amount_mg,
            });
        }
        Ok(())
    }
}

/// Validate every event of a freshly fetched batch.
pub fn validate_events(events: &[IntakeEvent]) -> Result<(), ValidationError> {
    for (index, event) in events.iter().enumerate() {
        if let Err(err) = event.validate(index) {
            tracing::warn!(index, amount_mg = event.amount_mg, "rejecting intake record");
            return Err(err);
        }
    }
    Ok(())
}

/// Parse a JSON array of `{date, caffeine_mg}` records.
pub fn parse_intake_history(json: &str) -> Result<Vec<IntakeEvent>> {
    let events: Vec<IntakeEvent> = serde_json::from_str(json)?;
    validate_events(&events)?;
    Ok(events)
}

/// Read and parse an intake history from any reader (file, stdin).
pub fn read_intake_history<R: Read>(mut reader: R) -> Result<Vec<IntakeEvent>> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    parse_intake_history(&buf)
}

/// Owner of a log as serialized by the backend (primary key or username).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(u64),
    Name(String),
}

/// B vitamin content of a drink.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BVitamins {
    #[serde(default)]
    pub vitamin_b3_mg: f64,
    #[serde(default)]
    pub vitamin_b6_mg: f64,
    #[serde(default)]
    pub vitamin_b12_mcg: f64,
}

/// Flags for common additional ingredients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OtherIngredients {
    #[serde(default)]
    pub carbonated_water: bool,
    #[serde(default)]
    pub natural_flavors: bool,
    #[serde(default)]
    pub sucralose: bool,
}

/// A full caffeine log entry as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaffeineLog {
    pub id: Uuid,
    #[serde(default)]
    pub user: Option<UserRef>,
    pub beverage_name: Option<String>,
    pub serving_size: Option<String>,
    pub caffeine_mg: f64,
    pub total_fat_g: Option<f64>,
    pub sodium_mg: Option<f64>,
    pub total_carbohydrates_g: Option<f64>,
    pub sugars_g: Option<f64>,
    pub added_sugars_g: Option<f64>,
    pub protein_g: Option<f64>,
    pub taurine_mg: Option<f64>,
    pub calories_kcal: Option<f64>,
    pub b_vitamins: Option<BVitamins>,
    pub other_ingredients: Option<OtherIngredients>,
    pub image_url: Option<String>,
    pub additional_notes: Option<String>,
    #[serde(default)]
    pub confirmed: bool,
    pub created_at: DateTime<Utc>,
}

impl CaffeineLog {
    /// The log reduced to what the decay estimator consumes.
    pub fn intake_event(&self) -> IntakeEvent {
        IntakeEvent::new(self.created_at, self.caffeine_mg)
    }

    /// Display name, falling back to a generic label.
    pub fn display_name(&self) -> &str {
        self.beverage_name.as_deref().unwrap_or("Unnamed drink")
    }
}

/// Payload for creating a new log entry.
///
/// The server stamps `user` and `created_at` itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCaffeineLog {
    pub caffeine_mg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beverage_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugars_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_kcal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl NewCaffeineLog {
    pub fn new(caffeine_mg: f64) -> Self {
        Self {
            caffeine_mg,
            ..Default::default()
        }
    }

    pub fn with_beverage_name(mut self, name: impl Into<String>) -> Self {
        self.beverage_name = Some(name.into());
        self
    }

    pub fn with_serving_size(mut self, size: impl Into<String>) -> Self {
        self.serving_size = Some(size.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.caffeine_mg.is_finite() || self.caffeine_mg < 0.0 {
            return Err(ValidationError::InvalidAmount {
                index: 0,
                amount: self.caffeine_mg,
            });
        }
        Ok(())
    }
}
