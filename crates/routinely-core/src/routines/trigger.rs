//! Trigger definitions for routine tasks.
//!
//! A trigger is either a time of day or a geofence transition. The sum type
//! makes "exactly one of activation time / geofence" a property of the type
//! instead of an optional-field convention.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Mean earth radius in meters, for great-circle distance.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// When a task's condition is satisfied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Trigger {
    /// Fires on the clock tick whose "HH:MM" equals `at`.
    #[serde(rename = "Time")]
    Time { at: String },

    /// Fires on an enter/leave transition of a circular geofence.
    #[serde(rename = "Geofence")]
    Geofence(Geofence),
}

impl Trigger {
    pub fn type_name(&self) -> &'static str {
        match self {
            Trigger::Time { .. } => "Time",
            Trigger::Geofence(_) => "Geofence",
        }
    }
}

/// Which boundary crossing fires a geofence task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Enter,
    Leave,
}

/// A circular geographic region with a transition direction.
/// Immutable once embedded in a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Geofence {
    pub latitude: f64,
    pub longitude: f64,
    /// Radius in meters, strictly positive.
    pub radius_m: f64,
    pub trigger_on: TransitionKind,
}

impl Geofence {
    /// Check the range constraints: latitude in [-90, 90], longitude in
    /// [-180, 180], radius > 0 and finite.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::new(
                "geofence.latitude",
                "latitude must be between -90 and 90",
            ));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::new(
                "geofence.longitude",
                "longitude must be between -180 and 180",
            ));
        }
        if !self.radius_m.is_finite() || self.radius_m <= 0.0 {
            return Err(ValidationError::new(
                "geofence.radius_m",
                "radius must be a positive number of meters",
            ));
        }
        Ok(())
    }

    /// Whether a sample lies inside the fence (boundary counts as inside).
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        haversine_meters(self.latitude, self.longitude, latitude, longitude) <= self.radius_m
    }
}

/// Great-circle distance between two coordinates, in meters.
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push a just past 1.0 near the antipode; clamp to keep
    // asin out of NaN territory.
    2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
}

/// Validate an "HH:MM" activation time (00-23 hours, 00-59 minutes).
pub fn validate_hhmm(value: &str) -> Result<(), ValidationError> {
    let invalid = || {
        ValidationError::new(
            "activation_time",
            format!("'{value}' is not a valid HH:MM time"),
        )
    };

    let (hh, mm) = value.split_once(':').ok_or_else(invalid)?;
    if hh.len() != 2 || mm.len() != 2 {
        return Err(invalid());
    }
    // u8::from_str accepts a leading '+', so digits must be checked first.
    if !hh.bytes().all(|b| b.is_ascii_digit()) || !mm.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let hours: u8 = hh.parse().map_err(|_| invalid())?;
    let minutes: u8 = mm.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(())
}
