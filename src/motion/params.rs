// src/motion/params.rs - Move parameters and their validation
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::vector::Vec3;

/// Inputs for one straight-line move.
///
/// Treated as an immutable value for the duration of a generation call;
/// editors publish a fresh copy instead of mutating one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParameters {
    /// Starting position
    pub start: Vec3,
    /// Target position
    pub end: Vec3,
    /// Velocity ceiling of the constant-speed phase (units/s)
    pub max_velocity: f64,
    /// Ramp-up acceleration magnitude (units/s²)
    pub acceleration: f64,
    /// Ramp-down deceleration magnitude (units/s²)
    pub deceleration: f64,
    /// Time between emitted samples (s)
    pub sampling_interval: f64,
}

impl Default for MotionParameters {
    fn default() -> Self {
        Self {
            start: Vec3::ZERO,
            end: Vec3::new(0.0, 0.0, 10.0),
            max_velocity: 5.0,
            acceleration: 2.0,
            deceleration: 2.0,
            sampling_interval: 0.1,
        }
    }
}

/// Which end of the move a position check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Parameters cannot be null")]
    MissingParameters,
    #[error("Invalid acceleration value: {0}. Must be greater than 0.")]
    InvalidAcceleration(f64),
    #[error("Invalid deceleration value: {0}. Must be greater than 0.")]
    InvalidDeceleration(f64),
    #[error("Invalid sampling interval: {0}. Must be greater than 0.")]
    InvalidSamplingInterval(f64),
    #[error("Invalid max velocity: {0}. Must be greater than 0.")]
    InvalidMaxVelocity(f64),
    #[error("Invalid {endpoint} position: {value:?}. Coordinates must be finite.")]
    NonFinitePosition { endpoint: Endpoint, value: Vec3 },
    #[error("Distance from {start:?} to {end:?} overflows")]
    DistanceOverflow { start: Vec3, end: Vec3 },
    /// Raised while planning: the move is fine, but sampling it would need
    /// more points than memory can address.
    #[error("A {total_time}s move cannot be sampled every {sampling_interval}s")]
    SampleCountOverflow { total_time: f64, sampling_interval: f64 },
}

impl ValidationError {
    /// Name of the parameter field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingParameters => "parameters",
            ValidationError::InvalidAcceleration(_) => "acceleration",
            ValidationError::InvalidDeceleration(_) => "deceleration",
            ValidationError::InvalidSamplingInterval(_) => "sampling_interval",
            ValidationError::InvalidMaxVelocity(_) => "max_velocity",
            ValidationError::NonFinitePosition { endpoint: Endpoint::Start, .. } => "start",
            ValidationError::NonFinitePosition { endpoint: Endpoint::End, .. } => "end",
            ValidationError::DistanceOverflow { .. } => "end",
            ValidationError::SampleCountOverflow { .. } => "sampling_interval",
        }
    }
}

// NaN fails the comparison too, so it is rejected with the field's reason.
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl MotionParameters {
    /// Check every field; the first violation wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_positive(self.acceleration) {
            return Err(ValidationError::InvalidAcceleration(self.acceleration));
        }
        if !is_positive(self.deceleration) {
            return Err(ValidationError::InvalidDeceleration(self.deceleration));
        }
        if !is_positive(self.sampling_interval) {
            return Err(ValidationError::InvalidSamplingInterval(self.sampling_interval));
        }
        if !is_positive(self.max_velocity) {
            return Err(ValidationError::InvalidMaxVelocity(self.max_velocity));
        }
        if !self.start.is_finite() {
            return Err(ValidationError::NonFinitePosition {
                endpoint: Endpoint::Start,
                value: self.start,
            });
        }
        if !self.end.is_finite() {
            return Err(ValidationError::NonFinitePosition {
                endpoint: Endpoint::End,
                value: self.end,
            });
        }
        // Finite endpoints can still be too far apart to measure
        if !self.start.distance(&self.end).is_finite() {
            return Err(ValidationError::DistanceOverflow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// Validate optional parameters; absence is reported, not a panic.
pub fn validate(params: Option<&MotionParameters>) -> Result<(), ValidationError> {
    match params {
        Some(params) => params.validate(),
        None => Err(ValidationError::MissingParameters),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters_are_valid() {
        assert!(MotionParameters::default().validate().is_ok());
    }

    #[test]
    fn test_missing_parameters() {
        let err = validate(None).unwrap_err();
        assert_eq!(err, ValidationError::MissingParameters);
        assert_eq!(err.to_string(), "Parameters cannot be null");
    }

    #[test]
    fn test_each_field_reports_its_own_reason() {
        let cases: [(fn(&mut MotionParameters), &str); 4] = [
            (|p| p.acceleration = -2.0, "acceleration"),
            (|p| p.deceleration = 0.0, "deceleration"),
            (|p| p.sampling_interval = -0.1, "sampling_interval"),
            (|p| p.max_velocity = 0.0, "max_velocity"),
        ];
        for (mutate, field) in cases {
            let mut params = MotionParameters::default();
            mutate(&mut params);
            let err = params.validate().unwrap_err();
            assert_eq!(err.field(), field);
        }
    }

    #[test]
    fn test_first_failure_wins() {
        let params = MotionParameters {
            acceleration: 0.0,
            deceleration: -1.0,
            max_velocity: -5.0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ValidationError::InvalidAcceleration(0.0)));
    }

    #[test]
    fn test_error_message_includes_value() {
        let params = MotionParameters { acceleration: -2.0, ..Default::default() };
        assert_eq!(
            params.validate().unwrap_err().to_string(),
            "Invalid acceleration value: -2. Must be greater than 0."
        );
    }

    #[test]
    fn test_nan_and_infinity_rejected() {
        let params = MotionParameters { max_velocity: f64::NAN, ..Default::default() };
        assert!(matches!(params.validate(), Err(ValidationError::InvalidMaxVelocity(_))));

        let params = MotionParameters { deceleration: f64::INFINITY, ..Default::default() };
        assert!(matches!(params.validate(), Err(ValidationError::InvalidDeceleration(_))));

        let params = MotionParameters {
            end: Vec3::new(0.0, f64::NAN, 0.0),
            ..Default::default()
        };
        assert_eq!(params.validate().unwrap_err().field(), "end");
    }

    #[test]
    fn test_overflowing_distance_rejected() {
        let params = MotionParameters {
            start: Vec3::new(-1e308, 0.0, 0.0),
            end: Vec3::new(1e308, 0.0, 0.0),
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(ValidationError::DistanceOverflow { .. })));

        // Each component fits, but the squared length does not
        let params = MotionParameters {
            start: Vec3::ZERO,
            end: Vec3::new(1e200, 1e200, 0.0),
            ..Default::default()
        };
        assert_eq!(params.validate().unwrap_err().field(), "end");
    }
}
