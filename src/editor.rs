// src/editor.rs - Text-driven editing of move parameters
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::motion::MotionParameters;

/// Editable field of [`MotionParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    StartX,
    StartY,
    StartZ,
    EndX,
    EndY,
    EndZ,
    MaxVelocity,
    Acceleration,
    Deceleration,
    SamplingInterval,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::StartX,
        Field::StartY,
        Field::StartZ,
        Field::EndX,
        Field::EndY,
        Field::EndZ,
        Field::MaxVelocity,
        Field::Acceleration,
        Field::Deceleration,
        Field::SamplingInterval,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::StartX => "start.x",
            Field::StartY => "start.y",
            Field::StartZ => "start.z",
            Field::EndX => "end.x",
            Field::EndY => "end.y",
            Field::EndZ => "end.z",
            Field::MaxVelocity => "max_velocity",
            Field::Acceleration => "acceleration",
            Field::Deceleration => "deceleration",
            Field::SamplingInterval => "sampling_interval",
        }
    }

    /// Scalar limits must stay strictly positive; coordinates may be anything finite.
    pub fn requires_positive(&self) -> bool {
        matches!(
            self,
            Field::MaxVelocity | Field::Acceleration | Field::Deceleration | Field::SamplingInterval
        )
    }

    pub fn value(&self, params: &MotionParameters) -> f64 {
        match self {
            Field::StartX => params.start.x,
            Field::StartY => params.start.y,
            Field::StartZ => params.start.z,
            Field::EndX => params.end.x,
            Field::EndY => params.end.y,
            Field::EndZ => params.end.z,
            Field::MaxVelocity => params.max_velocity,
            Field::Acceleration => params.acceleration,
            Field::Deceleration => params.deceleration,
            Field::SamplingInterval => params.sampling_interval,
        }
    }

    fn slot<'a>(&self, params: &'a mut MotionParameters) -> &'a mut f64 {
        match self {
            Field::StartX => &mut params.start.x,
            Field::StartY => &mut params.start.y,
            Field::StartZ => &mut params.start.z,
            Field::EndX => &mut params.end.x,
            Field::EndY => &mut params.end.y,
            Field::EndZ => &mut params.end.z,
            Field::MaxVelocity => &mut params.max_velocity,
            Field::Acceleration => &mut params.acceleration,
            Field::Deceleration => &mut params.deceleration,
            Field::SamplingInterval => &mut params.sampling_interval,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Field::ALL
            .into_iter()
            .find(|field| field.name() == key)
            .ok_or(EditError::UnknownField(key))
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("Unknown parameter '{0}'")]
    UnknownField(String),
    #[error("Could not parse '{text}' for {field}")]
    Parse { field: Field, text: String },
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: Field, value: f64 },
    #[error("{field} must be greater than 0, got {value}")]
    NonPositive { field: Field, value: f64 },
}

/// Holds a working copy of the parameters. Rejected input leaves the
/// previous value in place; `publish` hands out a snapshot for generation.
#[derive(Debug, Clone, Default)]
pub struct ParameterEditor {
    params: MotionParameters,
}

impl ParameterEditor {
    pub fn new(params: MotionParameters) -> Self {
        Self { params }
    }

    /// Current value of `field`, formatted for a text box.
    pub fn field_text(&self, field: Field) -> String {
        field.value(&self.params).to_string()
    }

    pub fn set_field(&mut self, field: Field, text: &str) -> Result<(), EditError> {
        let value: f64 = text.trim().parse().map_err(|_| EditError::Parse {
            field,
            text: text.to_string(),
        })?;
        if !value.is_finite() {
            return Err(EditError::NonFinite { field, value });
        }
        if field.requires_positive() && value <= 0.0 {
            return Err(EditError::NonPositive { field, value });
        }
        *field.slot(&mut self.params) = value;
        tracing::debug!("Parameter {} set to {}", field, value);
        Ok(())
    }

    /// Apply a `key=value` style override, e.g. `("end.z", "25")`.
    pub fn apply(&mut self, key: &str, text: &str) -> Result<(), EditError> {
        let field = key.parse()?;
        self.set_field(field, text)
    }

    pub fn params(&self) -> &MotionParameters {
        &self.params
    }

    pub fn publish(&self) -> MotionParameters {
        self.params.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Vec3;

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>(), Ok(field));
        }
        assert_eq!(" Max_Velocity ".parse::<Field>(), Ok(Field::MaxVelocity));
        assert!(matches!("feedrate".parse::<Field>(), Err(EditError::UnknownField(_))));
    }

    #[test]
    fn test_field_text_reflects_params() {
        let editor = ParameterEditor::default();
        assert_eq!(editor.field_text(Field::EndZ), "10");
        assert_eq!(editor.field_text(Field::SamplingInterval), "0.1");
    }

    #[test]
    fn test_set_field_updates_snapshot() {
        let mut editor = ParameterEditor::default();
        editor.set_field(Field::EndX, "-3.5").unwrap();
        editor.set_field(Field::Acceleration, " 4 ").unwrap();
        let params = editor.publish();
        assert_eq!(params.end, Vec3::new(-3.5, 0.0, 10.0));
        assert_eq!(params.acceleration, 4.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_malformed_input_keeps_previous_value() {
        let mut editor = ParameterEditor::default();
        assert!(matches!(
            editor.set_field(Field::MaxVelocity, "fast"),
            Err(EditError::Parse { .. })
        ));
        assert!(matches!(
            editor.set_field(Field::MaxVelocity, "NaN"),
            Err(EditError::NonFinite { .. })
        ));
        assert!(matches!(
            editor.set_field(Field::StartY, "inf"),
            Err(EditError::NonFinite { .. })
        ));
        assert_eq!(
            editor.set_field(Field::Deceleration, "-2"),
            Err(EditError::NonPositive { field: Field::Deceleration, value: -2.0 })
        );
        assert_eq!(editor.params(), &MotionParameters::default());
    }

    #[test]
    fn test_negative_coordinates_allowed() {
        let mut editor = ParameterEditor::default();
        editor.apply("start.z", "-12").unwrap();
        assert_eq!(editor.params().start.z, -12.0);
    }

    #[test]
    fn test_published_snapshot_is_independent() {
        let mut editor = ParameterEditor::default();
        let before = editor.publish();
        editor.apply("max_velocity", "9").unwrap();
        assert_eq!(before.max_velocity, 5.0);
        assert_eq!(editor.params().max_velocity, 9.0);
    }
}
