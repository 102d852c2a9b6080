//! # trapezoid_motion
//!
//! Velocity profiles for a single straight-line move between two points.
//!
//! - `motion` plans the move (trapezoidal, or triangular when the ceiling is
//!   out of reach), samples it, and plays it back or turns it into chart rows.
//! - `editor` turns text input into validated [`MotionParameters`].
//! - `config` loads moves and generator limits from TOML.

pub mod config;
pub mod editor;
pub mod motion;

pub use config::{Config, ConfigError, load_config};
pub use editor::{EditError, Field, ParameterEditor};
pub use motion::{
    MotionParameters, MotionPlayer, MotionPoint, Phase, ProfileError, ProfilePlan, ProfileShape,
    ValidationError, Vec3, generate, generate_bounded, try_generate, validate,
};
