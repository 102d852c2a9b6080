// src/motion/mod.rs - Single-move motion profiles and their consumers

pub mod chart;
pub mod params;
pub mod player;
pub mod trajectory;
pub mod vector;

pub use chart::{ChartSample, chart_series};
pub use params::{Endpoint, MotionParameters, ValidationError, validate};
pub use player::{Clock, ManualClock, MonotonicClock, MotionPlayer, PlayerError};
pub use trajectory::{
    MAX_SAMPLES, MIN_DISTANCE, MotionPoint, Phase, ProfileError, ProfilePlan, ProfileShape, Samples, generate,
    generate_bounded, try_generate,
};
pub use vector::Vec3;
