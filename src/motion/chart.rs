// src/motion/chart.rs - Plot-ready rows derived from a profile
use serde::{Deserialize, Serialize};

use super::params::MotionParameters;
use super::trajectory::MotionPoint;

/// One row of the velocity / distance / acceleration chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartSample {
    pub time: f64,
    pub velocity: f64,
    /// Distance from the move's start position
    pub distance: f64,
    /// Acceleration sign taken from the phase tag
    pub acceleration: f64,
}

pub fn chart_series(points: &[MotionPoint], params: &MotionParameters) -> Vec<ChartSample> {
    points
        .iter()
        .map(|point| ChartSample {
            time: point.time,
            velocity: point.velocity,
            distance: params.start.distance(&point.position),
            acceleration: point.phase.signed_acceleration(params),
        })
        .collect()
}
