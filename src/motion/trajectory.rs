// src/motion/trajectory.rs
/// Trapezoidal velocity profile generator
///
/// Plans a single straight-line move from rest to rest: accelerate, cruise at
/// the velocity ceiling, decelerate. When the move is too short to reach the
/// ceiling the cruise phase disappears and the profile becomes triangular.
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use thiserror::Error;

use super::params::{MotionParameters, ValidationError};
use super::vector::Vec3;

/// Moves shorter than this are treated as already at the target.
pub const MIN_DISTANCE: f64 = 1e-6;

/// Most points a sampled profile may have; beyond this a `Vec` of them
/// cannot be addressed.
pub const MAX_SAMPLES: usize = isize::MAX as usize / std::mem::size_of::<MotionPoint>();

// Larger profiles grow the vector as they go instead of reserving up front
const PREALLOCATE_LIMIT: usize = 1 << 20;

/// Kinematic regime that produced a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Accelerating,
    Constant,
    Decelerating,
    Finished,
}

impl Phase {
    /// Signed acceleration applied during this phase.
    pub fn signed_acceleration(&self, params: &MotionParameters) -> f64 {
        match self {
            Phase::Accelerating => params.acceleration,
            Phase::Decelerating => -params.deceleration,
            Phase::Constant | Phase::Finished => 0.0,
        }
    }
}

/// Motion state at a specific time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionPoint {
    /// Position on the line from start to end
    pub position: Vec3,
    /// Scalar speed (units/s), never negative
    pub velocity: f64,
    /// Time since start of move (s)
    pub time: f64,
    pub phase: Phase,
}

/// Overall shape of a planned profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileShape {
    /// Start and end coincide; nothing to move.
    Stationary,
    /// Velocity ceiling not reachable; ramps meet at a lower peak.
    Triangular,
    /// Accelerate, cruise at the ceiling, decelerate.
    Trapezoidal,
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Invalid trajectory parameters: {0}")]
    Validation(#[from] ValidationError),
    #[error("Profile needs {required} samples, limit is {limit}")]
    TooManySamples { required: usize, limit: usize },
}

/// Phase boundaries for one move, computed once from validated parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePlan {
    start: Vec3,
    end: Vec3,
    direction: Vec3,
    distance: f64,
    acceleration: f64,
    deceleration: f64,
    sampling_interval: f64,
    peak_velocity: f64,
    accel_time: f64,
    constant_time: f64,
    decel_time: f64,
    accel_distance: f64,
    constant_distance: f64,
    decel_distance: f64,
    shape: ProfileShape,
}

impl ProfilePlan {
    /// Validate `params` and size every phase of the move.
    pub fn new(params: &MotionParameters) -> Result<Self, ValidationError> {
        params.validate()?;

        // Finite after validation
        let distance = params.start.distance(&params.end);
        if distance <= MIN_DISTANCE {
            return Ok(Self::stationary(params));
        }
        let direction = (params.end - params.start) * (1.0 / distance);

        // Nominal sizing, assuming the ceiling is reachable
        let mut peak_velocity = params.max_velocity;
        let mut accel_time = peak_velocity / params.acceleration;
        let mut decel_time = peak_velocity / params.deceleration;
        let mut accel_distance = 0.5 * params.acceleration * accel_time * accel_time;
        let mut decel_distance = 0.5 * params.deceleration * decel_time * decel_time;
        let mut shape = ProfileShape::Trapezoidal;

        if accel_distance + decel_distance > distance {
            // Ramps would overlap: find the peak where they exactly cover the move
            peak_velocity = (2.0 * distance * params.acceleration * params.deceleration
                / (params.acceleration + params.deceleration))
                .sqrt();
            accel_time = peak_velocity / params.acceleration;
            decel_time = peak_velocity / params.deceleration;
            accel_distance = 0.5 * params.acceleration * accel_time * accel_time;
            decel_distance = distance - accel_distance;
            shape = ProfileShape::Triangular;
        }

        let constant_distance = (distance - accel_distance - decel_distance).max(0.0);
        let constant_time = if peak_velocity > 0.0 {
            constant_distance / peak_velocity
        } else {
            0.0
        };

        let plan = Self {
            start: params.start,
            end: params.end,
            direction,
            distance,
            acceleration: params.acceleration,
            deceleration: params.deceleration,
            sampling_interval: params.sampling_interval,
            peak_velocity,
            accel_time,
            constant_time,
            decel_time,
            accel_distance,
            constant_distance,
            decel_distance,
            shape,
        };
        if plan.sample_count() > MAX_SAMPLES {
            return Err(ValidationError::SampleCountOverflow {
                total_time: plan.total_time(),
                sampling_interval: params.sampling_interval,
            });
        }
        tracing::debug!(
            "Planned {:?} profile: {:.3} units, peak {:.3} units/s, accel {:.3}s, cruise {:.3}s, decel {:.3}s",
            plan.shape,
            plan.distance,
            plan.peak_velocity,
            plan.accel_time,
            plan.constant_time,
            plan.decel_time
        );
        Ok(plan)
    }

    fn stationary(params: &MotionParameters) -> Self {
        tracing::debug!("Start and end coincide, emitting a single finished point");
        Self {
            start: params.start,
            end: params.end,
            direction: Vec3::ZERO,
            distance: 0.0,
            acceleration: params.acceleration,
            deceleration: params.deceleration,
            sampling_interval: params.sampling_interval,
            peak_velocity: 0.0,
            accel_time: 0.0,
            constant_time: 0.0,
            decel_time: 0.0,
            accel_distance: 0.0,
            constant_distance: 0.0,
            decel_distance: 0.0,
            shape: ProfileShape::Stationary,
        }
    }

    pub fn shape(&self) -> ProfileShape {
        self.shape
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Unit vector from start to end (zero for a stationary plan).
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn peak_velocity(&self) -> f64 {
        self.peak_velocity
    }

    pub fn accel_time(&self) -> f64 {
        self.accel_time
    }

    pub fn constant_time(&self) -> f64 {
        self.constant_time
    }

    pub fn decel_time(&self) -> f64 {
        self.decel_time
    }

    pub fn accel_distance(&self) -> f64 {
        self.accel_distance
    }

    pub fn constant_distance(&self) -> f64 {
        self.constant_distance
    }

    pub fn decel_distance(&self) -> f64 {
        self.decel_distance
    }

    pub fn total_time(&self) -> f64 {
        self.accel_time + self.constant_time + self.decel_time
    }

    /// Phase, distance travelled and speed at time `t` into the move.
    ///
    /// `t == accel_time` belongs to the accelerating phase. Distance is
    /// clamped to the move length; the terminal point is still the only
    /// sample guaranteed to sit exactly on the target.
    pub fn state_at(&self, t: f64) -> (Phase, f64, f64) {
        if self.shape == ProfileShape::Stationary {
            return (Phase::Finished, 0.0, 0.0);
        }

        let cruise_end = self.accel_time + self.constant_time;
        let (phase, distance, velocity) = if t <= self.accel_time {
            (Phase::Accelerating, 0.5 * self.acceleration * t * t, self.acceleration * t)
        } else if t <= cruise_end {
            let tc = t - self.accel_time;
            (
                Phase::Constant,
                self.accel_distance + self.peak_velocity * tc,
                self.peak_velocity,
            )
        } else {
            let td = t - cruise_end;
            (
                Phase::Decelerating,
                self.accel_distance + self.constant_distance + self.peak_velocity * td
                    - 0.5 * self.deceleration * td * td,
                (self.peak_velocity - self.deceleration * td).max(0.0),
            )
        };
        (phase, distance.clamp(0.0, self.distance), velocity)
    }

    /// Number of points the sampled profile contains, terminal point included.
    pub fn sample_count(&self) -> usize {
        if self.shape == ProfileShape::Stationary {
            return 1;
        }
        let total = self.total_time();
        let dt = self.sampling_interval;
        let ratio = total / dt;
        if !ratio.is_finite() || ratio >= (usize::MAX / 2) as f64 {
            return usize::MAX;
        }
        // Matches the `index * dt < total` loop bound exactly
        let mut n = ratio.ceil() as usize;
        while n > 0 && (n - 1) as f64 * dt >= total {
            n -= 1;
        }
        while (n as f64) * dt < total {
            n += 1;
        }
        n + 1
    }

    /// Point at exactly the target, stamped with the total move time.
    pub fn terminal_point(&self) -> MotionPoint {
        if self.shape == ProfileShape::Stationary {
            return MotionPoint {
                position: self.start,
                velocity: 0.0,
                time: 0.0,
                phase: Phase::Finished,
            };
        }
        MotionPoint {
            position: self.end,
            velocity: 0.0,
            time: self.total_time(),
            phase: Phase::Finished,
        }
    }

    /// Lazily sample the profile. Times are `index * sampling_interval` so
    /// they do not drift over long moves.
    pub fn samples(&self) -> Samples<'_> {
        Samples {
            plan: self,
            index: 0,
            done: false,
        }
    }

    pub fn to_points(&self) -> Vec<MotionPoint> {
        let mut points = Vec::with_capacity(self.sample_count().min(PREALLOCATE_LIMIT));
        points.extend(self.samples());
        points
    }
}

/// Iterator over the sampled points of a [`ProfilePlan`].
#[derive(Debug, Clone)]
pub struct Samples<'a> {
    plan: &'a ProfilePlan,
    index: usize,
    done: bool,
}

impl Iterator for Samples<'_> {
    type Item = MotionPoint;

    fn next(&mut self) -> Option<MotionPoint> {
        if self.done {
            return None;
        }
        let plan = self.plan;
        if plan.shape != ProfileShape::Stationary {
            let t = self.index as f64 * plan.sampling_interval;
            if t < plan.total_time() {
                self.index += 1;
                let (phase, distance, velocity) = plan.state_at(t);
                return Some(MotionPoint {
                    position: plan.start + plan.direction * distance,
                    velocity,
                    time: t,
                    phase,
                });
            }
        }
        self.done = true;
        Some(plan.terminal_point())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = self.plan.sample_count().saturating_sub(self.index);
        // `extend` reserves the lower bound, so keep it allocatable
        (remaining.min(PREALLOCATE_LIMIT), Some(remaining))
    }
}

impl FusedIterator for Samples<'_> {}

/// Plan and sample a move, reporting invalid parameters in-band.
pub fn try_generate(params: Option<&MotionParameters>) -> Result<Vec<MotionPoint>, ValidationError> {
    let params = params.ok_or(ValidationError::MissingParameters)?;
    Ok(ProfilePlan::new(params)?.to_points())
}

/// Plan and sample a move.
///
/// Invalid parameters yield an empty sequence; the reason is logged as an
/// error so callers can tell "nothing to animate" apart from a bug.
pub fn generate(params: Option<&MotionParameters>) -> Vec<MotionPoint> {
    match try_generate(params) {
        Ok(points) => points,
        Err(e) => {
            tracing::error!("Trajectory generation rejected: {}", e);
            Vec::new()
        }
    }
}

/// Like [`try_generate`], but refuses profiles with more than `max_samples`
/// points before allocating them.
pub fn generate_bounded(
    params: &MotionParameters,
    max_samples: usize,
) -> Result<Vec<MotionPoint>, ProfileError> {
    let plan = ProfilePlan::new(params)?;
    let required = plan.sample_count();
    if required > max_samples {
        tracing::warn!(
            "Refusing profile with {} samples (limit {}); increase the sampling interval",
            required,
            max_samples
        );
        return Err(ProfileError::TooManySamples { required, limit: max_samples });
    }
    Ok(plan.to_points())
}
