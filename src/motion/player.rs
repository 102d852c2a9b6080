// src/motion/player.rs - Walks a generated profile by elapsed time
use std::cell::Cell;
use std::time::Instant;
use thiserror::Error;

use super::trajectory::MotionPoint;
use super::vector::Vec3;

/// Time source for the player, in seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall-clock time since the clock was created.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to. Used for offline stepping and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self { now: Cell::new(start) }
    }

    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PlayerError {
    #[error("Trajectory is empty")]
    EmptyProfile,
}

/// Plays back a profile: the cursor only moves forward, to the latest point
/// whose time has been reached.
#[derive(Debug)]
pub struct MotionPlayer<C: Clock = MonotonicClock> {
    clock: C,
    profile: Vec<MotionPoint>,
    cursor: usize,
    start_time: f64,
    animating: bool,
}

impl<C: Clock> MotionPlayer<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            profile: Vec::new(),
            cursor: 0,
            start_time: 0.0,
            animating: false,
        }
    }

    /// Take ownership of `profile` and start playing it from now.
    ///
    /// Returns the first position to show.
    pub fn start(&mut self, profile: Vec<MotionPoint>) -> Result<Vec3, PlayerError> {
        let Some(first) = profile.first().map(|p| p.position) else {
            tracing::error!("Motion player: trajectory is empty");
            self.profile = profile;
            self.animating = false;
            return Err(PlayerError::EmptyProfile);
        };
        self.profile = profile;
        self.cursor = 0;
        self.start_time = self.clock.now();
        self.animating = true;
        tracing::debug!(
            "Motion player started with {} points at t={:.3}s",
            self.profile.len(),
            self.start_time
        );
        Ok(first)
    }

    /// Advance to the current time and return the position to show, or
    /// `None` if nothing is playing.
    pub fn update(&mut self) -> Option<Vec3> {
        if !self.animating {
            return None;
        }
        let elapsed = self.clock.now() - self.start_time;
        let last = self.profile.len() - 1;
        while self.cursor < last && elapsed >= self.profile[self.cursor + 1].time {
            self.cursor += 1;
        }
        if self.cursor >= last {
            self.animating = false;
            tracing::debug!("Motion player finished after {:.3}s", elapsed);
        }
        Some(self.profile[self.cursor].position)
    }

    pub fn stop(&mut self) {
        self.animating = false;
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn profile(&self) -> &[MotionPoint] {
        &self.profile
    }

    pub fn current_point(&self) -> Option<&MotionPoint> {
        self.profile.get(self.cursor)
    }
}

impl Default for MotionPlayer<MonotonicClock> {
    fn default() -> Self {
        Self::new(MonotonicClock::new())
    }
}
