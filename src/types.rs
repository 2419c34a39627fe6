//! Core simulation types and constants for the orrery.

use std::fmt;

/// Scene distance units per astronomical unit.
pub const UNITS_PER_AU: f64 = 100.0;

/// Reference display refresh rate (Hz) the per-frame orbit rates were tuned for.
pub const REFERENCE_FRAME_RATE: f64 = 60.0;

/// Milliseconds per second.
pub const MILLIS_PER_SECOND: f64 = 1000.0;

/// Full turn in radians.
pub const TAU: f64 = std::f64::consts::TAU;

/// Stable handle to a body in the [`SolarSystem`](crate::bodies::SolarSystem).
///
/// Handles are never reused within a session, so a handle to a removed body
/// stays dangling rather than silently aliasing another body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Category of a simulated body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
    Asteroid,
    Station,
}

impl BodyKind {
    /// Multiplier folding the legacy per-frame rate of this kind into
    /// radians per simulated millisecond.
    ///
    /// Planets advanced `speed * 0.001` per 60 Hz frame, moons `speed * 0.002`,
    /// asteroids `speed`, stations `speed * 0.01`.
    pub fn frame_rate_factor(&self) -> f64 {
        let per_frame = match self {
            BodyKind::Star => 0.0,
            BodyKind::Planet => 0.001,
            BodyKind::Moon => 0.002,
            BodyKind::Asteroid => 1.0,
            BodyKind::Station => 0.01,
        };
        per_frame * REFERENCE_FRAME_RATE / MILLIS_PER_SECOND
    }

    /// Whether the environment model reports a temperature for this kind.
    pub fn has_temperature(&self) -> bool {
        matches!(self, BodyKind::Planet)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BodyKind::Star => "star",
            BodyKind::Planet => "planet",
            BodyKind::Moon => "moon",
            BodyKind::Asteroid => "asteroid",
            BodyKind::Station => "station",
        }
    }
}

/// Process-wide simulation clock.
///
/// Real time is accumulated into `pending_seconds` by [`SimulationClock::accumulate`]
/// and consumed once per tick; `speed_multiplier` scales how much simulated time
/// that real time represents.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationClock {
    /// Real seconds elapsed since the last consumed tick.
    pub pending_seconds: f64,
    speed_multiplier: f64,
    /// Number of ticks run so far.
    pub ticks: u64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            pending_seconds: 0.0,
            speed_multiplier: 1.0,
            ticks: 0,
        }
    }
}

impl SimulationClock {
    /// Current speed multiplier (always finite and non-negative).
    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Set the speed multiplier, rejecting negative or non-finite values.
    pub fn set_speed_multiplier(
        &mut self,
        value: f64,
    ) -> Result<(), crate::error::SimulationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(crate::error::SimulationError::InvalidSpeedMultiplier(value));
        }
        self.speed_multiplier = value;
        Ok(())
    }

    /// Add real elapsed time. Negative or non-finite deltas are ignored.
    pub fn accumulate(&mut self, delta_real_seconds: f64) {
        if delta_real_seconds.is_finite() && delta_real_seconds > 0.0 {
            self.pending_seconds += delta_real_seconds;
        }
    }

    /// Take the pending real time and reset the accumulator.
    pub fn consume(&mut self) -> f64 {
        self.ticks += 1;
        std::mem::take(&mut self.pending_seconds)
    }
}
