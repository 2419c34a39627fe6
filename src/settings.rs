//! Tunable settings for the simulation, grouped into one resource.
//!
//! Every group has a `Default` matching the stock scene and a `validate()`
//! that rejects values the simulation cannot work with.

use bevy::math::Vec3;
use bevy::prelude::*;

use crate::error::SimulationError;
use crate::types::UNITS_PER_AU;

/// Camera tuning shared by both camera modes.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraSettings {
    /// Free-mode movement speed in scene units per real second.
    pub move_speed: f32,
    /// Free-mode look sensitivity in radians per pixel of pointer motion.
    pub look_sensitivity: f32,
    /// Orbit-mode rotation sensitivity in radians per pixel of drag.
    pub rotate_sensitivity: f32,
    /// Fraction of the pending orbit rotation applied per tick.
    pub rotate_damping: f32,
    /// Distance scale per zoom step (scroll line).
    pub zoom_step: f32,
    /// Pan distance per pixel, relative to the camera-to-pivot distance.
    pub pan_sensitivity: f32,
    /// Closest the orbit camera may get to its pivot.
    pub min_orbit_distance: f32,
    /// Fraction of the remaining distance the orbit pivot moves toward a
    /// followed body each tick.
    pub pivot_lerp: f32,
    /// Distance ahead of the camera at which the pivot is placed when
    /// entering orbit mode.
    pub orbit_entry_distance: f32,
    /// Camera position at startup.
    pub initial_position: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            move_speed: 100.0,
            look_sensitivity: 0.002,
            rotate_sensitivity: 0.005,
            rotate_damping: 0.05,
            zoom_step: 0.1,
            pan_sensitivity: 0.001,
            min_orbit_distance: 0.5,
            pivot_lerp: 0.05,
            orbit_entry_distance: 150.0,
            initial_position: Vec3::new(-140.0, 70.0, 10.0),
        }
    }
}

impl CameraSettings {
    pub fn validate(&self) -> Result<(), SimulationError> {
        non_negative("camera.move_speed", self.move_speed as f64)?;
        non_negative("camera.look_sensitivity", self.look_sensitivity as f64)?;
        non_negative("camera.rotate_sensitivity", self.rotate_sensitivity as f64)?;
        fraction("camera.rotate_damping", self.rotate_damping as f64)?;
        fraction("camera.zoom_step", self.zoom_step as f64)?;
        non_negative("camera.pan_sensitivity", self.pan_sensitivity as f64)?;
        positive("camera.min_orbit_distance", self.min_orbit_distance as f64)?;
        fraction("camera.pivot_lerp", self.pivot_lerp as f64)?;
        positive("camera.orbit_entry_distance", self.orbit_entry_distance as f64)?;
        if !self.initial_position.is_finite() {
            return Err(SimulationError::InvalidSetting {
                name: "camera.initial_position",
                value: f64::NAN,
            });
        }
        Ok(())
    }
}

/// How the follow camera offsets itself from the tracked body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FollowOffset {
    /// Legacy simple mode: a constant offset vector.
    Fixed(Vec3),
    /// Offset along `direction`, `radius_factor` body radii away.
    Scaled { direction: Vec3, radius_factor: f32 },
}

impl FollowOffset {
    /// Build a radius-scaled offset, normalizing `direction`.
    pub fn scaled(direction: Vec3, radius_factor: f32) -> Result<Self, SimulationError> {
        if !direction.is_finite() {
            return Err(SimulationError::InvalidSetting {
                name: "follow.direction",
                value: f64::NAN,
            });
        }
        let direction = direction
            .try_normalize()
            .ok_or(SimulationError::ZeroOffsetDirection)?;
        if !radius_factor.is_finite() || radius_factor < 0.0 {
            return Err(SimulationError::InvalidSetting {
                name: "follow.radius_factor",
                value: radius_factor as f64,
            });
        }
        Ok(Self::Scaled {
            direction,
            radius_factor,
        })
    }

    /// Checked copy with a unit-length direction. Enum values built by hand
    /// go through here before the simulation uses them.
    pub fn normalized(self) -> Result<Self, SimulationError> {
        match self {
            FollowOffset::Fixed(offset) if !offset.is_finite() => Err(SimulationError::InvalidSetting {
                name: "follow.offset",
                value: f64::NAN,
            }),
            FollowOffset::Fixed(_) => Ok(self),
            FollowOffset::Scaled {
                direction,
                radius_factor,
            } => Self::scaled(direction, radius_factor),
        }
    }

    /// Offset vector for a body of the given physical radius.
    pub fn vector(&self, body_radius: f32) -> Vec3 {
        match *self {
            FollowOffset::Fixed(offset) => offset,
            FollowOffset::Scaled {
                direction,
                radius_factor,
            } => direction * body_radius * radius_factor,
        }
    }
}

impl Default for FollowOffset {
    fn default() -> Self {
        Self::Scaled {
            direction: Vec3::new(-1.0, 0.3, -100.0).normalize(),
            radius_factor: 4.0,
        }
    }
}

/// Follow-target controller tuning.
#[derive(Clone, Debug, PartialEq)]
pub struct FollowSettings {
    /// Fraction of the remaining distance the camera moves per tick.
    pub camera_lerp: f32,
    /// Fraction of the remaining distance the orbit pivot moves per tick.
    pub pivot_lerp: f32,
    pub offset: FollowOffset,
    /// Radius used for bodies without a physical radius.
    pub fallback_radius: f32,
}

impl Default for FollowSettings {
    fn default() -> Self {
        Self {
            camera_lerp: 0.1,
            pivot_lerp: 0.1,
            offset: FollowOffset::default(),
            fallback_radius: 10.0,
        }
    }
}

impl FollowSettings {
    pub fn validate(&self) -> Result<(), SimulationError> {
        fraction("follow.camera_lerp", self.camera_lerp as f64)?;
        fraction("follow.pivot_lerp", self.pivot_lerp as f64)?;
        positive("follow.fallback_radius", self.fallback_radius as f64)?;
        self.offset.normalized().map(|_| ())
    }
}

/// Environment model coefficients.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentSettings {
    /// Equilibrium temperature at 1 AU for the reference albedo (Kelvin).
    pub base_temperature: f64,
    /// Scene units per astronomical unit.
    pub units_per_au: f64,
    /// Offset subtracted to convert Kelvin to Celsius.
    pub kelvin_offset: f64,
    /// Name of the body whose spin and orbit drive the calendar clock.
    pub clock_body: String,
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        Self {
            base_temperature: 279.0,
            units_per_au: UNITS_PER_AU,
            kelvin_offset: 273.0,
            clock_body: "Earth".to_string(),
        }
    }
}

impl EnvironmentSettings {
    pub fn validate(&self) -> Result<(), SimulationError> {
        positive("environment.base_temperature", self.base_temperature)?;
        positive("environment.units_per_au", self.units_per_au)?;
        non_negative("environment.kelvin_offset", self.kelvin_offset)
    }
}

/// Parameters of the generated stock scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSettings {
    /// Seed for initial orbital angles and the asteroid belt.
    pub seed: u64,
    pub asteroid_count: usize,
    pub belt_inner_radius: f64,
    pub belt_outer_radius: f64,
    /// Legacy per-frame asteroid speed range.
    pub asteroid_speed: (f64, f64),
    /// Station orbit radius around its parent.
    pub station_radius: f64,
    /// Legacy per-frame station speed.
    pub station_speed: f64,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            seed: 0x0E_A87B,
            asteroid_count: 150,
            belt_inner_radius: 180.0,
            belt_outer_radius: 240.0,
            asteroid_speed: (0.0005, 0.002),
            station_radius: 15.0,
            station_speed: 0.05,
        }
    }
}

impl SceneSettings {
    pub fn validate(&self) -> Result<(), SimulationError> {
        non_negative("scene.belt_inner_radius", self.belt_inner_radius)?;
        if !(self.belt_outer_radius > self.belt_inner_radius) {
            return Err(SimulationError::InvalidSetting {
                name: "scene.belt_outer_radius",
                value: self.belt_outer_radius,
            });
        }
        non_negative("scene.asteroid_speed.min", self.asteroid_speed.0)?;
        if !(self.asteroid_speed.1 > self.asteroid_speed.0) {
            return Err(SimulationError::InvalidSetting {
                name: "scene.asteroid_speed.max",
                value: self.asteroid_speed.1,
            });
        }
        non_negative("scene.station_radius", self.station_radius)?;
        non_negative("scene.station_speed", self.station_speed)
    }
}

/// All simulation settings.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct SimulationSettings {
    pub camera: CameraSettings,
    pub follow: FollowSettings,
    pub environment: EnvironmentSettings,
    pub scene: SceneSettings,
}

impl SimulationSettings {
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.camera.validate()?;
        self.follow.validate()?;
        self.environment.validate()?;
        self.scene.validate()
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidSetting { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidSetting { name, value })
    }
}

fn fraction(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidSetting { name, value })
    }
}
