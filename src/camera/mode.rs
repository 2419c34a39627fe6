//! Mode-specific camera state and per-tick updates.
//!
//! Orbit mode pivots the camera around a point; free mode flies the camera
//! directly from movement intents and yaw/pitch look input.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::math::{EulerRot, Quat, Vec3};
use bevy::prelude::Transform;

use crate::settings::CameraSettings;

/// Keeps the orbit polar angle off the poles, where azimuth is undefined.
const POLAR_EPSILON: f32 = 1e-4;

/// Selectable camera mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CameraMode {
    #[default]
    Orbiting,
    Free,
}

impl CameraMode {
    pub fn other(self) -> Self {
        match self {
            CameraMode::Orbiting => CameraMode::Free,
            CameraMode::Free => CameraMode::Orbiting,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CameraMode::Orbiting => "Orbit",
            CameraMode::Free => "Free",
        }
    }
}

/// Free-mode movement direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Back,
    Left,
    Right,
}

/// Held free-mode movement keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovementIntents {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementIntents {
    pub fn set(&mut self, direction: MoveDirection, pressed: bool) {
        match direction {
            MoveDirection::Forward => self.forward = pressed,
            MoveDirection::Back => self.back = pressed,
            MoveDirection::Left => self.left = pressed,
            MoveDirection::Right => self.right = pressed,
        }
    }

    pub fn any(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

/// Orbit-mode state: the pivot plus viewer input not yet applied.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitState {
    pub pivot: Vec3,
    pending_azimuth: f32,
    pending_polar: f32,
    /// Multiplicative distance change, applied in full on the next tick.
    pending_zoom: f32,
    /// World-space pivot translation, applied in full on the next tick.
    pending_pan: Vec3,
}

impl OrbitState {
    pub fn new(pivot: Vec3) -> Self {
        Self {
            pivot,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_zoom: 1.0,
            pending_pan: Vec3::ZERO,
        }
    }

    /// Queue a drag rotation (pixels).
    pub fn rotate(&mut self, dx: f32, dy: f32, settings: &CameraSettings) {
        self.pending_azimuth -= dx * settings.rotate_sensitivity;
        self.pending_polar -= dy * settings.rotate_sensitivity;
    }

    /// Queue a zoom; positive steps move closer.
    pub fn zoom(&mut self, steps: f32, settings: &CameraSettings) {
        self.pending_zoom *= (1.0 - settings.zoom_step).powf(steps);
    }

    /// Queue a pan (pixels) in the camera's screen plane.
    pub fn pan(&mut self, dx: f32, dy: f32, position: Vec3, orientation: Quat, settings: &CameraSettings) {
        let scale = position.distance(self.pivot).max(settings.min_orbit_distance)
            * settings.pan_sensitivity;
        let right = orientation * Vec3::X;
        let up = orientation * Vec3::Y;
        self.pending_pan += (-dx * right + dy * up) * scale;
    }

    /// One orbit-mode tick: pull the pivot toward a followed body, then apply
    /// pan, damped rotation and zoom, and face the pivot.
    pub fn update(
        &mut self,
        position: &mut Vec3,
        orientation: &mut Quat,
        follow: Option<Vec3>,
        settings: &CameraSettings,
    ) {
        if let Some(target) = follow {
            self.pivot = self.pivot.lerp(target, settings.pivot_lerp);
        }

        self.pivot += self.pending_pan;
        *position += self.pending_pan;
        self.pending_pan = Vec3::ZERO;

        let offset = *position - self.pivot;
        let mut radius = offset.length();
        let direction = if radius > f32::EPSILON {
            offset / radius
        } else {
            radius = settings.min_orbit_distance;
            *orientation * Vec3::Z
        };

        let damping = settings.rotate_damping;
        let azimuth = direction.x.atan2(direction.z) + self.pending_azimuth * damping;
        let polar = (direction.y.clamp(-1.0, 1.0).acos() + self.pending_polar * damping)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        radius = (radius * self.pending_zoom).max(settings.min_orbit_distance);

        self.pending_azimuth *= 1.0 - damping;
        self.pending_polar *= 1.0 - damping;
        self.pending_zoom = 1.0;

        *position = self.pivot
            + radius
                * Vec3::new(
                    polar.sin() * azimuth.sin(),
                    polar.cos(),
                    polar.sin() * azimuth.cos(),
                );
        if let Some(facing) = look_at(*position, self.pivot) {
            *orientation = facing;
        }
    }
}

/// Free-mode state: look angles and held movement keys.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FreeState {
    pub yaw: f32,
    pub pitch: f32,
    pub intents: MovementIntents,
}

impl FreeState {
    /// Derive yaw/pitch from an existing orientation so entering free mode
    /// does not snap the view.
    pub fn from_orientation(orientation: Quat) -> Self {
        let (yaw, pitch, _roll) = orientation.to_euler(EulerRot::YXZ);
        Self {
            yaw,
            pitch: pitch.clamp(-FRAC_PI_2, FRAC_PI_2),
            intents: MovementIntents::default(),
        }
    }

    /// Accumulate pointer motion (pixels) into yaw/pitch.
    pub fn look(&mut self, dx: f32, dy: f32, settings: &CameraSettings) {
        self.yaw -= dx * settings.look_sensitivity;
        self.pitch = (self.pitch - dy * settings.look_sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Yaw about world up, then pitch about the local right axis. No roll.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// One free-mode tick over `delta` real seconds.
    pub fn update(&self, position: &mut Vec3, orientation: &mut Quat, delta: f32, settings: &CameraSettings) {
        *orientation = self.orientation();

        let step = settings.move_speed * delta;
        let forward = *orientation * Vec3::NEG_Z;
        if self.intents.forward {
            *position += forward * step;
        }
        if self.intents.back {
            *position -= forward * step;
        }

        // Undefined when looking straight up or down.
        if let Some(right) = forward.cross(Vec3::Y).try_normalize() {
            if self.intents.left {
                *position -= right * step;
            }
            if self.intents.right {
                *position += right * step;
            }
        }
    }
}

/// Tagged camera state; only the active mode's fields exist.
#[derive(Clone, Debug, PartialEq)]
pub enum ModeState {
    Orbiting(OrbitState),
    Free(FreeState),
}

impl ModeState {
    pub fn mode(&self) -> CameraMode {
        match self {
            ModeState::Orbiting(_) => CameraMode::Orbiting,
            ModeState::Free(_) => CameraMode::Free,
        }
    }
}

/// Rotation that points the camera's -Z at `target` with world up kept up.
pub fn look_at(position: Vec3, target: Vec3) -> Option<Quat> {
    if position.distance_squared(target) <= f32::EPSILON {
        return None;
    }
    Some(Transform::from_translation(position).looking_at(target, Vec3::Y).rotation)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn settings() -> CameraSettings {
        CameraSettings::default()
    }

    #[test]
    fn test_free_forward_displacement() {
        let free = FreeState {
            intents: MovementIntents {
                forward: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut position = Vec3::ZERO;
        let mut orientation = Quat::IDENTITY;
        free.update(&mut position, &mut orientation, 0.02, &settings());

        // Yaw 0 / pitch 0 looks down -Z.
        assert_relative_eq!(position.length(), 2.0, epsilon = 1e-5);
        assert_relative_eq!(position.z, -2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_free_strafe_is_horizontal_and_orthogonal() {
        let mut free = FreeState {
            yaw: 0.7,
            pitch: 0.4,
            ..Default::default()
        };
        free.intents.set(MoveDirection::Right, true);
        let mut position = Vec3::ZERO;
        let mut orientation = Quat::IDENTITY;
        free.update(&mut position, &mut orientation, 0.1, &settings());

        let forward = orientation * Vec3::NEG_Z;
        assert_relative_eq!(position.length(), 10.0, epsilon = 1e-4);
        assert_relative_eq!(position.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(position.dot(forward), 0.0, epsilon = 1e-4);
        // Right of the view direction, like the camera's local +X.
        assert!(position.dot(orientation * Vec3::X) > 9.9);
    }

    #[test]
    fn test_opposing_intents_cancel() {
        let free = FreeState {
            intents: MovementIntents {
                forward: true,
                back: true,
                left: true,
                right: true,
            },
            ..Default::default()
        };
        let mut position = Vec3::new(1.0, 2.0, 3.0);
        let mut orientation = Quat::IDENTITY;
        free.update(&mut position, &mut orientation, 0.5, &settings());
        assert!((position - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-4);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut free = FreeState::default();
        free.look(0.0, -1.0e6, &settings());
        assert_eq!(free.pitch, FRAC_PI_2);
        free.look(0.0, 1.0e7, &settings());
        assert_eq!(free.pitch, -FRAC_PI_2);
    }

    #[test]
    fn test_look_never_rolls() {
        let mut free = FreeState::default();
        free.look(350.0, -120.0, &settings());
        let right = free.orientation() * Vec3::X;
        assert_relative_eq!(right.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_orientation_round_trips_through_yaw_pitch() {
        let original = look_at(Vec3::new(-140.0, 70.0, 10.0), Vec3::ZERO).unwrap();
        let free = FreeState::from_orientation(original);
        assert!(free.orientation().abs_diff_eq(original, 1e-5)
            || free.orientation().abs_diff_eq(-original, 1e-5));
    }

    #[test]
    fn test_orbit_faces_pivot() {
        let mut orbit = OrbitState::new(Vec3::new(5.0, 0.0, 5.0));
        let mut position = Vec3::new(50.0, 20.0, 0.0);
        let mut orientation = Quat::IDENTITY;
        orbit.update(&mut position, &mut orientation, None, &settings());

        let forward = orientation * Vec3::NEG_Z;
        let toward = (orbit.pivot - position).normalize();
        assert_relative_eq!(forward.dot(toward), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_orbit_pivot_follows_five_percent() {
        let mut orbit = OrbitState::new(Vec3::ZERO);
        let mut position = Vec3::new(0.0, 50.0, 50.0);
        let mut orientation = Quat::IDENTITY;
        orbit.update(
            &mut position,
            &mut orientation,
            Some(Vec3::new(100.0, 0.0, 0.0)),
            &settings(),
        );
        assert_relative_eq!(orbit.pivot.x, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_orbit_pivot_stays_without_follow() {
        let mut orbit = OrbitState::new(Vec3::new(1.0, 2.0, 3.0));
        let mut position = Vec3::new(0.0, 50.0, 50.0);
        let mut orientation = Quat::IDENTITY;
        for _ in 0..10 {
            orbit.update(&mut position, &mut orientation, None, &settings());
        }
        assert_eq!(orbit.pivot, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_orbit_rotation_preserves_distance() {
        let s = settings();
        let mut orbit = OrbitState::new(Vec3::ZERO);
        let mut position = Vec3::new(0.0, 0.0, 100.0);
        let mut orientation = Quat::IDENTITY;
        orbit.rotate(200.0, 50.0, &s);
        for _ in 0..200 {
            orbit.update(&mut position, &mut orientation, None, &s);
        }
        assert_relative_eq!(position.length(), 100.0, epsilon = 1e-2);
        // Most of the queued azimuth has been applied.
        let azimuth = position.x.atan2(position.z);
        assert_relative_eq!(azimuth, -200.0 * s.rotate_sensitivity, epsilon = 1e-2);
    }

    #[test]
    fn test_orbit_zoom_respects_minimum() {
        let s = settings();
        let mut orbit = OrbitState::new(Vec3::ZERO);
        let mut position = Vec3::new(0.0, 0.0, 10.0);
        let mut orientation = Quat::IDENTITY;

        orbit.zoom(1.0, &s);
        orbit.update(&mut position, &mut orientation, None, &s);
        assert_relative_eq!(position.length(), 9.0, epsilon = 1e-4);

        orbit.zoom(500.0, &s);
        orbit.update(&mut position, &mut orientation, None, &s);
        assert_relative_eq!(position.length(), s.min_orbit_distance, epsilon = 1e-4);
    }

    #[test]
    fn test_orbit_pan_moves_pivot_and_camera() {
        let s = settings();
        let mut orbit = OrbitState::new(Vec3::ZERO);
        let mut position = Vec3::new(0.0, 0.0, 100.0);
        let mut orientation = look_at(position, Vec3::ZERO).unwrap();

        orbit.pan(-100.0, 0.0, position, orientation, &s);
        orbit.update(&mut position, &mut orientation, None, &s);

        // Dragging left moves the view to the right (+X).
        assert_relative_eq!(orbit.pivot.x, 10.0, epsilon = 1e-3);
        assert_relative_eq!(position.x, 10.0, epsilon = 1e-3);
        assert_relative_eq!(position.z, 100.0, epsilon = 1e-3);
    }
}
