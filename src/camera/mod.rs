//! Camera mode state machine.
//!
//! The rig is in exactly one of two modes: orbiting a pivot point, or flying
//! freely. Switching modes resets the movement timer and, on entry to free
//! mode, derives yaw/pitch from the current orientation so the view does not
//! snap. Follow tracking lives beside the mode and survives mode switches.

pub mod follow;
pub mod mode;

#[cfg(test)]
mod proptest_camera;

use bevy::math::{Quat, Vec3};
use bevy::prelude::Component;

use crate::settings::CameraSettings;
use crate::types::BodyId;

pub use self::follow::FollowTarget;
pub use self::mode::{CameraMode, FreeState, ModeState, MoveDirection, MovementIntents, OrbitState};

/// Marker component for the main 3D camera.
#[derive(Component)]
pub struct MainCamera;

/// Semantic input consumed by the camera state machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraIntent {
    /// Free-mode movement key pressed or released.
    Move(MoveDirection, bool),
    /// Pointer motion in pixels while input is captured in free mode.
    Look(f32, f32),
    /// Orbit-mode drag rotation in pixels.
    OrbitRotate(f32, f32),
    /// Orbit-mode pan in pixels.
    Pan(f32, f32),
    /// Orbit-mode zoom in scroll steps; positive moves closer.
    Zoom(f32),
    SwitchMode(CameraMode),
    /// Toggle tracking of a body.
    ToggleFollow(BodyId),
    /// Request exclusive input capture (free mode only).
    Capture,
    /// Drop follow tracking and release input capture.
    Cancel,
}

/// The camera and everything it owns.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub orientation: Quat,
    mode: ModeState,
    follow: Option<BodyId>,
    captured: bool,
    /// Real seconds since free-mode movement last consumed time.
    movement_elapsed: f32,
}

impl CameraRig {
    /// Orbiting the origin from the configured start position.
    pub fn new(settings: &CameraSettings) -> Self {
        let position = settings.initial_position;
        Self {
            position,
            orientation: mode::look_at(position, Vec3::ZERO).unwrap_or(Quat::IDENTITY),
            mode: ModeState::Orbiting(OrbitState::new(Vec3::ZERO)),
            follow: None,
            captured: false,
            movement_elapsed: 0.0,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode.mode()
    }

    pub fn mode_state(&self) -> &ModeState {
        &self.mode
    }

    /// Orbit pivot, when orbiting.
    pub fn pivot(&self) -> Option<Vec3> {
        match &self.mode {
            ModeState::Orbiting(orbit) => Some(orbit.pivot),
            ModeState::Free(_) => None,
        }
    }

    /// Held movement keys, when flying.
    pub fn movement(&self) -> Option<MovementIntents> {
        match &self.mode {
            ModeState::Free(free) => Some(free.intents),
            ModeState::Orbiting(_) => None,
        }
    }

    pub fn follow_target(&self) -> Option<BodyId> {
        self.follow
    }

    /// Whether exclusive input capture is active.
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn movement_elapsed(&self) -> f32 {
        self.movement_elapsed
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Enter `target` mode. Always resets the movement timer and clears held
    /// movement keys; re-entering the current mode repeats the entry reset.
    pub fn switch_mode(&mut self, target: CameraMode, settings: &CameraSettings) {
        self.movement_elapsed = 0.0;
        match target {
            CameraMode::Orbiting => {
                if !matches!(self.mode, ModeState::Orbiting(_)) {
                    let pivot = self.position + self.forward() * settings.orbit_entry_distance;
                    self.mode = ModeState::Orbiting(OrbitState::new(pivot));
                }
                self.captured = false;
            }
            CameraMode::Free => {
                self.mode = ModeState::Free(FreeState::from_orientation(self.orientation));
            }
        }
    }

    /// Toggle tracking of `body`: a second toggle with the same body stops.
    /// Returns the new target.
    pub fn toggle_follow(&mut self, body: BodyId) -> Option<BodyId> {
        self.follow = if self.follow == Some(body) {
            None
        } else {
            Some(body)
        };
        self.follow
    }

    pub fn clear_follow(&mut self) {
        self.follow = None;
    }

    /// Escape: stop following and release capture, keeping the mode.
    pub fn cancel(&mut self) {
        self.follow = None;
        self.captured = false;
    }

    /// Apply an input intent. Returns false if the intent does not apply in the
    /// current mode (e.g. movement keys while orbiting).
    pub fn apply(&mut self, intent: CameraIntent, settings: &CameraSettings) -> bool {
        // Mode-independent intents first.
        match intent {
            CameraIntent::SwitchMode(target) => {
                self.switch_mode(target, settings);
                return true;
            }
            CameraIntent::ToggleFollow(body) => {
                self.toggle_follow(body);
                return true;
            }
            CameraIntent::Cancel => {
                self.cancel();
                return true;
            }
            _ => {}
        }

        let captured = self.captured;
        match (intent, &mut self.mode) {
            (CameraIntent::Move(direction, pressed), ModeState::Free(free)) => {
                free.intents.set(direction, pressed);
                true
            }
            (CameraIntent::Look(dx, dy), ModeState::Free(free)) if captured => {
                free.look(dx, dy, settings);
                true
            }
            (CameraIntent::OrbitRotate(dx, dy), ModeState::Orbiting(orbit)) => {
                orbit.rotate(dx, dy, settings);
                true
            }
            (CameraIntent::Pan(dx, dy), ModeState::Orbiting(orbit)) => {
                orbit.pan(dx, dy, self.position, self.orientation, settings);
                true
            }
            (CameraIntent::Zoom(steps), ModeState::Orbiting(orbit)) => {
                orbit.zoom(steps, settings);
                true
            }
            (CameraIntent::Capture, ModeState::Free(_)) => {
                self.captured = true;
                true
            }
            _ => false,
        }
    }

    /// Per-tick mode update. `follow` is the tracked body's current position.
    pub fn update(&mut self, delta_real_seconds: f32, follow: Option<Vec3>, settings: &CameraSettings) {
        if delta_real_seconds.is_finite() && delta_real_seconds > 0.0 {
            self.movement_elapsed += delta_real_seconds;
        }

        match &mut self.mode {
            ModeState::Orbiting(orbit) => {
                orbit.update(&mut self.position, &mut self.orientation, follow, settings);
            }
            ModeState::Free(free) => {
                let delta = std::mem::take(&mut self.movement_elapsed);
                free.update(&mut self.position, &mut self.orientation, delta, settings);
            }
        }
    }
}
