//! Follow-target controller: steers the camera toward a tracked body.
//!
//! Every tick the desired camera position is recomputed from the body's
//! current position, and the camera moves a fixed fraction of the remaining
//! distance toward it. Nothing is carried between ticks, so a mode switch or
//! target change takes effect cleanly on the next tick.

use bevy::math::Vec3;

use super::mode::{look_at, ModeState};
use super::CameraRig;
use crate::settings::FollowSettings;

/// Snapshot of the tracked body for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FollowTarget {
    pub position: Vec3,
    /// Physical radius, if the body has one.
    pub radius: Option<f32>,
}

/// Move `current` the fraction `factor` of the way toward `target`.
pub fn lerp_toward(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    current.lerp(target, factor)
}

/// Where the camera wants to be while tracking `target`.
pub fn desired_position(target: &FollowTarget, settings: &FollowSettings) -> Vec3 {
    let radius = target.radius.unwrap_or(settings.fallback_radius);
    target.position + settings.offset.vector(radius)
}

/// Steer the rig one tick toward `target`. Does nothing without a target.
pub fn steer(rig: &mut CameraRig, target: Option<FollowTarget>, settings: &FollowSettings) {
    let Some(target) = target else {
        return;
    };

    rig.position = lerp_toward(rig.position, desired_position(&target, settings), settings.camera_lerp);

    if let ModeState::Orbiting(orbit) = &mut rig.mode {
        orbit.pivot = lerp_toward(orbit.pivot, target.position, settings.pivot_lerp);
        if let Some(facing) = look_at(rig.position, orbit.pivot) {
            rig.orientation = facing;
        }
    }
}
