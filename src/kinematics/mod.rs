//! Kinematics updater: advances every body's orbital angle and spin and
//! re-derives positions and orientations from them.
//!
//! Orbits are prescribed circles in the XZ plane:
//! `position = parent.position + radius * (cos(angle), 0, sin(angle))`.
//! Bodies without a parent (or whose parent has been removed) orbit the origin.

#[cfg(test)]
mod proptest_kinematics;

use bevy::log::warn;
use bevy::math::{DMat3, DQuat, DVec3};

use crate::bodies::{Body, SolarSystem};
use crate::types::{BodyId, MILLIS_PER_SECOND};

/// Outcome of one kinematics pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KinematicsReport {
    /// Bodies whose transform was rewritten.
    pub updated: usize,
    /// Malformed bodies left untouched this tick.
    pub skipped: Vec<BodyId>,
    /// Bodies orbiting the origin because their parent is gone.
    pub orphaned: Vec<BodyId>,
}

/// Advance all bodies by one tick.
///
/// Orbital angles advance by `angular_speed * speed_multiplier * delta_ms`.
/// Spin advances by `spin_speed * speed_multiplier` once per tick.
pub fn advance(
    system: &mut SolarSystem,
    delta_real_seconds: f64,
    speed_multiplier: f64,
) -> KinematicsReport {
    let delta_ms = delta_real_seconds.max(0.0) * MILLIS_PER_SECOND;
    step(system, delta_ms * speed_multiplier, speed_multiplier)
}

/// Derive positions and orientations from the current angles without
/// advancing time.
pub fn place(system: &mut SolarSystem) -> KinematicsReport {
    step(system, 0.0, 0.0)
}

fn step(system: &mut SolarSystem, angle_scale: f64, spin_scale: f64) -> KinematicsReport {
    let mut report = KinematicsReport::default();

    for index in 0..system.update_order().len() {
        let id = system.update_order()[index];
        let Some(body) = system.get(id) else {
            continue;
        };

        let (anchor, orphaned) = match body.parent {
            Some(parent) => match system.get(parent) {
                Some(parent) => (parent.position, false),
                None => (DVec3::ZERO, true),
            },
            None => (DVec3::ZERO, false),
        };

        let Some(body) = system.get_mut(id) else {
            continue;
        };

        if orphaned {
            report.orphaned.push(id);
            if !body.orphaned {
                body.orphaned = true;
                warn!(
                    "Parent of {} is no longer in the simulation; orbiting the origin instead",
                    body.name
                );
            }
        }

        if update_body(body, anchor, angle_scale, spin_scale) {
            body.malformed = false;
            report.updated += 1;
        } else {
            report.skipped.push(id);
            if !body.malformed {
                body.malformed = true;
                warn!("Skipping malformed body {} until its transform is finite again", body.name);
            }
        }
    }

    report
}

/// Advance one body around `anchor`. Returns false (and leaves the body
/// untouched) if its parameters would produce a non-finite transform.
fn update_body(body: &mut Body, anchor: DVec3, angle_scale: f64, spin_scale: f64) -> bool {
    let angle = body.angle + body.angular_speed * angle_scale;
    let spin = body.spin + body.spin_speed * spin_scale;
    let position = orbit_position(anchor, body.orbit_radius, angle);

    if !angle.is_finite() || !spin.is_finite() || !position.is_finite() {
        return false;
    }

    body.angle = angle;
    body.spin = spin;
    body.position = position;
    body.orientation = if body.faces_parent {
        // Degenerate when sitting on the anchor; keep the last orientation.
        facing_away_from(position, anchor).unwrap_or(body.orientation)
    } else {
        DQuat::from_rotation_y(spin)
    };
    true
}

/// Position on a circular orbit of `radius` around `anchor` in the XZ plane.
pub fn orbit_position(anchor: DVec3, radius: f64, angle: f64) -> DVec3 {
    anchor + radius * DVec3::new(angle.cos(), 0.0, angle.sin())
}

/// Orientation whose local +Z points from `position` toward `target`.
fn look_toward(position: DVec3, target: DVec3) -> Option<DQuat> {
    let forward = (target - position).try_normalize()?;
    let right = DVec3::Y.cross(forward).try_normalize()?;
    let up = forward.cross(right);
    Some(DQuat::from_mat3(&DMat3::from_cols(right, up, forward)))
}

/// Face `target`, then turn half a revolution about the vertical axis:
/// the body's local -Z (nose) points at the target and +Z trails away.
fn facing_away_from(position: DVec3, target: DVec3) -> Option<DQuat> {
    look_toward(position, target).map(|q| q * DQuat::from_rotation_y(std::f64::consts::PI))
}
