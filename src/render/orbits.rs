//! Orbit path rendering using Bevy Gizmos.
//!
//! Orbits are prescribed circles in the XZ plane, so each path is drawn as a
//! closed polyline around the body's current parent position. Moon paths move
//! with their planets.

use bevy::prelude::*;

use crate::simulation::Simulation;
use crate::types::BodyKind;

/// Plugin providing orbit path visualization.
pub struct OrbitPathPlugin;

impl Plugin for OrbitPathPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitPathSettings>();
    }
}

/// Settings for orbit path rendering.
#[derive(Resource)]
pub struct OrbitPathSettings {
    /// Whether to show orbit paths.
    pub visible: bool,
    /// Whether moon and station paths are drawn too.
    pub show_moons: bool,
    /// Number of segments for drawing the circle (higher = smoother).
    pub segments: u32,
    /// Alpha value for orbit path color.
    pub alpha: f32,
    /// Dash pattern: draw N segments, then skip M segments, repeating.
    ///
    /// Set to (1, 0) for a solid line.
    pub dash_on: u32,
    pub dash_off: u32,
}

impl Default for OrbitPathSettings {
    fn default() -> Self {
        Self {
            visible: true,
            show_moons: true,
            segments: 128,
            alpha: 0.3,
            dash_on: 2,
            dash_off: 2,
        }
    }
}

/// Points of a closed circle of `radius` around `center` in the XZ plane.
/// The first point is repeated at the end.
pub fn orbit_points(center: Vec3, radius: f32, segments: u32) -> Vec<Vec3> {
    let segments = segments.max(8);
    (0..=segments)
        .map(|i| {
            let angle = (i as f32 / segments as f32) * std::f32::consts::TAU;
            center + radius * Vec3::new(angle.cos(), 0.0, angle.sin())
        })
        .collect()
}

/// Draw planet orbits, and moon orbits around their moving parents.
pub fn draw_orbit_paths(mut gizmos: Gizmos, settings: Res<OrbitPathSettings>, simulation: Res<Simulation>) {
    if !settings.visible {
        return;
    }

    let system = simulation.system();
    for body in system.iter() {
        let color = match body.kind {
            BodyKind::Planet => Color::srgba(0.6, 0.7, 0.9, settings.alpha),
            BodyKind::Moon | BodyKind::Station if settings.show_moons => {
                Color::srgba(0.5, 0.5, 0.5, settings.alpha)
            }
            _ => continue,
        };
        if body.orbit_radius <= 0.0 {
            continue;
        }

        // Orphans orbit the origin.
        let center = body
            .parent
            .and_then(|id| system.get(id))
            .map(|parent| parent.position().as_vec3())
            .unwrap_or(Vec3::ZERO);

        let on = settings.dash_on.max(1);
        let period = on + settings.dash_off;
        let points = orbit_points(center, body.orbit_radius as f32, settings.segments);
        for (i, pair) in points.windows(2).enumerate() {
            if (i as u32 % period) < on {
                gizmos.line(pair[0], pair[1], color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_orbit_points_on_circle() {
        let center = Vec3::new(10.0, 0.0, -5.0);
        let points = orbit_points(center, 30.0, 64);
        assert_eq!(points.len(), 65);
        for point in &points {
            assert_relative_eq!(point.distance(center), 30.0, epsilon = 1e-3);
            assert_eq!(point.y, 0.0);
        }
        assert!(points[0].distance(points[64]) < 1e-3);
    }

    #[test]
    fn test_orbit_points_minimum_segments() {
        assert_eq!(orbit_points(Vec3::ZERO, 1.0, 0).len(), 9);
    }
}
