//! Test utilities for kinematics and camera tests.
//!
//! Provides fixtures for building small solar systems and assertions for the
//! geometric invariants the simulation maintains.

/// Fixtures for creating test systems.
pub mod fixtures {
    use crate::bodies::{stock_scene, BodyDefinition, SolarSystem};
    use crate::settings::SceneSettings;
    use crate::types::BodyKind;

    /// A lone planet orbiting the origin.
    pub fn single_planet(radius: f64, angular_speed: f64, start_angle: f64) -> SolarSystem {
        SolarSystem::from_definitions(vec![
            BodyDefinition::new("Planet", BodyKind::Planet, radius, angular_speed)
                .with_angle(start_angle),
        ])
        .expect("single planet is a valid table")
    }

    /// The full stock scene generated from `seed`.
    pub fn stock_system(seed: u64) -> SolarSystem {
        let settings = SceneSettings {
            seed,
            ..Default::default()
        };
        SolarSystem::from_definitions(stock_scene(&settings)).expect("stock scene is valid")
    }
}

/// Assertion helpers for geometric invariants.
pub mod assertions {
    use bevy::math::DVec3;

    /// Assert a point lies in the orbital (XZ) plane at `radius` from `center`.
    pub fn assert_on_orbit(position: DVec3, center: DVec3, radius: f64, tolerance: f64) {
        let offset = position - center;
        assert!(
            offset.y.abs() <= tolerance,
            "Position {position:?} left the orbital plane of {center:?}"
        );
        assert!(
            (offset.length() - radius).abs() <= tolerance,
            "Distance {} from {center:?} differs from radius {radius}",
            offset.length()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_planet_fixture() {
        let system = fixtures::single_planet(50.0, 0.01, 0.0);
        let body = system.iter().next().unwrap();
        assertions::assert_on_orbit(body.position(), Default::default(), 50.0, 1e-12);
    }

    #[test]
    fn test_stock_system_is_seeded() {
        let a = fixtures::stock_system(7);
        let b = fixtures::stock_system(7);
        let angles = |s: &crate::bodies::SolarSystem| s.iter().map(|b| b.angle()).collect::<Vec<_>>();
        assert_eq!(angles(&a), angles(&b));
    }
}
