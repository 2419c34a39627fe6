//! Property-based tests for the kinematics updater using proptest.

use bevy::math::DVec3;
use proptest::prelude::*;

use super::{advance, orbit_position};
use crate::test_utils::fixtures;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Root bodies always sit on their prescribed circle around the origin.
    #[test]
    fn prop_root_position_on_circle(
        radius in 0.0f64..5000.0,
        angular_speed in 0.0f64..0.01,
        start in 0.0f64..std::f64::consts::TAU,
        multiplier in 0.0f64..20.0,
        deltas in prop::collection::vec(0.0f64..0.5, 1..40),
    ) {
        let mut system = fixtures::single_planet(radius, angular_speed, start);
        for delta in deltas {
            advance(&mut system, delta, multiplier);
        }

        let body = system.iter().next().unwrap();
        let expected = orbit_position(DVec3::ZERO, radius, body.angle());
        prop_assert!((body.position() - expected).length() <= 1e-9 * radius.max(1.0));
        prop_assert_eq!(body.position().y, 0.0);
    }

    /// Angles never decrease when time and speed are non-negative.
    #[test]
    fn prop_angle_monotonic(
        angular_speed in 0.0f64..0.01,
        multiplier in 0.0f64..20.0,
        deltas in prop::collection::vec(0.0f64..0.5, 1..40),
    ) {
        let mut system = fixtures::single_planet(100.0, angular_speed, 0.0);
        let mut previous = 0.0;
        for delta in deltas {
            advance(&mut system, delta, multiplier);
            let angle = system.iter().next().unwrap().angle();
            prop_assert!(angle >= previous);
            previous = angle;
        }
    }

    /// A zero speed multiplier leaves every body exactly where it was.
    #[test]
    fn prop_zero_multiplier_is_idempotent(
        seed in any::<u64>(),
        deltas in prop::collection::vec(0.0f64..1.0, 1..20),
    ) {
        let mut system = fixtures::stock_system(seed);
        let before: Vec<_> = system.iter().map(|b| (b.angle(), b.spin(), b.position())).collect();

        for delta in deltas {
            advance(&mut system, delta, 0.0);
        }

        let after: Vec<_> = system.iter().map(|b| (b.angle(), b.spin(), b.position())).collect();
        prop_assert_eq!(before, after);
    }

    /// Moons stay exactly one orbit radius from their parent.
    #[test]
    fn prop_moon_distance_constant(
        seed in any::<u64>(),
        multiplier in 0.0f64..10.0,
        deltas in prop::collection::vec(0.0f64..0.1, 1..20),
    ) {
        let mut system = fixtures::stock_system(seed);
        for delta in deltas {
            advance(&mut system, delta, multiplier);
        }

        for body in system.iter() {
            if let Some(parent) = body.parent.and_then(|id| system.get(id)) {
                let distance = (body.position() - parent.position()).length();
                prop_assert!((distance - body.orbit_radius).abs() < 1e-9);
            }
        }
    }
}
