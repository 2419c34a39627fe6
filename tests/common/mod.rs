//! Common test utilities for integration tests.
#![allow(dead_code)]

use bevy::math::DVec3;
use orrery::bodies::BodyDefinition;
use orrery::settings::SimulationSettings;
use orrery::types::{BodyId, BodyKind};
use orrery::Simulation;

/// A sun with one planet on a 50-unit orbit at 0.01 rad/ms.
pub fn planet_x() -> Simulation {
    Simulation::from_definitions(
        vec![
            BodyDefinition::new("Sun", BodyKind::Star, 0.0, 0.0).with_radius(20.0),
            BodyDefinition::new("Planet-X", BodyKind::Planet, 50.0, 0.01).with_radius(2.0),
        ],
        SimulationSettings::default(),
    )
    .expect("valid table")
}

/// A planet parked at `(100, 0, 0)` that never moves.
pub fn parked_planet(settings: SimulationSettings) -> Simulation {
    Simulation::from_definitions(
        vec![
            BodyDefinition::new("Sun", BodyKind::Star, 0.0, 0.0).with_radius(20.0),
            BodyDefinition::new("Rock", BodyKind::Planet, 100.0, 0.0)
                .with_radius(4.0)
                .with_thermal(0.3, 0.0),
        ],
        settings,
    )
    .expect("valid table")
}

/// Look up a body id by name, panicking if absent.
pub fn id(simulation: &Simulation, name: &str) -> BodyId {
    simulation
        .system()
        .find(name)
        .unwrap_or_else(|| panic!("no body named {name}"))
}

/// Current position of a named body.
pub fn position(simulation: &Simulation, name: &str) -> DVec3 {
    let id = id(simulation, name);
    simulation.system().get(id).expect("body present").position()
}
