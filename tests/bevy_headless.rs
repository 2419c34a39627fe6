//! Headless Bevy integration tests.
//!
//! These tests verify the simulation plugin and its resources work without a
//! window or GPU.

use bevy::prelude::*;
use orrery::camera::{CameraIntent, CameraMode};
use orrery::{Simulation, SimulationPlugin, SimulationSet, SimulationSettings};

fn create_minimal_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app
}

#[test]
fn test_simulation_resource_initializes() {
    let mut app = create_minimal_app();
    app.add_plugins(SimulationPlugin);
    app.update();

    let simulation = app.world().resource::<Simulation>();
    assert!(simulation.system().find("Earth").is_some());
    assert!(app.world().contains_resource::<SimulationSettings>());
}

#[test]
fn test_simulation_ticks_every_frame() {
    let mut app = create_minimal_app();
    app.add_plugins(SimulationPlugin);

    for _ in 0..5 {
        app.update();
    }

    let simulation = app.world().resource::<Simulation>();
    assert_eq!(simulation.clock().ticks, 5);
}

#[test]
fn test_inserted_settings_are_used() {
    let mut app = create_minimal_app();
    let mut settings = SimulationSettings::default();
    settings.scene.asteroid_count = 0;
    app.insert_resource(settings);
    app.add_plugins(SimulationPlugin);
    app.update();

    let simulation = app.world().resource::<Simulation>();
    assert!(simulation.system().find("Asteroid 001").is_none());
    assert!(simulation.system().find("ISS").is_some());
}

#[test]
fn test_invalid_settings_fall_back_to_empty_simulation() {
    let mut app = create_minimal_app();
    let mut settings = SimulationSettings::default();
    settings.follow.camera_lerp = 2.0;
    app.insert_resource(settings);
    app.add_plugins(SimulationPlugin);

    // Still runs: degraded, not a crash.
    for _ in 0..3 {
        app.update();
    }

    let simulation = app.world().resource::<Simulation>();
    assert!(simulation.system().is_empty());
    assert_eq!(simulation.clock().ticks, 3);
}

#[test]
fn test_input_set_runs_before_tick() {
    let mut app = create_minimal_app();
    app.add_plugins(SimulationPlugin);
    app.add_systems(
        Update,
        (|mut simulation: ResMut<Simulation>| {
            if simulation.camera().mode() == CameraMode::Orbiting {
                simulation.apply_intent(CameraIntent::SwitchMode(CameraMode::Free));
            }
        })
        .in_set(SimulationSet::Input),
    );
    app.update();

    let simulation = app.world().resource::<Simulation>();
    assert_eq!(simulation.camera().mode(), CameraMode::Free);
    // The tick after the switch consumed the (reset) movement timer.
    assert_eq!(simulation.camera().movement_elapsed(), 0.0);
}

#[test]
fn test_frozen_speed_holds_positions() {
    let mut app = create_minimal_app();
    app.add_plugins(SimulationPlugin);
    app.world_mut()
        .resource_mut::<Simulation>()
        .set_speed_multiplier(0.0)
        .unwrap();

    app.update();
    let before: Vec<_> = app
        .world()
        .resource::<Simulation>()
        .system()
        .iter()
        .map(|b| b.position())
        .collect();

    for _ in 0..5 {
        app.update();
    }

    let after: Vec<_> = app
        .world()
        .resource::<Simulation>()
        .system()
        .iter()
        .map(|b| b.position())
        .collect();
    assert_eq!(before, after);
}
