//! Orrery - Solar System Simulator
//!
//! A desktop application showing the Sun, planets, moons, an asteroid belt
//! and a station, with orbit and free-flight cameras.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orrery::input::InputPlugin;
use orrery::render::RenderPlugin;
use orrery::ui::UiPlugin;
use orrery::{SimulationPlugin, SimulationSettings};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(EguiPlugin::default())
        .insert_resource(ClearColor(Color::BLACK))
        // Settings must exist before the simulation plugin reads them
        .insert_resource(SimulationSettings::default())
        .add_plugins((SimulationPlugin, InputPlugin, RenderPlugin, UiPlugin))
        .run();
}
