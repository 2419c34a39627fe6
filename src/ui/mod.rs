//! UI module providing the egui control panel.

pub mod controls;
pub mod icons;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub use controls::{follow_choices, readout_lines};

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>()
            .init_resource::<icons::FontsInitialized>()
            // Font initialization MUST run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                controls::control_panel
                    .after(icons::setup_fonts)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0),
            );
    }
}

/// Global UI state.
#[derive(Resource)]
pub struct UiState {
    /// Whether the simulated clock is displayed.
    pub show_clock: bool,
    /// Speed restored by the play button after a freeze.
    pub resume_speed: f64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_clock: true,
            resume_speed: 1.0,
        }
    }
}
