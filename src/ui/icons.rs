//! Phosphor icon definitions for the UI.
//!
//! Icons are initialized via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::types::BodyKind;

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

// Browse all icons at https://phosphoricons.com/

pub const PLAY: &str = egui_phosphor::regular::PLAY;
pub const PAUSE: &str = egui_phosphor::regular::PAUSE;
pub const CLOCK: &str = egui_phosphor::regular::CLOCK;
pub const THERMOMETER: &str = egui_phosphor::regular::THERMOMETER;
/// Orbit camera mode
pub const ORBIT: &str = egui_phosphor::regular::GLOBE;
/// Free-flight camera mode
pub const FREE: &str = egui_phosphor::regular::AIRPLANE;
pub const TARGET: &str = egui_phosphor::regular::CROSSHAIR;
/// Orbit path toggle
pub const PATH: &str = egui_phosphor::regular::PATH;
pub const CLOSE: &str = egui_phosphor::regular::X;

/// Icon for a body kind.
pub fn body_icon(kind: BodyKind) -> &'static str {
    match kind {
        BodyKind::Star => egui_phosphor::regular::SUN,
        BodyKind::Planet => egui_phosphor::regular::GLOBE_HEMISPHERE_WEST,
        BodyKind::Moon => egui_phosphor::regular::MOON,
        BodyKind::Asteroid => egui_phosphor::regular::ASTERISK,
        BodyKind::Station => egui_phosphor::regular::SATELLITE,
    }
}
