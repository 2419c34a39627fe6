//! Control panel: speed, camera mode, follow target and readouts.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::{UiState, icons};
use crate::camera::CameraMode;
use crate::input::MAX_SPEED;
use crate::render::OrbitPathSettings;
use crate::simulation::Simulation;
use crate::types::{BodyId, BodyKind};

/// Colors for the panel.
mod colors {
    use bevy_egui::egui::Color32;

    pub const PLAY_ICON: Color32 = Color32::from_rgb(85, 221, 136);
    pub const PAUSE_ICON: Color32 = Color32::from_rgb(221, 170, 85);
    pub const TEXT: Color32 = Color32::from_rgb(220, 220, 230);
}

/// Bodies offered in the follow menu: everything except belt rocks.
pub fn follow_choices(simulation: &Simulation) -> Vec<(BodyId, BodyKind, String)> {
    simulation
        .system()
        .iter()
        .filter(|body| body.kind != BodyKind::Asteroid)
        .map(|body| (body.id, body.kind, body.name.clone()))
        .collect()
}

/// Icon and text lines for the readout section.
///
/// The clock line only appears when enabled and the clock body exists. The
/// temperature line appears while following a body that has one.
pub fn readout_lines(simulation: &Simulation, show_clock: bool) -> Vec<(&'static str, String)> {
    let mut lines = Vec::new();

    if show_clock && let Some(clock) = simulation.clock_reading() {
        lines.push((icons::CLOCK, clock.to_string()));
    }

    if let Some(id) = simulation.camera().follow_target()
        && let Some(body) = simulation.system().get(id)
        && let Some(temperature) = simulation.temperature(id)
    {
        lines.push((icons::THERMOMETER, format!("{}: {}", body.name, temperature)));
    }

    lines
}

/// Action chosen in the panel, applied after the UI closure returns.
enum PanelAction {
    Speed(f64),
    Mode(CameraMode),
    Follow(Option<BodyId>),
}

/// System that renders the control panel.
pub fn control_panel(
    mut contexts: EguiContexts,
    mut simulation: ResMut<Simulation>,
    mut ui_state: ResMut<UiState>,
    mut orbit_settings: ResMut<OrbitPathSettings>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut actions = Vec::new();
    let speed = simulation.speed_multiplier();
    let mode = simulation.camera().mode();
    let following = simulation.camera().follow_target();
    let choices = follow_choices(&simulation);
    let lines = readout_lines(&simulation, ui_state.show_clock);

    egui::Window::new("Orrery")
        .anchor(egui::Align2::LEFT_TOP, [12.0, 12.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let paused = speed == 0.0;
                let (icon, color, hover) = if paused {
                    (icons::PLAY, colors::PLAY_ICON, "Resume (1)")
                } else {
                    (icons::PAUSE, colors::PAUSE_ICON, "Freeze (0)")
                };
                if ui
                    .button(egui::RichText::new(icon).color(color))
                    .on_hover_text(hover)
                    .clicked()
                {
                    if paused {
                        actions.push(PanelAction::Speed(ui_state.resume_speed));
                    } else {
                        ui_state.resume_speed = speed;
                        actions.push(PanelAction::Speed(0.0));
                    }
                }

                let mut slider_speed = speed;
                if ui
                    .add(
                        egui::Slider::new(&mut slider_speed, 0.0..=MAX_SPEED)
                            .logarithmic(true)
                            .suffix("x")
                            .text("Speed"),
                    )
                    .on_hover_text("Halve / double with [ and ]")
                    .changed()
                {
                    actions.push(PanelAction::Speed(slider_speed));
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Camera:");
                for (candidate, icon) in [(CameraMode::Orbiting, icons::ORBIT), (CameraMode::Free, icons::FREE)] {
                    if ui
                        .selectable_label(mode == candidate, format!("{icon} {}", candidate.label()))
                        .on_hover_text("Switch with Tab")
                        .clicked()
                        && mode != candidate
                    {
                        actions.push(PanelAction::Mode(candidate));
                    }
                }
            });

            ui.horizontal(|ui| {
                let selected = following
                    .and_then(|id| choices.iter().find(|(c, _, _)| *c == id))
                    .map(|(_, kind, name)| format!("{} {name}", icons::body_icon(*kind)))
                    .unwrap_or_else(|| "None".to_string());

                egui::ComboBox::from_label(format!("{} Follow", icons::TARGET))
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        for (id, kind, name) in &choices {
                            let label = format!("{} {name}", icons::body_icon(*kind));
                            if ui.selectable_label(following == Some(*id), label).clicked() {
                                actions.push(PanelAction::Follow(Some(*id)));
                            }
                        }
                    });

                if following.is_some()
                    && ui
                        .button(icons::CLOSE)
                        .on_hover_text("Stop following (Esc)")
                        .clicked()
                {
                    actions.push(PanelAction::Follow(None));
                }
            });

            ui.separator();

            ui.checkbox(&mut ui_state.show_clock, format!("{} Show clock", icons::CLOCK));
            ui.checkbox(&mut orbit_settings.visible, format!("{} Orbit paths", icons::PATH));

            for (icon, line) in &lines {
                ui.label(
                    egui::RichText::new(format!("{icon} {line}"))
                        .monospace()
                        .color(colors::TEXT),
                );
            }
        });

    for action in actions {
        // Rejections are logged by the setters.
        match action {
            PanelAction::Speed(value) => {
                let _ = simulation.set_speed_multiplier(value);
            }
            PanelAction::Mode(mode) => simulation.switch_camera_mode(mode),
            PanelAction::Follow(Some(id)) if following == Some(id) => {}
            PanelAction::Follow(target) => {
                let _ = simulation.set_follow_target(target);
            }
        }
    }
}
