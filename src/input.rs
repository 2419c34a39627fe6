//! Input handling: keyboard and mouse mapped to camera intents.
//!
//! Keyboard drives free-mode movement, mode switching, cancel and time
//! controls. Mouse drives free-mode look while captured, and orbit-mode
//! rotate/pan/zoom plus click-to-follow. Pointer input over egui is ignored.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};
use bevy_egui::EguiContexts;

use crate::camera::{CameraIntent, CameraMode, MainCamera, MoveDirection};
use crate::render::bodies::display_radius;
use crate::simulation::{Simulation, SimulationSet};
use crate::types::BodyId;

/// Slowest speed reachable with `[`.
pub const MIN_SPEED: f64 = 0.125;
/// Fastest speed reachable with `]`.
pub const MAX_SPEED: f64 = 128.0;

const MOVE_KEYS: [(KeyCode, MoveDirection); 4] = [
    (KeyCode::KeyW, MoveDirection::Forward),
    (KeyCode::KeyS, MoveDirection::Back),
    (KeyCode::KeyA, MoveDirection::Left),
    (KeyCode::KeyD, MoveDirection::Right),
];

/// Plugin mapping raw input to simulation intents.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (keyboard_intents, pointer_intents, sync_cursor_grab)
                .chain()
                .in_set(SimulationSet::Input),
        );
    }
}

/// Halve the speed multiplier, or double it. A frozen simulation restarts at
/// the slowest step.
pub fn stepped_speed(current: f64, faster: bool) -> f64 {
    if faster {
        (current * 2.0).clamp(MIN_SPEED, MAX_SPEED)
    } else {
        (current * 0.5).clamp(MIN_SPEED, MAX_SPEED)
    }
}

/// Movement key changes this frame. Releases always pass so a key let go
/// while a text field has focus does not leave the camera drifting.
fn movement_intents(keys: &ButtonInput<KeyCode>, ui_has_keyboard: bool) -> Vec<CameraIntent> {
    let mut intents = Vec::new();
    for (key, direction) in MOVE_KEYS {
        if keys.just_pressed(key) && !ui_has_keyboard {
            intents.push(CameraIntent::Move(direction, true));
        }
        if keys.just_released(key) {
            intents.push(CameraIntent::Move(direction, false));
        }
    }
    intents
}

/// Handle keyboard shortcuts.
fn keyboard_intents(
    keys: Res<ButtonInput<KeyCode>>,
    mut simulation: ResMut<Simulation>,
    mut contexts: EguiContexts,
) {
    let ui_has_keyboard = contexts
        .ctx_mut()
        .is_ok_and(|ctx| ctx.wants_keyboard_input());

    for intent in movement_intents(&keys, ui_has_keyboard) {
        simulation.apply_intent(intent);
    }

    if ui_has_keyboard {
        return;
    }

    if keys.just_pressed(KeyCode::Tab) {
        let target = simulation.camera().mode().other();
        simulation.apply_intent(CameraIntent::SwitchMode(target));
    }

    if keys.just_pressed(KeyCode::Escape) {
        simulation.apply_intent(CameraIntent::Cancel);
    }

    // Rejections are logged by the setter.
    let speed = simulation.speed_multiplier();
    if keys.just_pressed(KeyCode::BracketLeft) {
        let _ = simulation.set_speed_multiplier(stepped_speed(speed, false));
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        let _ = simulation.set_speed_multiplier(stepped_speed(speed, true));
    }
    if keys.just_pressed(KeyCode::Digit0) {
        let _ = simulation.set_speed_multiplier(0.0);
    }
    if keys.just_pressed(KeyCode::Digit1) {
        let _ = simulation.set_speed_multiplier(1.0);
    }
}

/// Handle mouse look, orbit controls and click-to-follow.
#[allow(clippy::too_many_arguments)]
fn pointer_intents(
    mouse: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut simulation: ResMut<Simulation>,
    mut contexts: EguiContexts,
) {
    let captured = simulation.camera().is_captured();

    // While captured the cursor is hidden, so egui cannot be the target.
    if !captured
        && let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_pointer_input()
    {
        return;
    }

    let delta = motion.delta;
    match simulation.camera().mode() {
        CameraMode::Free => {
            if captured {
                if delta != Vec2::ZERO {
                    simulation.apply_intent(CameraIntent::Look(delta.x, delta.y));
                }
            } else if mouse.just_pressed(MouseButton::Left) {
                simulation.apply_intent(CameraIntent::Capture);
            }
        }
        CameraMode::Orbiting => {
            if mouse.just_pressed(MouseButton::Left)
                && let Some(body) = body_under_cursor(&window_query, &camera_query, &simulation)
            {
                simulation.apply_intent(CameraIntent::ToggleFollow(body));
            }

            if delta != Vec2::ZERO {
                if mouse.pressed(MouseButton::Left) {
                    simulation.apply_intent(CameraIntent::OrbitRotate(delta.x, delta.y));
                } else if mouse.pressed(MouseButton::Right) || mouse.pressed(MouseButton::Middle) {
                    simulation.apply_intent(CameraIntent::Pan(delta.x, delta.y));
                }
            }

            if scroll.delta.y != 0.0 {
                simulation.apply_intent(CameraIntent::Zoom(scroll.delta.y));
            }
        }
    }
}

/// Cast a ray through the cursor and return the nearest body it hits.
fn body_under_cursor(
    window_query: &Query<&Window, With<PrimaryWindow>>,
    camera_query: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    simulation: &Simulation,
) -> Option<BodyId> {
    let window = window_query.single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = camera_query.single().ok()?;
    let ray = camera.viewport_to_world(camera_transform, cursor).ok()?;

    pick_body(
        ray.origin,
        *ray.direction,
        simulation
            .system()
            .iter()
            .map(|body| (body.id, body.position().as_vec3(), display_radius(body))),
    )
}

/// Nearest sphere hit by the ray `origin + t * direction`, `t >= 0`.
///
/// Candidates are `(id, center, radius)`. A ray starting inside a sphere hits
/// it at distance zero.
pub fn pick_body<I>(origin: Vec3, direction: Vec3, candidates: I) -> Option<BodyId>
where
    I: IntoIterator<Item = (BodyId, Vec3, f32)>,
{
    let direction = direction.try_normalize()?;
    let mut nearest: Option<(BodyId, f32)> = None;

    for (id, center, radius) in candidates {
        let to_center = center - origin;
        let along = to_center.dot(direction);
        let miss_sq = to_center.length_squared() - along * along;
        let radius_sq = radius * radius;
        if miss_sq > radius_sq {
            continue;
        }

        let half_chord = (radius_sq - miss_sq).sqrt();
        let far = along + half_chord;
        if far < 0.0 {
            continue;
        }
        let hit = (along - half_chord).max(0.0);

        if nearest.is_none_or(|(_, best)| hit < best) {
            nearest = Some((id, hit));
        }
    }

    nearest.map(|(id, _)| id)
}

/// Lock and hide the cursor while input is captured.
fn sync_cursor_grab(
    simulation: Res<Simulation>,
    mut cursor_query: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if !simulation.is_changed() {
        return;
    }
    let Ok(mut cursor) = cursor_query.single_mut() else {
        return;
    };

    let captured = simulation.camera().is_captured();
    let grab_mode = if captured {
        CursorGrabMode::Locked
    } else {
        CursorGrabMode::None
    };
    if cursor.grab_mode != grab_mode {
        cursor.grab_mode = grab_mode;
        cursor.visible = !captured;
        info!("Input capture {}", if captured { "engaged" } else { "released" });
    }
}
