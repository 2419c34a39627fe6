//! Body rendering and spawning.
//!
//! Handles the visual representation of the Sun, planets, moons, the
//! asteroid belt and the station.

use bevy::prelude::*;

use crate::bodies::Body;
use crate::camera::MainCamera;
use crate::simulation::Simulation;
use crate::types::{BodyId, BodyKind};

/// Smallest drawn radius, so tiny bodies stay visible and clickable.
pub const MIN_DISPLAY_RADIUS: f32 = 0.2;

/// Component linking an entity to the body it draws.
#[derive(Component)]
pub struct BodyVisual {
    pub id: BodyId,
}

/// Plugin spawning body meshes and the main camera.
pub struct CelestialBodyPlugin;

impl Plugin for CelestialBodyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_bodies, spawn_camera));
    }
}

/// Drawn radius of a body.
pub fn display_radius(body: &Body) -> f32 {
    let radius = body.radius.map(|r| r as f32).unwrap_or(match body.kind {
        BodyKind::Star => 20.0,
        BodyKind::Planet => 2.0,
        BodyKind::Moon | BodyKind::Station => 0.5,
        BodyKind::Asteroid => 0.3,
    });
    radius.max(MIN_DISPLAY_RADIUS)
}

/// Approximate visual color for a body.
fn body_color(body: &Body) -> Color {
    match body.name.as_str() {
        "Sun" => Color::srgb(1.0, 0.95, 0.4),
        "Mercury" => Color::srgb(0.6, 0.6, 0.6),
        "Venus" => Color::srgb(0.9, 0.85, 0.7),
        "Earth" => Color::srgb(0.2, 0.5, 0.8),
        "Mars" => Color::srgb(0.8, 0.4, 0.2),
        "Jupiter" => Color::srgb(0.8, 0.7, 0.6),
        "Saturn" => Color::srgb(0.9, 0.85, 0.6),
        "Uranus" => Color::srgb(0.6, 0.8, 0.9),
        "Neptune" => Color::srgb(0.3, 0.5, 0.9),
        _ => match body.kind {
            BodyKind::Star => Color::srgb(1.0, 0.9, 0.5),
            BodyKind::Planet => Color::srgb(0.7, 0.7, 0.7),
            BodyKind::Moon => Color::srgb(0.7, 0.7, 0.7),
            BodyKind::Asteroid => Color::srgb(0.45, 0.4, 0.35),
            BodyKind::Station => Color::srgb(0.85, 0.85, 0.9),
        },
    }
}

/// Body transform as seen by the renderer.
pub fn body_transform(body: &Body) -> Transform {
    Transform::from_translation(body.position().as_vec3()).with_rotation(body.orientation().as_quat())
}

/// Spawn one mesh per body.
fn spawn_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    simulation: Res<Simulation>,
) {
    let mut rock_mesh = None;

    for body in simulation.system().iter() {
        let radius = display_radius(body);
        let mesh = match body.kind {
            // Long axis along Z so the nose/tail convention is visible.
            BodyKind::Station => meshes.add(Cuboid::new(radius * 2.0, radius * 0.6, radius * 4.0)),
            // The belt shares one low-poly unit mesh scaled per rock.
            BodyKind::Asteroid => rock_mesh
                .get_or_insert_with(|| meshes.add(Sphere::new(1.0).mesh().uv(8, 6)))
                .clone(),
            _ => meshes.add(Sphere::new(radius)),
        };

        let color = body_color(body);
        let material = materials.add(StandardMaterial {
            base_color: color,
            emissive: if body.kind == BodyKind::Star {
                color.to_linear() * 2.0
            } else {
                LinearRgba::BLACK
            },
            ..default()
        });

        let mut transform = body_transform(body);
        if body.kind == BodyKind::Asteroid {
            transform.scale = Vec3::splat(radius);
        }

        let mut entity = commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            transform,
            BodyVisual { id: body.id },
        ));
        if body.kind == BodyKind::Star {
            entity.with_child(PointLight {
                intensity: 5.0e8,
                range: 2000.0,
                shadows_enabled: false,
                ..default()
            });
        }
    }

    info!("Spawned {} body visuals", simulation.system().len());
}

/// Spawn the main camera at the rig's starting pose.
fn spawn_camera(mut commands: Commands, simulation: Res<Simulation>) {
    let rig = simulation.camera();
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(rig.position).with_rotation(rig.orientation),
        MainCamera,
    ));
}
