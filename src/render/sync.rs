//! Transform synchronization between the simulation and rendering.
//!
//! Runs after the tick: body visuals and the main camera copy the positions
//! and orientations the simulation computed. Nothing here writes back.

use bevy::prelude::*;

use crate::camera::MainCamera;
use crate::render::bodies::BodyVisual;
use crate::simulation::Simulation;

/// Copy body positions and orientations onto their visuals. Visuals of
/// bodies no longer in the simulation are hidden.
pub fn sync_body_transforms(
    simulation: Res<Simulation>,
    mut query: Query<(&BodyVisual, &mut Transform, &mut Visibility)>,
) {
    let system = simulation.system();
    for (visual, mut transform, mut visibility) in query.iter_mut() {
        match system.get(visual.id) {
            Some(body) => {
                transform.translation = body.position().as_vec3();
                transform.rotation = body.orientation().as_quat();
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

/// Copy the camera rig's pose onto the main camera.
pub fn sync_camera_transform(
    simulation: Res<Simulation>,
    mut camera_query: Query<&mut Transform, (With<MainCamera>, Without<BodyVisual>)>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    let rig = simulation.camera();
    transform.translation = rig.position;
    transform.rotation = rig.orientation;
}
