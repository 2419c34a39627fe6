//! Rendering systems for the orrery.
//!
//! This module provides the visual representation of bodies, the main
//! camera and orbit paths. It only reads simulation state.

pub mod bodies;
pub mod orbits;
pub mod sync;

use bevy::prelude::*;

use self::bodies::CelestialBodyPlugin;
use self::orbits::{draw_orbit_paths, OrbitPathPlugin};
use self::sync::{sync_body_transforms, sync_camera_transform};
use crate::simulation::SimulationSet;

// Re-export for use in other modules
pub use self::bodies::{BodyVisual, display_radius};
pub use self::orbits::OrbitPathSettings;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((CelestialBodyPlugin, OrbitPathPlugin))
            .add_systems(
                Update,
                ((sync_body_transforms, sync_camera_transform), draw_orbit_paths)
                    .chain()
                    .in_set(SimulationSet::Sync),
            );
    }
}
