//! Orrery - Solar System Simulator
//!
//! A library crate providing the body kinematics, environment model and
//! camera controls of the orrery, plus the Bevy plugins that drive them.

pub mod bodies;
pub mod camera;
pub mod environment;
pub mod error;
pub mod input;
pub mod kinematics;
pub mod render;
pub mod settings;
pub mod simulation;
pub mod types;
pub mod ui;

pub use error::{ErrorKind, SimulationError};
pub use settings::SimulationSettings;
pub use simulation::{Simulation, SimulationPlugin, SimulationSet};

#[cfg(test)]
pub mod test_utils;
