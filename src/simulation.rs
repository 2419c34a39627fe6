//! The simulation context and its tick.
//!
//! `Simulation` owns every piece of mutable state: the bodies, the clock, the
//! camera rig and the latest environment readout. One call to [`Simulation::tick`]
//! runs kinematics, the environment model, the camera state machine and the
//! follow controller, in that order.

use bevy::prelude::*;

use crate::bodies::{stock_scene, BodyDefinition, SolarSystem};
use crate::camera::follow::{self, FollowTarget};
use crate::camera::{CameraIntent, CameraMode, CameraRig};
use crate::environment::{ClockReading, EnvironmentReadout, Temperature};
use crate::error::SimulationError;
use crate::kinematics::{self, KinematicsReport};
use crate::settings::{FollowOffset, SimulationSettings};
use crate::types::{BodyId, SimulationClock};

/// System sets for one frame, in order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Raw input is turned into intents.
    Input,
    /// The simulation advances.
    Tick,
    /// Render transforms are written from simulation state.
    Sync,
}

/// Plugin owning the [`Simulation`] resource and advancing it every frame.
///
/// Uses the [`SimulationSettings`] resource if one was inserted before the
/// plugin, defaults otherwise.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<SimulationSettings>()
            .cloned()
            .unwrap_or_default();

        let simulation = match Simulation::new(settings.clone()) {
            Ok(simulation) => {
                info!("Loaded scene with {} bodies", simulation.system().len());
                simulation
            }
            Err(err) => {
                error!("Failed to load scene: {err}; starting with an empty simulation");
                Simulation::empty(settings.clone())
            }
        };

        app.insert_resource(settings)
            .insert_resource(simulation)
            .configure_sets(
                Update,
                (SimulationSet::Input, SimulationSet::Tick, SimulationSet::Sync).chain(),
            )
            .add_systems(Update, advance_simulation.in_set(SimulationSet::Tick));
    }
}

/// Feed the frame's real delta into the simulation.
fn advance_simulation(mut simulation: ResMut<Simulation>, time: Res<Time>) {
    simulation.tick(time.delta_secs_f64());
}

/// Owned simulation context passed through every tick.
#[derive(Resource, Clone, Debug)]
pub struct Simulation {
    system: SolarSystem,
    clock: SimulationClock,
    camera: CameraRig,
    environment: EnvironmentReadout,
    settings: SimulationSettings,
}

impl Simulation {
    /// Build the stock scene.
    pub fn new(settings: SimulationSettings) -> Result<Self, SimulationError> {
        settings.validate()?;
        let definitions = stock_scene(&settings.scene);
        Self::from_definitions(definitions, settings)
    }

    /// Build a simulation from an explicit orbit path table.
    pub fn from_definitions(
        definitions: Vec<BodyDefinition>,
        mut settings: SimulationSettings,
    ) -> Result<Self, SimulationError> {
        settings.validate()?;
        settings.follow.offset = settings.follow.offset.normalized()?;
        let system = SolarSystem::from_definitions(definitions)?;
        let mut environment = EnvironmentReadout::default();
        environment.update(&system, &settings.environment);

        Ok(Self {
            system,
            clock: SimulationClock::default(),
            camera: CameraRig::new(&settings.camera),
            environment,
            settings,
        })
    }

    /// A simulation with no bodies. Settings are used as given.
    pub fn empty(settings: SimulationSettings) -> Self {
        Self {
            system: SolarSystem::default(),
            clock: SimulationClock::default(),
            camera: CameraRig::new(&settings.camera),
            environment: EnvironmentReadout::default(),
            settings,
        }
    }

    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn environment(&self) -> &EnvironmentReadout {
        &self.environment
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.clock.speed_multiplier()
    }

    pub fn temperature(&self, body: BodyId) -> Option<Temperature> {
        self.environment.temperature(body)
    }

    pub fn clock_reading(&self) -> Option<ClockReading> {
        self.environment.clock
    }

    /// Advance everything by `delta_real_seconds` of wall-clock time.
    ///
    /// Never fails: malformed bodies are skipped and a vanished follow target
    /// is dropped.
    pub fn tick(&mut self, delta_real_seconds: f64) -> KinematicsReport {
        self.clock.accumulate(delta_real_seconds);
        let elapsed = self.clock.consume();

        let report = kinematics::advance(&mut self.system, elapsed, self.clock.speed_multiplier());
        self.environment.update(&self.system, &self.settings.environment);

        let target = self.resolve_follow_target();
        self.camera
            .update(elapsed as f32, target.map(|t| t.position), &self.settings.camera);
        follow::steer(&mut self.camera, target, &self.settings.follow);

        report
    }

    /// Current follow target snapshot. Drops the target if its body is gone.
    fn resolve_follow_target(&mut self) -> Option<FollowTarget> {
        let id = self.camera.follow_target()?;
        match self.system.get(id) {
            Some(body) => Some(FollowTarget {
                position: body.position().as_vec3(),
                radius: body.radius.map(|r| r as f32),
            }),
            None => {
                warn!("Follow target {id} is no longer in the simulation; tracking stopped");
                self.camera.clear_follow();
                None
            }
        }
    }

    /// Set the global speed multiplier. Negative values are rejected and the
    /// previous multiplier kept.
    pub fn set_speed_multiplier(&mut self, value: f64) -> Result<(), SimulationError> {
        if let Err(err) = self.clock.set_speed_multiplier(value) {
            warn!("Rejected speed change: {err}");
            return Err(err);
        }
        info!("Simulation speed: {value}x");
        Ok(())
    }

    /// Toggle tracking of `body`, or stop tracking with `None`.
    /// Returns the body now being followed.
    pub fn set_follow_target(&mut self, body: Option<BodyId>) -> Result<Option<BodyId>, SimulationError> {
        let Some(id) = body else {
            if self.camera.follow_target().is_some() {
                self.camera.clear_follow();
                info!("Stopped following");
            }
            return Ok(None);
        };

        let Some(name) = self.system.get(id).map(|b| b.name.clone()) else {
            let err = SimulationError::DanglingReference(id);
            warn!("Cannot follow: {err}");
            return Err(err);
        };

        let now = self.camera.toggle_follow(id);
        if now.is_some() {
            info!("Following {name}");
        } else {
            info!("Stopped following {name}");
        }
        Ok(now)
    }

    pub fn switch_camera_mode(&mut self, mode: CameraMode) {
        self.camera.switch_mode(mode, &self.settings.camera);
        info!("Camera mode: {}", mode.label());
    }

    /// Stop following and release input capture. The camera mode is kept.
    pub fn cancel(&mut self) {
        self.camera.cancel();
        info!("Cancelled follow and input capture");
    }

    /// Replace the follow offset after validating it. Scaled directions are
    /// stored normalized.
    pub fn set_follow_offset(&mut self, offset: FollowOffset) -> Result<(), SimulationError> {
        match offset.normalized() {
            Ok(offset) => {
                self.settings.follow.offset = offset;
                Ok(())
            }
            Err(err) => {
                warn!("Rejected follow offset: {err}");
                Err(err)
            }
        }
    }

    /// Route an input intent. Returns false if it had no effect.
    pub fn apply_intent(&mut self, intent: CameraIntent) -> bool {
        match intent {
            CameraIntent::SwitchMode(mode) => {
                self.switch_camera_mode(mode);
                true
            }
            CameraIntent::ToggleFollow(body) => self.set_follow_target(Some(body)).is_ok(),
            CameraIntent::Cancel => {
                self.cancel();
                true
            }
            other => self.camera.apply(other, &self.settings.camera),
        }
    }

    /// Drop a body from the simulation. Children keep running around the
    /// origin; a camera following it lets go on the next tick.
    pub fn remove_body(&mut self, body: BodyId) -> Result<(), SimulationError> {
        match self.system.remove(body) {
            Some(removed) => {
                info!("Removed {} from the simulation", removed.name);
                Ok(())
            }
            None => Err(SimulationError::DanglingReference(body)),
        }
    }
}
