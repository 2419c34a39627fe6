//! Orbit path table: the bodies of the simulation and their static orbit
//! parameters.
//!
//! Bodies are loaded once from [`BodyDefinition`]s. Loading validates the
//! parent graph (unknown parents and cycles are rejected) and derives a
//! parent-first update order, so a moon always reads its planet's position
//! from the same tick.

pub mod data;

use std::collections::HashMap;

use bevy::math::{DQuat, DVec3};

use crate::error::SimulationError;
use crate::kinematics;
use crate::types::{BodyId, BodyKind};

pub use data::stock_scene;

/// Surface coefficients used by the environment model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThermalCoefficients {
    /// Fraction of incoming light reflected (0..1).
    pub albedo: f64,
    /// Greenhouse warming added to the equilibrium temperature (Kelvin).
    pub greenhouse: f64,
}

impl Default for ThermalCoefficients {
    fn default() -> Self {
        Self {
            albedo: 0.3,
            greenhouse: 0.0,
        }
    }
}

/// Static description of a body, as supplied by scene setup.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDefinition {
    pub name: String,
    pub kind: BodyKind,
    /// Name of the parent body. `None` orbits the scene origin.
    pub parent: Option<String>,
    /// Distance from the parent (scene units).
    pub orbit_radius: f64,
    /// Radians per simulated millisecond.
    pub angular_speed: f64,
    /// Radians of self-rotation per tick at speed multiplier 1.
    pub spin_speed: f64,
    /// Orbital angle at load time (radians).
    pub initial_angle: f64,
    /// Physical radius (scene units), if the body has one.
    pub radius: Option<f64>,
    pub thermal: Option<ThermalCoefficients>,
    /// Keep the body's tail toward its parent (station convention).
    pub faces_parent: bool,
}

impl BodyDefinition {
    /// A body orbiting `parent` (or the origin) with no spin or coefficients.
    pub fn new(name: impl Into<String>, kind: BodyKind, orbit_radius: f64, angular_speed: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            orbit_radius,
            angular_speed,
            spin_speed: 0.0,
            initial_angle: 0.0,
            radius: None,
            thermal: None,
            faces_parent: false,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_spin(mut self, spin_speed: f64) -> Self {
        self.spin_speed = spin_speed;
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.initial_angle = angle;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_thermal(mut self, albedo: f64, greenhouse: f64) -> Self {
        self.thermal = Some(ThermalCoefficients { albedo, greenhouse });
        self
    }

    pub fn facing_parent(mut self) -> Self {
        self.faces_parent = true;
        self
    }

    fn validate(&self) -> Result<(), SimulationError> {
        let mut checks = vec![
            ("orbit_radius", self.orbit_radius),
            ("angular_speed", self.angular_speed),
            ("spin_speed", self.spin_speed),
            ("initial_angle", self.initial_angle),
        ];
        if let Some(radius) = self.radius {
            checks.push(("radius", radius));
        }
        if let Some(thermal) = self.thermal {
            checks.push(("albedo", thermal.albedo));
            checks.push(("greenhouse", thermal.greenhouse));
        }
        for (field, value) in checks {
            if !value.is_finite() {
                return Err(self.invalid(field, value));
            }
        }
        if self.orbit_radius < 0.0 {
            return Err(self.invalid("orbit_radius", self.orbit_radius));
        }
        if self.radius.is_some_and(|r| r < 0.0) {
            return Err(self.invalid("radius", self.radius.unwrap_or_default()));
        }
        if let Some(thermal) = self.thermal {
            if !(0.0..1.0).contains(&thermal.albedo) {
                return Err(self.invalid("albedo", thermal.albedo));
            }
        }
        Ok(())
    }

    fn invalid(&self, field: &'static str, value: f64) -> SimulationError {
        SimulationError::InvalidBodyParameter {
            body: self.name.clone(),
            field,
            value,
        }
    }
}

/// A simulated body.
///
/// Orbital angle, spin, position and orientation are written only by the
/// kinematics updater; everything else is fixed at load.
#[derive(Clone, Debug)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    pub kind: BodyKind,
    pub parent: Option<BodyId>,
    pub orbit_radius: f64,
    pub angular_speed: f64,
    pub spin_speed: f64,
    pub radius: Option<f64>,
    pub thermal: Option<ThermalCoefficients>,
    pub faces_parent: bool,
    pub(crate) angle: f64,
    pub(crate) spin: f64,
    pub(crate) position: DVec3,
    pub(crate) orientation: DQuat,
    /// Set once the parent has gone missing, so the fallback is logged once.
    pub(crate) orphaned: bool,
    /// Set while the body is being skipped, so the skip is logged once.
    pub(crate) malformed: bool,
}

impl Body {
    /// Current orbital angle (radians, unbounded).
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Accumulated self-rotation about the vertical axis (radians, unbounded).
    pub fn spin(&self) -> f64 {
        self.spin
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn orientation(&self) -> DQuat {
        self.orientation
    }
}

/// All bodies in the simulation.
#[derive(Clone, Debug, Default)]
pub struct SolarSystem {
    /// Slots indexed by `BodyId`; removed bodies leave `None` behind.
    slots: Vec<Option<Body>>,
    /// Parent-first update order.
    order: Vec<BodyId>,
    names: HashMap<String, BodyId>,
}

impl SolarSystem {
    /// Load and validate a set of body definitions.
    ///
    /// Positions are derived immediately, so they are valid before the first tick.
    pub fn from_definitions(definitions: Vec<BodyDefinition>) -> Result<Self, SimulationError> {
        let mut names = HashMap::with_capacity(definitions.len());
        for (index, def) in definitions.iter().enumerate() {
            def.validate()?;
            if names.insert(def.name.clone(), BodyId(index)).is_some() {
                return Err(SimulationError::DuplicateBody(def.name.clone()));
            }
        }

        let mut parents = Vec::with_capacity(definitions.len());
        for def in &definitions {
            let parent = match &def.parent {
                Some(parent) => Some(*names.get(parent).ok_or_else(|| {
                    SimulationError::UnknownParent {
                        body: def.name.clone(),
                        parent: parent.clone(),
                    }
                })?),
                None => None,
            };
            parents.push(parent);
        }

        let depths = parent_depths(&parents).map_err(|index| {
            SimulationError::ParentCycle(definitions[index].name.clone())
        })?;
        let mut order: Vec<BodyId> = (0..definitions.len()).map(BodyId).collect();
        order.sort_by_key(|id| depths[id.0]);

        let slots = definitions
            .into_iter()
            .zip(parents)
            .enumerate()
            .map(|(index, (def, parent))| {
                Some(Body {
                    id: BodyId(index),
                    name: def.name,
                    kind: def.kind,
                    parent,
                    orbit_radius: def.orbit_radius,
                    angular_speed: def.angular_speed,
                    spin_speed: def.spin_speed,
                    radius: def.radius,
                    thermal: def.thermal,
                    faces_parent: def.faces_parent,
                    angle: def.initial_angle,
                    spin: 0.0,
                    position: DVec3::ZERO,
                    orientation: DQuat::IDENTITY,
                    orphaned: false,
                    malformed: false,
                })
            })
            .collect();

        let mut system = Self {
            slots,
            order,
            names,
        };
        kinematics::place(&mut system);
        Ok(system)
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.get(id).is_some()
    }

    /// Look up a body by name.
    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.names.get(name).copied().filter(|id| self.contains(*id))
    }

    /// The central body: the first star in the table.
    pub fn central(&self) -> Option<&Body> {
        self.iter().find(|body| body.kind == BodyKind::Star)
    }

    /// Bodies in parent-first update order.
    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.order.iter().filter_map(|id| self.get(*id))
    }

    pub(crate) fn update_order(&self) -> &[BodyId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove a body. References to it (children, follow target) become dangling
    /// and are handled by their consumers.
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let body = self.slots.get_mut(id.0)?.take()?;
        self.names.remove(&body.name);
        Some(body)
    }
}

/// Depth of each node in the parent forest, or the index of a node on a cycle.
fn parent_depths(parents: &[Option<BodyId>]) -> Result<Vec<usize>, usize> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        Visiting,
        Done(usize),
    }

    let mut marks = vec![Mark::Unvisited; parents.len()];
    for start in 0..parents.len() {
        let mut chain = Vec::new();
        let mut current = start;
        let base = loop {
            match marks[current] {
                Mark::Done(depth) => break depth + 1,
                Mark::Visiting => return Err(current),
                Mark::Unvisited => {
                    marks[current] = Mark::Visiting;
                    chain.push(current);
                    match parents[current] {
                        Some(parent) => current = parent.0,
                        None => break 0,
                    }
                }
            }
        };
        for (offset, index) in chain.iter().rev().enumerate() {
            marks[*index] = Mark::Done(base + offset);
        }
    }

    Ok(marks
        .into_iter()
        .map(|mark| match mark {
            Mark::Done(depth) => depth,
            _ => 0,
        })
        .collect())
}
