//! Error taxonomy for the simulation core.
//!
//! Every error is recoverable: setters reject bad input and keep their prior
//! state, and the tick loop never fails.

use crate::types::BodyId;

/// Broad category of a [`SimulationError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value was rejected at a setter or load boundary.
    InvalidConfiguration,
    /// A reference points at a body that is no longer in the simulation.
    DanglingReference,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("invalid speed multiplier: {0} (must be finite and non-negative)")]
    InvalidSpeedMultiplier(f64),

    #[error("follow offset direction has zero length")]
    ZeroOffsetDirection,

    #[error("invalid setting {name}: {value}")]
    InvalidSetting { name: &'static str, value: f64 },

    #[error("duplicate body name {0:?}")]
    DuplicateBody(String),

    #[error("body {body:?} references unknown parent {parent:?}")]
    UnknownParent { body: String, parent: String },

    #[error("parent chain of body {0:?} forms a cycle")]
    ParentCycle(String),

    #[error("body {body:?} has invalid {field}: {value}")]
    InvalidBodyParameter {
        body: String,
        field: &'static str,
        value: f64,
    },

    #[error("body {0} is not part of the simulation")]
    DanglingReference(BodyId),
}

impl SimulationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimulationError::DanglingReference(_) => ErrorKind::DanglingReference,
            _ => ErrorKind::InvalidConfiguration,
        }
    }
}
