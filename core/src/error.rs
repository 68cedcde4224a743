use crate::types::{CriterionKey, CsrId, SimulationId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("CSR not found: {id}")]
    CsrNotFound { id: CsrId },

    #[error("Criterion not found: {key}")]
    CriterionNotFound { key: CriterionKey },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Simulation '{simulation_id}' violates dataset invariant: {reason}")]
    InvariantViolation {
        simulation_id: SimulationId,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DashboardError {
    /// True for the per-request "unknown id / key" class of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CsrNotFound { .. } | Self::CriterionNotFound { .. }
        )
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
