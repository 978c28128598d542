//! Error types.
//!
//! Two caller-facing failure kinds exist for a planning run. A run that is
//! valid but fits no session is not an error; see
//! [`ScheduleStatus`](crate::models::ScheduleStatus).

use crate::validation::ValidationError;

/// Result type for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Planning failure, surfaced before scoring or allocation starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Subject data is unusable (bad grade label, out-of-range confidence
    /// or score, missing subjects).
    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The free window is inverted or empty, or the session duration is
    /// not usable.
    #[error("invalid window: {0}")]
    InvalidWindow(String),
}

impl PlanError {
    /// Shorthand for a window error.
    pub fn window(message: impl Into<String>) -> Self {
        PlanError::InvalidWindow(message.into())
    }

    /// Validation errors carried by an `InvalidInput` failure.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            PlanError::InvalidInput(errors) => errors,
            PlanError::InvalidWindow(_) => &[],
        }
    }
}

impl From<Vec<ValidationError>> for PlanError {
    fn from(errors: Vec<ValidationError>) -> Self {
        PlanError::InvalidInput(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure of a report sink.
///
/// Never invalidates a computed schedule.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("report sink is not ready: {0}")]
    NotReady(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
