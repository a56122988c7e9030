use thiserror::Error;

use super::transitions::TransitionError;
use super::types::{RequestId, RequestStatus};
use super::validation::ValidationError;
use super::wizard::WizardError;
use crate::roles::Role;

/// Failures raised by a request store implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Training request {id} not found")]
    NotFound { id: RequestId },

    #[error("Store data is corrupt: {reason}")]
    Corrupt { reason: String },
}

/// Everything the workflow service can fail with
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Training request {id} not found")]
    NotFound { id: RequestId },

    #[error("{role} cannot edit a request that is {status}")]
    EditNotAllowed { role: Role, status: RequestStatus },

    #[error("Cannot {operation} while offline")]
    Offline { operation: &'static str },

    #[error("No user with login code '{code}'")]
    UnknownUser { code: String },

    #[error(transparent)]
    Wizard(WizardError),

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => WorkflowError::NotFound { id },
            other => WorkflowError::Store(other),
        }
    }
}

impl From<WizardError> for WorkflowError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::Validation(e) => WorkflowError::Validation(e),
            WizardError::Transition(e) => WorkflowError::Transition(e),
            other => WorkflowError::Wizard(other),
        }
    }
}

impl WorkflowError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            WorkflowError::Transition(TransitionError::UnauthorizedRole { .. })
                | WorkflowError::EditNotAllowed { .. }
        )
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(
            self,
            WorkflowError::Transition(TransitionError::InvalidTransition { .. })
        )
    }
}
