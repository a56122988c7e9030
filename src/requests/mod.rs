// Training request workflow
//
// Types, the pure transition engine, the role wizard, and the service that
// runs transitions against injected collaborators.

pub mod errors;
pub mod notify;
pub mod service;
pub mod traits;
pub mod transitions;
pub mod types;
pub mod validation;
pub mod wizard;

#[cfg(test)]
pub mod mocks;

#[cfg(test)]
pub mod tests;

pub use errors::{StoreError, WorkflowError};
pub use service::{CreateOutcome, Decision, RequestDraft, SyncStatus, WorkflowService};
pub use transitions::{available_actions, next_status, TransitionError, TRANSITIONS};
pub use types::{
    RequestAction, RequestId, RequestStatus, SessionContext, Specialization, TrainingDetails,
    TrainingRequest, User,
};
pub use wizard::{RequestWizard, WizardEvent, WizardOutcome};
