// Trainflow Library - role-based training request approvals
// This exposes the core components for testing and integration

pub mod cli;
pub mod config;
pub mod requests;
pub mod roles;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod trainers;

// Re-export key types for easy access
pub use config::{config, init_config, TrainflowConfig};
pub use requests::{
    available_actions, next_status, CreateOutcome, Decision, RequestAction, RequestDraft,
    RequestId, RequestStatus, RequestWizard, SessionContext, Specialization, StoreError,
    TrainingDetails, TrainingRequest, TransitionError, User, WorkflowError, WorkflowService,
    TRANSITIONS,
};
pub use roles::{Capability, RequestScope, Role, WizardStep};
pub use session::{open_session, CodeSession};
pub use store::{InMemoryStore, JsonFileStore, StoreData};
pub use telemetry::{create_workflow_span, generate_correlation_id, init_telemetry};
pub use trainers::{recommend_trainers, recommended_trainers, search_trainers};
