// Actor roles and what each of them may do with a training request

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::requests::types::RequestAction;
use crate::requests::validation::Field;

/// The six actors of the training workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Requester, originates training requests
    Dv,
    /// Supervisor, first approval gate
    Sv,
    /// Program manager, second and final approval gate
    Pm,
    /// Trainer, executes and documents approved training
    Tr,
    /// Coordinator, full read visibility
    Cc,
    /// Board member, read-only oversight
    Mb,
}

/// Coarse capability classes a role can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Create,
    Approve,
    Execute,
    Observe,
}

/// Which requests a role gets to see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestScope {
    RequestedBy,
    SupervisedBy,
    ManagedBy,
    AssignedTo,
    All,
}

/// Pages of the role-specific request wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    DateAndLocation,
    SpecializationAndCount,
    ReviewAndSubmit,
    Review,
    RecommendTrainer,
    Confirm,
    AssignmentView,
    Execution,
    DocumentationUpload,
    Details,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role '{0}' (expected one of DV, SV, PM, TR, CC, MB)")]
pub struct ParseRoleError(pub String);

impl Role {
    pub const ALL: [Role; 6] = [Role::Dv, Role::Sv, Role::Pm, Role::Tr, Role::Cc, Role::Mb];

    pub fn code(self) -> &'static str {
        match self {
            Role::Dv => "DV",
            Role::Sv => "SV",
            Role::Pm => "PM",
            Role::Tr => "TR",
            Role::Cc => "CC",
            Role::Mb => "MB",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Role::Dv => "Requester",
            Role::Sv => "Supervisor",
            Role::Pm => "Program Manager",
            Role::Tr => "Trainer",
            Role::Cc => "Coordinator",
            Role::Mb => "Board Member",
        }
    }

    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Role::Dv => &[Capability::Create, Capability::Observe],
            Role::Sv | Role::Pm => &[Capability::Approve, Capability::Observe],
            Role::Tr => &[Capability::Execute, Capability::Observe],
            Role::Cc | Role::Mb => &[Capability::Observe],
        }
    }

    pub fn has_capability(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Actions this role may ever invoke, regardless of request status
    pub fn permitted_actions(self) -> &'static [RequestAction] {
        match self {
            Role::Dv => &[RequestAction::Submit],
            Role::Sv | Role::Pm => &[RequestAction::Approve, RequestAction::Reject],
            Role::Tr => &[RequestAction::Complete],
            Role::Cc | Role::Mb => &[],
        }
    }

    pub fn is_read_only(self) -> bool {
        self.permitted_actions().is_empty()
    }

    pub fn wizard_steps(self) -> &'static [WizardStep] {
        match self {
            Role::Dv => &[
                WizardStep::DateAndLocation,
                WizardStep::SpecializationAndCount,
                WizardStep::ReviewAndSubmit,
            ],
            Role::Sv => &[WizardStep::Review, WizardStep::RecommendTrainer],
            Role::Pm => &[WizardStep::Review, WizardStep::Confirm],
            Role::Tr => &[
                WizardStep::AssignmentView,
                WizardStep::Execution,
                WizardStep::DocumentationUpload,
            ],
            Role::Cc | Role::Mb => &[WizardStep::Details],
        }
    }

    pub fn form_title(self) -> &'static str {
        match self {
            Role::Dv => "Create Training Request",
            Role::Sv => "Review Training Request",
            Role::Pm => "Approve Training Request",
            Role::Tr => "Training Assignment",
            Role::Cc | Role::Mb => "Training Request",
        }
    }

    /// Label of the button that finishes the wizard
    pub fn final_action_label(self) -> &'static str {
        match self {
            Role::Dv => "Submit Request",
            Role::Sv => "Approve & Suggest Trainer",
            Role::Pm => "Approve Request",
            Role::Tr => "Complete Documentation",
            Role::Cc | Role::Mb => "Close",
        }
    }

    pub fn scope(self) -> RequestScope {
        match self {
            Role::Dv => RequestScope::RequestedBy,
            Role::Sv => RequestScope::SupervisedBy,
            Role::Pm => RequestScope::ManagedBy,
            Role::Tr => RequestScope::AssignedTo,
            Role::Cc | Role::Mb => RequestScope::All,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}

impl WizardStep {
    pub fn title(self) -> &'static str {
        match self {
            WizardStep::DateAndLocation => "Date & Location",
            WizardStep::SpecializationAndCount => "Specialization & Trainees",
            WizardStep::ReviewAndSubmit => "Review & Submit",
            WizardStep::Review => "Review Request",
            WizardStep::RecommendTrainer => "Recommend Trainer",
            WizardStep::Confirm => "Confirm Approval",
            WizardStep::AssignmentView => "Assignment",
            WizardStep::Execution => "Execution",
            WizardStep::DocumentationUpload => "Documentation Upload",
            WizardStep::Details => "Request Details",
        }
    }

    /// Payload fields that must be valid before leaving this step
    pub fn fields(self) -> &'static [Field] {
        match self {
            WizardStep::DateAndLocation => &[Field::TrainingDate, Field::Location],
            WizardStep::SpecializationAndCount => &[Field::Specialization, Field::TraineeCount],
            _ => &[],
        }
    }
}
