// Core types for the training request workflow

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

use super::validation::validate_description;
use crate::roles::{RequestScope, Role};

/// Opaque request identifier, assigned by the store on creation.
///
/// Ids order naturally: the numeric suffix after the last `-` compares as a
/// number, so `TRN-2026-999` sorts before `TRN-2026-1000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl RequestId {
    fn sort_key(&self) -> (&str, Option<u64>) {
        match self.0.rsplit_once('-') {
            Some((prefix, seq)) => match seq.parse::<u64>() {
                Ok(n) => (prefix, Some(n)),
                Err(_) => (self.0.as_str(), None),
            },
            None => (self.0.as_str(), None),
        }
    }
}

impl Ord for RequestId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for RequestId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Lifecycle status of a training request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Draft,
    PendingSvApproval,
    PendingPmApproval,
    Approved,
    Rejected,
    Completed,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 6] = [
        RequestStatus::Draft,
        RequestStatus::PendingSvApproval,
        RequestStatus::PendingPmApproval,
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Draft => "draft",
            RequestStatus::PendingSvApproval => "pending_sv_approval",
            RequestStatus::PendingPmApproval => "pending_pm_approval",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Completed => "completed",
        }
    }

    /// Human readable badge text
    pub fn label(self) -> &'static str {
        match self {
            RequestStatus::Draft => "Draft",
            RequestStatus::PendingSvApproval => "Pending Supervisor Approval",
            RequestStatus::PendingPmApproval => "Pending Program Manager Approval",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
            RequestStatus::Completed => "Completed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Rejected | RequestStatus::Completed)
    }

    /// The only role allowed to act on a request in this status
    pub fn bound_role(self) -> Option<Role> {
        match self {
            RequestStatus::Draft => Some(Role::Dv),
            RequestStatus::PendingSvApproval => Some(Role::Sv),
            RequestStatus::PendingPmApproval => Some(Role::Pm),
            RequestStatus::Approved => Some(Role::Tr),
            RequestStatus::Rejected | RequestStatus::Completed => None,
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown request status '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for RequestStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// Actions a role can take against a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestAction {
    Submit,
    Approve,
    Reject,
    Complete,
}

impl RequestAction {
    pub const ALL: [RequestAction; 4] = [
        RequestAction::Submit,
        RequestAction::Approve,
        RequestAction::Reject,
        RequestAction::Complete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RequestAction::Submit => "submit",
            RequestAction::Approve => "approve",
            RequestAction::Reject => "reject",
            RequestAction::Complete => "complete",
        }
    }
}

impl fmt::Display for RequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Training topics offered by the trainer pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Specialization {
    Leadership,
    Communication,
    ProjectManagement,
    TechnicalSkills,
    SoftSkills,
}

impl Specialization {
    pub const ALL: [Specialization; 5] = [
        Specialization::Leadership,
        Specialization::Communication,
        Specialization::ProjectManagement,
        Specialization::TechnicalSkills,
        Specialization::SoftSkills,
    ];

    pub fn value(self) -> &'static str {
        match self {
            Specialization::Leadership => "leadership",
            Specialization::Communication => "communication",
            Specialization::ProjectManagement => "project-management",
            Specialization::TechnicalSkills => "technical-skills",
            Specialization::SoftSkills => "soft-skills",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Specialization::Leadership => "Leadership",
            Specialization::Communication => "Communication",
            Specialization::ProjectManagement => "Project Management",
            Specialization::TechnicalSkills => "Technical Skills",
            Specialization::SoftSkills => "Soft Skills",
        }
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown specialization '{0}'")]
pub struct ParseSpecializationError(pub String);

impl FromStr for Specialization {
    type Err = ParseSpecializationError;

    /// Accepts either the kebab-case value or the display label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Specialization::ALL
            .into_iter()
            .find(|spec| spec.value() == s || spec.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSpecializationError(s.to_string()))
    }
}

/// Descriptive payload of a request, edited through the wizard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct TrainingDetails {
    #[validate(required(message = "Training date is required"))]
    pub training_date: Option<NaiveDate>,
    #[serde(default)]
    #[validate(length(min = 3, message = "Location must be at least 3 characters"))]
    pub location: String,
    #[validate(required(message = "Please select a specialization"))]
    pub specialization: Option<Specialization>,
    #[validate(
        required(message = "Trainee count must be a positive number"),
        range(min = 1, message = "Trainee count must be a positive number")
    )]
    pub trainee_count: Option<u32>,
    #[validate(custom(function = "validate_description"))]
    pub description: Option<String>,
}

/// A persisted training request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRequest {
    pub id: RequestId,
    pub title: String,
    pub status: RequestStatus,
    pub requested_by: String,
    pub supervisor_id: Option<String>,
    pub program_manager_id: Option<String>,
    pub trainer_id: Option<String>,
    pub details: TrainingDetails,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub department: String,
    pub decision_note: Option<String>,
    #[serde(default)]
    pub documentation: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<String>,
}

impl TrainingRequest {
    /// User recorded as holder of the given role on this request
    pub fn holder(&self, role: Role) -> Option<&str> {
        match role {
            Role::Dv => Some(self.requested_by.as_str()),
            Role::Sv => self.supervisor_id.as_deref(),
            Role::Pm => self.program_manager_id.as_deref(),
            Role::Tr => self.trainer_id.as_deref(),
            Role::Cc | Role::Mb => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Everything the store needs to create a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrainingRequest {
    pub title: String,
    pub requested_by: String,
    pub supervisor_id: Option<String>,
    pub program_manager_id: Option<String>,
    pub details: TrainingDetails,
    pub region: String,
    pub department: String,
}

/// Partial update of a stored request; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestPatch {
    pub status: Option<RequestStatus>,
    pub details: Option<TrainingDetails>,
    pub supervisor_id: Option<String>,
    pub program_manager_id: Option<String>,
    pub trainer_id: Option<String>,
    pub decision_note: Option<String>,
    /// Appended to the existing documentation list
    #[serde(default)]
    pub documentation: Vec<String>,
    pub updated_by: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl RequestPatch {
    pub fn stamped(user_id: &str, at: DateTime<Utc>) -> Self {
        Self {
            updated_by: Some(user_id.to_string()),
            updated_at: Some(at),
            ..Default::default()
        }
    }

    pub fn apply_to(self, request: &mut TrainingRequest) {
        if let Some(status) = self.status {
            request.status = status;
        }
        if let Some(details) = self.details {
            request.details = details;
        }
        if self.supervisor_id.is_some() {
            request.supervisor_id = self.supervisor_id;
        }
        if self.program_manager_id.is_some() {
            request.program_manager_id = self.program_manager_id;
        }
        if self.trainer_id.is_some() {
            request.trainer_id = self.trainer_id;
        }
        if self.decision_note.is_some() {
            request.decision_note = self.decision_note;
        }
        request.documentation.extend(self.documentation);
        if self.updated_by.is_some() {
            request.updated_by = self.updated_by;
        }
        if let Some(at) = self.updated_at {
            request.updated_at = at;
        }
    }
}

/// A user account as known to the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub code: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub specialization: Option<Specialization>,
    #[serde(default)]
    pub rating: Option<f32>,
    /// Trainers only; other roles leave it unset
    #[serde(default)]
    pub availability: Option<Availability>,
}

/// Whether a trainer can take on new sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Busy,
    Unavailable,
}

impl Availability {
    pub fn label(self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Busy => "Busy",
            Availability::Unavailable => "Unavailable",
        }
    }
}

/// Explicit session state handed to every workflow call
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    pub user: User,
    pub online: bool,
}

impl SessionContext {
    pub fn new(user: User) -> Self {
        Self { user, online: true }
    }

    pub fn offline(mut self) -> Self {
        self.online = false;
        self
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}

/// Role-scoped listing filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFilter {
    pub role: Role,
    pub user_id: String,
}

impl RequestFilter {
    pub fn for_user(user: &User) -> Self {
        Self {
            role: user.role,
            user_id: user.id.clone(),
        }
    }

    /// A request is visible when the user holds the role on it, or when it
    /// awaits the user's role and nobody has claimed that role yet
    pub fn matches(&self, request: &TrainingRequest) -> bool {
        if self.role.scope() == RequestScope::All {
            return true;
        }
        match request.holder(self.role) {
            Some(holder) => holder == self.user_id,
            None => request.status.bound_role() == Some(self.role),
        }
    }
}
