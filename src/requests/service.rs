// Workflow service: fetch -> transition -> save -> notify
//
// The service never keeps ambient session state. Every call receives a
// `SessionContext` describing who is acting and whether the client is online.

use chrono::Utc;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn, Instrument};

use super::errors::WorkflowError;
use super::notify::TransitionEvent;
use super::traits::{Notifier, RequestStore, UserDirectory};
use super::transitions::{next_status, TransitionError};
use super::types::{
    NewTrainingRequest, RequestAction, RequestFilter, RequestId, RequestPatch, RequestStatus,
    SessionContext, TrainingDetails, TrainingRequest, User,
};
use super::validation::{validate_details, validate_partial, Field, ValidationError};
use super::wizard::RequestWizard;
use crate::roles::{Capability, Role};
use crate::telemetry::{create_workflow_span, generate_correlation_id};
use crate::trainers;

/// What the requester fills in when starting a request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestDraft {
    pub title: String,
    pub details: TrainingDetails,
    pub supervisor_id: Option<String>,
    pub program_manager_id: Option<String>,
}

/// Extra data that accompanies a decision
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decision {
    /// Reason recorded on the request
    pub note: Option<String>,
    /// Trainer recommended by the supervisor
    pub trainer_id: Option<String>,
    /// Documentation references uploaded on completion
    pub documentation: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(TrainingRequest),
    /// Saved locally, will be created on the next sync
    Queued { pending: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Idle,
    Syncing,
    Synced,
    Error,
}

pub struct WorkflowService<S, N> {
    store: Arc<S>,
    directory: Arc<dyn UserDirectory>,
    notifier: Arc<N>,
    notify_on_transition: bool,
    outbox: Mutex<VecDeque<NewTrainingRequest>>,
    sync_status: Mutex<SyncStatus>,
}

impl<S, N> WorkflowService<S, N>
where
    S: RequestStore,
    N: Notifier,
{
    pub fn new(store: Arc<S>, directory: Arc<dyn UserDirectory>, notifier: Arc<N>) -> Self {
        Self {
            store,
            directory,
            notifier,
            notify_on_transition: true,
            outbox: Mutex::new(VecDeque::new()),
            sync_status: Mutex::new(SyncStatus::Idle),
        }
    }

    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notify_on_transition = enabled;
        self
    }

    /// Start a new request in `draft`. Offline clients get it queued instead.
    pub async fn create_request(
        &self,
        ctx: &SessionContext,
        draft: RequestDraft,
    ) -> Result<CreateOutcome, WorkflowError> {
        let user = &ctx.user;
        if !user.role.has_capability(Capability::Create) {
            warn!(user.id = %user.id, role = %user.role, "Role may not create training requests");
            return Err(TransitionError::UnauthorizedRole {
                role: user.role,
                status: RequestStatus::Draft,
                action: RequestAction::Submit,
                expected: Some(Role::Dv),
            }
            .into());
        }
        validate_partial(&draft.details)?;
        self.check_assignee(Field::SupervisorId, draft.supervisor_id.as_deref(), Role::Sv)
            .await?;
        self.check_assignee(Field::ProgramManagerId, draft.program_manager_id.as_deref(), Role::Pm)
            .await?;

        let new = NewTrainingRequest {
            title: draft.title,
            requested_by: user.id.clone(),
            supervisor_id: draft.supervisor_id,
            program_manager_id: draft.program_manager_id,
            details: draft.details,
            region: user.region.clone(),
            department: user.department.clone(),
        };

        if !ctx.online {
            let mut outbox = self.outbox.lock().await;
            outbox.push_back(new);
            info!(pending = outbox.len(), "Offline, training request queued for sync");
            return Ok(CreateOutcome::Queued {
                pending: outbox.len(),
            });
        }

        let created = self.store.create_request(new).await?;
        info!(request.id = %created.id, user.id = %user.id, "Training request created");
        Ok(CreateOutcome::Created(created))
    }

    /// Replace the payload. Only the role bound to the current status may edit.
    pub async fn update_details(
        &self,
        ctx: &SessionContext,
        id: &RequestId,
        details: TrainingDetails,
    ) -> Result<TrainingRequest, WorkflowError> {
        require_online(ctx, "edit a training request")?;
        let request = self.fetch_visible(ctx, id).await?;
        let role = ctx.role();

        if request.status.is_terminal() {
            return Err(TransitionError::InvalidTransition {
                role,
                status: request.status,
                action: RequestAction::Submit,
            }
            .into());
        }
        if request.status.bound_role() != Some(role) || !holder_matches(ctx, &request) {
            return Err(WorkflowError::EditNotAllowed {
                role,
                status: request.status,
            });
        }
        validate_partial(&details)?;

        let mut patch = RequestPatch::stamped(&ctx.user.id, Utc::now());
        patch.details = Some(details);
        Ok(self.store.save_request(id, patch).await?)
    }

    /// Perform `action` on the request as the session user
    pub async fn apply(
        &self,
        ctx: &SessionContext,
        id: &RequestId,
        action: RequestAction,
        decision: Decision,
    ) -> Result<TrainingRequest, WorkflowError> {
        let correlation_id = generate_correlation_id();
        let span = create_workflow_span(id, ctx.role(), action, &correlation_id);
        self.apply_inner(ctx, id, action, decision, correlation_id)
            .instrument(span)
            .await
    }

    async fn apply_inner(
        &self,
        ctx: &SessionContext,
        id: &RequestId,
        action: RequestAction,
        decision: Decision,
        correlation_id: String,
    ) -> Result<TrainingRequest, WorkflowError> {
        require_online(ctx, "change a training request")?;
        let user = &ctx.user;
        let request = self.store.fetch_request(id).await?;

        let next = next_status(user.role, request.status, action).inspect_err(|e| {
            warn!(status = %request.status, error = %e, "Transition refused");
        })?;

        if !holder_matches(ctx, &request) {
            warn!(
                holder = ?request.holder(user.role),
                user.id = %user.id,
                "Request is held by another user"
            );
            return Err(TransitionError::UnauthorizedRole {
                role: user.role,
                status: request.status,
                action,
                expected: request.status.bound_role(),
            }
            .into());
        }

        if action == RequestAction::Submit {
            validate_details(&request.details)?;
        }
        let recommends_trainer = action == RequestAction::Approve && user.role == Role::Sv;
        if recommends_trainer {
            self.check_assignee(Field::TrainerId, decision.trainer_id.as_deref(), Role::Tr)
                .await?;
        }

        let now = Utc::now();
        let mut patch = RequestPatch::stamped(&user.id, now);
        patch.status = Some(next);
        match user.role {
            Role::Sv => patch.supervisor_id = Some(user.id.clone()),
            Role::Pm => patch.program_manager_id = Some(user.id.clone()),
            Role::Tr => patch.trainer_id = Some(user.id.clone()),
            _ => {}
        }
        if recommends_trainer {
            patch.trainer_id = decision.trainer_id;
        }
        patch.decision_note = decision.note;
        if action == RequestAction::Complete {
            patch.documentation = decision.documentation;
        }

        let saved = self.store.save_request(id, patch).await?;
        info!(from = %request.status, to = %saved.status, "Training request transitioned");

        if self.notify_on_transition {
            let event = TransitionEvent {
                request_id: saved.id.clone(),
                actor_id: user.id.clone(),
                role: user.role,
                action,
                from: request.status,
                to: saved.status,
                at: now,
                correlation_id,
            };
            if let Err(e) = self.notifier.notify(&event).await {
                warn!(error = %e, "Notification failed, transition already saved");
            }
        }

        Ok(saved)
    }

    /// Requests the session user is allowed to see
    pub async fn list_visible(
        &self,
        ctx: &SessionContext,
    ) -> Result<Vec<TrainingRequest>, WorkflowError> {
        let filter = RequestFilter::for_user(&ctx.user);
        Ok(self.store.list_requests(&filter).await?)
    }

    /// Fetch one request; requests outside the user's scope look missing
    pub async fn fetch_visible(
        &self,
        ctx: &SessionContext,
        id: &RequestId,
    ) -> Result<TrainingRequest, WorkflowError> {
        let request = self.store.fetch_request(id).await?;
        if RequestFilter::for_user(&ctx.user).matches(&request) {
            Ok(request)
        } else {
            Err(WorkflowError::NotFound { id: id.clone() })
        }
    }

    /// Wizard for the session user's role over the stored request
    pub async fn wizard(
        &self,
        ctx: &SessionContext,
        id: &RequestId,
    ) -> Result<RequestWizard, WorkflowError> {
        let request = self.fetch_visible(ctx, id).await?;
        Ok(RequestWizard::for_request(ctx.role(), &request))
    }

    /// Walk the role's wizard to its decision, then persist the transition.
    /// Like `apply`, this reports role errors instead of hiding the request.
    pub async fn complete_wizard(
        &self,
        ctx: &SessionContext,
        id: &RequestId,
        action: RequestAction,
        decision: Decision,
    ) -> Result<TrainingRequest, WorkflowError> {
        let request = self.store.fetch_request(id).await?;
        RequestWizard::for_request(ctx.role(), &request).walk_to_decision(action)?;
        self.apply(ctx, id, action, decision).await
    }

    /// Trainers suited to a request the session user can see, best first
    pub async fn recommended_trainers(
        &self,
        ctx: &SessionContext,
        id: &RequestId,
    ) -> Result<Vec<User>, WorkflowError> {
        let request = self.fetch_visible(ctx, id).await?;
        Ok(trainers::recommended_trainers(self.directory.as_ref(), &request).await?)
    }

    /// Browse the trainer directory
    pub async fn find_trainers(&self, query: &str) -> Result<Vec<User>, WorkflowError> {
        let pool = self.directory.list_trainers().await?;
        Ok(trainers::search_trainers(pool, query))
    }

    /// An assignee id must name a known user holding `role`
    async fn check_assignee(
        &self,
        field: Field,
        id: Option<&str>,
        role: Role,
    ) -> Result<(), WorkflowError> {
        let Some(id) = id else {
            return Ok(());
        };
        match self.directory.find_user(id).await? {
            Some(user) if user.role == role => Ok(()),
            Some(user) => {
                warn!(%field, user.id = %id, found = %user.role, "Assignee has the wrong role");
                Err(ValidationError::single(
                    field,
                    format!("{id} is a {}, not a {}", user.role.title(), role.title()),
                )
                .into())
            }
            None => Err(ValidationError::single(field, format!("Unknown user '{id}'")).into()),
        }
    }

    pub async fn pending_sync(&self) -> usize {
        self.outbox.lock().await.len()
    }

    pub async fn sync_status(&self) -> SyncStatus {
        *self.sync_status.lock().await
    }

    /// Push queued creations to the store. Items that fail stay queued.
    pub async fn sync(&self, ctx: &SessionContext) -> Result<Vec<TrainingRequest>, WorkflowError> {
        if !ctx.online {
            return Ok(Vec::new());
        }
        *self.sync_status.lock().await = SyncStatus::Syncing;

        let mut created = Vec::new();
        let mut outbox = self.outbox.lock().await;
        while let Some(new) = outbox.pop_front() {
            match self.store.create_request(new.clone()).await {
                Ok(request) => created.push(request),
                Err(e) => {
                    outbox.push_front(new);
                    warn!(error = %e, pending = outbox.len(), "Sync failed");
                    *self.sync_status.lock().await = SyncStatus::Error;
                    return Err(e.into());
                }
            }
        }

        *self.sync_status.lock().await = SyncStatus::Synced;
        info!(created = created.len(), "Offline queue synced");
        Ok(created)
    }
}

fn require_online(ctx: &SessionContext, operation: &'static str) -> Result<(), WorkflowError> {
    if ctx.online {
        Ok(())
    } else {
        Err(WorkflowError::Offline { operation })
    }
}

/// An already recorded holder of the acting role must be the acting user
fn holder_matches(ctx: &SessionContext, request: &TrainingRequest) -> bool {
    request
        .holder(ctx.role())
        .map_or(true, |holder| holder == ctx.user.id)
}
