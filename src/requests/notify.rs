use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::traits::Notifier;
use super::types::{RequestAction, RequestId, RequestStatus};
use crate::roles::Role;

/// Emitted after a transition has been persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionEvent {
    pub request_id: RequestId,
    pub actor_id: String,
    pub role: Role,
    pub action: RequestAction,
    pub from: RequestStatus,
    pub to: RequestStatus,
    pub at: DateTime<Utc>,
    pub correlation_id: String,
}

/// Notifier that records events in the structured log
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, event: &TransitionEvent) -> anyhow::Result<()> {
        tracing::info!(
            request.id = %event.request_id,
            actor.id = %event.actor_id,
            role = %event.role,
            action = %event.action,
            from = %event.from,
            to = %event.to,
            correlation.id = %event.correlation_id,
            "Training request notification"
        );
        Ok(())
    }
}
