// Traits for the external collaborators the workflow consumes

use async_trait::async_trait;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

use super::errors::{StoreError, WorkflowError};
use super::notify::TransitionEvent;
use super::types::{
    NewTrainingRequest, RequestFilter, RequestId, RequestPatch, TrainingRequest, User,
};

/// Persistence side of the backend client
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Load a single request by id
    async fn fetch_request(&self, id: &RequestId) -> Result<TrainingRequest, StoreError>;

    /// Apply a patch and return the updated request
    async fn save_request(
        &self,
        id: &RequestId,
        patch: RequestPatch,
    ) -> Result<TrainingRequest, StoreError>;

    /// Insert a new request; the store assigns the id
    async fn create_request(&self, new: NewTrainingRequest) -> Result<TrainingRequest, StoreError>;

    /// All requests matching the filter, ordered by id
    async fn list_requests(&self, filter: &RequestFilter)
        -> Result<Vec<TrainingRequest>, StoreError>;
}

/// User lookups: login codes, assignee ids and the trainer pool
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_user(&self, id: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_code(&self, code: &str) -> Result<Option<User>, StoreError>;

    async fn list_trainers(&self) -> Result<Vec<User>, StoreError>;
}

/// Auth side of the backend client
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_user(&self) -> Result<User, WorkflowError>;
}

/// Fire-and-forget delivery of workflow events
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: &TransitionEvent) -> anyhow::Result<()>;
}
