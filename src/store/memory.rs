use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::StoreData;
use crate::requests::errors::StoreError;
use crate::requests::traits::{RequestStore, UserDirectory};
use crate::requests::types::{
    NewTrainingRequest, RequestFilter, RequestId, RequestPatch, TrainingRequest, User,
};

/// Process-local store, used by tests and embedders
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<StoreData>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            data: RwLock::new(StoreData::with_users(users)),
        }
    }

    pub async fn snapshot(&self) -> StoreData {
        self.data.read().await.clone()
    }
}

#[async_trait]
impl RequestStore for InMemoryStore {
    async fn fetch_request(&self, id: &RequestId) -> Result<TrainingRequest, StoreError> {
        self.data.read().await.fetch(id)
    }

    async fn save_request(
        &self,
        id: &RequestId,
        patch: RequestPatch,
    ) -> Result<TrainingRequest, StoreError> {
        self.data.write().await.patch(id, patch)
    }

    async fn create_request(&self, new: NewTrainingRequest) -> Result<TrainingRequest, StoreError> {
        Ok(self.data.write().await.insert(new, Utc::now()))
    }

    async fn list_requests(
        &self,
        filter: &RequestFilter,
    ) -> Result<Vec<TrainingRequest>, StoreError> {
        Ok(self.data.read().await.list(filter))
    }
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn find_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.data.read().await.find_user(id))
    }

    async fn find_user_by_code(&self, code: &str) -> Result<Option<User>, StoreError> {
        Ok(self.data.read().await.find_user_by_code(code))
    }

    async fn list_trainers(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.data.read().await.trainers())
    }
}
