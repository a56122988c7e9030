// JSON file backed store
//
// The whole data set is loaded on open and rewritten after every mutation.
// Writes go to a sibling temp file first and are renamed into place.

use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

use super::StoreData;
use crate::requests::errors::StoreError;
use crate::requests::traits::{RequestStore, UserDirectory};
use crate::requests::types::{
    NewTrainingRequest, RequestFilter, RequestId, RequestPatch, TrainingRequest, User,
};

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<StoreData>,
}

impl JsonFileStore {
    /// Open the store at `path`; a missing file is an empty store
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let data = if fs::try_exists(&path).await? {
            let raw = fs::read_to_string(&path).await?;
            let data: StoreData = serde_json::from_str(&raw)?;
            data.check_version()?;
            data
        } else {
            StoreData::default()
        };
        debug!(path = %path.display(), requests = data.requests.len(), "Opened JSON store");
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Create or overwrite the store at `path` with the given contents
    pub async fn initialize(path: impl AsRef<Path>, data: StoreData) -> Result<Self, StoreError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            data: RwLock::new(data),
        };
        store.persist(&*store.data.read().await).await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, data: &StoreData) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(data)?).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl RequestStore for JsonFileStore {
    async fn fetch_request(&self, id: &RequestId) -> Result<TrainingRequest, StoreError> {
        self.data.read().await.fetch(id)
    }

    async fn save_request(
        &self,
        id: &RequestId,
        patch: RequestPatch,
    ) -> Result<TrainingRequest, StoreError> {
        let mut data = self.data.write().await;
        let mut next = data.clone();
        let saved = next.patch(id, patch)?;
        self.persist(&next).await?;
        *data = next;
        Ok(saved)
    }

    async fn create_request(&self, new: NewTrainingRequest) -> Result<TrainingRequest, StoreError> {
        let mut data = self.data.write().await;
        let mut next = data.clone();
        let created = next.insert(new, Utc::now());
        self.persist(&next).await?;
        *data = next;
        Ok(created)
    }

    async fn list_requests(
        &self,
        filter: &RequestFilter,
    ) -> Result<Vec<TrainingRequest>, StoreError> {
        Ok(self.data.read().await.list(filter))
    }
}

#[async_trait]
impl UserDirectory for JsonFileStore {
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
