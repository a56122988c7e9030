// Request stores: the single source of truth for requests and users

pub mod json_file;
pub mod memory;
pub mod seed;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::requests::errors::StoreError;
use crate::requests::types::{
    NewTrainingRequest, RequestFilter, RequestId, RequestPatch, RequestStatus, TrainingRequest,
    User,
};
use crate::roles::Role;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

const DATA_VERSION: u32 = 1;

/// Everything a store keeps, serialized as-is by the file store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreData {
    pub version: u32,
    pub next_sequence: u32,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub requests: BTreeMap<RequestId, TrainingRequest>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: DATA_VERSION,
            next_sequence: 1,
            users: Vec::new(),
            requests: BTreeMap::new(),
        }
    }
}

impl StoreData {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users,
            ..Default::default()
        }
    }

    pub fn check_version(&self) -> Result<(), StoreError> {
        if self.version != DATA_VERSION {
            return Err(StoreError::Corrupt {
                reason: format!(
                    "unsupported data version {} (expected {DATA_VERSION})",
                    self.version
                ),
            });
        }
        Ok(())
    }

    pub fn fetch(&self, id: &RequestId) -> Result<TrainingRequest, StoreError> {
        self.requests
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })
    }

    pub fn insert(&mut self, new: NewTrainingRequest, now: DateTime<Utc>) -> TrainingRequest {
        let id = RequestId::new(format!("TRN-{}-{:03}", now.year(), self.next_sequence));
        self.next_sequence += 1;

        let request = TrainingRequest {
            id: id.clone(),
            title: new.title,
            status: RequestStatus::Draft,
            requested_by: new.requested_by,
            supervisor_id: new.supervisor_id,
            program_manager_id: new.program_manager_id,
            trainer_id: None,
            details: new.details,
            region: new.region,
            department: new.department,
            decision_note: None,
            documentation: Vec::new(),
            created_at: now,
            updated_at: now,
            updated_by: None,
        };
        self.requests.insert(id, request.clone());
        request
    }

    pub fn patch(
        &mut self,
        id: &RequestId,
        patch: RequestPatch,
    ) -> Result<TrainingRequest, StoreError> {
        let request = self
            .requests
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })?;
        patch.apply_to(request);
        Ok(request.clone())
    }

    pub fn list(&self, filter: &RequestFilter) -> Vec<TrainingRequest> {
        self.requests
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    pub fn find_user(&self, id: &str) -> Option<User> {
        self.users.iter().find(|u| u.id == id).cloned()
    }

    pub fn find_user_by_code(&self, code: &str) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.code.eq_ignore_ascii_case(code.trim()))
            .cloned()
    }

    pub fn trainers(&self) -> Vec<User> {
        self.users
            .iter()
            .filter(|u| u.role == Role::Tr)
            .cloned()
            .collect()
    }
}
