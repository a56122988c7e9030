// Test doubles and fixtures - no side effects

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;

use crate::requests::notify::TransitionEvent;
use crate::requests::traits::Notifier;
use crate::requests::types::*;
use crate::roles::Role;

/// Notifier that keeps every event it is handed
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub events: Mutex<Vec<TransitionEvent>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn events(&self) -> Vec<TransitionEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, event: &TransitionEvent) -> Result<()> {
        self.events.lock().unwrap().push(event.clone());
        if self.fail {
            return Err(anyhow!("notification channel unavailable"));
        }
        Ok(())
    }
}

pub fn user(id: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        code: id.to_uppercase(),
        name: format!("{} user", role.title()),
        email: format!("{id}@example.org"),
        role,
        region: "Cairo".to_string(),
        department: "Operations".to_string(),
        specialization: None,
        rating: None,
        availability: None,
    }
}

pub fn session(id: &str, role: Role) -> SessionContext {
    SessionContext::new(user(id, role))
}

pub fn complete_details() -> TrainingDetails {
    TrainingDetails {
        training_date: NaiveDate::from_ymd_opt(2026, 11, 15),
        location: "Cairo HQ".to_string(),
        specialization: Some(Specialization::Leadership),
        trainee_count: Some(20),
        description: Some("Leadership essentials for new team leads".to_string()),
    }
}

/// Directory contents for service tests: one user per assignable id
pub fn team() -> Vec<User> {
    [
        ("u-dv", Role::Dv),
        ("u-sv", Role::Sv),
        ("u-sv-assigned", Role::Sv),
        ("u-sv-other", Role::Sv),
        ("u-pm", Role::Pm),
        ("u-tr", Role::Tr),
    ]
    .into_iter()
    .map(|(id, role)| user(id, role))
    .collect()
}
