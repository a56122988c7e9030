use async_trait::async_trait;
use std::sync::Arc;

use crate::requests::errors::WorkflowError;
use crate::requests::traits::{SessionProvider, UserDirectory};
use crate::requests::types::{SessionContext, User};

/// Resolves the current user from a login code against the user directory
pub struct CodeSession<D: ?Sized> {
    directory: Arc<D>,
    code: String,
}

impl<D: UserDirectory + ?Sized> CodeSession<D> {
    pub fn new(directory: Arc<D>, code: impl Into<String>) -> Self {
        Self {
            directory,
            code: code.into(),
        }
    }
}

#[async_trait]
impl<D: UserDirectory + ?Sized> SessionProvider for CodeSession<D> {
    async fn current_user(&self) -> Result<User, WorkflowError> {
        self.directory
            .find_user_by_code(&self.code)
            .await?
            .ok_or_else(|| WorkflowError::UnknownUser {
                code: self.code.clone(),
            })
    }
}

/// Build an online session for whoever the provider reports
pub async fn open_session<P>(provider: &P) -> Result<SessionContext, WorkflowError>
where
    P: SessionProvider + ?Sized,
{
    let user = provider.current_user().await?;
    tracing::debug!(user.id = %user.id, role = %user.role, "Session opened");
    Ok(SessionContext::new(user))
}
