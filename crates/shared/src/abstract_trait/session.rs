use crate::{
    errors::ServiceError,
    session::{Session, SessionId},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynSessionManager = Arc<dyn SessionManagerTrait + Send + Sync>;

/// Lifecycle of the server-side session referenced by the `session_id` cookie.
#[async_trait]
pub trait SessionManagerTrait {
    async fn create(&self, session: &Session) -> Result<SessionId, ServiceError>;
    async fn check(&self, session_id: &SessionId) -> Result<Session, ServiceError>;
    async fn delete(&self, session_id: &SessionId) -> Result<(), ServiceError>;
}
