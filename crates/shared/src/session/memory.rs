use crate::{
    abstract_trait::SessionManagerTrait,
    errors::ServiceError,
    session::{Session, SessionId},
};
use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Session manager kept in process memory, for local runs and tests.
#[derive(Clone, Default)]
pub struct MemorySessionManager {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl MemorySessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionManagerTrait for MemorySessionManager {
    async fn create(&self, session: &Session) -> Result<SessionId, ServiceError> {
        let id = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(id.clone(), *session);
        debug!("Session created for user {}", session.user_id);
        Ok(SessionId(id))
    }

    async fn check(&self, session_id: &SessionId) -> Result<Session, ServiceError> {
        self.sessions
            .read()
            .await
            .get(session_id.as_str())
            .copied()
            .ok_or(ServiceError::SessionNotFound)
    }

    async fn delete(&self, session_id: &SessionId) -> Result<(), ServiceError> {
        self.sessions
            .write()
            .await
            .remove(session_id.as_str())
            .map(|_| ())
            .ok_or(ServiceError::SessionNotFound)
    }
}
