use crate::{
    abstract_trait::SessionManagerTrait,
    errors::ServiceError,
    session::{SESSION_TTL, Session, SessionId},
};
use async_trait::async_trait;
use deadpool_redis::{Config, Connection, Pool, Runtime, redis::AsyncCommands};
use tracing::{debug, error};
use uuid::Uuid;

#[derive(Clone)]
pub struct RedisSessionManager {
    pool: Pool,
}

impl RedisSessionManager {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    pub fn from_url(redis_url: &str) -> anyhow::Result<Self> {
        let pool = Config::from_url(redis_url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| anyhow::anyhow!("Failed to create redis pool: {e}"))?;
        Ok(Self::new(pool))
    }

    fn key(session_id: &str) -> String {
        format!("session:{session_id}")
    }

    async fn conn(&self) -> Result<Connection, ServiceError> {
        self.pool.get().await.map_err(|e| {
            error!("❌ Failed to get Redis connection from pool: {e}");
            ServiceError::SessionManager(format!("redis pool: {e}"))
        })
    }
}

#[async_trait]
impl SessionManagerTrait for RedisSessionManager {
    async fn create(&self, session: &Session) -> Result<SessionId, ServiceError> {
        let id = Uuid::new_v4().to_string();
        let data = serde_json::to_string(session)
            .map_err(|e| ServiceError::Internal(format!("serialize session: {e}")))?;

        let mut conn = self.conn().await?;
        let result: Result<(), _> = conn
            .set_ex(Self::key(&id), data, SESSION_TTL.num_seconds() as u64)
            .await;

        result.map_err(|e| {
            error!("❌ Failed to create session: {e}");
            ServiceError::SessionManager(format!("redis set: {e}"))
        })?;

        debug!("Session created for user {}", session.user_id);
        Ok(SessionId(id))
    }

    async fn check(&self, session_id: &SessionId) -> Result<Session, ServiceError> {
        let mut conn = self.conn().await?;
        let result: Result<Option<String>, _> = conn.get(Self::key(session_id.as_str())).await;

        let data = result
            .map_err(|e| {
                error!("❌ Failed to read session: {e}");
                ServiceError::SessionManager(format!("redis get: {e}"))
            })?
            .ok_or(ServiceError::SessionNotFound)?;

        serde_json::from_str::<Session>(&data).map_err(|e| {
            error!("❌ Failed to deserialize session: {e}");
            ServiceError::SessionNotFound
        })
    }

    async fn delete(&self, session_id: &SessionId) -> Result<(), ServiceError> {
        let mut conn = self.conn().await?;
        let result: Result<i64, _> = conn.del(Self::key(session_id.as_str())).await;

        match result {
            Ok(0) => Err(ServiceError::SessionNotFound),
            Ok(_) => {
                debug!("Session deleted: {session_id}");
                Ok(())
            }
            Err(e) => {
                error!("❌ Failed to delete session: {e}");
                Err(ServiceError::SessionManager(format!("redis del: {e}")))
            }
        }
    }
}
