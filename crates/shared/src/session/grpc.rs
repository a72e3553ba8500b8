use crate::{
    abstract_trait::SessionManagerTrait,
    errors::{ServiceError, grpc_status_to_service_error},
    session::{Session, SessionId},
};
use async_trait::async_trait;
use genproto::authservice::{self, auth_service_client::AuthServiceClient};
use tonic::{Request, transport::Channel};
use tracing::error;

/// Client of the external `authservice.AuthService`.
#[derive(Clone)]
pub struct GrpcSessionManager {
    client: AuthServiceClient<Channel>,
}

impl GrpcSessionManager {
    pub fn new(client: AuthServiceClient<Channel>) -> Self {
        Self { client }
    }

    /// The channel connects on first use, so startup does not wait for the auth service.
    pub fn connect_lazy(addr: &str) -> anyhow::Result<Self> {
        let channel = Channel::from_shared(addr.to_string())
            .map_err(|e| anyhow::anyhow!("Invalid session service address {addr}: {e}"))?
            .connect_lazy();
        Ok(Self::new(AuthServiceClient::new(channel)))
    }
}

#[async_trait]
impl SessionManagerTrait for GrpcSessionManager {
    async fn create(&self, session: &Session) -> Result<SessionId, ServiceError> {
        let request = Request::new(authservice::Session {
            user_id: session.user_id,
        });

        let response = self.client.clone().create(request).await.map_err(|status| {
            error!("❌ Session service Create failed: {status}");
            grpc_status_to_service_error(status)
        })?;

        Ok(SessionId(response.into_inner().id))
    }

    async fn check(&self, session_id: &SessionId) -> Result<Session, ServiceError> {
        let request = Request::new(authservice::SessionId {
            id: session_id.0.clone(),
        });

        let response = self
            .client
            .clone()
            .check(request)
            .await
            .map_err(grpc_status_to_service_error)?;

        Ok(Session {
            user_id: response.into_inner().user_id,
        })
    }

    async fn delete(&self, session_id: &SessionId) -> Result<(), ServiceError> {
        let request = Request::new(authservice::SessionId {
            id: session_id.0.clone(),
        });

        let response = self
            .client
            .clone()
            .delete(request)
            .await
            .map_err(|status| {
                error!("❌ Session service Delete failed: {status}");
                grpc_status_to_service_error(status)
            })?;

        deletion_acknowledged(session_id, response.into_inner())
    }
}

/// The service answers `Nothing { dummy: true }` once the session is gone.
fn deletion_acknowledged(
    session_id: &SessionId,
    ack: authservice::Nothing,
) -> Result<(), ServiceError> {
    if ack.dummy {
        Ok(())
    } else {
        error!("❌ Session service did not delete session {session_id}");
        Err(ServiceError::SessionManager("session not deleted".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_ack_deletes_session() {
        let id = SessionId("abc".into());
        assert!(deletion_acknowledged(&id, authservice::Nothing { dummy: true }).is_ok());
    }

    #[test]
    fn negative_ack_is_manager_error() {
        let id = SessionId("abc".into());
        let err = deletion_acknowledged(&id, authservice::Nothing { dummy: false }).unwrap_err();
        assert!(matches!(err, ServiceError::SessionManager(msg) if msg == "session not deleted"));
    }
}
