use crate::{
    domain::{
        requests::{RegisterRequest, SignInRequest},
        responses::{ApiResponse, UserResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynAuthService = Arc<dyn AuthServiceTrait + Send + Sync>;

#[async_trait]
pub trait AuthServiceTrait {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn sign_in(&self, req: &SignInRequest) -> Result<UserResponse, ServiceError>;
    async fn authenticate(&self, user_id: i32) -> Result<UserResponse, ServiceError>;
}
