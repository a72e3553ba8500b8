use crate::{
    abstract_trait::{AuthServiceTrait, DynHashing, DynUserCommandRepository, DynUserQueryRepository},
    domain::{
        requests::{RegisterRequest, SignInRequest},
        responses::{ApiResponse, UserResponse},
    },
    errors::ServiceError,
    model::{User, UserRole},
    utils::{Method, Metrics, ServiceTelemetry},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use validator::Validate;

#[derive(Clone)]
pub struct AuthServiceDeps {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
    pub hash: DynHashing,
    pub metrics: Arc<Mutex<Metrics>>,
    pub registry: Arc<Mutex<Registry>>,
}

pub struct AuthService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    hash: DynHashing,
    telemetry: ServiceTelemetry,
}

impl AuthService {
    pub async fn new(deps: AuthServiceDeps) -> Self {
        let AuthServiceDeps {
            query,
            command,
            hash,
            metrics,
            registry,
        } = deps;

        let telemetry = ServiceTelemetry::register("auth-service", metrics, registry).await;

        Self {
            query,
            command,
            hash,
            telemetry,
        }
    }

    async fn check_credentials(&self, req: &SignInRequest) -> Result<User, ServiceError> {
        let user = self
            .query
            .find_by_email(&req.email)
            .await?
            .filter(|user| user.active)
            .ok_or(ServiceError::InvalidCredentials)?;

        self.hash
            .compare_password(&user.encrypted_password, &req.password)
            .await?;

        Ok(user)
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("📝 Registering user {}", req.email);

        let tracing_ctx = self
            .telemetry
            .start("Register", vec![KeyValue::new("component", "auth")]);

        let result: Result<User, ServiceError> = async {
            let mut user = User {
                email: req.email.clone(),
                password: req.password.clone(),
                user_role: UserRole::Regular.id(),
                active: true,
                ..Default::default()
            };

            user.validate()?;
            user.encrypted_password = self.hash.hash_password(&user.password).await?;

            let created = self.command.create_user(&user).await?;
            Ok(created)
        }
        .await;

        match result {
            Ok(user) => {
                self.telemetry
                    .success(&tracing_ctx, Method::Post, "User registered")
                    .await;
                Ok(ApiResponse::success(
                    "User registered successfully",
                    UserResponse::from(user),
                ))
            }
            Err(err) => {
                self.telemetry
                    .failure(&tracing_ctx, Method::Post, &err.to_string())
                    .await;
                Err(err)
            }
        }
    }

    async fn sign_in(&self, req: &SignInRequest) -> Result<UserResponse, ServiceError> {
        info!("🔐 Sign in attempt for {}", req.email);

        let tracing_ctx = self
            .telemetry
            .start("SignIn", vec![KeyValue::new("component", "auth")]);

        match self.check_credentials(req).await {
            Ok(user) => {
                self.telemetry
                    .success(&tracing_ctx, Method::Post, "User signed in")
                    .await;
                Ok(UserResponse::from(user))
            }
            Err(err) => {
                warn!("⚠️ Sign in rejected for {}", req.email);
                self.telemetry
                    .failure(&tracing_ctx, Method::Post, &err.to_string())
                    .await;
                Err(err)
            }
        }
    }

    async fn authenticate(&self, user_id: i32) -> Result<UserResponse, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "Authenticate",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        let result = self
            .query
            .find_by_id(user_id)
            .await
            .map_err(ServiceError::from)
            .and_then(|user| {
                user.filter(|user| user.active)
                    .ok_or_else(|| ServiceError::Unauthorized("not authenticated".into()))
            });

        match result {
            Ok(user) => {
                self.telemetry
                    .success(&tracing_ctx, Method::Get, "User authenticated")
                    .await;
                Ok(UserResponse::from(user))
            }
            Err(err) => {
                self.telemetry
                    .failure(&tracing_ctx, Method::Get, &err.to_string())
                    .await;
                Err(err)
            }
        }
    }
}
