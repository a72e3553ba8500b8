use crate::config::{Config, SessionConfig, StoreConfig};
use anyhow::{Context, Result, anyhow};
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynSessionManager},
    config::{ConnectionManager, Hashing},
    di::{DependenciesInject, DependenciesInjectDeps},
    repository::{MemoryStore, Repositories},
    session::{GrpcSessionManager, MemorySessionManager, RedisSessionManager},
    utils::{Metrics, SystemMetrics},
};
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub session_manager: DynSessionManager,
    pub cookie_key: Key,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("session_manager", &"<SessionManager>")
            .finish()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

pub struct AppStateDeps {
    pub repositories: Repositories,
    pub session_manager: DynSessionManager,
    pub cookie_key: Key,
    pub hash: DynHashing,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        let repositories = match &config.store {
            StoreConfig::Postgres {
                database_url,
                max_connections,
                run_migrations,
            } => {
                let pool = ConnectionManager::new_pool(database_url, *max_connections)
                    .await
                    .context("Failed to connect to the database")?;

                if *run_migrations {
                    ConnectionManager::run_migrations(&pool).await?;
                }

                info!("🗄️ Using the Postgres store");
                Repositories::postgres(pool)
            }
            StoreConfig::Memory => {
                info!("🧪 Using the in-memory store");
                Repositories::memory(MemoryStore::new())
            }
        };

        let session_manager: DynSessionManager = match &config.session {
            SessionConfig::Grpc { addr } => {
                info!("🔌 Sessions are checked by the auth service at {addr}");
                Arc::new(GrpcSessionManager::connect_lazy(addr)?)
            }
            SessionConfig::Redis { url } => {
                info!("🔌 Sessions are kept in Redis");
                Arc::new(RedisSessionManager::from_url(url)?)
            }
            SessionConfig::Memory => {
                info!("🧪 Sessions are kept in memory");
                Arc::new(MemorySessionManager::new())
            }
        };

        let cookie_key = Key::try_from(config.session_secret.as_bytes())
            .map_err(|e| anyhow!("Invalid SESSION_SECRET: {e}"))?;

        Ok(Self::build(AppStateDeps {
            repositories,
            session_manager,
            cookie_key,
            hash: Arc::new(Hashing::default()) as DynHashing,
        })
        .await)
    }

    /// Wires services and metrics around already constructed backends.
    pub async fn build(deps: AppStateDeps) -> Self {
        let AppStateDeps {
            repositories,
            session_manager,
            cookie_key,
            hash,
        } = deps;

        let registry = Arc::new(Mutex::new(Registry::default()));
        let metrics = Arc::new(Mutex::new(Metrics::new()));
        let system_metrics = Arc::new(SystemMetrics::new());

        system_metrics.register(&mut *registry.lock().await);

        let di_container = DependenciesInject::new(DependenciesInjectDeps {
            repositories,
            hash,
            metrics,
            registry: registry.clone(),
        })
        .await;

        Self {
            di_container,
            session_manager,
            cookie_key,
            registry,
            system_metrics,
        }
    }
}
