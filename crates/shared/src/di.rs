use crate::{
    abstract_trait::{DynAuthService, DynHashing},
    repository::Repositories,
    service::{AuthService, AuthServiceDeps, ProductService},
    utils::Metrics,
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    pub product_service: ProductService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"<AuthService>")
            .field("product_service", &self.product_service)
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub repositories: Repositories,
    pub hash: DynHashing,
    pub metrics: Arc<Mutex<Metrics>>,
    pub registry: Arc<Mutex<Registry>>,
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps {
            repositories,
            hash,
            metrics,
            registry,
        } = deps;

        let product_service = ProductService::new(
            repositories.product.query.clone(),
            repositories.product.command.clone(),
            metrics.clone(),
            registry.clone(),
        )
        .await;

        let auth_service = Arc::new(
            AuthService::new(AuthServiceDeps {
                query: repositories.user.query.clone(),
                command: repositories.user.command.clone(),
                hash,
                metrics,
                registry,
            })
            .await,
        ) as DynAuthService;

        Self {
            auth_service,
            product_service,
        }
    }
}
