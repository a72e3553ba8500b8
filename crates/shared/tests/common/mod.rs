#![allow(dead_code)]

use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynHashing,
    config::Hashing,
    di::{DependenciesInject, DependenciesInjectDeps},
    domain::{RequestContext, requests::ProductRequest, responses::UserResponse},
    repository::MemoryStore,
    utils::Metrics,
};
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn services(store: &MemoryStore) -> DependenciesInject {
    DependenciesInject::new(DependenciesInjectDeps {
        repositories: store.repositories(),
        hash: Arc::new(Hashing::new(4)) as DynHashing,
        metrics: Arc::new(Mutex::new(Metrics::new())),
        registry: Arc::new(Mutex::new(Registry::default())),
    })
    .await
}

pub fn context(user_id: i32) -> RequestContext {
    RequestContext {
        user: UserResponse {
            id: user_id,
            email: format!("user{user_id}@example.org"),
            user_role: 2,
            active: true,
        },
        session_id: format!("session-{user_id}"),
        request_id: None,
    }
}

pub fn product_request() -> ProductRequest {
    ProductRequest {
        product_name: "Менажница".into(),
        category_id: 105,
        pieces_in_pack: 1,
        material_id: 1,
        weight: 500.0,
        lenght: 200.0,
        width: 300.0,
        height: 15.0,
        description: "описание".into(),
        wildberries_sku: 24345325,
        ozon_sku: 1242124,
    }
}
