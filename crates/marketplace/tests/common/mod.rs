#![allow(dead_code)]

use anyhow::Result;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use axum_extra::extract::cookie::Key;
use marketplace::{
    handler::AppRouter,
    state::{AppState, AppStateDeps},
};
use serde_json::{Value, json};
use shared::{
    abstract_trait::{DynHashing, DynSessionManager},
    config::Hashing,
    repository::MemoryStore,
    session::MemorySessionManager,
};
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub sessions: MemorySessionManager,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// `name=value` pairs of every `Set-Cookie` header, joined for a `Cookie` header.
    pub fn cookies(&self) -> String {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn set_cookie_names(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split('=').next())
            .map(str::to_string)
            .collect()
    }
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_origins(&[]).await
    }

    pub async fn with_origins(origins: &[&str]) -> Self {
        let store = MemoryStore::new();
        let sessions = MemorySessionManager::new();

        let state = AppState::build(AppStateDeps {
            repositories: store.repositories(),
            session_manager: Arc::new(sessions.clone()) as DynSessionManager,
            cookie_key: Key::from(&[7u8; 64]),
            hash: Arc::new(Hashing::new(4)) as DynHashing,
        })
        .await;

        Self {
            router: AppRouter::build(
                state,
                &origins.iter().map(|o| o.to_string()).collect::<Vec<_>>(),
            ),
            store,
            sessions,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        cookies: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(cookies) = cookies {
            builder = builder.header(header::COOKIE, cookies);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        Ok(TestResponse {
            status,
            headers,
            body,
        })
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<TestResponse> {
        self.request(
            Method::POST,
            "/api/v1/register",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Registers and signs in, returning the cookie header of the new session.
    pub async fn sign_up(&self, email: &str) -> Result<String> {
        let registered = self.register(email, "password").await?;
        assert_eq!(registered.status, StatusCode::CREATED);

        let signed_in = self
            .request(
                Method::POST,
                "/api/v1/signin",
                None,
                Some(json!({ "email": email, "password": "password" })),
            )
            .await?;
        assert_eq!(signed_in.status, StatusCode::OK);

        Ok(signed_in.cookies())
    }
}

pub fn product_body() -> Value {
    json!({
        "product_name": "Менажница",
        "category_id": 105,
        "pieces_in_pack": 1,
        "material_id": 1,
        "weight": 500,
        "lenght": 200,
        "width": 300,
        "height": 15,
        "description": "описание",
        "wildberries_sku": 24345325,
        "ozon_sku": 1242124
    })
}
