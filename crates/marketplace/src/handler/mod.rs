mod auth;
mod product;

use crate::state::AppState;
use anyhow::Result;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{
        HeaderName, HeaderValue, Method, StatusCode,
        header::{ACCEPT, CONTENT_TYPE, SET_COOKIE},
    },
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use shared::{
    errors::HttpError,
    utils::{encode_registry, shutdown_signal},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::auth::auth_routes;
pub use self::product::product_routes;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(OpenApi)]
#[openapi(
    paths(
        health_checker_handler,

        auth::register_handler,
        auth::sign_in_handler,
        auth::whoami_handler,
        auth::sign_out_handler,

        product::create_product,
        product::get_products,
        product::get_product,
        product::update_product,
        product::delete_product,
        product::get_categories,
        product::create_category,
        product::get_materials,
        product::create_material,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness endpoint"),
        (name = "Auth", description = "Registration, sign in and session endpoints"),
        (name = "Product", description = "Products and their marketplace SKUs"),
        (name = "Category", description = "Product categories"),
        (name = "Material", description = "Product materials"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(
                    crate::middleware::USER_COOKIE,
                ))),
            );
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health_checker_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": "Marketplace catalog is up"
        })),
    )
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<impl IntoResponse, HttpError> {
    let registry = state.registry.lock().await;

    let buffer = encode_registry(&registry)
        .map_err(|e| HttpError::Internal(format!("Failed to encode metrics: {e}")))?;

    Ok((
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    ))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) if value == "*" => {
                warn!("⚠️ Ignoring wildcard CORS origin, credentials need explicit origins");
                None
            }
            Ok(value) => Some(value),
            Err(_) => {
                warn!("⚠️ Ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            ACCEPT,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([SET_COOKIE, HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: AppState, cors_allowed_origins: &[String]) -> Router {
        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .route("/api/v1/health", get(health_checker_handler))
            .merge(auth_routes(app_state.clone()))
            .merge(product_routes(app_state.clone()));

        let (app_router, api) = api_router.split_for_parts();

        let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

        app_router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(1024 * 1024))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(request_id)),
            )
            .layer(cors_layer(cors_allowed_origins))
            .with_state(app_state)
    }

    pub async fn serve(port: u16, app: Router) -> Result<()> {
        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
