use crate::{
    middleware::{IdPath, JsonBody, session_middleware},
    state::AppState,
};
use axum::{
    Extension, Json,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    domain::{
        RequestContext,
        requests::{CreateCategoryRequest, CreateMaterialRequest, ProductRequest},
        responses::{ApiResponse, CategoryResponse, MaterialResponse, ProductResponse},
    },
    errors::HttpError,
    service::ProductService,
};
use tracing::warn;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/v1/private/product/product",
    tag = "Product",
    security(("session_cookie" = [])),
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_product(
    Extension(service): Extension<ProductService>,
    Extension(ctx): Extension<RequestContext>,
    JsonBody(body): JsonBody<ProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.command.create_product(&ctx, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/private/product/product",
    tag = "Product",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Products of the signed-in user", body = ApiResponse<Vec<ProductResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_products(
    Extension(service): Extension<ProductService>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.query.get_products_by_user_id(ctx.user_id()).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/private/product/product/{id}",
    tag = "Product",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product with its marketplace SKUs", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Non-numeric id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    Extension(service): Extension<ProductService>,
    Extension(ctx): Extension<RequestContext>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.query.get_product_by_id(id).await?;

    if response.data.user_id != ctx.user_id() {
        warn!(
            "⚠️ User {} asked for product {id} owned by user {}",
            ctx.user_id(),
            response.data.user_id
        );
        return Err(HttpError::NotFound("record not found".into()));
    }

    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/v1/private/product/product/{id}",
    tag = "Product",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Non-numeric id or malformed body"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_product(
    Extension(service): Extension<ProductService>,
    Extension(ctx): Extension<RequestContext>,
    IdPath(id): IdPath,
    JsonBody(body): JsonBody<ProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.command.update_product(&ctx, id, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/private/product/product/{id}",
    tag = "Product",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product and its marketplace items deleted"),
        (status = 400, description = "Non-numeric id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    Extension(service): Extension<ProductService>,
    Extension(ctx): Extension<RequestContext>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.command.delete_product(&ctx, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/private/product/category/get_categories",
    tag = "Category",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Active categories ordered by id", body = ApiResponse<Vec<CategoryResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_categories(
    Extension(service): Extension<ProductService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.query.get_product_categories().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/v1/private/product/category",
    tag = "Category",
    security(("session_cookie" = [])),
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponse>),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_category(
    Extension(service): Extension<ProductService>,
    JsonBody(body): JsonBody<CreateCategoryRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.command.create_category(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/private/product/material/get_materials",
    tag = "Material",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Active materials ordered by name", body = ApiResponse<Vec<MaterialResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_materials(
    Extension(service): Extension<ProductService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.query.get_product_materials().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/v1/private/product/material",
    tag = "Material",
    security(("session_cookie" = [])),
    request_body = CreateMaterialRequest,
    responses(
        (status = 201, description = "Material created", body = ApiResponse<MaterialResponse>),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_material(
    Extension(service): Extension<ProductService>,
    JsonBody(body): JsonBody<CreateMaterialRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.command.create_material(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub fn product_routes(app_state: AppState) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .route(
            "/api/v1/private/product/product",
            get(get_products).post(create_product),
        )
        .route(
            "/api/v1/private/product/product/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route(
            "/api/v1/private/product/category/get_categories",
            get(get_categories),
        )
        .route("/api/v1/private/product/category", post(create_category))
        .route(
            "/api/v1/private/product/material/get_materials",
            get(get_materials),
        )
        .route("/api/v1/private/product/material", post(create_material))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            session_middleware,
        ))
        .layer(Extension(app_state.di_container.product_service.clone()))
}
