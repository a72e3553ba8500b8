use crate::{
    abstract_trait::{DynProductQueryRepository, ProductQueryServiceTrait},
    domain::responses::{ApiResponse, CategoryResponse, MaterialResponse, ProductResponse},
    errors::ServiceError,
    utils::{Method, Metrics, ServiceTelemetry},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub struct ProductQueryService {
    query: DynProductQueryRepository,
    telemetry: ServiceTelemetry,
}

impl ProductQueryService {
    pub async fn new(
        query: DynProductQueryRepository,
        metrics: Arc<Mutex<Metrics>>,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let telemetry =
            ServiceTelemetry::register("product-query-service", metrics, registry).await;

        Self { query, telemetry }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn get_product_by_id(
        &self,
        product_id: i32,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔍 Fetching product {product_id}");

        let tracing_ctx = self.telemetry.start(
            "GetProductById",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", product_id.to_string()),
            ],
        );

        match self.query.find_by_id(product_id).await {
            Ok(product) => {
                self.telemetry
                    .success(&tracing_ctx, Method::Get, "Product retrieved")
                    .await;
                Ok(ApiResponse::success(
                    "Product retrieved successfully",
                    ProductResponse::from(product),
                ))
            }
            Err(err) => {
                self.telemetry
                    .failure(&tracing_ctx, Method::Get, &err.to_string())
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn get_products_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        info!("🔍 Listing products of user {user_id}");

        let tracing_ctx = self.telemetry.start(
            "GetProductsByUserId",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        match self.query.find_by_user_id(user_id).await {
            Ok(products) => {
                self.telemetry
                    .success(&tracing_ctx, Method::Get, "Products retrieved")
                    .await;
                Ok(ApiResponse::success(
                    "Products retrieved successfully",
                    products.into_iter().map(ProductResponse::from).collect(),
                ))
            }
            Err(err) => {
                self.telemetry
                    .failure(&tracing_ctx, Method::Get, &err.to_string())
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn get_product_categories(
        &self,
    ) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "GetProductCategories",
            vec![KeyValue::new("component", "category")],
        );

        match self.query.find_categories().await {
            Ok(categories) => {
                self.telemetry
                    .success(&tracing_ctx, Method::Get, "Categories retrieved")
                    .await;
                Ok(ApiResponse::success(
                    "Categories retrieved successfully",
                    categories.into_iter().map(CategoryResponse::from).collect(),
                ))
            }
            Err(err) => {
                self.telemetry
                    .failure(&tracing_ctx, Method::Get, &err.to_string())
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn get_product_materials(
        &self,
    ) -> Result<ApiResponse<Vec<MaterialResponse>>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "GetProductMaterials",
            vec![KeyValue::new("component", "material")],
        );

        match self.query.find_materials().await {
            Ok(materials) => {
                self.telemetry
                    .success(&tracing_ctx, Method::Get, "Materials retrieved")
                    .await;
                Ok(ApiResponse::success(
                    "Materials retrieved successfully",
                    materials.into_iter().map(MaterialResponse::from).collect(),
                ))
            }
            Err(err) => {
                self.telemetry
                    .failure(&tracing_ctx, Method::Get, &err.to_string())
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }
}
