use crate::{
    abstract_trait::{DynProductCommandRepository, ProductCommandServiceTrait},
    domain::{
        RequestContext,
        requests::{CreateCategoryRequest, CreateMaterialRequest, ProductRequest},
        responses::{ApiResponse, CategoryResponse, MaterialResponse, ProductResponse},
    },
    errors::ServiceError,
    model::{Category, MarketPlaceItem, Material, Product},
    utils::{Method, Metrics, ServiceTelemetry, TracingContext},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use validator::Validate;

pub struct ProductCommandService {
    command: DynProductCommandRepository,
    telemetry: ServiceTelemetry,
}

impl ProductCommandService {
    pub async fn new(
        command: DynProductCommandRepository,
        metrics: Arc<Mutex<Metrics>>,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let telemetry =
            ServiceTelemetry::register("product-command-service", metrics, registry).await;

        Self { command, telemetry }
    }

    /// Builds the owned product and its derived marketplace items, validating both.
    fn prepare(
        product_id: i32,
        ctx: &RequestContext,
        req: &ProductRequest,
    ) -> Result<(Product, Vec<MarketPlaceItem>), ServiceError> {
        let product = req.to_product(product_id, ctx.user_id());
        let items = MarketPlaceItem::derive_from(&product);

        product.validate()?;
        for item in &items {
            item.validate()?;
        }

        Ok((product, items))
    }

    async fn finish<T>(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: Result<T, ServiceError>,
        success_message: &str,
    ) -> Result<T, ServiceError> {
        let failure = result.as_ref().err().map(ToString::to_string);

        match failure {
            None => {
                self.telemetry
                    .success(tracing_ctx, method, success_message)
                    .await
            }
            Some(message) => self.telemetry.failure(tracing_ctx, method, &message).await,
        }
        result
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        ctx: &RequestContext,
        req: &ProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!(
            "🏗️ Creating product {} for user {}",
            req.product_name,
            ctx.user_id()
        );

        let tracing_ctx = self.telemetry.start(
            "CreateProduct",
            ctx.trace_attributes([KeyValue::new("component", "product")]),
        );

        let result: Result<Product, ServiceError> = async {
            let (mut product, mut items) = Self::prepare(0, ctx, req)?;
            self.command.create_product(&mut product, &mut items).await?;
            Ok(product)
        }
        .await;

        let product = self
            .finish(&tracing_ctx, Method::Post, result, "Product created")
            .await?;

        Ok(ApiResponse::success(
            "Product created successfully",
            ProductResponse::from(product),
        ))
    }

    async fn update_product(
        &self,
        ctx: &RequestContext,
        product_id: i32,
        req: &ProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔄 Updating product {product_id} for user {}", ctx.user_id());

        let tracing_ctx = self.telemetry.start(
            "UpdateProduct",
            ctx.trace_attributes([
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", product_id.to_string()),
            ]),
        );

        let result: Result<Product, ServiceError> = async {
            let (product, mut items) = Self::prepare(product_id, ctx, req)?;
            self.command.update_product(&product, &mut items).await?;
            Ok(product)
        }
        .await;

        let product = self
            .finish(&tracing_ctx, Method::Put, result, "Product updated")
            .await?;

        Ok(ApiResponse::success(
            "Product updated successfully",
            ProductResponse::from(product),
        ))
    }

    async fn delete_product(
        &self,
        ctx: &RequestContext,
        product_id: i32,
    ) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting product {product_id} for user {}", ctx.user_id());

        let tracing_ctx = self.telemetry.start(
            "DeleteProduct",
            ctx.trace_attributes([
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", product_id.to_string()),
            ]),
        );

        let result = self
            .command
            .delete_product(product_id, ctx.user_id())
            .await
            .map_err(ServiceError::from);

        self.finish(&tracing_ctx, Method::Delete, result, "Product deleted")
            .await?;

        Ok(ApiResponse::success("Product deleted successfully", ()))
    }

    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        info!("🏗️ Creating category {}", req.category_name);

        let tracing_ctx = self.telemetry.start(
            "CreateCategory",
            vec![KeyValue::new("component", "category")],
        );

        let result: Result<Category, ServiceError> = async {
            let mut category = Category::from(req);
            category.validate()?;
            self.command.create_category(&mut category).await?;
            Ok(category)
        }
        .await;

        let category = self
            .finish(&tracing_ctx, Method::Post, result, "Category created")
            .await?;

        Ok(ApiResponse::success(
            "Category created successfully",
            CategoryResponse::from(category),
        ))
    }

    async fn create_material(
        &self,
        req: &CreateMaterialRequest,
    ) -> Result<ApiResponse<MaterialResponse>, ServiceError> {
        info!("🏗️ Creating material {}", req.material_name);

        let tracing_ctx = self.telemetry.start(
            "CreateMaterial",
            vec![KeyValue::new("component", "material")],
        );

        let result: Result<Material, ServiceError> = async {
            let mut material = Material::from(req);
            material.validate()?;
            self.command.create_material(&mut material).await?;
            Ok(material)
        }
        .await;

        let material = self
            .finish(&tracing_ctx, Method::Post, result, "Material created")
            .await?;

        Ok(ApiResponse::success(
            "Material created successfully",
            MaterialResponse::from(material),
        ))
    }
}
