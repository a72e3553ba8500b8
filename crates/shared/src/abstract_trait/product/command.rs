use crate::{
    domain::{
        RequestContext,
        requests::{CreateCategoryRequest, CreateMaterialRequest, ProductRequest},
        responses::{ApiResponse, CategoryResponse, MaterialResponse, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{Category, Material, MarketPlaceItem, Product as ProductModel},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;
pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

/// Transactional writes of a product together with its marketplace items.
///
/// Every method either applies all of its statements or none of them.
#[async_trait]
pub trait ProductCommandRepositoryTrait {
    /// Inserts the product and its items, writing the generated ids back into them.
    async fn create_product(
        &self,
        product: &mut ProductModel,
        items: &mut [MarketPlaceItem],
    ) -> Result<(), RepositoryError>;

    /// Overwrites the product owned by `product.user_id`, upserts `items` and drops
    /// the items of marketplaces that are no longer listed.
    async fn update_product(
        &self,
        product: &ProductModel,
        items: &mut [MarketPlaceItem],
    ) -> Result<(), RepositoryError>;

    async fn delete_product(&self, product_id: i32, user_id: i32) -> Result<(), RepositoryError>;

    async fn create_category(&self, category: &mut Category) -> Result<(), RepositoryError>;

    async fn create_material(&self, material: &mut Material) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create_product(
        &self,
        ctx: &RequestContext,
        req: &ProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update_product(
        &self,
        ctx: &RequestContext,
        product_id: i32,
        req: &ProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn delete_product(
        &self,
        ctx: &RequestContext,
        product_id: i32,
    ) -> Result<ApiResponse<()>, ServiceError>;
    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError>;
    async fn create_material(
        &self,
        req: &CreateMaterialRequest,
    ) -> Result<ApiResponse<MaterialResponse>, ServiceError>;
}
