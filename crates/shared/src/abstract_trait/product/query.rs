use crate::{
    domain::responses::{ApiResponse, CategoryResponse, MaterialResponse, ProductResponse},
    errors::{RepositoryError, ServiceError},
    model::{Category, Material, MarketPlaceItem, Product as ProductModel},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;
pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    /// Active product by id with its SKUs filled in; `RepositoryError::NotFound` otherwise.
    async fn find_by_id(&self, product_id: i32) -> Result<ProductModel, RepositoryError>;
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<ProductModel>, RepositoryError>;
    async fn find_categories(&self) -> Result<Vec<Category>, RepositoryError>;
    async fn find_materials(&self) -> Result<Vec<Material>, RepositoryError>;
    async fn find_market_place_items(
        &self,
        product_id: i32,
    ) -> Result<Vec<MarketPlaceItem>, RepositoryError>;
}

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn get_product_by_id(
        &self,
        product_id: i32,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn get_products_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn get_product_categories(
        &self,
    ) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError>;
    async fn get_product_materials(
        &self,
    ) -> Result<ApiResponse<Vec<MaterialResponse>>, ServiceError>;
}
