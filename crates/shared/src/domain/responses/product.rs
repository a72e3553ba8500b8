use crate::model::{Category, Material, Product};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub product_id: i32,
    pub product_name: String,
    pub category_id: i32,
    pub pieces_in_pack: i32,
    pub material_id: i32,
    pub weight: f32,
    pub lenght: f32,
    pub width: f32,
    pub height: f32,
    pub description: String,
    pub user_id: i32,
    pub wildberries_sku: i64,
    pub ozon_sku: i64,
}

// model to response
impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        ProductResponse {
            product_id: value.product_id,
            product_name: value.product_name,
            category_id: value.category_id,
            pieces_in_pack: value.pieces_in_pack,
            material_id: value.material_id,
            weight: value.weight_gr,
            lenght: value.lenght_mm,
            width: value.width_mm,
            height: value.height_mm,
            description: value.product_description,
            user_id: value.user_id,
            wildberries_sku: value.wildberries_sku,
            ozon_sku: value.ozon_sku,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub category_id: i32,
    pub category_name: String,
    pub parent_category_id: i32,
}

impl From<Category> for CategoryResponse {
    fn from(value: Category) -> Self {
        CategoryResponse {
            category_id: value.category_id,
            category_name: value.category_name,
            parent_category_id: value.parent_category_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MaterialResponse {
    pub material_id: i32,
    pub material_name: String,
}

impl From<Material> for MaterialResponse {
    fn from(value: Material) -> Self {
        MaterialResponse {
            material_id: value.material_id,
            material_name: value.material_name,
        }
    }
}
