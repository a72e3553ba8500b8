use super::lenient_number;
use crate::model::{Category, Material, Product};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Inbound product representation used by both create and update.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ProductRequest {
    #[serde(default)]
    pub product_name: String,
    #[serde(default, deserialize_with = "lenient_number::deserialize")]
    pub category_id: i32,
    #[serde(default, deserialize_with = "lenient_number::deserialize")]
    pub pieces_in_pack: i32,
    #[serde(default, deserialize_with = "lenient_number::deserialize")]
    pub material_id: i32,
    #[serde(default, deserialize_with = "lenient_number::deserialize")]
    pub weight: f32,
    #[serde(default, deserialize_with = "lenient_number::deserialize")]
    pub lenght: f32,
    #[serde(default, deserialize_with = "lenient_number::deserialize")]
    pub width: f32,
    #[serde(default, deserialize_with = "lenient_number::deserialize")]
    pub height: f32,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_number::deserialize")]
    pub wildberries_sku: i64,
    #[serde(default, deserialize_with = "lenient_number::deserialize")]
    pub ozon_sku: i64,
}

impl ProductRequest {
    /// Maps the request onto an active product owned by `user_id`.
    pub fn to_product(&self, product_id: i32, user_id: i32) -> Product {
        Product {
            product_id,
            product_name: self.product_name.clone(),
            category_id: self.category_id,
            pieces_in_pack: self.pieces_in_pack,
            material_id: self.material_id,
            weight_gr: self.weight,
            lenght_mm: self.lenght,
            width_mm: self.width,
            height_mm: self.height,
            product_description: self.description.clone(),
            user_id,
            active: true,
            wildberries_sku: self.wildberries_sku,
            ozon_sku: self.ozon_sku,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub category_name: String,
    #[serde(default, deserialize_with = "lenient_number::deserialize")]
    pub parent_category_id: i32,
}

impl From<&CreateCategoryRequest> for Category {
    fn from(req: &CreateCategoryRequest) -> Self {
        Category {
            category_id: 0,
            category_name: req.category_name.clone(),
            parent_category_id: req.parent_category_id,
            active: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateMaterialRequest {
    #[serde(default)]
    pub material_name: String,
}

impl From<&CreateMaterialRequest> for Material {
    fn from(req: &CreateMaterialRequest) -> Self {
        Material {
            material_id: 0,
            material_name: req.material_name.clone(),
            active: true,
        }
    }
}
