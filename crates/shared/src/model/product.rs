use crate::model::MarketPlace;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Product {
    pub product_id: i32,
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub product_name: String,
    #[validate(range(min = 1, message = "is required"))]
    pub category_id: i32,
    pub pieces_in_pack: i32,
    #[validate(range(min = 1, message = "is required"))]
    pub material_id: i32,
    pub weight_gr: f32,
    pub lenght_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
    pub product_description: String,
    #[validate(range(min = 1, message = "is required"))]
    pub user_id: i32,
    pub active: bool,
    pub wildberries_sku: i64,
    pub ozon_sku: i64,
}

impl Product {
    /// SKU carried for the given marketplace, 0 when the product is not listed there.
    pub fn sku_for(&self, market_place: MarketPlace) -> i64 {
        match market_place {
            MarketPlace::Ozon => self.ozon_sku,
            MarketPlace::Wildberries => self.wildberries_sku,
        }
    }

    pub fn set_sku(&mut self, market_place: MarketPlace, sku: i64) {
        match market_place {
            MarketPlace::Ozon => self.ozon_sku = sku,
            MarketPlace::Wildberries => self.wildberries_sku = sku,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_product() -> Product {
        Product {
            product_name: "Менажница".into(),
            category_id: 105,
            material_id: 1,
            user_id: 1,
            active: true,
            ..Default::default()
        }
    }

    #[test]
    fn accepts_valid_product() {
        assert!(valid_product().validate().is_ok());
    }

    #[test]
    fn rejects_empty_and_oversized_names() {
        let empty = Product {
            product_name: String::new(),
            ..valid_product()
        };
        let errors = empty.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("product_name"));

        let oversized = Product {
            product_name: "x".repeat(201),
            ..valid_product()
        };
        assert!(oversized.validate().is_err());

        let boundary = Product {
            product_name: "x".repeat(200),
            ..valid_product()
        };
        assert!(boundary.validate().is_ok());
    }

    #[test]
    fn rejects_missing_category() {
        let product = Product {
            category_id: 0,
            ..valid_product()
        };
        let errors = product.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("category_id"));
    }

    #[test]
    fn aggregates_every_violation() {
        let product = Product {
            product_name: String::new(),
            category_id: 0,
            material_id: 0,
            user_id: 0,
            ..Default::default()
        };
        let errors = product.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 4);
        assert!(fields.contains_key("material_id"));
        assert!(fields.contains_key("user_id"));
    }
}
