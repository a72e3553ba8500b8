use crate::model::Product;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

/// Fixed marketplace ids as stored in `marketplaceitem.marketplace_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketPlace {
    Ozon = 1,
    Wildberries = 2,
}

impl MarketPlace {
    pub const ALL: [MarketPlace; 2] = [MarketPlace::Ozon, MarketPlace::Wildberries];

    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(MarketPlace::Ozon),
            2 => Some(MarketPlace::Wildberries),
            _ => None,
        }
    }
}

impl fmt::Display for MarketPlace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketPlace::Ozon => write!(f, "Ozon"),
            MarketPlace::Wildberries => write!(f, "Wildberries"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct MarketPlaceItem {
    pub marketplaceitem_id: i32,
    pub product_id: i32,
    #[sqlx(skip)]
    pub item_name: String,
    #[validate(range(min = 1, message = "is required"))]
    pub marketplace_id: i32,
    pub sku: i64,
    #[validate(range(min = 1, message = "is required"))]
    pub user_id: i32,
    pub active: bool,
}

impl MarketPlaceItem {
    /// Builds the per-marketplace rows for a product, one for every non-zero SKU.
    pub fn derive_from(product: &Product) -> Vec<MarketPlaceItem> {
        MarketPlace::ALL
            .into_iter()
            .filter_map(|market_place| {
                let sku = product.sku_for(market_place);
                (sku != 0).then(|| MarketPlaceItem {
                    marketplaceitem_id: 0,
                    product_id: product.product_id,
                    item_name: product.product_name.clone(),
                    marketplace_id: market_place.id(),
                    sku,
                    user_id: product.user_id,
                    active: true,
                })
            })
            .collect()
    }

    pub fn market_place(&self) -> Option<MarketPlace> {
        MarketPlace::from_id(self.marketplace_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(ozon_sku: i64, wildberries_sku: i64) -> Product {
        Product {
            product_id: 7,
            product_name: "Менажница".into(),
            category_id: 105,
            material_id: 1,
            user_id: 3,
            active: true,
            ozon_sku,
            wildberries_sku,
            ..Default::default()
        }
    }

    #[test]
    fn derives_one_item_per_listed_marketplace() {
        let items = MarketPlaceItem::derive_from(&product(1242124, 24345325));

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].market_place(), Some(MarketPlace::Ozon));
        assert_eq!(items[0].sku, 1242124);
        assert_eq!(items[1].market_place(), Some(MarketPlace::Wildberries));
        assert_eq!(items[1].sku, 24345325);

        for item in &items {
            assert_eq!(item.product_id, 7);
            assert_eq!(item.user_id, 3);
            assert_eq!(item.item_name, "Менажница");
            assert!(item.active);
            assert!(item.validate().is_ok());
        }
    }

    #[test]
    fn skips_zero_skus() {
        let items = MarketPlaceItem::derive_from(&product(0, 24345325));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].marketplace_id, MarketPlace::Wildberries.id());

        assert!(MarketPlaceItem::derive_from(&product(0, 0)).is_empty());
    }

    #[test]
    fn item_without_owner_is_invalid() {
        let item = MarketPlaceItem {
            marketplace_id: MarketPlace::Ozon.id(),
            sku: 1,
            ..Default::default()
        };
        let errors = item.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("user_id"));
    }

    #[test]
    fn maps_marketplace_ids() {
        assert_eq!(MarketPlace::from_id(1), Some(MarketPlace::Ozon));
        assert_eq!(MarketPlace::from_id(2), Some(MarketPlace::Wildberries));
        assert_eq!(MarketPlace::from_id(0), None);
    }
}
