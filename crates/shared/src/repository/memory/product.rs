use super::{MemoryStore, Tables};
use crate::{
    abstract_trait::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
    errors::RepositoryError,
    model::{Category, MarketPlaceItem, Material, Product},
};
use async_trait::async_trait;
use tracing::{error, info};

fn insert_item(tables: &mut Tables, item: &mut MarketPlaceItem) -> Result<(), RepositoryError> {
    let taken = tables.items.values().any(|existing| {
        existing.product_id == item.product_id && existing.marketplace_id == item.marketplace_id
    });
    if taken {
        return Err(RepositoryError::AlreadyExists("marketplace item".into()));
    }

    let id = tables.next_id();
    item.marketplaceitem_id = id;
    tables.items.insert(id, item.clone());
    Ok(())
}

fn upsert_item(tables: &mut Tables, item: &mut MarketPlaceItem) -> Result<(), RepositoryError> {
    let existing = tables.items.values_mut().find(|existing| {
        existing.product_id == item.product_id && existing.marketplace_id == item.marketplace_id
    });

    match existing {
        Some(existing) if existing.user_id != item.user_id => Err(RepositoryError::Conflict(
            format!("marketplace item of product {} belongs to another user", item.product_id),
        )),
        Some(existing) => {
            existing.sku = item.sku;
            existing.active = item.active;
            item.marketplaceitem_id = existing.marketplaceitem_id;
            Ok(())
        }
        None => insert_item(tables, item),
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for MemoryStore {
    async fn create_product(
        &self,
        product: &mut Product,
        items: &mut [MarketPlaceItem],
    ) -> Result<(), RepositoryError> {
        let product_id = self
            .transaction(|tables| {
                let product_id = tables.next_id();
                let mut row = product.clone();
                row.product_id = product_id;
                tables.products.insert(product_id, row);

                for item in items.iter_mut() {
                    item.product_id = product_id;
                    insert_item(tables, item)?;
                }

                Ok(product_id)
            })
            .await
            .inspect_err(|err| error!("❌ Failed to create product {}: {err}", product.product_name))?;

        product.product_id = product_id;
        info!("✅ Created product ID {product_id} ({})", product.product_name);
        Ok(())
    }

    async fn update_product(
        &self,
        product: &Product,
        items: &mut [MarketPlaceItem],
    ) -> Result<(), RepositoryError> {
        self.transaction(|tables| {
            let row = tables
                .products
                .get_mut(&product.product_id)
                .filter(|row| row.active && row.user_id == product.user_id)
                .ok_or(RepositoryError::NotFound)?;
            *row = product.clone();

            for item in items.iter_mut() {
                item.product_id = product.product_id;
                upsert_item(tables, item)?;
            }

            let listed: Vec<i32> = items.iter().map(|item| item.marketplace_id).collect();
            tables.items.retain(|_, item| {
                !(item.product_id == product.product_id
                    && item.user_id == product.user_id
                    && !listed.contains(&item.marketplace_id))
            });

            Ok(())
        })
        .await?;

        info!("✅ Updated product ID {}", product.product_id);
        Ok(())
    }

    async fn delete_product(&self, product_id: i32, user_id: i32) -> Result<(), RepositoryError> {
        self.transaction(|tables| {
            tables
                .items
                .retain(|_, item| !(item.product_id == product_id && item.user_id == user_id));

            match tables.products.get(&product_id) {
                Some(row) if row.user_id == user_id => {
                    tables.products.remove(&product_id);
                    Ok(())
                }
                _ => Err(RepositoryError::NotFound),
            }
        })
        .await?;

        info!("🗑️ Deleted product ID {product_id} of user {user_id}");
        Ok(())
    }

    async fn create_category(&self, category: &mut Category) -> Result<(), RepositoryError> {
        let category_id = self
            .transaction(|tables| {
                let id = tables.next_id();
                let mut row = category.clone();
                row.category_id = id;
                tables.categories.insert(id, row);
                Ok(id)
            })
            .await?;

        category.category_id = category_id;
        Ok(())
    }

    async fn create_material(&self, material: &mut Material) -> Result<(), RepositoryError> {
        let material_id = self
            .transaction(|tables| {
                let id = tables.next_id();
                let mut row = material.clone();
                row.material_id = id;
                tables.materials.insert(id, row);
                Ok(id)
            })
            .await?;

        material.material_id = material_id;
        Ok(())
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for MemoryStore {
    async fn find_by_id(&self, product_id: i32) -> Result<Product, RepositoryError> {
        let tables = self.tables.lock().await;

        tables
            .products
            .get(&product_id)
            .filter(|product| product.active)
            .map(|product| tables.hydrate(product))
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Product>, RepositoryError> {
        let tables = self.tables.lock().await;

        Ok(tables
            .products
            .values()
            .filter(|product| product.active && product.user_id == user_id)
            .map(|product| tables.hydrate(product))
            .collect())
    }

    async fn find_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let tables = self.tables.lock().await;

        Ok(tables
            .categories
            .values()
            .filter(|category| category.active)
            .cloned()
            .collect())
    }

    async fn find_materials(&self) -> Result<Vec<Material>, RepositoryError> {
        let tables = self.tables.lock().await;

        let mut materials: Vec<Material> = tables
            .materials
            .values()
            .filter(|material| material.active)
            .cloned()
            .collect();
        materials.sort_by(|a, b| a.material_name.cmp(&b.material_name));

        Ok(materials)
    }

    async fn find_market_place_items(
        &self,
        product_id: i32,
    ) -> Result<Vec<MarketPlaceItem>, RepositoryError> {
        let tables = self.tables.lock().await;

        let mut items: Vec<MarketPlaceItem> = tables
            .items
            .values()
            .filter(|item| item.active && item.product_id == product_id)
            .cloned()
            .collect();
        items.sort_by_key(|item| item.marketplace_id);

        Ok(items)
    }
}
