use crate::{
    abstract_trait::ProductCommandRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::{Category, MarketPlaceItem, Material, Product as ProductModel},
};
use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use tracing::{error, info, warn};

pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

/// Rolls the transaction back and hands the original error back to the caller.
async fn rollback(tx: Transaction<'_, Postgres>, err: RepositoryError) -> RepositoryError {
    if let Err(rollback_err) = tx.rollback().await {
        warn!("⚠️ Rollback failed after {err}: {rollback_err}");
    }
    err
}

async fn insert_item(
    tx: &mut Transaction<'_, Postgres>,
    item: &MarketPlaceItem,
) -> Result<i32, RepositoryError> {
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO marketplaceitem (product_id, marketplace_id, sku, user_id, active)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING marketplaceitem_id
        "#,
    )
    .bind(item.product_id)
    .bind(item.marketplace_id)
    .bind(item.sku)
    .bind(item.user_id)
    .bind(item.active)
    .fetch_one(&mut **tx)
    .await
    .map_err(|err| RepositoryError::from_constraint(err, "marketplace item"))
}

async fn upsert_item(
    tx: &mut Transaction<'_, Postgres>,
    item: &MarketPlaceItem,
) -> Result<i32, RepositoryError> {
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO marketplaceitem (product_id, marketplace_id, sku, user_id, active)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (product_id, marketplace_id)
        DO UPDATE SET sku = EXCLUDED.sku, active = EXCLUDED.active
        WHERE marketplaceitem.user_id = EXCLUDED.user_id
        RETURNING marketplaceitem_id
        "#,
    )
    .bind(item.product_id)
    .bind(item.marketplace_id)
    .bind(item.sku)
    .bind(item.user_id)
    .bind(item.active)
    .fetch_optional(&mut **tx)
    .await
    .map_err(|err| RepositoryError::from_constraint(err, "marketplace item"))?
    .ok_or_else(|| {
        RepositoryError::Conflict(format!(
            "marketplace item of product {} belongs to another user",
            item.product_id
        ))
    })
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        product: &mut ProductModel,
        items: &mut [MarketPlaceItem],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.db.begin().await?;

        let inserted = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO product (
                product_name, category_id, pieces_in_pack, material_id,
                weight_gr, lenght_mm, width_mm, height_mm,
                product_description, user_id, active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING product_id
            "#,
        )
        .bind(&product.product_name)
        .bind(product.category_id)
        .bind(product.pieces_in_pack)
        .bind(product.material_id)
        .bind(product.weight_gr)
        .bind(product.lenght_mm)
        .bind(product.width_mm)
        .bind(product.height_mm)
        .bind(&product.product_description)
        .bind(product.user_id)
        .bind(product.active)
        .fetch_one(&mut *tx)
        .await;

        let product_id = match inserted {
            Ok(id) => id,
            Err(err) => {
                error!("❌ Failed to insert product {}: {err}", product.product_name);
                return Err(rollback(tx, RepositoryError::from_constraint(err, "product")).await);
            }
        };

        for item in items.iter_mut() {
            item.product_id = product_id;
            match insert_item(&mut tx, item).await {
                Ok(id) => item.marketplaceitem_id = id,
                Err(err) => {
                    error!(
                        "❌ Failed to insert marketplace item {} for product {product_id}: {err}",
                        item.marketplace_id
                    );
                    return Err(rollback(tx, err).await);
                }
            }
        }

        tx.commit().await?;

        product.product_id = product_id;
        info!(
            "✅ Created product ID {product_id} ({}) with {} marketplace items",
            product.product_name,
            items.len()
        );
        Ok(())
    }

    async fn update_product(
        &self,
        product: &ProductModel,
        items: &mut [MarketPlaceItem],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.db.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE product
            SET product_name = $3,
                category_id = $4,
                pieces_in_pack = $5,
                material_id = $6,
                weight_gr = $7,
                lenght_mm = $8,
                width_mm = $9,
                height_mm = $10,
                product_description = $11,
                active = $12
            WHERE product_id = $1 AND user_id = $2 AND active = TRUE
            "#,
        )
        .bind(product.product_id)
        .bind(product.user_id)
        .bind(&product.product_name)
        .bind(product.category_id)
        .bind(product.pieces_in_pack)
        .bind(product.material_id)
        .bind(product.weight_gr)
        .bind(product.lenght_mm)
        .bind(product.width_mm)
        .bind(product.height_mm)
        .bind(&product.product_description)
        .bind(product.active)
        .execute(&mut *tx)
        .await;

        match updated {
            Ok(result) if result.rows_affected() == 0 => {
                return Err(rollback(tx, RepositoryError::NotFound).await);
            }
            Ok(_) => {}
            Err(err) => {
                error!("❌ Failed to update product ID {}: {err}", product.product_id);
                return Err(rollback(tx, RepositoryError::from_constraint(err, "product")).await);
            }
        }

        for item in items.iter_mut() {
            item.product_id = product.product_id;
            match upsert_item(&mut tx, item).await {
                Ok(id) => item.marketplaceitem_id = id,
                Err(err) => {
                    error!(
                        "❌ Failed to upsert marketplace item {} for product {}: {err}",
                        item.marketplace_id, product.product_id
                    );
                    return Err(rollback(tx, err).await);
                }
            }
        }

        let listed: Vec<i32> = items.iter().map(|item| item.marketplace_id).collect();

        let pruned = sqlx::query(
            r#"
            DELETE FROM marketplaceitem
            WHERE product_id = $1 AND user_id = $2 AND NOT (marketplace_id = ANY($3))
            "#,
        )
        .bind(product.product_id)
        .bind(product.user_id)
        .bind(&listed)
        .execute(&mut *tx)
        .await;

        if let Err(err) = pruned {
            error!(
                "❌ Failed to prune marketplace items of product {}: {err}",
                product.product_id
            );
            return Err(rollback(tx, RepositoryError::from(err)).await);
        }

        tx.commit().await?;

        info!(
            "✅ Updated product ID {} ({}) with {} marketplace items",
            product.product_id,
            product.product_name,
            items.len()
        );
        Ok(())
    }

    async fn delete_product(&self, product_id: i32, user_id: i32) -> Result<(), RepositoryError> {
        let mut tx = self.db.begin().await?;

        let items = sqlx::query(
            "DELETE FROM marketplaceitem WHERE product_id = $1 AND user_id = $2",
        )
        .bind(product_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await;

        if let Err(err) = items {
            error!("❌ Failed to delete marketplace items of product {product_id}: {err}");
            return Err(rollback(tx, RepositoryError::from(err)).await);
        }

        let deleted = sqlx::query("DELETE FROM product WHERE product_id = $1 AND user_id = $2")
            .bind(product_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await;

        match deleted {
            Ok(result) if result.rows_affected() == 0 => {
                info!("ℹ️ Product ID {product_id} not found for user {user_id}");
                return Err(rollback(tx, RepositoryError::NotFound).await);
            }
            Ok(_) => {}
            Err(err) => {
                error!("❌ Failed to delete product ID {product_id}: {err}");
                return Err(rollback(tx, RepositoryError::from_constraint(err, "product")).await);
            }
        }

        tx.commit().await?;

        info!("🗑️ Deleted product ID {product_id} of user {user_id}");
        Ok(())
    }

    async fn create_category(&self, category: &mut Category) -> Result<(), RepositoryError> {
        let category_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO category (category_name, parent_category_id, active)
            VALUES ($1, $2, $3)
            RETURNING category_id
            "#,
        )
        .bind(&category.category_name)
        .bind(category.parent())
        .bind(category.active)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to create category {}: {err}", category.category_name);
            RepositoryError::from_constraint(err, "category")
        })?;

        category.category_id = category_id;
        info!("✅ Created category ID {category_id} ({})", category.category_name);
        Ok(())
    }

    async fn create_material(&self, material: &mut Material) -> Result<(), RepositoryError> {
        let material_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO material (material_name, active)
            VALUES ($1, $2)
            RETURNING material_id
            "#,
        )
        .bind(&material.material_name)
        .bind(material.active)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to create material {}: {err}", material.material_name);
            RepositoryError::from_constraint(err, "material")
        })?;

        material.material_id = material_id;
        info!("✅ Created material ID {material_id} ({})", material.material_name);
        Ok(())
    }
}
