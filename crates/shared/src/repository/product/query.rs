use crate::{
    abstract_trait::ProductQueryRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::{Category, MarketPlaceItem, Material, Product as ProductModel},
};
use async_trait::async_trait;
use tracing::{error, info};

/// Product columns plus one correlated subquery per marketplace; a missing item reads as 0.
const SELECT_PRODUCT: &str = r#"
    SELECT
        p.product_id,
        p.product_name,
        p.category_id,
        p.pieces_in_pack,
        p.material_id,
        p.weight_gr,
        p.lenght_mm,
        p.width_mm,
        p.height_mm,
        p.product_description,
        p.user_id,
        p.active,
        COALESCE((
            SELECT mpi.sku FROM marketplaceitem mpi
            WHERE mpi.active = TRUE AND mpi.product_id = p.product_id AND mpi.marketplace_id = 1
        ), 0) AS ozon_sku,
        COALESCE((
            SELECT mpi.sku FROM marketplaceitem mpi
            WHERE mpi.active = TRUE AND mpi.product_id = p.product_id AND mpi.marketplace_id = 2
        ), 0) AS wildberries_sku
    FROM product p
"#;

pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_by_id(&self, product_id: i32) -> Result<ProductModel, RepositoryError> {
        let sql = format!("{SELECT_PRODUCT} WHERE p.product_id = $1 AND p.active = TRUE");

        let product = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(product_id)
            .fetch_optional(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch product ID {product_id}: {err}");
                RepositoryError::from(err)
            })?;

        product.ok_or(RepositoryError::NotFound)
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<ProductModel>, RepositoryError> {
        let sql = format!(
            "{SELECT_PRODUCT} WHERE p.user_id = $1 AND p.active = TRUE ORDER BY p.product_id"
        );

        let products = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(user_id)
            .fetch_all(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch products of user {user_id}: {err}");
                RepositoryError::from(err)
            })?;

        info!("✅ Found {} products of user {user_id}", products.len());
        Ok(products)
    }

    async fn find_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT category_id, category_name,
                   COALESCE(parent_category_id, 0) AS parent_category_id, active
            FROM category
            WHERE active = TRUE
            ORDER BY category_id
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch categories: {err}");
            RepositoryError::from(err)
        })?;

        Ok(categories)
    }

    async fn find_materials(&self) -> Result<Vec<Material>, RepositoryError> {
        let materials = sqlx::query_as::<_, Material>(
            r#"
            SELECT material_id, material_name, active
            FROM material
            WHERE active = TRUE
            ORDER BY material_name
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch materials: {err}");
            RepositoryError::from(err)
        })?;

        Ok(materials)
    }

    async fn find_market_place_items(
        &self,
        product_id: i32,
    ) -> Result<Vec<MarketPlaceItem>, RepositoryError> {
        let items = sqlx::query_as::<_, MarketPlaceItem>(
            r#"
            SELECT marketplaceitem_id, product_id, marketplace_id, sku, user_id, active
            FROM marketplaceitem
            WHERE product_id = $1 AND active = TRUE
            ORDER BY marketplace_id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch marketplace items of product {product_id}: {err}");
            RepositoryError::from(err)
        })?;

        Ok(items)
    }
}
