//! In-process store backing the same repository traits as Postgres.
//!
//! Every write runs against a copy of the tables that replaces the live ones only when the
//! whole operation succeeds, which gives it the same all-or-nothing behaviour as a transaction.

mod product;
mod user;

use crate::{
    abstract_trait::{
        DynProductCommandRepository, DynProductQueryRepository, DynUserCommandRepository,
        DynUserQueryRepository,
    },
    errors::RepositoryError,
    model::{Category, MarketPlaceItem, Material, Product, User},
    repository::{ProductRepository, Repositories, UserRepository},
};
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Default)]
struct Tables {
    products: BTreeMap<i32, Product>,
    items: BTreeMap<i32, MarketPlaceItem>,
    categories: BTreeMap<i32, Category>,
    materials: BTreeMap<i32, Material>,
    users: BTreeMap<i32, User>,
    sequence: i32,
}

impl Tables {
    /// Ids come from one shared sequence, which keeps them unique across tables.
    fn next_id(&mut self) -> i32 {
        self.sequence += 1;
        self.sequence
    }

    /// Product row with the SKUs of its active items filled in.
    fn hydrate(&self, product: &Product) -> Product {
        let mut hydrated = product.clone();
        hydrated.ozon_sku = 0;
        hydrated.wildberries_sku = 0;

        for item in self
            .items
            .values()
            .filter(|item| item.active && item.product_id == product.product_id)
        {
            if let Some(market_place) = item.market_place() {
                hydrated.set_sku(market_place, item.sku);
            }
        }

        hydrated
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repositories(&self) -> Repositories {
        let product_query = Arc::new(self.clone()) as DynProductQueryRepository;
        let product_command = Arc::new(self.clone()) as DynProductCommandRepository;
        let user_query = Arc::new(self.clone()) as DynUserQueryRepository;
        let user_command = Arc::new(self.clone()) as DynUserCommandRepository;

        Repositories {
            product: ProductRepository {
                query: product_query,
                command: product_command,
            },
            user: UserRepository {
                query: user_query,
                command: user_command,
            },
        }
    }

    /// Number of marketplace item rows, active or not, across all products.
    pub async fn market_place_item_count(&self) -> usize {
        self.tables.lock().await.items.len()
    }

    pub async fn product_count(&self) -> usize {
        self.tables.lock().await.products.len()
    }

    /// Flags a product row inactive, hiding it from reads. Returns false if there is no such row.
    pub async fn deactivate_product(&self, product_id: i32) -> bool {
        match self.tables.lock().await.products.get_mut(&product_id) {
            Some(product) => {
                product.active = false;
                true
            }
            None => false,
        }
    }

    /// Runs `op` on a copy of the tables and keeps the copy only if `op` succeeds.
    async fn transaction<T>(
        &self,
        op: impl FnOnce(&mut Tables) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let mut staged = tables.clone();
        let result = op(&mut staged)?;
        *tables = staged;
        Ok(result)
    }
}
