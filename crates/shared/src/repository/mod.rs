mod memory;
mod product;
mod user;

pub use self::memory::MemoryStore;
pub use self::product::ProductRepository;
pub use self::user::UserRepository;

use crate::config::ConnectionPool;

/// Every repository the services need, whichever backend provides them.
#[derive(Clone)]
pub struct Repositories {
    pub product: ProductRepository,
    pub user: UserRepository,
}

impl Repositories {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            product: ProductRepository::new(pool.clone()),
            user: UserRepository::new(pool),
        }
    }

    pub fn memory(store: MemoryStore) -> Self {
        store.repositories()
    }
}
