mod auth;
mod product;

pub use self::auth::{AuthService, AuthServiceDeps};
pub use self::product::ProductService;
