mod auth;
pub mod lenient_number;
mod product;

pub use self::auth::{RegisterRequest, SignInRequest};
pub use self::product::{CreateCategoryRequest, CreateMaterialRequest, ProductRequest};
