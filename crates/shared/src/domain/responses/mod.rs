mod api;
mod product;
mod user;

pub use self::api::ApiResponse;
pub use self::product::{CategoryResponse, MaterialResponse, ProductResponse};
pub use self::user::UserResponse;
