mod category;
mod market_place_item;
mod material;
mod product;
mod user;

pub use self::category::Category;
pub use self::market_place_item::{MarketPlace, MarketPlaceItem};
pub use self::material::Material;
pub use self::product::Product;
pub use self::user::{User, UserRole};
