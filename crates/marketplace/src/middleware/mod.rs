pub mod session;
pub mod validate;

pub use self::session::{SESSION_COOKIE, USER_COOKIE, session_middleware};
pub use self::validate::{IdPath, JsonBody};
