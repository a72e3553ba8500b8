mod context;
pub mod requests;
pub mod responses;

pub use self::context::RequestContext;
