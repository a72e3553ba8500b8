mod error;
mod grpc;
mod http;
mod repository;
mod service;

pub use self::error::ErrorResponse;
pub use self::grpc::grpc_status_to_service_error;
pub use self::http::HttpError;
pub use self::repository::RepositoryError;
pub use self::service::{ServiceError, validation_messages};
