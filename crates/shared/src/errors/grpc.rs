use crate::errors::service::ServiceError;
use tonic::{Code, Status};

/// Maps a status returned by the session service onto the service error taxonomy.
pub fn grpc_status_to_service_error(status: Status) -> ServiceError {
    match status.code() {
        Code::NotFound => ServiceError::SessionNotFound,
        Code::Unauthenticated | Code::PermissionDenied => {
            ServiceError::Unauthorized(status.message().to_string())
        }
        Code::Unavailable | Code::DeadlineExceeded | Code::Cancelled => {
            ServiceError::SessionManager(format!("session service unavailable: {}", status.message()))
        }
        _ => ServiceError::SessionManager(format!(
            "session service error ({:?}): {}",
            status.code(),
            status.message()
        )),
    }
}
