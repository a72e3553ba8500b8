use crate::errors::{
    error::ErrorResponse,
    repository::RepositoryError,
    service::{ServiceError, validation_messages},
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::collections::BTreeMap;
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    UnprocessableEntity {
        message: String,
        fields: BTreeMap<String, Vec<String>>,
    },
    ServiceUnavailable(String),
    Internal(String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::Conflict(_) => StatusCode::CONFLICT,
            HttpError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            HttpError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidCredentials => {
                HttpError::Unauthorized("incorrect email or password".to_string())
            }

            ServiceError::Unauthorized(msg) => HttpError::Unauthorized(msg),

            ServiceError::SessionNotFound => HttpError::Unauthorized("session not found".into()),

            ServiceError::SessionManager(msg) => {
                error!("❌ Session manager failure: {msg}");
                HttpError::ServiceUnavailable("Session service unavailable".into())
            }

            ServiceError::Validation(errors) => {
                let fields = validation_messages(&errors);
                let message = fields
                    .iter()
                    .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
                    .collect::<Vec<_>>()
                    .join("; ");
                HttpError::UnprocessableEntity { message, fields }
            }

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("record not found".into()),
                RepositoryError::AlreadyExists(msg) => {
                    HttpError::Conflict(format!("{msg} already exists"))
                }
                RepositoryError::Conflict(msg) => HttpError::Conflict(msg),
                RepositoryError::ForeignKey(msg) => {
                    HttpError::BadRequest(format!("Invalid reference: {msg}"))
                }
                RepositoryError::Sqlx(err) => {
                    error!("❌ Database error: {err}");
                    HttpError::Internal("Internal server error".into())
                }
            },

            ServiceError::Bcrypt(err) => {
                error!("❌ Bcrypt error: {err}");
                HttpError::Internal("Internal authentication error".into())
            }

            ServiceError::Internal(msg) => {
                error!("❌ Internal error: {msg}");
                HttpError::Internal("Internal server error".into())
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (message, errors) = match self {
            HttpError::UnprocessableEntity { message, fields } => (message, Some(fields)),
            HttpError::BadRequest(msg)
            | HttpError::Unauthorized(msg)
            | HttpError::NotFound(msg)
            | HttpError::Conflict(msg)
            | HttpError::ServiceUnavailable(msg)
            | HttpError::Internal(msg) => (msg, None),
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message,
            errors,
        });

        (status, body).into_response()
    }
}
