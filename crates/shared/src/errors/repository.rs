use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),
}

impl RepositoryError {
    /// Classifies constraint violations reported by Postgres; everything else stays `Sqlx`.
    pub fn from_constraint(err: SqlxError, what: &str) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return RepositoryError::AlreadyExists(what.to_string());
            }
            if db_err.is_foreign_key_violation() {
                return RepositoryError::ForeignKey(what.to_string());
            }
        }
        RepositoryError::Sqlx(err)
    }
}
