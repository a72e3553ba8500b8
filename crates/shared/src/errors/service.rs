use crate::errors::repository::RepositoryError;
use bcrypt::BcryptError;
use std::collections::BTreeMap;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] BcryptError),

    #[error("Session not found")]
    SessionNotFound,

    #[error("Session manager error: {0}")]
    SessionManager(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Flattens every field violation into `field -> [messages]`, sorted by field name.
/// Struct-level violations are reported under `__all__`.
pub fn validation_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut map = BTreeMap::new();

    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| match e.code.as_ref() {
                        "email" => "Invalid email format".to_string(),
                        "length" => "Invalid length".to_string(),
                        "range" => "Value out of range".to_string(),
                        "required" => "Field is required".to_string(),
                        _ => format!("Invalid {field}"),
                    })
            })
            .collect();
        map.insert(field.to_string(), messages);
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;
    use validator::Validate;

    #[test]
    fn collects_messages_per_field() {
        let errors = Product::default().validate().unwrap_err();
        let messages = validation_messages(&errors);

        let fields: Vec<&str> = messages.keys().map(String::as_str).collect();
        assert_eq!(
            fields,
            vec!["category_id", "material_id", "product_name", "user_id"]
        );
        assert_eq!(messages["category_id"], vec!["is required".to_string()]);
    }
}
