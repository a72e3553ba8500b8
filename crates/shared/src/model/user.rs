use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Admin = 1,
    Regular = 2,
}

impl UserRole {
    pub fn id(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, Validate)]
#[validate(schema(function = "validate_password", skip_on_field_errors = false))]
pub struct User {
    pub id: i32,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[serde(skip)]
    #[sqlx(skip)]
    pub password: String,
    #[serde(skip)]
    pub encrypted_password: String,
    pub user_role: i32,
    pub active: bool,
}

impl User {
    /// Clears both password fields before the user leaves the service layer.
    pub fn sanitize(&mut self) {
        self.password.clear();
        self.encrypted_password.clear();
    }
}

fn validate_password(user: &User) -> Result<(), ValidationError> {
    let length = user.password.chars().count();

    if length == 0 {
        if user.encrypted_password.is_empty() {
            return Err(ValidationError::new("required")
                .with_message(Cow::Borrowed("password is required")));
        }
        return Ok(());
    }

    if !(4..=50).contains(&length) {
        return Err(ValidationError::new("length")
            .with_message(Cow::Borrowed("password must be between 4 and 50 characters")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, password: &str) -> User {
        User {
            email: email.into(),
            password: password.into(),
            user_role: UserRole::Regular.id(),
            active: true,
            ..Default::default()
        }
    }

    #[test]
    fn valid_user() {
        assert!(user("user@example.org", "password").validate().is_ok());
    }

    #[test]
    fn invalid_email() {
        assert!(user("invalid", "password").validate().is_err());
        assert!(user("", "password").validate().is_err());
    }

    #[test]
    fn password_rules() {
        assert!(user("user@example.org", "").validate().is_err());
        assert!(user("user@example.org", "abc").validate().is_err());
        assert!(user("user@example.org", &"p".repeat(51)).validate().is_err());
        assert!(user("user@example.org", "abcd").validate().is_ok());
    }

    #[test]
    fn encrypted_password_waives_plain_password() {
        let mut existing = user("user@example.org", "");
        existing.encrypted_password = "$2b$04$hash".into();
        assert!(existing.validate().is_ok());
    }

    #[test]
    fn sanitize_clears_secrets() {
        let mut u = user("user@example.org", "password");
        u.encrypted_password = "hash".into();
        u.sanitize();
        assert!(u.password.is_empty());
        assert!(u.encrypted_password.is_empty());
    }
}
