use crate::model::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User as returned to clients; never carries password material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub user_role: i32,
    pub active: bool,
}

impl From<User> for UserResponse {
    fn from(mut value: User) -> Self {
        value.sanitize();
        UserResponse {
            id: value.id,
            email: value.email,
            user_role: value.user_role,
            active: value.active,
        }
    }
}
