use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Category {
    pub category_id: i32,
    #[validate(length(min = 3, max = 200, message = "must be between 3 and 200 characters"))]
    pub category_name: String,
    /// 0 when the category has no parent; persisted as NULL.
    pub parent_category_id: i32,
    pub active: bool,
}

impl Category {
    pub fn parent(&self) -> Option<i32> {
        (self.parent_category_id != 0).then_some(self.parent_category_id)
    }
}
