use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Material {
    pub material_id: i32,
    #[validate(length(min = 3, max = 200, message = "must be between 3 and 200 characters"))]
    pub material_name: String,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_length_bounds() {
        let material = |name: &str| Material {
            material_name: name.into(),
            active: true,
            ..Default::default()
        };

        assert!(material("Дерево").validate().is_ok());
        assert!(material("abc").validate().is_ok());
        assert!(material(&"m".repeat(200)).validate().is_ok());
        assert!(material("ab").validate().is_err());
        assert!(material(&"m".repeat(201)).validate().is_err());
    }
}
