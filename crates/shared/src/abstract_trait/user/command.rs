use crate::{errors::RepositoryError, model::User as UserModel};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserCommandRepositoryTrait {
    /// Inserts the user and returns it with the generated id.
    async fn create_user(&self, user: &UserModel) -> Result<UserModel, RepositoryError>;
}
