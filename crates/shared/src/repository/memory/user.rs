use super::MemoryStore;
use crate::{
    abstract_trait::{UserCommandRepositoryTrait, UserQueryRepositoryTrait},
    errors::RepositoryError,
    model::User,
};
use async_trait::async_trait;

#[async_trait]
impl UserCommandRepositoryTrait for MemoryStore {
    async fn create_user(&self, user: &User) -> Result<User, RepositoryError> {
        self.transaction(|tables| {
            if tables.users.values().any(|existing| existing.email == user.email) {
                return Err(RepositoryError::AlreadyExists("email".into()));
            }

            let mut row = user.clone();
            row.id = tables.next_id();
            row.password.clear();
            tables.users.insert(row.id, row.clone());
            Ok(row)
        })
        .await
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .tables
            .lock()
            .await
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }
}
