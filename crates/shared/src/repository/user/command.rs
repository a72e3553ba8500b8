use crate::{
    abstract_trait::UserCommandRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::User as UserModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create_user(&self, user: &UserModel) -> Result<UserModel, RepositoryError> {
        let created = sqlx::query_as::<_, UserModel>(
            r#"
            INSERT INTO users (email, encryptedpassword, userrole, active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, encryptedpassword AS encrypted_password,
                      userrole AS user_role, active
            "#,
        )
        .bind(&user.email)
        .bind(&user.encrypted_password)
        .bind(user.user_role)
        .bind(user.active)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to create user {}: {err}", user.email);
            RepositoryError::from_constraint(err, "email")
        })?;

        info!("✅ Created user ID {} ({})", created.id, created.email);
        Ok(created)
    }
}
