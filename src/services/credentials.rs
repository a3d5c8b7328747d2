use crate::api::error::AppError;
use crate::entities::{prelude::*, users};
use crate::utils::password::{hash_password, verify_password};
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// Decides whether a username/password pair may log in
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> Result<bool, AppError>;
}

/// One fixed identity, compared literally
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentials {
    async fn verify(&self, username: &str, password: &str) -> Result<bool, AppError> {
        Ok(username == self.username && password == self.password)
    }
}

/// Identities from the `users` table, checked against their PBKDF2 digest
pub struct DatabaseCredentials {
    db: DatabaseConnection,
}

impl DatabaseCredentials {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<users::Model, AppError> {
        let password = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let user = users::ActiveModel {
            username: Set(username.to_owned()),
            password_hash: Set(password_hash),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl CredentialVerifier for DatabaseCredentials {
    async fn verify(&self, username: &str, password: &str) -> Result<bool, AppError> {
        let Some(user) = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await?
        else {
            return Ok(false);
        };

        let password = password.to_owned();
        // Key derivation is CPU bound
        tokio::task::spawn_blocking(move || verify_password(&user.password_hash, &password))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))
    }
}
