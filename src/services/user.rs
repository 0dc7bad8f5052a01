use std::sync::Arc;

use thiserror::Error;

use crate::auth::{TokenAuthority, TokenError};
use crate::database::UserRepository;
use crate::models::User;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("user not found")]
    NotFound,
    #[error("user already exists")]
    AlreadyExists,
    #[error("user not found, maybe user already deleted")]
    AlreadyDeleted,
    #[error("user not found, maybe user deleted")]
    Deleted,
    #[error("invalid username/password supplied")]
    InvalidCredentials,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

/// User operations, including credential checks and token issuance on login.
/// The token capability is injected so this layer never touches the JWT
/// library directly.
#[derive(Clone)]
pub struct UserService {
    repository: UserRepository,
    tokens: Arc<dyn TokenAuthority>,
}

impl UserService {
    pub fn new(repository: UserRepository, tokens: Arc<dyn TokenAuthority>) -> Self {
        Self { repository, tokens }
    }

    pub async fn get_by_name(&self, username: &str) -> Result<User, UserError> {
        self.repository
            .get_by_name(username)
            .await?
            .ok_or(UserError::NotFound)
    }

    /// The store's unique-index violation surfaces as a domain error instead
    /// of leaking the constraint text.
    pub async fn create(&self, user: &User) -> Result<i64, UserError> {
        match self.repository.create(user).await {
            Err(e) if is_unique_violation(&e) => Err(UserError::AlreadyExists),
            other => Ok(other?),
        }
    }

    pub async fn create_many(&self, users: &[User]) -> Result<(), UserError> {
        match self.repository.create_many(users).await {
            Err(e) if is_unique_violation(&e) => Err(UserError::AlreadyExists),
            other => Ok(other?),
        }
    }

    /// Update requires the record to currently exist; returns the record's id
    /// for the response envelope.
    pub async fn update(&self, username: &str, user: &User) -> Result<i64, UserError> {
        let current = self.get_by_name(username).await?;
        self.repository.update(username, user).await?;
        Ok(current.id)
    }

    pub async fn delete(&self, username: &str) -> Result<(), UserError> {
        let user = self.get_by_name(username).await?;

        if user.is_deleted() {
            return Err(UserError::AlreadyDeleted);
        }

        Ok(self.repository.delete(username).await?)
    }

    /// Exact cleartext password match against the stored value; deleted users
    /// are rejected distinctly from bad credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, UserError> {
        let user = self.get_by_name(username).await?;

        if user.is_deleted() {
            return Err(UserError::Deleted);
        }

        if user.password != password {
            return Err(UserError::InvalidCredentials);
        }

        Ok(self.tokens.issue(username)?)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
