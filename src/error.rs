//! HTTP boundary errors. Every failure becomes the `{code, type, message}`
//! envelope: not-found conditions recognized by a service map to 404, all
//! other failures map to 400. There is no 500 path.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::auth::TokenError;
use crate::services::pet::PetError;
use crate::services::store::StoreError;
use crate::services::user::UserError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        crate::api::envelope(self.status_code(), self.message())
    }
}

// Store errors pass through to the client verbatim; the services
// recategorize specific conditions before they reach this point.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<PetError> for ApiError {
    fn from(err: PetError) -> Self {
        match err {
            PetError::NotFound => ApiError::not_found(err.to_string()),
            PetError::Store(e) => ApiError::bad_request(e.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::not_found(err.to_string()),
            StoreError::AlreadyDeleted => ApiError::bad_request(err.to_string()),
            StoreError::Store(e) => ApiError::bad_request(e.to_string()),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound => ApiError::not_found(err.to_string()),
            UserError::AlreadyExists
            | UserError::AlreadyDeleted
            | UserError::Deleted
            | UserError::InvalidCredentials => ApiError::bad_request(err.to_string()),
            UserError::Token(e) => ApiError::bad_request(e.to_string()),
            UserError::Store(e) => ApiError::bad_request(e.to_string()),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}
