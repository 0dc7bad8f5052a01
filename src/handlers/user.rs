//! /v2/user handlers. Login issues the JWT and mirrors it into an HttpOnly
//! cookie so browser clients pass the auth gate without holding the token.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue};
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::api;
use crate::error::ApiError;
use crate::models::User;
use crate::services::user::UserError;
use crate::AppState;

/// POST /v2/user - create a user; the envelope message carries the new id
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(user) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let id = state.users.create(&user).await?;
    Ok(api::success(id.to_string()))
}

/// POST /v2/user/createWithArray - batch create, all or nothing
pub async fn create_with_array(
    State(state): State<AppState>,
    payload: Result<Json<Vec<User>>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(users) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    state.users.create_many(&users).await?;
    Ok(api::success("ok"))
}

/// POST /v2/user/createWithList - same contract as createWithArray
pub async fn create_with_list(
    State(state): State<AppState>,
    payload: Result<Json<Vec<User>>, JsonRejection>,
) -> Result<Response, ApiError> {
    create_with_array(State(state), payload).await
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /v2/user/login - credential check, token issuance and session cookie.
/// An unknown username answers 400 on this path rather than 404.
pub async fn login(
    State(state): State<AppState>,
    query: Result<Query<LoginQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let token = state
        .users
        .login(&query.username, &query.password)
        .await
        .map_err(|e| match e {
            UserError::NotFound => ApiError::bad_request(e.to_string()),
            other => other.into(),
        })?;

    let expires = Utc::now() + chrono::Duration::hours(1);
    let cookie = format!(
        "jwt={token}; Path=/; Expires={}; HttpOnly",
        expires.format("%a, %d %b %Y %H:%M:%S GMT")
    );

    let session = Utc::now().timestamp_millis();
    let mut response = api::success(format!("logged in user session:{session}"));

    let headers = response.headers_mut();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(|e| ApiError::bad_request(e.to_string()))?,
    );
    headers.insert(
        "x-expires-after",
        HeaderValue::from_str(&expires.format("%a %b %-d %H:%M:%S UTC %Y").to_string())
            .map_err(|e| ApiError::bad_request(e.to_string()))?,
    );
    headers.insert("x-rate-limit", HeaderValue::from_static("5000"));

    Ok(response)
}

/// GET /v2/user/logout - expire the session cookie
pub async fn logout() -> Response {
    let mut response = api::success("ok");
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_static("jwt=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly"),
    );
    response
}

/// GET /v2/user/{username} - fetch a user record
pub async fn get_by_name(
    State(state): State<AppState>,
    username: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(username) = username.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let user = state.users.get_by_name(&username).await?;
    api::entity(&user)
}

/// PUT /v2/user/{username} - update profile fields; password stays as stored
pub async fn update_user(
    State(state): State<AppState>,
    username: Result<Path<String>, PathRejection>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Path(username) = username.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let Json(user) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let id = state.users.update(&username, &user).await?;
    Ok(api::success(id.to_string()))
}

/// DELETE /v2/user/{username} - soft delete; a second delete answers 400
pub async fn delete_user(
    State(state): State<AppState>,
    username: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(username) = username.map_err(|e| ApiError::bad_request(e.body_text()))?;
    state.users.delete(&username).await?;
    Ok(api::success(username))
}
