//! /v2/pet handlers. Each handler decodes its input, calls exactly one pet
//! service operation and maps the outcome; SQL never appears here.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection};
use axum::extract::{Multipart, Path, Query, State};
use axum::response::Response;
use axum::{Form, Json};
use serde::Deserialize;

use crate::api;
use crate::error::ApiError;
use crate::models::{Pet, PetStatus};
use crate::services::pet::PetError;
use crate::AppState;

/// POST /v2/pet - add a new pet to the store
pub async fn add_pet(
    State(state): State<AppState>,
    payload: Result<Json<Pet>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(pet) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let created = state.pets.add(pet).await?;
    api::entity(&created)
}

/// PUT /v2/pet - update an existing pet. A missing id surfaces the service's
/// existence-check failure as a plain 400 on this path.
pub async fn update_pet(
    State(state): State<AppState>,
    payload: Result<Json<Pet>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(pet) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let updated = state.pets.update(pet).await.map_err(|e| match e {
        PetError::NotFound => ApiError::bad_request(e.to_string()),
        other => other.into(),
    })?;
    api::entity(&updated)
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub status: String,
}

/// GET /v2/pet/findByStatus?status=a,b - pets matching any of the
/// comma-separated status values
pub async fn find_by_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Response, ApiError> {
    let statuses = query
        .status
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<PetStatus>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(ApiError::bad_request)?;

    let pets = state.pets.find_by_status(&statuses).await?;
    api::entity(&pets)
}

/// GET /v2/pet/findByTags - retired upstream, kept only as an explicit error
pub async fn find_by_tags() -> ApiError {
    ApiError::bad_request("deprecated")
}

/// GET /v2/pet/{petId} - single pet with its photos and tags
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let pet = state.pets.get_by_id(id).await?;
    api::entity(&pet)
}

#[derive(Debug, Deserialize)]
pub struct PetForm {
    pub name: Option<String>,
    pub status: Option<String>,
}

/// POST /v2/pet/{petId} - scalar update via form fields; empty fields are
/// ignored, both empty is a no-op success
pub async fn update_with_form(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    form: Result<Form<PetForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let Form(form) = form.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let name = form.name.as_deref().filter(|s| !s.is_empty());
    let status = match form.status.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(raw.parse::<PetStatus>().map_err(ApiError::bad_request)?),
        None => None,
    };

    state.pets.update_with_form(id, name, status).await?;
    Ok(api::success(id.to_string()))
}

/// DELETE /v2/pet/{petId} - soft delete
pub async fn delete_pet(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;
    state.pets.delete(id).await?;
    Ok(api::success(id.to_string()))
}

/// POST /v2/pet/{petId}/uploadImage - record an uploaded image as a photo row
pub async fn upload_image(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let mut multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let mut additional_metadata = String::new();
    let mut uploaded: Option<(String, usize)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        match field.name() {
            Some("additionalMetadata") => {
                additional_metadata = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                uploaded = Some((file_name, bytes.len()));
            }
            _ => {}
        }
    }

    let (file_name, size) =
        uploaded.ok_or_else(|| ApiError::bad_request("file field is required"))?;
    state.pets.add_photo(id, &file_name).await?;

    Ok(api::success(format!(
        "additionalMetadata: {additional_metadata}\nFile uploaded to ./{file_name}, {size} bytes"
    )))
}
