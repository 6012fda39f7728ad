use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::auth::jwt::{require_user, JwtService};
use crate::error::ApiError;

use super::csv::{sample_csv, CsvImporter};
use super::service::BankService;
use super::types::{
    CsvUploadResponse, QuestionCreateRequest, QuestionResponse, QuestionUpdateRequest,
};

pub async fn handle_create_question(
    headers: HeaderMap,
    Extension(jwt): Extension<Arc<JwtService>>,
    Extension(service): Extension<Arc<BankService>>,
    Json(request): Json<QuestionCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = require_user(&headers, &jwt)?;
    let response = service.create_question(&request, user_id)?;
    let location = format!("/question/{}", response.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(response),
    ))
}

pub async fn handle_update_question(
    Path(id): Path<i64>,
    headers: HeaderMap,
    Extension(jwt): Extension<Arc<JwtService>>,
    Extension(service): Extension<Arc<BankService>>,
    Json(request): Json<QuestionUpdateRequest>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let user_id = require_user(&headers, &jwt)?;
    Ok(Json(service.update_question(id, &request, user_id)?))
}

pub async fn handle_delete_question(
    Path(id): Path<i64>,
    headers: HeaderMap,
    Extension(jwt): Extension<Arc<JwtService>>,
    Extension(service): Extension<Arc<BankService>>,
) -> Result<StatusCode, ApiError> {
    let user_id = require_user(&headers, &jwt)?;
    service.delete_question(id, user_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct CsvParams {
    #[serde(default)]
    pub dry_run: bool,
}

pub async fn handle_csv_upload(
    Query(params): Query<CsvParams>,
    headers: HeaderMap,
    Extension(jwt): Extension<Arc<JwtService>>,
    Extension(importer): Extension<Arc<CsvImporter>>,
    body: Bytes,
) -> Result<Json<CsvUploadResponse>, ApiError> {
    let user_id = require_user(&headers, &jwt)?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !content_type.starts_with("text/csv") && !content_type.starts_with("application/csv") {
        return Err(ApiError::rejected(
            "INVALID_CONTENT_TYPE",
            "only CSV uploads are accepted",
        ));
    }

    let response = importer.process(&body, params.dry_run, user_id)?;
    Ok(Json(response))
}

pub async fn handle_sample_csv() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/csv")], sample_csv())
}
