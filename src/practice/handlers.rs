use std::sync::Arc;

use axum::extract::Query;
use axum::http::HeaderMap;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::auth::jwt::{require_user, JwtService};
use crate::error::ApiError;

use super::service::PracticeService;
use super::types::{QuestionListResponse, SubmissionRequest, SubmissionResponse};

#[derive(Debug, Deserialize)]
pub struct DrillParams {
    pub category_id: Option<i64>,
    pub company_id: Option<i64>,
}

pub async fn handle_draw_questions(
    Query(params): Query<DrillParams>,
    headers: HeaderMap,
    Extension(jwt): Extension<Arc<JwtService>>,
    Extension(service): Extension<Arc<PracticeService>>,
) -> Result<Json<QuestionListResponse>, ApiError> {
    require_user(&headers, &jwt)?;
    Ok(Json(
        service.draw_questions(params.category_id, params.company_id),
    ))
}

pub async fn handle_submission(
    headers: HeaderMap,
    Extension(jwt): Extension<Arc<JwtService>>,
    Extension(service): Extension<Arc<PracticeService>>,
    Json(request): Json<SubmissionRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let user_id = require_user(&headers, &jwt)?;
    let response = service.submit(&request, user_id).await?;
    Ok(Json(response))
}
