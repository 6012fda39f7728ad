use std::sync::Arc;

use axum::http::HeaderMap;
use axum::{Extension, Json};

use crate::auth::jwt::{require_user, JwtService};
use crate::error::ApiError;

use super::service::FeedbackService;
use super::types::{FeedbackRequest, FeedbackResponse};

pub async fn handle_feedback(
    headers: HeaderMap,
    Extension(jwt): Extension<Arc<JwtService>>,
    Extension(service): Extension<Arc<FeedbackService>>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    require_user(&headers, &jwt)?;
    Ok(Json(service.generate(&request).await))
}
