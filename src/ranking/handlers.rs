use std::sync::Arc;

use axum::http::HeaderMap;
use axum::{Extension, Json};

use crate::auth::jwt::{require_claims, require_user, JwtService};
use crate::error::ApiError;

use super::service::RankingService;
use super::types::{PointResponse, RankingResponse};

pub async fn handle_points(
    headers: HeaderMap,
    Extension(jwt): Extension<Arc<JwtService>>,
    Extension(service): Extension<Arc<RankingService>>,
) -> Result<Json<PointResponse>, ApiError> {
    let user_id = require_user(&headers, &jwt)?;
    Ok(Json(service.user_points(user_id)?))
}

pub async fn handle_rankings(
    headers: HeaderMap,
    Extension(jwt): Extension<Arc<JwtService>>,
    Extension(service): Extension<Arc<RankingService>>,
) -> Result<Json<RankingResponse>, ApiError> {
    let claims = require_claims(&headers, &jwt)?;
    Ok(Json(service.leaderboard(Some(&claims.email))))
}
