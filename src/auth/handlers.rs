use std::sync::Arc;

use axum::extract::Query;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::store::users::UserStore;

use super::jwt::JwtService;
use super::oauth::GoogleOAuth;
use super::types::{AuthResponse, AuthUrlResponse};

pub async fn handle_auth_url(
    Extension(oauth): Extension<Arc<GoogleOAuth>>,
) -> Json<AuthUrlResponse> {
    Json(AuthUrlResponse {
        authorization_url: oauth.authorization_url(),
    })
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: String,
    #[allow(dead_code)]
    pub state: Option<String>,
}

pub async fn handle_auth_callback(
    Query(params): Query<CallbackParams>,
    Extension(oauth): Extension<Arc<GoogleOAuth>>,
    Extension(users): Extension<Arc<UserStore>>,
    Extension(jwt): Extension<Arc<JwtService>>,
) -> Result<Json<AuthResponse>, ApiError> {
    let response = oauth.process_callback(&params.code, &users, &jwt).await?;
    Ok(Json(response))
}
