use serde::Serialize;

use crate::store::entities::UserRole;

#[derive(Debug, Clone, Serialize)]
pub struct AuthUrlResponse {
    pub authorization_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: AuthUser,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}
