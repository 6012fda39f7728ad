//! Google OAuth login flow.
//!
//! The server builds the consent URL, exchanges the callback code for an
//! access token, fetches the Google profile, and upserts the local account.
//! Role assignment happens once at account creation, by email domain.

use std::collections::HashMap;

use anyhow::{anyhow, Context};
use chrono::Utc;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::store::entities::{User, UserRole};
use crate::store::users::UserStore;

use super::jwt::JwtService;
use super::types::{AuthResponse, AuthUser};

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USER_INFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

const OAUTH_PROVIDER: &str = "google";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    id: String,
    email: String,
    name: String,
    picture: Option<String>,
}

pub struct GoogleOAuth {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    admin_email_domain: String,
}

impl GoogleOAuth {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_uri: config.google_redirect_uri.clone(),
            admin_email_domain: config.admin_email_domain.clone(),
        }
    }

    pub fn authorization_url(&self) -> String {
        let state = uuid::Uuid::new_v4().to_string();
        format!(
            "{}?client_id={}&redirect_uri={}&scope={}&response_type=code&state={}&access_type=offline&prompt=consent",
            GOOGLE_AUTH_URL,
            urlencode(&self.client_id),
            urlencode(&self.redirect_uri),
            urlencode("profile email"),
            state,
        )
    }

    pub async fn process_callback(
        &self,
        code: &str,
        users: &UserStore,
        jwt: &JwtService,
    ) -> Result<AuthResponse, ApiError> {
        let access_token = self.exchange_code(code).await?;
        let info = self.fetch_user_info(&access_token).await?;
        let user = self.upsert_user(info, users);

        let access = jwt.issue_access(&user)?;
        let refresh = jwt.issue_refresh(&user)?;

        tracing::info!(user_id = user.user_id, "login completed");

        Ok(AuthResponse {
            access_token: access,
            refresh_token: refresh,
            token_type: "Bearer".to_string(),
            user: AuthUser {
                user_id: user.user_id,
                email: user.email,
                name: user.display_name,
                role: user.role,
                profile_image_url: user.profile_image_url,
            },
            message: "login successful".to_string(),
        })
    }

    async fn exchange_code(&self, code: &str) -> Result<String, ApiError> {
        let mut form = HashMap::new();
        form.insert("client_id", self.client_id.as_str());
        form.insert("client_secret", self.client_secret.as_str());
        form.insert("code", code);
        form.insert("grant_type", "authorization_code");
        form.insert("redirect_uri", self.redirect_uri.as_str());

        let response = self
            .http
            .post(GOOGLE_TOKEN_URL)
            .form(&form)
            .send()
            .await
            .context("token exchange request failed")?;
        let body: TokenResponse = response
            .json()
            .await
            .context("token exchange returned malformed JSON")?;

        body.access_token
            .ok_or_else(|| ApiError::Internal(anyhow!("no access token in Google response")))
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, ApiError> {
        let response = self
            .http
            .get(GOOGLE_USER_INFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .context("userinfo request failed")?;
        let info = response
            .json()
            .await
            .context("userinfo returned malformed JSON")?;
        Ok(info)
    }

    fn upsert_user(&self, info: GoogleUserInfo, users: &UserStore) -> User {
        if let Some(existing) = users.find_by_oauth(OAUTH_PROVIDER, &info.id) {
            return users
                .update(existing.user_id, |u| {
                    u.display_name = info.name.clone();
                    u.profile_image_url = info.picture.clone();
                    u.updated_at = Utc::now();
                })
                .unwrap_or(existing);
        }

        let role = self.role_for_email(&info.email);
        let now = Utc::now();
        users.create(|id| User {
            user_id: id,
            username: info.email.split('@').next().unwrap_or(&info.email).to_string(),
            display_name: info.name.clone(),
            email: info.email.clone(),
            role,
            points: 0,
            oauth_provider: OAUTH_PROVIDER.to_string(),
            oauth_id: info.id.clone(),
            profile_image_url: info.picture.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    fn role_for_email(&self, email: &str) -> UserRole {
        if email.ends_with(&self.admin_email_domain) {
            UserRole::Admin
        } else {
            UserRole::User
        }
    }
}

fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
