use std::net::SocketAddr;

use anyhow::{Context, Result};

/// Runtime configuration, read once at startup from the environment.
///
/// Every value has a development default so `cargo run` works out of the box;
/// real deployments override the secrets.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_uri: String,
    pub gemini_api_key: String,
    /// Users whose email ends with this domain are created as admins.
    pub admin_email_domain: String,
    pub csv_max_bytes: usize,
    pub csv_max_rows: usize,
    pub csv_upsert_key: String,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = env_or("PREPDECK_BIND", "127.0.0.1:8080")
            .parse()
            .context("PREPDECK_BIND must be an addr:port pair")?;

        let access_token_ttl_secs = env_or("PREPDECK_ACCESS_TTL_SECS", "3600")
            .parse()
            .context("PREPDECK_ACCESS_TTL_SECS must be an integer")?;
        let refresh_token_ttl_secs = env_or("PREPDECK_REFRESH_TTL_SECS", "1209600")
            .parse()
            .context("PREPDECK_REFRESH_TTL_SECS must be an integer")?;

        let csv_max_bytes = env_or("PREPDECK_CSV_MAX_BYTES", "5242880")
            .parse()
            .context("PREPDECK_CSV_MAX_BYTES must be an integer")?;
        let csv_max_rows = env_or("PREPDECK_CSV_MAX_ROWS", "1000")
            .parse()
            .context("PREPDECK_CSV_MAX_ROWS must be an integer")?;

        Ok(Self {
            bind_addr,
            jwt_secret: env_or("PREPDECK_JWT_SECRET", "dev-secret-change-me"),
            access_token_ttl_secs,
            refresh_token_ttl_secs,
            google_client_id: env_or("GOOGLE_CLIENT_ID", ""),
            google_client_secret: env_or("GOOGLE_CLIENT_SECRET", ""),
            google_redirect_uri: env_or(
                "GOOGLE_REDIRECT_URI",
                "http://localhost:3000/oauth/callback",
            ),
            gemini_api_key: env_or("GEMINI_API_KEY", ""),
            admin_email_domain: env_or("PREPDECK_ADMIN_EMAIL_DOMAIN", "@prepdeck.dev"),
            csv_max_bytes,
            csv_max_rows,
            csv_upsert_key: env_or("PREPDECK_CSV_UPSERT_KEY", "question"),
        })
    }
}
