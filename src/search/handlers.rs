use std::sync::Arc;

use axum::extract::Query;
use axum::http::HeaderMap;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::auth::jwt::{require_user, JwtService};
use crate::error::ApiError;

use super::engine::SearchEngine;
use super::types::{SearchRequest, SearchResponse};

fn default_page() -> u32 {
    1
}

fn default_size() -> u32 {
    20
}

fn default_sort() -> String {
    "rel".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_sort")]
    pub sort: String,
    /// Comma-separated list; defaults to both result kinds.
    pub types: Option<String>,
    pub difficulty: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub year: Option<i32>,
    pub company_id: Option<i64>,
    pub company_name: Option<String>,
    pub interview_type: Option<String>,
    #[serde(default = "default_true")]
    pub highlight: bool,
}

fn parse_types(raw: Option<&str>) -> Vec<String> {
    let parsed: Vec<String> = raw
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if parsed.is_empty() {
        vec!["question".to_string(), "user".to_string()]
    } else {
        parsed
    }
}

pub async fn handle_search(
    Query(params): Query<SearchParams>,
    headers: HeaderMap,
    Extension(jwt): Extension<Arc<JwtService>>,
    Extension(engine): Extension<Arc<SearchEngine>>,
) -> Result<Json<SearchResponse>, ApiError> {
    let requester = require_user(&headers, &jwt)?;

    let request = SearchRequest {
        q: params.q,
        page: params.page,
        size: params.size,
        sort: params.sort,
        types: parse_types(params.types.as_deref()),
        difficulty: params.difficulty,
        category_id: params.category_id,
        category_name: params.category_name,
        year: params.year,
        company_id: params.company_id,
        company_name: params.company_name,
        interview_type: params.interview_type,
        highlight: params.highlight,
    };

    let response = engine.search(&request, requester)?;
    Ok(Json(response))
}
