use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionCreateRequest {
    pub question: String,
    /// EASY / MEDIUM / HARD; defaults to MEDIUM.
    pub difficulty: Option<String>,
    pub year: Option<i32>,
    pub company_id: Option<i64>,
    pub category_id: Option<i64>,
    pub interview_type: String,
}

/// Partial update: only the provided fields change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionUpdateRequest {
    pub question: Option<String>,
    pub difficulty: Option<String>,
    pub category_id: Option<i64>,
    pub year: Option<i32>,
    pub company_id: Option<i64>,
    pub interview_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub id: i64,
    pub question: String,
    pub difficulty: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub created_by: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CsvUploadResponse {
    pub summary: CsvSummary,
    pub errors: Vec<CsvRowError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CsvSummary {
    pub total_rows: usize,
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub dry_run: bool,
    pub upsert_key: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CsvRowError {
    /// 1-based line number in the file (header is line 1).
    pub row: usize,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}
