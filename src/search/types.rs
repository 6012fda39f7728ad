use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::entities::UserRole;

/// A fully-bound search request. HTTP parameter parsing happens in the
/// handler; by the time this struct exists every field is present (with
/// defaults applied) but not yet validated.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub q: String,
    pub page: u32,
    pub size: u32,
    pub sort: String,
    pub types: Vec<String>,
    pub difficulty: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub year: Option<i32>,
    pub company_id: Option<i64>,
    pub company_name: Option<String>,
    pub interview_type: Option<String>,
    pub highlight: bool,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            q: String::new(),
            page: 1,
            size: 20,
            sort: "rel".to_string(),
            types: vec!["question".to_string(), "user".to_string()],
            difficulty: None,
            category_id: None,
            category_name: None,
            year: None,
            company_id: None,
            company_name: None,
            interview_type: None,
            highlight: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: QueryEcho,
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub took_ms: u64,
    pub results: Vec<SearchHit>,
    pub facets: Facets,
}

/// The resolved filter set echoed back to the caller. Company and category
/// appear in canonical form (the id, plus the resolved name when known).
#[derive(Debug, Clone, Serialize)]
pub struct QueryEcho {
    pub q: String,
    pub sort: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub body: HitBody,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl SearchHit {
    pub fn created_at(&self) -> DateTime<Utc> {
        match &self.body {
            HitBody::Question(q) => q.created_at,
            HitBody::User(u) => u.created_at,
        }
    }

    pub fn id(&self) -> i64 {
        match &self.body {
            HitBody::Question(q) => q.id,
            HitBody::User(u) => u.id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HitBody {
    Question(QuestionHit),
    User(UserHit),
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionHit {
    pub id: i64,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub interview_type: String,
    pub difficulty: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_label: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserHit {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

// --- facets ---

#[derive(Debug, Clone, Serialize)]
pub struct Facets {
    pub year: Vec<YearBucket>,
    pub company: Vec<CompanyBucket>,
    pub category: Vec<CategoryBucket>,
    pub interview_type: Vec<InterviewTypeBucket>,
    pub difficulty: DifficultyBuckets,
    pub types: TypeBuckets,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearBucket {
    pub value: i32,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyBucket {
    pub id: i64,
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryBucket {
    pub id: i64,
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewTypeBucket {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DifficultyBuckets {
    #[serde(rename = "EASY")]
    pub easy: u64,
    #[serde(rename = "MEDIUM")]
    pub medium: u64,
    #[serde(rename = "HARD")]
    pub hard: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeBuckets {
    pub question: u64,
    pub user: u64,
}
