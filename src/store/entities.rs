use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical interview-type labels carried in `Question::title`.
pub const INTERVIEW_TYPE_TECHNICAL: &str = "TECHNICAL";
pub const INTERVIEW_TYPE_PERSONALITY: &str = "PERSONALITY";

/// The fixed difficulty dictionary. Labels and ordinals round-trip exactly;
/// anything else is rejected at validation time.
pub fn difficulty_ordinal(label: &str) -> Option<i32> {
    match label {
        "EASY" => Some(1),
        "MEDIUM" => Some(2),
        "HARD" => Some(3),
        _ => None,
    }
}

pub fn difficulty_label(ordinal: i32) -> Option<&'static str> {
    match ordinal {
        1 => Some("EASY"),
        2 => Some("MEDIUM"),
        3 => Some("HARD"),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    /// Interview-type label shown to the user ("TECHNICAL" / "PERSONALITY").
    pub title: String,
    pub question: String,
    pub content: Option<String>,
    pub tags: Vec<String>,
    pub answer: Option<String>,
    pub year: Option<i32>,
    pub company_id: Option<i64>,
    pub category_id: Option<i64>,
    pub difficulty: i32,
    pub is_public: bool,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_by: Option<i64>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
    pub points: i64,
    pub oauth_provider: String,
    pub oauth_id: String,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One graded answer from a practice submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub id: i64,
    pub user_id: i64,
    pub question_id: i64,
    pub answer: String,
    pub logic_score: Option<i32>,
    pub accuracy_score: Option<i32>,
    pub clarity_score: Option<i32>,
    pub is_relevant: Option<bool>,
    pub points_earned: i32,
    pub submitted_at: DateTime<Utc>,
}
