use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionRequest {
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: i64,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logic_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarity_score: Option<i32>,
    pub points_earned: i32,
    pub rank: usize,
    pub overall_comment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionListResponse {
    pub questions: Vec<QuestionItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionItem {
    pub id: i64,
    pub question: String,
}
