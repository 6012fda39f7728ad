use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    pub question: String,
    pub user_answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
    pub additional_tip: String,
}

/// Technical-interview grading: three 0-5 axes plus one sentence of
/// feedback. This mirrors the JSON contract in the grading prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalFeedback {
    pub logic_score: i32,
    pub accuracy_score: i32,
    pub clarity_score: i32,
    pub feedback: String,
}

impl TechnicalFeedback {
    /// Fallback when the grading call fails: zero scores, explicit message.
    pub fn zeroed(message: impl Into<String>) -> Self {
        Self {
            logic_score: 0,
            accuracy_score: 0,
            clarity_score: 0,
            feedback: message.into(),
        }
    }
}

/// Personality-interview grading: a relevance judgment worth 10 points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityFeedback {
    pub is_relevant: bool,
    pub points_awarded: i32,
    pub feedback: String,
}

impl PersonalityFeedback {
    pub fn zeroed(message: impl Into<String>) -> Self {
        Self {
            is_relevant: false,
            points_awarded: 0,
            feedback: message.into(),
        }
    }
}
