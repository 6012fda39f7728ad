use std::sync::Arc;

use super::gemini::GeminiClient;
use super::types::{FeedbackRequest, FeedbackResponse};

const FALLBACK_FEEDBACK: &str =
    "Thanks for your answer! Keep practicing and your responses will keep improving.";
const FALLBACK_TIP: &str = "Try working through a variety of questions to build confidence.";
const DEFAULT_TIP: &str = "Additionally, backing your answer with a concrete example makes it stronger.";

/// Markers for sentences that belong in the tip, not the main feedback.
const TIP_MARKERS: [&str; 3] = ["additionally", "tip", "for reference"];

pub struct FeedbackService {
    gemini: Arc<GeminiClient>,
}

impl FeedbackService {
    pub fn new(gemini: Arc<GeminiClient>) -> Self {
        Self { gemini }
    }

    pub async fn generate(&self, request: &FeedbackRequest) -> FeedbackResponse {
        tracing::info!("generating feedback for question: {}", request.question);

        match self
            .gemini
            .feedback(&request.question, &request.user_answer)
            .await
        {
            Ok(full) => FeedbackResponse {
                feedback: extract_main_feedback(&full),
                additional_tip: extract_additional_tip(&full),
            },
            Err(e) => {
                tracing::error!("feedback generation failed: {:#}", e);
                FeedbackResponse {
                    feedback: FALLBACK_FEEDBACK.to_string(),
                    additional_tip: FALLBACK_TIP.to_string(),
                }
            }
        }
    }
}

/// Keeps the first two sentences that are not tip-like. Falls back to a
/// canned line when nothing usable remains.
pub(crate) fn extract_main_feedback(full: &str) -> String {
    if full.trim().is_empty() {
        return FALLBACK_FEEDBACK.to_string();
    }

    let mut main = String::new();
    let mut count = 0;
    for sentence in full.split(['.', '!', '?']) {
        let trimmed = sentence.trim();
        if trimmed.is_empty() {
            continue;
        }
        if count >= 2 {
            break;
        }
        let lower = trimmed.to_lowercase();
        if TIP_MARKERS.iter().any(|m| lower.contains(m)) {
            continue;
        }
        main.push_str(trimmed);
        main.push_str(". ");
        count += 1;
    }

    let result = main.trim().to_string();
    if result.is_empty() {
        FALLBACK_FEEDBACK.to_string()
    } else {
        result
    }
}

/// Pulls the model's suggestion out of the full reply, or supplies a
/// default tip when there is none.
pub(crate) fn extract_additional_tip(full: &str) -> String {
    let lower = full.to_lowercase();
    if let Some(idx) = lower.find("suggest") {
        // lowercasing can shift byte offsets for non-ASCII text, so only
        // slice the original when the offset still lands on a boundary
        if full.is_char_boundary(idx) && idx < full.len() {
            return full[idx..].trim().to_string();
        }
        return full.trim().to_string();
    }
    DEFAULT_TIP.to_string()
}
