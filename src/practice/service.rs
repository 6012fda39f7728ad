use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::error::ApiError;
use crate::feedback::gemini::GeminiClient;
use crate::feedback::types::{PersonalityFeedback, TechnicalFeedback};
use crate::store::answers::AnswerStore;
use crate::store::entities::{
    AnswerRecord, Question, INTERVIEW_TYPE_PERSONALITY, INTERVIEW_TYPE_TECHNICAL,
};
use crate::store::questions::QuestionStore;
use crate::store::users::UserStore;

use super::types::{
    QuestionItem, QuestionListResponse, SubmissionRequest, SubmissionResponse,
};

const DRILL_SIZE: usize = 10;

pub struct PracticeService {
    questions: Arc<QuestionStore>,
    users: Arc<UserStore>,
    answers: Arc<AnswerStore>,
    gemini: Arc<GeminiClient>,
}

impl PracticeService {
    pub fn new(
        questions: Arc<QuestionStore>,
        users: Arc<UserStore>,
        answers: Arc<AnswerStore>,
        gemini: Arc<GeminiClient>,
    ) -> Self {
        Self {
            questions,
            users,
            answers,
            gemini,
        }
    }

    /// Draws up to ten random public questions for a drill, optionally
    /// narrowed by category and company.
    pub fn draw_questions(
        &self,
        category_id: Option<i64>,
        company_id: Option<i64>,
    ) -> QuestionListResponse {
        tracing::info!(?category_id, ?company_id, "drawing practice questions");

        let drawn = self
            .questions
            .random_public(category_id, company_id, DRILL_SIZE);
        let questions = drawn
            .into_iter()
            .map(|q| QuestionItem {
                id: q.id,
                question: q.question,
            })
            .collect();
        QuestionListResponse { questions }
    }

    /// Grades every submitted answer by its question's interview type,
    /// persists the records, credits the points, and recomputes the rank.
    pub async fn submit(
        &self,
        request: &SubmissionRequest,
        user_id: i64,
    ) -> Result<SubmissionResponse, ApiError> {
        let user = self
            .users
            .get(user_id)
            .ok_or_else(|| ApiError::rejected("USER_NOT_FOUND", "user not found"))?;

        let ids: Vec<i64> = request.answers.iter().map(|a| a.question_id).collect();
        let mut question_map: HashMap<i64, Question> = HashMap::new();
        for id in &ids {
            let question = self.questions.get(*id).ok_or_else(|| {
                ApiError::rejected("QUESTION_NOT_FOUND", format!("question {} not found", id))
            })?;
            question_map.insert(*id, question);
        }

        let mut total_points = 0i32;
        let mut total_logic = 0i32;
        let mut total_accuracy = 0i32;
        let mut total_clarity = 0i32;
        let answer_count = request.answers.len() as i32;

        for submitted in &request.answers {
            let question = &question_map[&submitted.question_id];
            let now = Utc::now();

            match question.title.as_str() {
                INTERVIEW_TYPE_TECHNICAL => {
                    let graded = match self
                        .gemini
                        .technical(&question.question, &submitted.answer)
                        .await
                    {
                        Ok(graded) => graded,
                        Err(e) => {
                            tracing::error!("technical grading failed: {:#}", e);
                            TechnicalFeedback::zeroed("grading unavailable")
                        }
                    };
                    total_logic += graded.logic_score;
                    total_accuracy += graded.accuracy_score;
                    total_clarity += graded.clarity_score;

                    let avg =
                        (graded.logic_score + graded.accuracy_score + graded.clarity_score) / 3;
                    let earned = avg * 10;
                    total_points += earned;

                    self.answers.record(|id| AnswerRecord {
                        id,
                        user_id,
                        question_id: submitted.question_id,
                        answer: submitted.answer.clone(),
                        logic_score: Some(graded.logic_score),
                        accuracy_score: Some(graded.accuracy_score),
                        clarity_score: Some(graded.clarity_score),
                        is_relevant: None,
                        points_earned: earned,
                        submitted_at: now,
                    });
                }
                INTERVIEW_TYPE_PERSONALITY => {
                    let graded = match self
                        .gemini
                        .personality(&question.question, &submitted.answer)
                        .await
                    {
                        Ok(graded) => graded,
                        Err(e) => {
                            tracing::error!("personality grading failed: {:#}", e);
                            PersonalityFeedback::zeroed("grading unavailable")
                        }
                    };
                    total_points += graded.points_awarded;

                    // points translate back into per-axis scores
                    let score = graded.points_awarded / 10;
                    total_logic += score;
                    total_accuracy += score;
                    total_clarity += score;

                    self.answers.record(|id| AnswerRecord {
                        id,
                        user_id,
                        question_id: submitted.question_id,
                        answer: submitted.answer.clone(),
                        logic_score: None,
                        accuracy_score: None,
                        clarity_score: None,
                        is_relevant: Some(graded.is_relevant),
                        points_earned: graded.points_awarded,
                        submitted_at: now,
                    });
                }
                other => {
                    tracing::warn!("unknown interview type: {}, awarding defaults", other);
                    total_points += 100;
                    total_logic += 10;
                    total_accuracy += 10;
                    total_clarity += 10;

                    self.answers.record(|id| AnswerRecord {
                        id,
                        user_id,
                        question_id: submitted.question_id,
                        answer: submitted.answer.clone(),
                        logic_score: Some(10),
                        accuracy_score: Some(10),
                        clarity_score: Some(10),
                        is_relevant: None,
                        points_earned: 100,
                        submitted_at: now,
                    });
                }
            }
        }

        self.users.add_points(user_id, total_points as i64);

        let rank = self
            .users
            .all_by_points()
            .iter()
            .position(|u| u.user_id == user_id)
            .map(|i| i + 1)
            .unwrap_or(1);

        let overall_comment = self
            .overall_comment(request, &question_map)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("overall comment generation failed: {:#}", e);
                "Submission received. Keep practicing to sharpen your answers.".to_string()
            });

        let average_score = if answer_count > 0 {
            Some((total_logic + total_accuracy + total_clarity) / (answer_count * 3))
        } else {
            None
        };
        let per_axis = |total: i32| {
            if answer_count > 0 {
                Some(total / answer_count)
            } else {
                None
            }
        };

        tracing::info!(
            user_id = user.user_id,
            points = total_points,
            rank,
            "submission graded"
        );

        Ok(SubmissionResponse {
            message: "Submission complete! Points have been awarded.".to_string(),
            average_score,
            logic_score: per_axis(total_logic),
            accuracy_score: per_axis(total_accuracy),
            clarity_score: per_axis(total_clarity),
            points_earned: total_points,
            rank,
            overall_comment,
        })
    }

    async fn overall_comment(
        &self,
        request: &SubmissionRequest,
        question_map: &HashMap<i64, Question>,
    ) -> anyhow::Result<String> {
        let interview_type = question_map
            .values()
            .map(|q| q.title.as_str())
            .next()
            .unwrap_or("general");

        let mut summary = String::new();
        for submitted in &request.answers {
            if let Some(question) = question_map.get(&submitted.question_id) {
                summary.push_str("Q: ");
                summary.push_str(&question.question);
                summary.push('\n');
                summary.push_str("A: ");
                summary.push_str(&submitted.answer);
                summary.push_str("\n\n");
            }
        }

        self.gemini.overall_comment(interview_type, &summary).await
    }
}
