use std::sync::Arc;

use chrono::Utc;

use crate::error::ApiError;
use crate::store::catalog::{CategoryStore, CompanyStore};
use crate::store::entities::{
    difficulty_ordinal, Question, User, UserRole, INTERVIEW_TYPE_PERSONALITY,
    INTERVIEW_TYPE_TECHNICAL,
};
use crate::store::questions::QuestionStore;
use crate::store::users::UserStore;

use super::types::{QuestionCreateRequest, QuestionResponse, QuestionUpdateRequest};

pub const MAX_QUESTION_LEN: usize = 500;
pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2026;

/// Mutations on the question bank are admin-only. The role check reads the
/// store, not the token, so a demotion takes effect immediately.
pub(crate) fn require_admin(users: &UserStore, user_id: i64) -> Result<User, ApiError> {
    let user = users
        .get(user_id)
        .ok_or_else(|| ApiError::rejected("USER_NOT_FOUND", "user not found"))?;
    if user.role != UserRole::Admin {
        return Err(ApiError::AccessDenied);
    }
    Ok(user)
}

fn validate_interview_type(label: &str) -> Result<(), ApiError> {
    if label == INTERVIEW_TYPE_TECHNICAL || label == INTERVIEW_TYPE_PERSONALITY {
        Ok(())
    } else {
        Err(ApiError::rejected(
            "INVALID_INTERVIEW_TYPE",
            "interview type must be TECHNICAL or PERSONALITY",
        ))
    }
}

pub struct BankService {
    questions: Arc<QuestionStore>,
    companies: Arc<CompanyStore>,
    categories: Arc<CategoryStore>,
    users: Arc<UserStore>,
}

impl BankService {
    pub fn new(
        questions: Arc<QuestionStore>,
        companies: Arc<CompanyStore>,
        categories: Arc<CategoryStore>,
        users: Arc<UserStore>,
    ) -> Self {
        Self {
            questions,
            companies,
            categories,
            users,
        }
    }

    pub fn create_question(
        &self,
        request: &QuestionCreateRequest,
        user_id: i64,
    ) -> Result<QuestionResponse, ApiError> {
        require_admin(&self.users, user_id)?;

        let text = request.question.trim();
        if text.is_empty() {
            return Err(ApiError::rejected_field(
                "REQUIRED_FIELD_MISSING",
                "question",
                "question text is required",
            ));
        }
        if text.chars().count() > MAX_QUESTION_LEN {
            return Err(ApiError::rejected_field(
                "FIELD_TOO_LONG",
                "question",
                "question text is limited to 500 characters",
            ));
        }

        validate_interview_type(&request.interview_type)?;

        if let Some(company_id) = request.company_id {
            if !self.companies.exists(company_id) {
                return Err(ApiError::rejected(
                    "COMPANY_NOT_FOUND",
                    "referenced company does not exist",
                ));
            }
        }
        if let Some(category_id) = request.category_id {
            if !self.categories.exists(category_id) {
                return Err(ApiError::rejected(
                    "CATEGORY_NOT_FOUND",
                    "referenced category does not exist",
                ));
            }
        }

        let difficulty = match request.difficulty.as_deref() {
            Some(label) => difficulty_ordinal(label).ok_or_else(|| {
                ApiError::rejected("INVALID_DIFFICULTY", "difficulty must be EASY, MEDIUM or HARD")
            })?,
            None => 2,
        };

        if let Some(year) = request.year {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(ApiError::rejected("INVALID_YEAR", "year is out of range"));
            }
        }

        if self.questions.find_by_question_text(text).is_some() {
            return Err(ApiError::rejected(
                "DUPLICATE_QUESTION",
                "a question with the same text already exists",
            ));
        }

        let question = self.questions.create(|id| Question {
            id,
            title: request.interview_type.clone(),
            question: text.to_string(),
            content: None,
            tags: vec![],
            answer: None,
            year: request.year,
            company_id: request.company_id,
            category_id: request.category_id,
            difficulty,
            is_public: true,
            created_by: user_id,
            created_at: Utc::now(),
            updated_by: None,
            updated_at: None,
        });

        tracing::info!(id = question.id, created_by = user_id, "question created");

        Ok(to_response(&question))
    }

    pub fn update_question(
        &self,
        id: i64,
        request: &QuestionUpdateRequest,
        user_id: i64,
    ) -> Result<QuestionResponse, ApiError> {
        require_admin(&self.users, user_id)?;

        if self.questions.get(id).is_none() {
            return Err(ApiError::rejected(
                "QUESTION_NOT_FOUND",
                "question not found",
            ));
        }

        // validate everything before touching the row
        let text = match request.question.as_deref().map(str::trim) {
            Some(t) if t.is_empty() => {
                return Err(ApiError::rejected_field(
                    "REQUIRED_FIELD_MISSING",
                    "question",
                    "question text cannot be blank",
                ))
            }
            Some(t) if t.chars().count() > MAX_QUESTION_LEN => {
                return Err(ApiError::rejected_field(
                    "FIELD_TOO_LONG",
                    "question",
                    "question text is limited to 500 characters",
                ))
            }
            other => other.map(str::to_string),
        };

        let difficulty = match request.difficulty.as_deref() {
            Some(label) => Some(difficulty_ordinal(label).ok_or_else(|| {
                ApiError::rejected("INVALID_DIFFICULTY", "difficulty must be EASY, MEDIUM or HARD")
            })?),
            None => None,
        };

        if let Some(label) = request.interview_type.as_deref() {
            validate_interview_type(label)?;
        }
        if let Some(company_id) = request.company_id {
            if !self.companies.exists(company_id) {
                return Err(ApiError::rejected(
                    "COMPANY_NOT_FOUND",
                    "referenced company does not exist",
                ));
            }
        }
        if let Some(category_id) = request.category_id {
            if !self.categories.exists(category_id) {
                return Err(ApiError::rejected(
                    "CATEGORY_NOT_FOUND",
                    "referenced category does not exist",
                ));
            }
        }
        if let Some(year) = request.year {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(ApiError::rejected("INVALID_YEAR", "year is out of range"));
            }
        }

        let updated = self
            .questions
            .update(id, |q| {
                if let Some(text) = &text {
                    q.question = text.clone();
                }
                if let Some(difficulty) = difficulty {
                    q.difficulty = difficulty;
                }
                if let Some(label) = &request.interview_type {
                    q.title = label.clone();
                }
                if request.category_id.is_some() {
                    q.category_id = request.category_id;
                }
                if request.company_id.is_some() {
                    q.company_id = request.company_id;
                }
                if request.year.is_some() {
                    q.year = request.year;
                }
                q.updated_by = Some(user_id);
                q.updated_at = Some(Utc::now());
            })
            .ok_or_else(|| ApiError::rejected("QUESTION_NOT_FOUND", "question not found"))?;

        tracing::info!(id, updated_by = user_id, "question updated");

        Ok(to_response(&updated))
    }

    pub fn delete_question(&self, id: i64, user_id: i64) -> Result<(), ApiError> {
        require_admin(&self.users, user_id)?;

        self.questions
            .remove(id)
            .ok_or_else(|| ApiError::rejected("QUESTION_NOT_FOUND", "question not found"))?;

        tracing::info!(id, deleted_by = user_id, "question deleted");
        Ok(())
    }
}

fn to_response(question: &Question) -> QuestionResponse {
    QuestionResponse {
        id: question.id,
        question: question.question.clone(),
        difficulty: question.difficulty,
        year: question.year,
        company_id: question.company_id,
        category_id: question.category_id,
        created_at: question.created_at,
        created_by: question.created_by,
    }
}
