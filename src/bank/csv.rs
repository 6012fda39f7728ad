//! CSV bulk import.
//!
//! The file is validated as a whole (size, header shape, row count), then
//! row by row. Company and category names resolve through explicit per-call
//! memo maps; rows that fail validation are reported individually and do
//! not abort the rest of the import. Upsert is keyed on the question text.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use crate::error::ApiError;
use crate::store::catalog::{CategoryStore, CompanyStore};
use crate::store::entities::{difficulty_ordinal, Question, INTERVIEW_TYPE_TECHNICAL};
use crate::store::questions::QuestionStore;
use crate::store::users::UserStore;

use super::service::require_admin;
use super::types::{CsvRowError, CsvSummary, CsvUploadResponse};

const VALID_HEADERS: [&str; 3] = [
    "question,title,difficulty,year,company_name,category_name",
    "question,difficulty,year,company_name,category_name",
    "question,difficulty,year",
];

const MAX_CSV_QUESTION_LEN: usize = 200;

#[derive(Debug, Clone)]
pub struct CsvLimits {
    pub max_bytes: usize,
    pub max_rows: usize,
    pub upsert_key: String,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    question: Option<String>,
    title: Option<String>,
    difficulty: Option<String>,
    year: Option<String>,
    company_name: Option<String>,
    category_name: Option<String>,
}

/// The validated, resolved form of one row, ready to upsert.
struct ParsedRow {
    question: String,
    title: String,
    difficulty: i32,
    year: Option<i32>,
    company_id: Option<i64>,
    category_id: Option<i64>,
}

pub struct CsvImporter {
    questions: Arc<QuestionStore>,
    companies: Arc<CompanyStore>,
    categories: Arc<CategoryStore>,
    users: Arc<UserStore>,
    limits: CsvLimits,
}

impl CsvImporter {
    pub fn new(
        questions: Arc<QuestionStore>,
        companies: Arc<CompanyStore>,
        categories: Arc<CategoryStore>,
        users: Arc<UserStore>,
        limits: CsvLimits,
    ) -> Self {
        Self {
            questions,
            companies,
            categories,
            users,
            limits,
        }
    }

    pub fn process(
        &self,
        data: &[u8],
        dry_run: bool,
        user_id: i64,
    ) -> Result<CsvUploadResponse, ApiError> {
        require_admin(&self.users, user_id)?;

        if data.is_empty() {
            return Err(ApiError::rejected("EMPTY_FILE", "the uploaded file is empty"));
        }
        if data.len() > self.limits.max_bytes {
            return Err(ApiError::rejected(
                "FILE_SIZE_EXCEEDED",
                "the uploaded file exceeds the size limit",
            ));
        }

        let text = std::str::from_utf8(data)
            .map_err(|_| ApiError::rejected("INVALID_CSV_FORMAT", "the file is not valid UTF-8"))?;
        validate_header(text)?;

        let rows = parse_rows(text)?;
        if rows.len() > self.limits.max_rows {
            return Err(ApiError::rejected(
                "TOO_MANY_ROWS",
                format!(
                    "at most {} rows are allowed, got {}",
                    self.limits.max_rows,
                    rows.len()
                ),
            ));
        }

        Ok(self.process_rows(rows, dry_run, user_id))
    }

    fn process_rows(&self, rows: Vec<CsvRow>, dry_run: bool, user_id: i64) -> CsvUploadResponse {
        let mut errors = Vec::new();
        let mut created = 0usize;
        let mut updated = 0usize;
        let mut skipped = 0usize;

        // per-call memoization for name lookups; never a static cache
        let mut company_memo: HashMap<String, i64> = HashMap::new();
        let mut category_memo: HashMap<String, i64> = HashMap::new();

        // prefetch the existing rows for the upsert key in one scan
        let mut existing: HashMap<String, Question> = HashMap::new();
        if !dry_run && self.limits.upsert_key == "question" {
            let texts: Vec<String> = rows
                .iter()
                .filter_map(|r| r.question.as_deref())
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
            if !texts.is_empty() {
                for question in self.questions.find_all_by_question_in(&texts) {
                    existing.insert(question.question.clone(), question);
                }
            }
        }

        let total_rows = rows.len();
        for (i, row) in rows.into_iter().enumerate() {
            // header is line 1, so data rows start at 2
            let row_number = i + 2;
            let parsed = validate_row(&row)
                .and_then(|_| self.convert_row(&row, &mut company_memo, &mut category_memo));

            match parsed {
                Ok(parsed) => {
                    if dry_run {
                        created += 1;
                        continue;
                    }
                    match existing.get(&parsed.question) {
                        Some(current) => {
                            self.questions.update(current.id, |q| {
                                q.question = parsed.question.clone();
                                q.title = parsed.title.clone();
                                q.difficulty = parsed.difficulty;
                                q.year = parsed.year;
                                q.company_id = parsed.company_id;
                                q.category_id = parsed.category_id;
                                q.is_public = true;
                                q.updated_by = Some(user_id);
                                q.updated_at = Some(Utc::now());
                            });
                            updated += 1;
                        }
                        None => {
                            self.questions.create(|id| Question {
                                id,
                                title: parsed.title.clone(),
                                question: parsed.question.clone(),
                                content: None,
                                tags: vec![],
                                answer: None,
                                year: parsed.year,
                                company_id: parsed.company_id,
                                category_id: parsed.category_id,
                                difficulty: parsed.difficulty,
                                // bulk-imported questions are public
                                is_public: true,
                                created_by: user_id,
                                created_at: Utc::now(),
                                updated_by: None,
                                updated_at: None,
                            });
                            created += 1;
                        }
                    }
                }
                Err(e) => {
                    errors.push(CsvRowError {
                        row: row_number,
                        code: e.code().to_string(),
                        field: e.field().map(str::to_string),
                        message: e.to_string(),
                    });
                    skipped += 1;
                }
            }
        }

        tracing::info!(total_rows, created, updated, skipped, dry_run, "csv import finished");

        CsvUploadResponse {
            summary: CsvSummary {
                total_rows,
                created: if dry_run { 0 } else { created },
                updated: if dry_run { 0 } else { updated },
                skipped,
                dry_run,
                upsert_key: self.limits.upsert_key.clone(),
            },
            errors,
        }
    }

    fn convert_row(
        &self,
        row: &CsvRow,
        company_memo: &mut HashMap<String, i64>,
        category_memo: &mut HashMap<String, i64>,
    ) -> Result<ParsedRow, ApiError> {
        let question = row.question.as_deref().unwrap_or("").trim().to_string();

        let title = match row.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => INTERVIEW_TYPE_TECHNICAL.to_string(),
        };

        let difficulty = match row.difficulty.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => {
                let upper = label.to_uppercase();
                difficulty_ordinal(&upper)
                    .or_else(|| upper.parse::<i32>().ok().filter(|d| (1..=3).contains(d)))
                    .unwrap_or(2)
            }
            _ => 2,
        };

        let year = match row.year.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(raw.parse::<i32>().map_err(|_| {
                ApiError::rejected_field("INVALID_YEAR_FORMAT", "year", "year must be an integer")
            })?),
            _ => None,
        };

        let company_id = match row.company_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(self.resolve_company(name, company_memo)?),
            _ => None,
        };
        let category_id = match row.category_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(self.resolve_category(name, category_memo)?),
            _ => None,
        };

        Ok(ParsedRow {
            question,
            title,
            difficulty,
            year,
            company_id,
            category_id,
        })
    }

    fn resolve_company(
        &self,
        name: &str,
        memo: &mut HashMap<String, i64>,
    ) -> Result<i64, ApiError> {
        if let Some(id) = memo.get(name) {
            return Ok(*id);
        }
        let company = self.companies.find_by_name(name).ok_or_else(|| {
            ApiError::rejected_field("COMPANY_NOT_FOUND", "company_name", "company not found")
        })?;
        memo.insert(name.to_string(), company.id);
        Ok(company.id)
    }

    fn resolve_category(
        &self,
        name: &str,
        memo: &mut HashMap<String, i64>,
    ) -> Result<i64, ApiError> {
        if let Some(id) = memo.get(name) {
            return Ok(*id);
        }
        let category = self.categories.find_by_name(name).ok_or_else(|| {
            ApiError::rejected_field("CATEGORY_NOT_FOUND", "category_name", "category not found")
        })?;
        memo.insert(name.to_string(), category.id);
        Ok(category.id)
    }
}

fn validate_header(text: &str) -> Result<(), ApiError> {
    let header_line = text.lines().next().unwrap_or("").trim();
    let normalized: Vec<String> = header_line
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .collect();
    let joined = normalized.join(",");
    if !VALID_HEADERS.contains(&joined.as_str()) {
        return Err(ApiError::rejected(
            "HEADER_MISMATCH",
            "the CSV header does not match the import template",
        ));
    }
    Ok(())
}

fn parse_rows(text: &str) -> Result<Vec<CsvRow>, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        let row = result
            .map_err(|_| ApiError::rejected("INVALID_CSV_FORMAT", "the CSV body is malformed"))?;
        rows.push(row);
    }
    Ok(rows)
}

fn validate_row(row: &CsvRow) -> Result<(), ApiError> {
    let question = row.question.as_deref().unwrap_or("").trim();
    if question.is_empty() {
        return Err(ApiError::rejected_field(
            "REQUIRED_FIELD_MISSING",
            "question",
            "question text is required",
        ));
    }
    if question.chars().count() > MAX_CSV_QUESTION_LEN {
        return Err(ApiError::rejected_field(
            "FIELD_TOO_LONG",
            "question",
            "question text is limited to 200 characters",
        ));
    }

    if let Some(label) = row.difficulty.as_deref().map(str::trim) {
        if !label.is_empty() {
            let upper = label.to_uppercase();
            let numeric = upper.parse::<i32>().is_ok();
            if difficulty_ordinal(&upper).is_none() && !numeric {
                return Err(ApiError::rejected_field(
                    "INVALID_DIFFICULTY_LABEL",
                    "difficulty",
                    "allowed labels are EASY, MEDIUM and HARD",
                ));
            }
        }
    }

    if let Some(raw) = row.year.as_deref().map(str::trim) {
        if !raw.is_empty() && raw.parse::<i32>().is_err() {
            return Err(ApiError::rejected_field(
                "INVALID_YEAR_FORMAT",
                "year",
                "year must be an integer",
            ));
        }
    }

    Ok(())
}

/// A downloadable template matching the widest accepted header set.
pub fn sample_csv() -> String {
    let mut csv = String::new();
    csv.push_str("question,title,difficulty,year,company_name,category_name\n");
    csv.push_str("\"What is the difference between a HashMap and a TreeMap?\",TECHNICAL,MEDIUM,2024,Acme,Backend\n");
    csv.push_str("\"Why would you reach for useState in React?\",TECHNICAL,EASY,2024,Globex,Frontend\n");
    csv.push_str("\"Explain the trade-offs of database indexes\",TECHNICAL,HARD,2023,Initech,Database\n");
    csv
}
