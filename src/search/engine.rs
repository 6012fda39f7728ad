//! Query orchestration, scoring, merging, and pagination.
//!
//! The single-kind question path paginates natively in the store. The
//! in-memory path (multiple result kinds, or relevance sort with a text
//! query) fetches a per-kind prefix, scores it, merges in a fixed kind
//! order, and slices the requested page.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::error::ApiError;
use crate::store::catalog::{CategoryStore, CompanyStore};
use crate::store::entities::{difficulty_label, Question, User, UserRole};
use crate::store::questions::{QuestionOrder, QuestionStore};
use crate::store::users::UserStore;

use super::facets;
use super::filters::{self, ResultKind, SortOrder};
use super::types::{
    HitBody, QueryEcho, QuestionHit, SearchHit, SearchRequest, SearchResponse, UserHit,
};

const SNIPPET_LEN: usize = 160;

pub struct SearchEngine {
    questions: Arc<QuestionStore>,
    users: Arc<UserStore>,
    companies: Arc<CompanyStore>,
    categories: Arc<CategoryStore>,
}

impl SearchEngine {
    pub fn new(
        questions: Arc<QuestionStore>,
        users: Arc<UserStore>,
        companies: Arc<CompanyStore>,
        categories: Arc<CategoryStore>,
    ) -> Self {
        Self {
            questions,
            users,
            companies,
            categories,
        }
    }

    pub fn search(
        &self,
        req: &SearchRequest,
        requester: i64,
    ) -> Result<SearchResponse, ApiError> {
        let started = Instant::now();

        let (sort, kinds, difficulty) = filters::validate(req)?;
        let company =
            filters::resolve_company(req.company_id, req.company_name.as_deref(), &self.companies);
        let category = filters::resolve_category(
            req.category_id,
            req.category_name.as_deref(),
            &self.categories,
        );

        // Facets are reference counts over the whole dataset, independent of
        // the active filter set.
        let facets = facets::compute(
            &self.questions,
            &self.users,
            &self.companies,
            &self.categories,
        );

        let echo = QueryEcho {
            q: req.q.clone(),
            sort: req.sort.clone(),
            year: req.year,
            company_id: company.id(),
            company_name: company
                .name()
                .map(str::to_string)
                .or_else(|| req.company_name.as_deref().map(|n| n.trim().to_string())),
            category_id: category.id(),
            interview_type: req
                .interview_type
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        };

        // A name that matches no entity is a valid "no results" outcome.
        if company.is_miss() || category.is_miss() {
            tracing::debug!("filter name matched no entity, returning empty result set");
            return Ok(SearchResponse {
                query: echo,
                page: req.page,
                size: req.size,
                total: 0,
                took_ms: started.elapsed().as_millis() as u64,
                results: Vec::new(),
                facets,
            });
        }

        let filter = filters::build_filter(req, difficulty, &company, &category, requester);
        let query_text = filter.text.clone().unwrap_or_default();

        let question_only = kinds == [ResultKind::Question];
        let needs_ranking =
            !question_only || (sort == SortOrder::Relevance && !query_text.is_empty());

        let page = req.page as usize;
        let size = req.size as usize;
        let now = Utc::now();

        let (results, total) = if !needs_ranking {
            let (rows, total) = self.questions.find_filtered(
                &filter,
                store_order(sort),
                (page - 1) * size,
                size,
            );
            let hits = rows
                .iter()
                .map(|q| self.question_hit(q, &query_text, sort, req.highlight, now))
                .collect();
            (hits, total)
        } else {
            // Each kind contributes its first page*size rows in store order;
            // scoring and slicing happen within that prefix.
            let prefix = page * size;
            let mut hits: Vec<SearchHit> = Vec::new();
            let mut total = 0u64;

            if kinds.contains(&ResultKind::Question) {
                let (rows, question_total) =
                    self.questions
                        .find_filtered(&filter, store_order(sort), 0, prefix);
                total += question_total;
                hits.extend(
                    rows.iter()
                        .map(|q| self.question_hit(q, &query_text, sort, req.highlight, now)),
                );
            }
            if kinds.contains(&ResultKind::User) {
                let (rows, user_total) = self.users.search_by_name(&query_text, prefix);
                total += user_total;
                hits.extend(rows.iter().map(user_hit));
            }

            if sort == SortOrder::Relevance {
                hits.sort_by(compare_by_score);
            }

            let start = (page - 1) * size;
            let sliced = if start >= hits.len() {
                Vec::new()
            } else {
                let end = (start + size).min(hits.len());
                hits[start..end].to_vec()
            };
            (sliced, total)
        };

        tracing::debug!(
            total,
            results = results.len(),
            "search completed in {}ms",
            started.elapsed().as_millis()
        );

        Ok(SearchResponse {
            query: echo,
            page: req.page,
            size: req.size,
            total,
            took_ms: started.elapsed().as_millis() as u64,
            results,
            facets,
        })
    }

    fn question_hit(
        &self,
        q: &Question,
        query: &str,
        sort: SortOrder,
        highlight: bool,
        now: DateTime<Utc>,
    ) -> SearchHit {
        let company_name = q
            .company_id
            .and_then(|id| self.companies.get(id))
            .map(|c| c.name);
        let category_name = q
            .category_id
            .and_then(|id| self.categories.get(id))
            .map(|c| c.name);
        let snippet_source = q.content.as_deref().unwrap_or(&q.question);

        SearchHit {
            body: HitBody::Question(QuestionHit {
                id: q.id,
                question: q.question.clone(),
                year: q.year,
                company_id: q.company_id,
                company_name,
                category_id: q.category_id,
                category_name,
                interview_type: q.title.clone(),
                difficulty: q.difficulty,
                difficulty_label: difficulty_label(q.difficulty).map(str::to_string),
                created_at: q.created_at,
            }),
            score: score_question(q, query, sort, now),
            snippet: Some(make_snippet(snippet_source, query, highlight)),
        }
    }
}

fn store_order(sort: SortOrder) -> QuestionOrder {
    match sort {
        SortOrder::Newest => QuestionOrder::CreatedDesc,
        SortOrder::Oldest => QuestionOrder::CreatedAsc,
        // no popularity metric exists; fall back to id descending
        SortOrder::Popularity => QuestionOrder::IdDesc,
        SortOrder::Relevance => QuestionOrder::CreatedDesc,
    }
}

/// Score descending, then created-at descending, then id descending. The
/// trailing keys make equal-score orderings reproducible across calls.
fn compare_by_score(a: &SearchHit, b: &SearchHit) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.created_at().cmp(&a.created_at()))
        .then_with(|| b.id().cmp(&a.id()))
}

/// Base 1.0, +10.0 when the query appears in the searchable fields, plus a
/// recency bonus of 0.1 per day under 30 when sorting by `new`.
pub(crate) fn score_question(
    q: &Question,
    query: &str,
    sort: SortOrder,
    now: DateTime<Utc>,
) -> f64 {
    let mut score = 1.0;
    if !query.is_empty() {
        let haystack = format!(
            "{} {} {}",
            q.title,
            q.question,
            q.content.as_deref().unwrap_or("")
        )
        .to_lowercase();
        if haystack.contains(&query.to_lowercase()) {
            score += 10.0;
        }
    }
    if sort == SortOrder::Newest {
        let days = (now - q.created_at).num_days();
        score += (30 - days).max(0) as f64 * 0.1;
    }
    score
}

/// Base 1.0 with a flat +5.0 boost for admin accounts.
pub(crate) fn score_user(u: &User) -> f64 {
    let mut score = 1.0;
    if u.role == UserRole::Admin {
        score += 5.0;
    }
    score
}

fn user_hit(u: &User) -> SearchHit {
    SearchHit {
        body: HitBody::User(UserHit {
            id: u.user_id,
            username: u.username.clone(),
            display_name: u.display_name.clone(),
            email: u.email.clone(),
            role: u.role,
            created_at: u.created_at,
        }),
        score: score_user(u),
        snippet: None,
    }
}

/// A fixed-width character window over the source text, centered near the
/// first case-insensitive match when one exists.
pub(crate) fn make_snippet(source: &str, query: &str, highlight: bool) -> String {
    let needle = query.to_lowercase();
    let start_char = if needle.is_empty() {
        0
    } else {
        let lower = source.to_lowercase();
        match lower.find(&needle) {
            Some(byte_idx) => lower[..byte_idx].chars().count().saturating_sub(40),
            None => 0,
        }
    };
    let window: String = source.chars().skip(start_char).take(SNIPPET_LEN).collect();
    if highlight && !needle.is_empty() {
        highlight_matches(&window, query)
    } else {
        window
    }
}

fn highlight_matches(text: &str, query: &str) -> String {
    match Regex::new(&format!("(?i){}", regex::escape(query))) {
        Ok(re) => re.replace_all(text, "<em>$0</em>").into_owned(),
        Err(_) => text.to_string(),
    }
}
