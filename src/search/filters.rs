//! Request validation and filter normalization.
//!
//! Everything here runs before the store is touched: unknown tokens and
//! out-of-range values are rejected with stable error codes, and the
//! company/category references are resolved to their canonical id form.

use crate::error::ApiError;
use crate::store::catalog::{CategoryStore, CompanyStore};
use crate::store::entities::difficulty_ordinal;
use crate::store::questions::QuestionFilter;

use super::types::SearchRequest;

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2026;
pub const MAX_QUERY_LEN: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Relevance,
    Newest,
    Oldest,
    Popularity,
}

impl SortOrder {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "rel" => Some(SortOrder::Relevance),
            "new" => Some(SortOrder::Newest),
            "old" => Some(SortOrder::Oldest),
            "pop" => Some(SortOrder::Popularity),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Question,
    User,
}

impl ResultKind {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "question" => Some(ResultKind::Question),
            "user" => Some(ResultKind::User),
            _ => None,
        }
    }
}

/// Validates the request and returns the parsed sort order, result kinds,
/// and difficulty ordinal. Rejections never reach the store.
pub fn validate(
    req: &SearchRequest,
) -> Result<(SortOrder, Vec<ResultKind>, Option<i32>), ApiError> {
    if req.page < 1 {
        return Err(ApiError::rejected("INVALID_PAGE", "page must be at least 1"));
    }
    if req.size < 1 || req.size > 100 {
        return Err(ApiError::rejected(
            "INVALID_SIZE",
            "size must be between 1 and 100",
        ));
    }
    if req.q.chars().count() > MAX_QUERY_LEN {
        return Err(ApiError::rejected(
            "INVALID_QUERY",
            "query must be at most 200 characters",
        ));
    }

    let sort = SortOrder::parse(&req.sort)
        .ok_or_else(|| ApiError::rejected("INVALID_SORT", "unknown sort option"))?;

    let mut kinds = Vec::new();
    for token in &req.types {
        let kind = ResultKind::parse(token).ok_or_else(|| {
            ApiError::rejected("INVALID_TYPE", format!("unknown result type: {}", token))
        })?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    if kinds.is_empty() {
        kinds = vec![ResultKind::Question, ResultKind::User];
    }

    let difficulty = match req.difficulty.as_deref() {
        Some(label) => Some(
            difficulty_ordinal(label)
                .ok_or_else(|| ApiError::rejected("INVALID_DIFFICULTY", "unknown difficulty"))?,
        ),
        None => None,
    };

    if let Some(category_id) = req.category_id {
        if category_id < 1 {
            return Err(ApiError::rejected(
                "INVALID_CATEGORY_ID",
                "category id must be at least 1",
            ));
        }
    }
    if let Some(company_id) = req.company_id {
        if company_id < 1 {
            return Err(ApiError::rejected(
                "INVALID_COMPANY_ID",
                "company id must be at least 1",
            ));
        }
    }
    if let Some(year) = req.year {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ApiError::rejected(
                "INVALID_YEAR",
                format!("year must be between {} and {}", MIN_YEAR, MAX_YEAR),
            ));
        }
    }

    Ok((sort, kinds, difficulty))
}

/// The canonical form of an entity reference after normalization.
///
/// A `Miss` means the caller filtered by a name that matches nothing: the
/// search must produce an empty result set, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityFilter {
    Absent,
    Canonical { id: i64, name: Option<String> },
    Miss,
}

impl EntityFilter {
    pub fn is_miss(&self) -> bool {
        matches!(self, EntityFilter::Miss)
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            EntityFilter::Canonical { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            EntityFilter::Canonical { name, .. } => name.as_deref(),
            _ => None,
        }
    }
}

fn trimmed(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|n| !n.is_empty())
}

/// An id is authoritative; the name lookup only feeds the response echo.
/// A name alone is resolved through the store, and a lookup miss is data.
pub fn resolve_company(
    company_id: Option<i64>,
    company_name: Option<&str>,
    companies: &CompanyStore,
) -> EntityFilter {
    if let Some(id) = company_id {
        let name = companies.get(id).map(|c| c.name);
        return EntityFilter::Canonical { id, name };
    }
    match trimmed(company_name) {
        Some(name) => match companies.find_by_name(name) {
            Some(company) => EntityFilter::Canonical {
                id: company.id,
                name: Some(company.name),
            },
            None => EntityFilter::Miss,
        },
        None => EntityFilter::Absent,
    }
}

pub fn resolve_category(
    category_id: Option<i64>,
    category_name: Option<&str>,
    categories: &CategoryStore,
) -> EntityFilter {
    if let Some(id) = category_id {
        let name = categories.get(id).map(|c| c.name);
        return EntityFilter::Canonical { id, name };
    }
    match trimmed(category_name) {
        Some(name) => match categories.find_by_name(name) {
            Some(category) => EntityFilter::Canonical {
                id: category.id,
                name: Some(category.name),
            },
            None => EntityFilter::Miss,
        },
        None => EntityFilter::Absent,
    }
}

/// Builds the store-level predicate set from the validated, normalized
/// request. Blank text and interview-type strings collapse to "no filter".
pub fn build_filter(
    req: &SearchRequest,
    difficulty: Option<i32>,
    company: &EntityFilter,
    category: &EntityFilter,
    requester: i64,
) -> QuestionFilter {
    let text = {
        let trimmed = req.q.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    };
    let interview_type = trimmed(req.interview_type.as_deref()).map(str::to_string);

    QuestionFilter {
        text,
        difficulty,
        year: req.year,
        company_id: company.id(),
        category_id: category.id(),
        interview_type,
        requester,
    }
}
