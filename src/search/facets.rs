//! Facet aggregation.
//!
//! Counts are computed over the unfiltered dataset so the UI can show stable
//! reference counts next to each filter option. One small count query runs
//! per distinct value; dimensions are independent of each other and of the
//! primary filtered query.

use crate::store::catalog::{CategoryStore, CompanyStore};
use crate::store::questions::QuestionStore;
use crate::store::users::UserStore;

use super::types::{
    CategoryBucket, CompanyBucket, DifficultyBuckets, Facets, InterviewTypeBucket, TypeBuckets,
    YearBucket,
};

pub fn compute(
    questions: &QuestionStore,
    users: &UserStore,
    companies: &CompanyStore,
    categories: &CategoryStore,
) -> Facets {
    let year = questions
        .distinct_years()
        .into_iter()
        .map(|value| YearBucket {
            value,
            count: questions.count_by_year(value),
        })
        .collect();

    // distinct ids come from the question rows; names resolve through the
    // company store. A dangling id (deleted company) is skipped.
    let company = questions
        .distinct_company_ids()
        .into_iter()
        .filter_map(|id| {
            companies.get(id).map(|c| CompanyBucket {
                id,
                name: c.name,
                count: questions.count_by_company(id),
            })
        })
        .collect();

    // every configured category appears, zero counts included
    let category = categories
        .all()
        .into_iter()
        .map(|c| CategoryBucket {
            count: questions.count_by_category(c.id),
            id: c.id,
            name: c.name,
        })
        .collect();

    let interview_type = questions
        .distinct_interview_types()
        .into_iter()
        .map(|name| InterviewTypeBucket {
            count: questions.count_by_interview_type(&name),
            name,
        })
        .collect();

    let difficulty = DifficultyBuckets {
        easy: questions.count_by_difficulty(1),
        medium: questions.count_by_difficulty(2),
        hard: questions.count_by_difficulty(3),
    };

    let types = TypeBuckets {
        question: questions.count(),
        user: users.count(),
    };

    Facets {
        year,
        company,
        category,
        interview_type,
        difficulty,
        types,
    }
}
