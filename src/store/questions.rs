use super::entities::Question;
use super::table::Table;
use rand::seq::SliceRandom;
use std::cmp::Ordering;
use std::collections::HashSet;

/// The conjunctive predicate set for a question query. Every field is
/// optional except `requester`: the visibility rule
/// (`is_public || created_by == requester`) is always applied.
#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    pub text: Option<String>,
    pub difficulty: Option<i32>,
    pub year: Option<i32>,
    pub company_id: Option<i64>,
    pub category_id: Option<i64>,
    pub interview_type: Option<String>,
    pub requester: i64,
}

impl QuestionFilter {
    pub fn for_requester(requester: i64) -> Self {
        Self {
            requester,
            ..Default::default()
        }
    }

    fn matches(&self, q: &Question) -> bool {
        if !(q.is_public || q.created_by == self.requester) {
            return false;
        }
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            let in_question = q.question.to_lowercase().contains(&needle);
            let in_content = q
                .content
                .as_deref()
                .map(|c| c.to_lowercase().contains(&needle))
                .unwrap_or(false);
            let in_title = q.title.to_lowercase().contains(&needle);
            if !(in_question || in_content || in_title) {
                return false;
            }
        }
        if let Some(difficulty) = self.difficulty {
            if q.difficulty != difficulty {
                return false;
            }
        }
        if let Some(year) = self.year {
            if q.year != Some(year) {
                return false;
            }
        }
        if let Some(company_id) = self.company_id {
            if q.company_id != Some(company_id) {
                return false;
            }
        }
        if let Some(category_id) = self.category_id {
            if q.category_id != Some(category_id) {
                return false;
            }
        }
        if let Some(interview_type) = &self.interview_type {
            if q.title != *interview_type {
                return false;
            }
        }
        true
    }
}

/// Store-level orderings. Each carries its id tie-break so pagination is
/// stable even when many rows share a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionOrder {
    CreatedDesc,
    CreatedAsc,
    IdDesc,
}

impl QuestionOrder {
    fn compare(self, a: &Question, b: &Question) -> Ordering {
        match self {
            QuestionOrder::CreatedDesc => b
                .created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id)),
            QuestionOrder::CreatedAsc => a
                .created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id)),
            QuestionOrder::IdDesc => b.id.cmp(&a.id),
        }
    }
}

pub struct QuestionStore {
    table: Table<Question>,
}

impl QuestionStore {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }

    pub fn create(&self, build: impl FnOnce(i64) -> Question) -> Question {
        self.table.insert_with(build)
    }

    pub fn get(&self, id: i64) -> Option<Question> {
        self.table.get(id)
    }

    pub fn update(&self, id: i64, apply: impl FnOnce(&mut Question)) -> Option<Question> {
        self.table.update(id, apply)
    }

    pub fn remove(&self, id: i64) -> Option<Question> {
        self.table.remove(id)
    }

    pub fn count(&self) -> u64 {
        self.table.len() as u64
    }

    /// Evaluates the whole predicate set in one pass, sorts, and slices.
    /// Returns the requested window plus the total match count.
    pub fn find_filtered(
        &self,
        filter: &QuestionFilter,
        order: QuestionOrder,
        offset: usize,
        limit: usize,
    ) -> (Vec<Question>, u64) {
        let mut rows: Vec<Question> = self
            .table
            .snapshot()
            .into_iter()
            .filter(|q| filter.matches(q))
            .collect();
        let total = rows.len() as u64;
        rows.sort_by(|a, b| order.compare(a, b));
        let page = rows.into_iter().skip(offset).take(limit).collect();
        (page, total)
    }

    pub fn find_by_question_text(&self, text: &str) -> Option<Question> {
        self.table
            .snapshot()
            .into_iter()
            .find(|q| q.question == text)
    }

    /// Batch lookup used by the CSV upsert path.
    pub fn find_all_by_question_in(&self, texts: &[String]) -> Vec<Question> {
        let wanted: HashSet<&str> = texts.iter().map(|t| t.as_str()).collect();
        self.table
            .snapshot()
            .into_iter()
            .filter(|q| wanted.contains(q.question.as_str()))
            .collect()
    }

    /// Draws up to `limit` random public questions matching the optional
    /// category/company filters.
    pub fn random_public(
        &self,
        category_id: Option<i64>,
        company_id: Option<i64>,
        limit: usize,
    ) -> Vec<Question> {
        let mut rows: Vec<Question> = self
            .table
            .snapshot()
            .into_iter()
            .filter(|q| {
                q.is_public
                    && category_id.map_or(true, |c| q.category_id == Some(c))
                    && company_id.map_or(true, |c| q.company_id == Some(c))
            })
            .collect();
        rows.shuffle(&mut rand::thread_rng());
        rows.truncate(limit);
        rows
    }

    // --- facet helpers: one small count per distinct value ---

    pub fn count_by_difficulty(&self, difficulty: i32) -> u64 {
        self.count_where(|q| q.difficulty == difficulty)
    }

    pub fn count_by_year(&self, year: i32) -> u64 {
        self.count_where(|q| q.year == Some(year))
    }

    pub fn count_by_company(&self, company_id: i64) -> u64 {
        self.count_where(|q| q.company_id == Some(company_id))
    }

    pub fn count_by_category(&self, category_id: i64) -> u64 {
        self.count_where(|q| q.category_id == Some(category_id))
    }

    pub fn count_by_interview_type(&self, interview_type: &str) -> u64 {
        self.count_where(|q| q.title == interview_type)
    }

    fn count_where(&self, pred: impl Fn(&Question) -> bool) -> u64 {
        self.table.snapshot().iter().filter(|q| pred(q)).count() as u64
    }

    /// Distinct years present, newest first.
    pub fn distinct_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self
            .table
            .snapshot()
            .into_iter()
            .filter_map(|q| q.year)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years
    }

    pub fn distinct_company_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self
            .table
            .snapshot()
            .into_iter()
            .filter_map(|q| q.company_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn distinct_interview_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .table
            .snapshot()
            .into_iter()
            .map(|q| q.title)
            .filter(|t| !t.is_empty())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        names.sort_unstable();
        names
    }
}

impl Default for QuestionStore {
    fn default() -> Self {
        Self::new()
    }
}
