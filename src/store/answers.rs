use super::entities::AnswerRecord;
use super::table::Table;

pub struct AnswerStore {
    table: Table<AnswerRecord>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }

    pub fn record(&self, build: impl FnOnce(i64) -> AnswerRecord) -> AnswerRecord {
        self.table.insert_with(build)
    }

    pub fn by_user(&self, user_id: i64) -> Vec<AnswerRecord> {
        let mut rows: Vec<AnswerRecord> = self
            .table
            .snapshot()
            .into_iter()
            .filter(|a| a.user_id == user_id)
            .collect();
        rows.sort_by_key(|a| a.id);
        rows
    }

    pub fn count(&self) -> u64 {
        self.table.len() as u64
    }
}

impl Default for AnswerStore {
    fn default() -> Self {
        Self::new()
    }
}
