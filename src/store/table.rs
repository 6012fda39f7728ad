use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// A concurrent, id-keyed table with auto-incrementing primary keys.
///
/// All reads clone the stored row, so iteration never holds a shard lock
/// across caller code. Ids start at 1 and are never reused within a process.
pub struct Table<T> {
    rows: DashMap<i64, T>,
    next_id: AtomicI64,
}

impl<T: Clone> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn insert_with(&self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    pub fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).map(|entry| entry.value().clone())
    }

    pub fn update(&self, id: i64, apply: impl FnOnce(&mut T)) -> Option<T> {
        self.rows.get_mut(&id).map(|mut entry| {
            apply(entry.value_mut());
            entry.value().clone()
        })
    }

    pub fn remove(&self, id: i64) -> Option<T> {
        self.rows.remove(&id).map(|(_, row)| row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Clones every row out of the table. Search and facet counting operate
    /// on these snapshots so they see a consistent point-in-time view.
    pub fn snapshot(&self) -> Vec<T> {
        self.rows.iter().map(|entry| entry.value().clone()).collect()
    }
}

impl<T: Clone> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let table: Table<String> = Table::new();
        let a = table.insert_with(|id| format!("row-{}", id));
        let b = table.insert_with(|id| format!("row-{}", id));
        assert_eq!(a, "row-1");
        assert_eq!(b, "row-2");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_remove_does_not_reuse_ids() {
        let table: Table<u32> = Table::new();
        table.insert_with(|_| 10);
        table.remove(1);
        table.insert_with(|_| 20);
        assert!(table.get(1).is_none());
        assert_eq!(table.get(2), Some(20));
    }

    #[test]
    fn test_update_returns_new_value() {
        let table: Table<u32> = Table::new();
        table.insert_with(|_| 1);
        let updated = table.update(1, |v| *v = 99);
        assert_eq!(updated, Some(99));
        assert_eq!(table.get(1), Some(99));
    }
}
