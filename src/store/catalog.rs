//! Company and category lookup stores.
//!
//! Both names are unique; filter normalization resolves a user-supplied name
//! to the canonical id through these lookups.

use super::entities::{Category, Company};
use super::table::Table;
use chrono::Utc;

pub struct CompanyStore {
    table: Table<Company>,
}

impl CompanyStore {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }

    /// Inserts a company unless the name already exists, in which case the
    /// existing row is returned. Keeps the unique-name invariant.
    pub fn create(&self, name: &str) -> Company {
        if let Some(existing) = self.find_by_name(name) {
            return existing;
        }
        self.table.insert_with(|id| Company {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
        })
    }

    pub fn get(&self, id: i64) -> Option<Company> {
        self.table.get(id)
    }

    pub fn exists(&self, id: i64) -> bool {
        self.table.get(id).is_some()
    }

    pub fn find_by_name(&self, name: &str) -> Option<Company> {
        self.table.snapshot().into_iter().find(|c| c.name == name)
    }

    pub fn find_by_name_containing(&self, fragment: &str) -> Vec<Company> {
        let needle = fragment.to_lowercase();
        self.table
            .snapshot()
            .into_iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect()
    }
}

impl Default for CompanyStore {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CategoryStore {
    table: Table<Category>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }

    pub fn create(&self, name: &str) -> Category {
        if let Some(existing) = self.find_by_name(name) {
            return existing;
        }
        self.table.insert_with(|id| Category {
            id,
            name: name.to_string(),
        })
    }

    pub fn get(&self, id: i64) -> Option<Category> {
        self.table.get(id)
    }

    pub fn exists(&self, id: i64) -> bool {
        self.table.get(id).is_some()
    }

    pub fn find_by_name(&self, name: &str) -> Option<Category> {
        self.table.snapshot().into_iter().find(|c| c.name == name)
    }

    /// Every configured category, id order. Facets report all of them even
    /// when a count is zero.
    pub fn all(&self) -> Vec<Category> {
        let mut rows = self.table.snapshot();
        rows.sort_by_key(|c| c.id);
        rows
    }
}

impl Default for CategoryStore {
    fn default() -> Self {
        Self::new()
    }
}
