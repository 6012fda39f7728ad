use super::entities::User;
use super::table::Table;
use std::cmp::Ordering;

pub struct UserStore {
    table: Table<User>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }

    pub fn create(&self, build: impl FnOnce(i64) -> User) -> User {
        self.table.insert_with(build)
    }

    pub fn get(&self, user_id: i64) -> Option<User> {
        self.table.get(user_id)
    }

    pub fn update(&self, user_id: i64, apply: impl FnOnce(&mut User)) -> Option<User> {
        self.table.update(user_id, apply)
    }

    pub fn count(&self) -> u64 {
        self.table.len() as u64
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.table.snapshot().into_iter().find(|u| u.email == email)
    }

    pub fn find_by_oauth(&self, provider: &str, oauth_id: &str) -> Option<User> {
        self.table
            .snapshot()
            .into_iter()
            .find(|u| u.oauth_provider == provider && u.oauth_id == oauth_id)
    }

    /// Case-insensitive substring search over username and display name,
    /// newest accounts first with an id tie-break. Returns the first `limit`
    /// rows plus the total match count.
    pub fn search_by_name(&self, fragment: &str, limit: usize) -> (Vec<User>, u64) {
        let needle = fragment.to_lowercase();
        let mut rows: Vec<User> = self
            .table
            .snapshot()
            .into_iter()
            .filter(|u| {
                needle.is_empty()
                    || u.username.to_lowercase().contains(&needle)
                    || u.display_name.to_lowercase().contains(&needle)
            })
            .collect();
        let total = rows.len() as u64;
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.user_id.cmp(&a.user_id))
        });
        rows.truncate(limit);
        (rows, total)
    }

    /// All users ordered by points descending, user id ascending — the
    /// leaderboard order. Ranks are this vector's 1-based indices.
    pub fn all_by_points(&self) -> Vec<User> {
        let mut rows = self.table.snapshot();
        rows.sort_by(|a, b| match b.points.cmp(&a.points) {
            Ordering::Equal => a.user_id.cmp(&b.user_id),
            other => other,
        });
        rows
    }

    pub fn add_points(&self, user_id: i64, delta: i64) -> Option<User> {
        self.table.update(user_id, |u| u.points += delta)
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
