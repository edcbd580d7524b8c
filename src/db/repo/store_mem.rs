use crate::db::DbResult;
use crate::db::repo::GameStore;
use crate::models::codec::{FlatState, join_names, split_names};
use crate::models::progress::Progress;
use crate::models::types::{RecordId, UserId};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI32, Ordering};

/// Game-record row as the in-memory store keeps it; tests inspect this.
#[derive(Debug, Clone)]
pub struct MemoryRecord {
    pub user_id: UserId,
    pub closed: bool,
    pub completed: bool,
    pub rooms_explored: usize,
    pub items_collected: usize,
    pub cookie_eaten: bool,
}

/// In-memory `GameStore`. States go through the same delimiter-joined
/// encoding the database columns use, so codec behavior is identical.
/// Passwords are kept verbatim; this store never outlives a test run.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<String, (UserId, String)>,
    states: DashMap<UserId, StoredState>,
    records: DashMap<RecordId, MemoryRecord>,
    next_user: AtomicI32,
    next_record: AtomicI32,
}

#[derive(Debug, Clone)]
struct StoredState {
    current_room: String,
    max_weight: f64,
    inventory: String,
    rooms_visited: String,
    items_collected: String,
    cookie_eaten: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, record_id: RecordId) -> Option<MemoryRecord> {
        self.records.get(&record_id).map(|r| r.value().clone())
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn register_user(&self, username: &str, password: &str) -> DbResult<Option<UserId>> {
        let mut created = None;
        self.users.entry(username.to_string()).or_insert_with(|| {
            let id = UserId(self.next_user.fetch_add(1, Ordering::Relaxed) + 1);
            created = Some(id);
            (id, password.to_string())
        });
        Ok(created)
    }

    async fn verify_user(&self, username: &str, password: &str) -> DbResult<Option<UserId>> {
        Ok(self
            .users
            .get(username)
            .filter(|entry| entry.1 == password)
            .map(|entry| entry.0))
    }

    async fn load_flat_state(&self, user_id: UserId) -> DbResult<Option<FlatState>> {
        Ok(self.states.get(&user_id).map(|s| FlatState {
            current_room: s.current_room.clone(),
            max_weight: s.max_weight,
            inventory: split_names(&s.inventory),
            rooms_visited: split_names(&s.rooms_visited),
            items_collected: split_names(&s.items_collected),
            cookie_eaten: s.cookie_eaten,
        }))
    }

    async fn save_flat_state(&self, user_id: UserId, state: &FlatState) -> DbResult<()> {
        self.states.insert(
            user_id,
            StoredState {
                current_room: state.current_room.clone(),
                max_weight: state.max_weight,
                inventory: join_names(&state.inventory),
                rooms_visited: join_names(&state.rooms_visited),
                items_collected: join_names(&state.items_collected),
                cookie_eaten: state.cookie_eaten,
            },
        );
        Ok(())
    }

    async fn create_record(&self, user_id: UserId) -> DbResult<RecordId> {
        let id = RecordId(self.next_record.fetch_add(1, Ordering::Relaxed) + 1);
        self.records.insert(
            id,
            MemoryRecord {
                user_id,
                closed: false,
                completed: false,
                rooms_explored: 0,
                items_collected: 0,
                cookie_eaten: false,
            },
        );
        Ok(id)
    }

    async fn close_record(&self, record_id: RecordId, progress: &Progress) -> DbResult<()> {
        if let Some(mut rec) = self.records.get_mut(&record_id) {
            rec.closed = true;
            rec.completed = progress.completed;
            rec.rooms_explored = progress.rooms_explored;
            rec.items_collected = progress.items_collected;
            rec.cookie_eaten = progress.cookie_eaten;
        }
        Ok(())
    }
}
