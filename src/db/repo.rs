use crate::db::DbResult;
use crate::models::codec::FlatState;
use crate::models::progress::Progress;
use crate::models::types::{RecordId, UserId};
use async_trait::async_trait;

mod store_db; // Persistent storage
mod store_mem; // Ephemeral storage, used by tests

pub use store_db::DbStore;
pub use store_mem::MemoryStore;

/// Persistence seam of the game: user accounts, saved player states and
/// the per-session game-record log. One Postgres-backed implementation for
/// the server and one in-memory implementation for tests.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Creates a user; `None` when the name is taken.
    async fn register_user(&self, username: &str, password: &str) -> DbResult<Option<UserId>>;

    /// Checks credentials; the user id on success, `None` otherwise.
    async fn verify_user(&self, username: &str, password: &str) -> DbResult<Option<UserId>>;

    /// Loads the saved flat state for a user, if any.
    async fn load_flat_state(&self, user_id: UserId) -> DbResult<Option<FlatState>>;

    /// Saves (upserts) the flat state for a user.
    async fn save_flat_state(&self, user_id: UserId, state: &FlatState) -> DbResult<()>;

    /// Opens a game record at session start.
    async fn create_record(&self, user_id: UserId) -> DbResult<RecordId>;

    /// Closes a game record at session teardown with the final progress.
    async fn close_record(&self, record_id: RecordId, progress: &Progress) -> DbResult<()>;
}
