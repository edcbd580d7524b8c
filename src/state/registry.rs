use crate::config::Config;
use crate::db::repo::GameStore;
use crate::error::AppResult;
use crate::models::types::{SessionId, UserId};
use crate::state::session::{GameSession, UserRef};
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Shared session registry. Each session sits behind its own mutex, so
/// commands for one session serialize while different sessions proceed in
/// parallel. The user index enforces at most one live session per user.
pub struct Registry {
    pub config: Arc<Config>,
    pub store: Arc<dyn GameStore>,
    sessions: DashMap<SessionId, Arc<Mutex<GameSession>>>,
    by_user: Mutex<HashMap<UserId, SessionId>>,
    online: RwLock<BTreeSet<String>>,
}

impl Registry {
    pub fn new(config: Arc<Config>, store: Arc<dyn GameStore>) -> Self {
        Self {
            config,
            store,
            sessions: DashMap::new(),
            by_user: Mutex::new(HashMap::new()),
            online: RwLock::new(BTreeSet::new()),
        }
    }

    /// Creates an anonymous session; used for fresh connections before (or
    /// without) a login.
    pub fn create_guest(&self) -> SessionId {
        let sess = GameSession::guest(self.config.max_carry_weight);
        let id = sess.id;
        self.sessions.insert(id, Arc::new(Mutex::new(sess)));
        id
    }

    /// Creates a session for a logged-in user, opening a game record and
    /// atomically replacing any session the user already had. Commands sent
    /// to the replaced session id fail as invalid from then on.
    pub async fn create_for_user(&self, user: UserRef) -> AppResult<SessionId> {
        let record_id = self.store.create_record(user.id).await?;
        let username = user.username.clone();
        let sess = GameSession::for_user(user.clone(), Some(record_id), self.config.max_carry_weight);
        let id = sess.id;

        let replaced = {
            let mut index = self.by_user.lock();
            let old = index
                .insert(user.id, id)
                .and_then(|old_id| self.sessions.remove(&old_id));
            self.sessions.insert(id, Arc::new(Mutex::new(sess)));
            old
        };
        self.online.write().insert(username);

        // The replaced session is torn down like any other: close its record
        // with whatever it had achieved.
        if let Some((old_id, old_sess)) = replaced {
            tracing::debug!(%old_id, "replacing existing session for user");
            let (record, progress) = {
                let s = old_sess.lock();
                (s.record_id, s.progress())
            };
            if let Some(record) = record {
                self.store.close_record(record, &progress).await?;
            }
        }

        Ok(id)
    }

    pub fn get(&self, id: SessionId) -> Option<Arc<Mutex<GameSession>>> {
        self.sessions.get(&id).map(|e| e.value().clone())
    }

    /// Tears a session down: removes it, clears the user index and roster,
    /// and closes its game record with the final progress.
    pub async fn destroy(&self, id: SessionId) -> AppResult<()> {
        let Some((_, sess)) = self.sessions.remove(&id) else {
            return Ok(());
        };
        let (user, record, progress) = {
            let s = sess.lock();
            (s.user.clone(), s.record_id, s.progress())
        };
        if let Some(user) = user {
            let mut index = self.by_user.lock();
            if index.get(&user.id) == Some(&id) {
                index.remove(&user.id);
            }
            self.online.write().remove(&user.username);
        }
        if let Some(record) = record {
            self.store.close_record(record, &progress).await?;
        }
        Ok(())
    }

    pub fn who(&self) -> Vec<String> {
        self.online.read().iter().cloned().collect()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repo::MemoryStore;

    fn registry() -> (Arc<Registry>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let config = Arc::new(Config::default());
        (
            Arc::new(Registry::new(config, store.clone() as Arc<dyn GameStore>)),
            store,
        )
    }

    #[test]
    fn guest_sessions_are_isolated() {
        let (reg, _) = registry();
        let a = reg.create_guest();
        let b = reg.create_guest();
        assert_ne!(a, b);

        {
            let sess_a = reg.get(a).unwrap();
            let mut sess_a = sess_a.lock();
            let start = sess_a.world.start().to_string();
            sess_a.world.room_mut(&start).unwrap().remove_item("map");
        }
        let sess_b = reg.get(b).unwrap();
        let sess_b = sess_b.lock();
        let start = sess_b.world.start().to_string();
        assert!(sess_b.world.room(start.as_str()).unwrap().item("map").is_some());
    }

    #[tokio::test]
    async fn relogin_replaces_the_previous_session() {
        let (reg, store) = registry();
        let user = UserRef {
            id: UserId(1),
            username: "bob".into(),
        };
        let first = reg.create_for_user(user.clone()).await.unwrap();
        let second = reg.create_for_user(user).await.unwrap();

        assert!(reg.get(first).is_none(), "old session must be gone");
        assert!(reg.get(second).is_some());
        assert_eq!(reg.session_count(), 1);
        // The replaced session's record was closed.
        let first_record = store.record(crate::models::types::RecordId(1)).unwrap();
        assert!(first_record.closed);
        assert!(!store.record(crate::models::types::RecordId(2)).unwrap().closed);
    }

    #[tokio::test]
    async fn destroy_closes_the_record_and_roster() {
        let (reg, store) = registry();
        let user = UserRef {
            id: UserId(2),
            username: "alice".into(),
        };
        let id = reg.create_for_user(user).await.unwrap();
        assert_eq!(reg.who(), vec!["alice".to_string()]);

        reg.destroy(id).await.unwrap();
        assert!(reg.get(id).is_none());
        assert!(reg.who().is_empty());
        assert!(store.record(crate::models::types::RecordId(1)).unwrap().closed);
        // Destroying twice is harmless.
        reg.destroy(id).await.unwrap();
    }
}
