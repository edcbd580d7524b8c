use crate::models::player::Player;
use crate::models::progress::{self, Progress};
use crate::models::types::{RecordId, SessionId, UserId};
use crate::models::world::World;

/// Identity of the logged-in user a session belongs to. Guest sessions
/// have none.
#[derive(Debug, Clone)]
pub struct UserRef {
    pub id: UserId,
    pub username: String,
}

/// One isolated game: its own world, its own player, its own history.
/// Sessions never share state; the registry serializes access per session.
pub struct GameSession {
    pub id: SessionId,
    pub user: Option<UserRef>,
    pub record_id: Option<RecordId>,
    pub world: World,
    pub player: Player,
    history: Vec<String>,
}

impl GameSession {
    pub fn guest(max_weight: f64) -> Self {
        Self::build(None, None, max_weight)
    }

    pub fn for_user(user: UserRef, record_id: Option<RecordId>, max_weight: f64) -> Self {
        Self::build(Some(user), record_id, max_weight)
    }

    fn build(user: Option<UserRef>, record_id: Option<RecordId>, max_weight: f64) -> Self {
        let world = World::campus();
        let name = user
            .as_ref()
            .map(|u| u.username.clone())
            .unwrap_or_else(|| "Guest".to_string());
        let player = Player::new(&name, max_weight, world.start());
        Self {
            id: SessionId::new(),
            user,
            record_id,
            world,
            player,
            history: Vec::new(),
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|u| u.id)
    }

    /// Remembers the room a move left from, for `back`.
    pub fn push_history(&mut self, room_key: &str) {
        self.history.push(room_key.to_string());
    }

    /// Consumes one history entry. Backing up never re-pushes, so repeated
    /// `back` walks the stack down to the starting point and stops.
    pub fn pop_history(&mut self) -> Option<String> {
        self.history.pop()
    }

    pub fn progress(&self) -> Progress {
        progress::evaluate(&self.player, &self.world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::STARTING_MAX_WEIGHT;

    #[test]
    fn guest_session_starts_at_the_world_start() {
        let sess = GameSession::guest(STARTING_MAX_WEIGHT);
        assert!(sess.user.is_none());
        assert_eq!(sess.player.current_room(), sess.world.start());
        assert_eq!(sess.player.name, "Guest");
    }

    #[test]
    fn history_is_pop_only() {
        let mut sess = GameSession::guest(STARTING_MAX_WEIGHT);
        sess.push_history("a");
        sess.push_history("b");
        assert_eq!(sess.pop_history().as_deref(), Some("b"));
        assert_eq!(sess.pop_history().as_deref(), Some("a"));
        assert_eq!(sess.pop_history(), None);
    }

    #[test]
    fn sessions_do_not_share_worlds() {
        let mut a = GameSession::guest(STARTING_MAX_WEIGHT);
        let b = GameSession::guest(STARTING_MAX_WEIGHT);
        let start = a.world.start().to_string();
        a.world.room_mut(&start).unwrap().remove_item("key");
        assert!(b.world.room(&start).unwrap().item("key").is_some());
    }
}
