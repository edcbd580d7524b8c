use crate::commands::CommandOutput;
use crate::state::session::GameSession;
use crate::{failure, success};

pub fn drop_item(sess: &mut GameSession, arg: Option<&str>) -> CommandOutput {
    let Some(name) = arg else {
        return failure!("Drop what?");
    };

    let Some(item) = sess.player.drop_item(name) else {
        return failure!(format!("You don't have a {name}!"));
    };

    let room_key = sess.player.current_room().to_string();
    match sess.world.room_mut(&room_key) {
        Some(room) => {
            room.add_item(item);
            success!(format!("You drop the {name}."))
        }
        None => {
            // Should not happen; don't lose the item if it does.
            sess.player.take(item);
            failure!("There is nowhere to drop that.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::take::take;
    use crate::models::player::STARTING_MAX_WEIGHT;

    const OUTSIDE: &str = "outside the main entrance of the university";

    #[test]
    fn drop_returns_the_item_to_the_room() {
        let mut sess = GameSession::guest(STARTING_MAX_WEIGHT);
        take(&mut sess, Some("map"));
        let out = drop_item(&mut sess, Some("map"));
        assert!(!out.is_error);
        assert!(!sess.player.has_item("map"));
        assert!(sess.world.room(OUTSIDE).unwrap().item("map").is_some());
        // Collected history is unaffected by dropping.
        assert!(sess.player.collected_items().contains("map"));
    }

    #[test]
    fn drop_something_not_carried_narrates() {
        let mut sess = GameSession::guest(STARTING_MAX_WEIGHT);
        let out = drop_item(&mut sess, Some("map"));
        assert!(out.is_error);
        assert!(out.message.contains("don't have"));
    }

    #[test]
    fn drop_missing_argument_narrates() {
        let mut sess = GameSession::guest(STARTING_MAX_WEIGHT);
        let out = drop_item(&mut sess, None);
        assert!(out.is_error);
        assert_eq!(out.message, "Drop what?");
    }
}
