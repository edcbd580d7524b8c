use crate::commands::CommandOutput;
use crate::state::session::GameSession;
use crate::{failure, success};

pub fn take(sess: &mut GameSession, arg: Option<&str>) -> CommandOutput {
    let Some(name) = arg else {
        return failure!("Take what?");
    };

    let room_key = sess.player.current_room().to_string();
    let Some(room) = sess.world.room_mut(&room_key) else {
        return failure!("You are nowhere; there is nothing to take.");
    };

    let Some(item) = room.item(name) else {
        return failure!(format!("There is no {name} in this room."));
    };

    if !sess.player.can_carry(item) {
        return failure!(format!(
            "The {name} is too heavy! You cannot carry it.\nYour current weight: {:.2}kg / {:.2}kg",
            sess.player.total_weight(),
            sess.player.max_weight()
        ));
    }

    // Checked above; the transfer is a single remove+insert.
    let Some(item) = room.remove_item(name) else {
        return failure!(format!("There is no {name} in this room."));
    };
    sess.player.take(item);
    success!(format!("You take the {name}."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::Item;
    use crate::models::player::STARTING_MAX_WEIGHT;

    const OUTSIDE: &str = "outside the main entrance of the university";

    #[test]
    fn take_moves_the_item_into_the_inventory() {
        let mut sess = GameSession::guest(STARTING_MAX_WEIGHT);
        let out = take(&mut sess, Some("key"));
        assert!(!out.is_error);
        assert!(sess.player.has_item("key"));
        assert!(sess.player.collected_items().contains("key"));
        assert!(sess.world.room(OUTSIDE).unwrap().item("key").is_none());
    }

    #[test]
    fn take_unknown_item_narrates() {
        let mut sess = GameSession::guest(STARTING_MAX_WEIGHT);
        let out = take(&mut sess, Some("unicorn"));
        assert!(out.is_error);
        assert!(out.message.contains("no unicorn"));
    }

    #[test]
    fn take_missing_argument_narrates() {
        let mut sess = GameSession::guest(STARTING_MAX_WEIGHT);
        let out = take(&mut sess, None);
        assert!(out.is_error);
        assert_eq!(out.message, "Take what?");
    }

    #[test]
    fn too_heavy_item_stays_in_the_room() {
        let mut sess = GameSession::guest(10.0);
        let start = sess.player.current_room().to_string();
        sess.world
            .room_mut(&start)
            .unwrap()
            .add_item(Item::new("ballast", "dead weight", 9.0));
        take(&mut sess, Some("ballast"));
        assert_eq!(sess.player.total_weight(), 9.0);

        sess.world
            .room_mut(&start)
            .unwrap()
            .add_item(Item::new("brick", "a red brick", 2.0));
        let out = take(&mut sess, Some("brick"));
        assert!(out.is_error);
        assert!(out.message.contains("too heavy"));
        assert!(!sess.player.has_item("brick"));
        assert!(sess.world.room(&start).unwrap().item("brick").is_some());
        assert_eq!(sess.player.total_weight(), 9.0);
    }
}
