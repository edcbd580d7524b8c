use crate::commands::CommandOutput;
use crate::models::room::RoomKind;
use crate::models::types::Direction;
use crate::state::session::GameSession;
use crate::{failure, success};

pub fn go(sess: &mut GameSession, arg: Option<&str>) -> CommandOutput {
    let Some(dir) = arg.and_then(Direction::parse) else {
        return failure!("Go where?");
    };

    let from = sess.player.current_room().to_string();
    let Some(dest) = sess.world.exit_from(&from, &dir) else {
        // Tell a barred door apart from no door at all.
        if sess.world.has_exit(&from, &dir) {
            let hint = sess
                .world
                .room(&from)
                .and_then(|r| r.exit_key(&dir))
                .and_then(|target| sess.world.room(target))
                .and_then(|room| match &room.kind {
                    RoomKind::Gated { required_key, .. } => Some(required_key.clone()),
                    _ => None,
                });
            return match hint {
                Some(key) => failure!(format!(
                    "The way {dir} is locked! You need to use a {key} to open it."
                )),
                None => failure!("There is no door!"),
            };
        }
        return failure!("There is no door!");
    };

    sess.push_history(&from);
    sess.player.move_to(&dest);

    let mut message = String::new();
    let landed_on_transporter = sess
        .world
        .room(&dest)
        .is_some_and(|r| matches!(r.kind, RoomKind::Transporter));
    if landed_on_transporter {
        message.push_str("You step into a mysterious transporter room...\n");
        message.push_str("Suddenly, you are teleported to another location!\n");
        if let Some(final_dest) = sess.world.random_destination(Some(&dest)) {
            sess.player.move_to(&final_dest);
        }
    }

    let here = sess.player.current_room();
    if let Some(room) = sess.world.room(here) {
        message.push_str(&room.long_description());
    }
    success!(message)
}
