use crate::commands::CommandOutput;
use crate::state::session::GameSession;
use crate::{failure, success};

pub fn look(sess: &mut GameSession) -> CommandOutput {
    match sess.world.room(sess.player.current_room()) {
        Some(room) => success!(room.long_description()),
        None => failure!("You are nowhere. There is nothing to see."),
    }
}
