use crate::commands::CommandOutput;
use crate::state::session::GameSession;
use crate::{failure, success};

pub fn back(sess: &mut GameSession) -> CommandOutput {
    let Some(previous) = sess.pop_history() else {
        return failure!("You are at the starting point. Cannot go back further.");
    };
    sess.player.move_to(&previous);
    let description = sess
        .world
        .room(&previous)
        .map(|r| r.long_description())
        .unwrap_or_default();
    success!(format!("You go back to the previous room.\n{description}"))
}
