use crate::commands::CommandOutput;
use crate::state::session::GameSession;
use crate::success;

pub fn status(sess: &mut GameSession) -> CommandOutput {
    success!(sess.progress().report())
}
