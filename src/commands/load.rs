use crate::commands::{CmdCtx, CommandOutput, CommandResult};
use crate::{failure, success};
use std::sync::Arc;

/// Restores a saved flat state into the live session. The fetch happens
/// before the session lock is taken; a missing or unreadable save changes
/// nothing.
pub async fn load(ctx: Arc<CmdCtx>) -> CommandResult<CommandOutput> {
    let Some(user_id) = ctx.with_session(|s| s.user_id())? else {
        return Ok(failure!("Log in first to load a game."));
    };

    let flat = match ctx.registry.store.load_flat_state(user_id).await {
        Ok(Some(flat)) => flat,
        Ok(None) => return Ok(failure!("No saved game found.")),
        Err(e) => {
            tracing::error!(error=%e, %user_id, "load: store read failed");
            return Ok(failure!("Loading failed. Try again later."));
        }
    };

    ctx.with_session(move |s| {
        flat.restore(&mut s.world, &mut s.player);
        let description = s
            .world
            .room(s.player.current_room())
            .map(|r| r.long_description())
            .unwrap_or_default();
        let mut out = success!(format!("Game loaded.\n{description}"));
        out.progress = Some(s.progress());
        out
    })
}
