use crate::commands::{CmdCtx, CommandOutput, CommandResult};
use crate::models::codec::FlatState;
use crate::{failure, success};
use std::sync::Arc;

/// Flattens the player under the session lock, then writes the flat state
/// out without holding it. A store failure leaves game state untouched and
/// is narrated, not raised.
pub async fn save(ctx: Arc<CmdCtx>) -> CommandResult<CommandOutput> {
    let snapshot = ctx.with_session(|s| {
        s.user_id()
            .map(|user_id| (user_id, FlatState::flatten(&s.player)))
    })?;
    let Some((user_id, flat)) = snapshot else {
        return Ok(failure!("Log in first to save your game."));
    };
    let flat = match flat {
        Ok(flat) => flat,
        Err(e) => {
            tracing::warn!(error=%e, "save: state not encodable");
            return Ok(failure!("Your game could not be saved."));
        }
    };

    match ctx.registry.store.save_flat_state(user_id, &flat).await {
        Ok(()) => Ok(success!("Game saved.")),
        Err(e) => {
            tracing::error!(error=%e, %user_id, "save: store write failed");
            Ok(failure!("Saving failed. Try again later."))
        }
    }
}
