use crate::commands::{CmdCtx, CommandOutput, CommandResult};
use crate::success;
use std::sync::Arc;

pub async fn who(ctx: Arc<CmdCtx>) -> CommandResult<CommandOutput> {
    let users = ctx.registry.who();
    if users.is_empty() {
        return Ok(success!("Nobody is logged in right now."));
    }
    Ok(success!(format!("Online: {}", users.join(", "))))
}
