use crate::commands::{CmdCtx, CommandOutput, CommandResult};
use crate::success;
use std::sync::Arc;

/// Terminal command: tears the session down (closing its game record) and
/// tells the transport to hang up. No further commands are valid for the
/// session id afterwards.
pub async fn quit(ctx: Arc<CmdCtx>) -> CommandResult<CommandOutput> {
    ctx.registry.destroy(ctx.session_id()).await?;
    let mut out = success!("Thank you for playing. Good bye.");
    out.terminate = true;
    Ok(out)
}
