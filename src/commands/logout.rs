use crate::commands::{CmdCtx, CommandOutput, CommandResult};
use crate::{failure, success};
use std::sync::Arc;

pub async fn logout(ctx: Arc<CmdCtx>) -> CommandResult<CommandOutput> {
    let user = ctx.with_session(|s| s.user.clone())?;
    let Some(user) = user else {
        return Ok(failure!("You are not logged in."));
    };

    let old = ctx.session_id();
    ctx.registry.destroy(old).await?;
    let guest = ctx.registry.create_guest();
    ctx.bind_session(guest);

    tracing::info!(username=%user.username, "user logged out");
    Ok(success!(format!(
        "Goodbye, {}. You are playing as a guest now.",
        user.username
    )))
}
