use crate::commands::{CmdCtx, CommandOutput, CommandResult};
use crate::input::parser::Intent;
use crate::state::session::UserRef;
use crate::{failure, success};
use std::sync::Arc;

pub async fn login(ctx: Arc<CmdCtx>, intent: &Intent) -> CommandResult<CommandOutput> {
    if intent.args.len() < 2 {
        return Ok(failure!("Usage: login <name> <password>"));
    }
    let (username, password) = (intent.args[0].as_str(), intent.args[1].as_str());

    let user_id = match ctx.registry.store.verify_user(username, password).await {
        Ok(Some(id)) => id,
        Ok(None) => {
            return Ok(failure!("Login failed. Check your username and password."));
        }
        Err(e) => {
            tracing::warn!(error=%e, "login: store unavailable");
            return Ok(failure!("Login is unavailable right now. Try again later."));
        }
    };

    let old = ctx.session_id();
    let new_id = ctx
        .registry
        .create_for_user(UserRef {
            id: user_id,
            username: username.to_string(),
        })
        .await?;
    ctx.bind_session(new_id);
    // Tear down whatever this connection was playing before.
    ctx.registry.destroy(old).await?;

    tracing::info!(%username, session=%new_id, "user logged in");
    let mut out = success!(format!(
        "Welcome, {username}! A fresh game is ready; type 'look' to get your bearings."
    ));
    out.progress = ctx.with_session(|s| s.progress()).ok();
    Ok(out)
}
