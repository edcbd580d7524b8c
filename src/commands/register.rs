use crate::commands::{CmdCtx, CommandOutput, CommandResult};
use crate::input::parser::Intent;
use crate::state::session::UserRef;
use crate::{failure, success};
use std::sync::Arc;

fn valid_username(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 32
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}

pub async fn register(ctx: Arc<CmdCtx>, intent: &Intent) -> CommandResult<CommandOutput> {
    if intent.args.len() < 2 {
        return Ok(failure!("Usage: register <name> <password>"));
    }
    let (username, password) = (intent.args[0].as_str(), intent.args[1].as_str());

    if !valid_username(username) {
        return Ok(failure!(
            "Names are letters, digits, '-' and '_' only (at most 32)."
        ));
    }
    if password.is_empty() {
        return Ok(failure!("A password is required."));
    }

    let user_id = match ctx.registry.store.register_user(username, password).await {
        Ok(Some(id)) => id,
        Ok(None) => {
            return Ok(failure!("That name is already taken."));
        }
        Err(e) => {
            tracing::warn!(error=%e, "register: store unavailable");
            return Ok(failure!(
                "Registration is unavailable right now. Try again later."
            ));
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
    ctx.registry.destroy(old).await?;

    tracing::info!(%username, "user registered");
    Ok(success!(format!(
        "Welcome, {username}! Your account is ready and a new game has begun."
    )))
}
