use crate::db::error::DbError;
use crate::error::DomainError;
use crate::input::parser::{Verb, parse_command};
use crate::models::progress::Progress;
use crate::models::types::SessionId;
use crate::state::registry::Registry;
use crate::state::session::GameSession;
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;

mod back;
mod drop_item;
mod eat;
mod go;
mod items;
mod load;
mod login;
mod logout;
mod look;
mod quit;
mod register;
mod save;
mod status;
mod take;
mod use_item;
mod who;

pub type CommandResult<T> = Result<T, CommandError>;

/// Raise of the carry ceiling granted by eating a consumable.
pub(crate) const CAPACITY_BONUS_KG: f64 = 5.0;

#[derive(Debug, Error)]
pub enum CommandError {
    /// The session this command was addressed to no longer exists. Kept
    /// apart from narrative output so transports can react to it.
    #[error("invalid session")]
    InvalidSession,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Command context of one connection: the registry plus the session the
/// connection is currently bound to (login/logout rebind it).
pub struct CmdCtx {
    pub registry: Arc<Registry>,
    session: RwLock<SessionId>,
}

impl CmdCtx {
    pub fn new(registry: Arc<Registry>, session_id: SessionId) -> Self {
        Self {
            registry,
            session: RwLock::new(session_id),
        }
    }

    pub fn session_id(&self) -> SessionId {
        *self.session.read()
    }

    pub fn bind_session(&self, id: SessionId) {
        *self.session.write() = id;
    }

    /// Runs `f` with the bound session locked. All command work on one
    /// session goes through here, which is what serializes it.
    pub fn with_session<T>(&self, f: impl FnOnce(&mut GameSession) -> T) -> CommandResult<T> {
        let sess = self
            .registry
            .get(self.session_id())
            .ok_or(CommandError::InvalidSession)?;
        let mut guard = sess.lock();
        Ok(f(&mut guard))
    }

    /// Like `with_session`, but also attaches the fresh progress summary to
    /// whatever the handler narrates.
    fn gameplay(&self, f: impl FnOnce(&mut GameSession) -> CommandOutput) -> CommandResult<CommandOutput> {
        self.with_session(|sess| {
            let mut out = f(sess);
            out.progress = Some(sess.progress());
            out
        })
    }
}

#[derive(Debug, Default)]
pub struct CommandOutput {
    pub message: String,
    pub is_error: bool,
    /// Progress summary after the command, for clients that render it.
    pub progress: Option<Progress>,
    /// Set by `quit`: the session is gone and the connection should close.
    pub terminate: bool,
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        $crate::commands::CommandOutput {
            message: $msg.to_string(),
            ..Default::default()
        }
    };
}

#[macro_export]
macro_rules! failure {
    ($msg:expr) => {
        $crate::commands::CommandOutput {
            message: $msg.to_string(),
            is_error: true,
            ..Default::default()
        }
    };
}

pub async fn process_command(raw: &str, ctx: Arc<CmdCtx>) -> CommandResult<CommandOutput> {
    let intent = parse_command(raw);

    match intent.verb {
        Verb::Go => ctx.gameplay(|s| go::go(s, intent.arg())),
        Verb::Back => ctx.gameplay(back::back),
        Verb::Look => ctx.gameplay(look::look),
        Verb::Take => ctx.gameplay(|s| take::take(s, intent.arg())),
        Verb::Drop => ctx.gameplay(|s| drop_item::drop_item(s, intent.arg())),
        Verb::Items => ctx.gameplay(items::items),
        Verb::Use => ctx.gameplay(|s| use_item::use_item(s, intent.arg())),
        Verb::Eat => ctx.gameplay(|s| eat::eat(s, intent.arg())),
        Verb::Status => ctx.gameplay(status::status),
        Verb::Help => Ok(success!(help_text())),
        Verb::Who => who::who(ctx.clone()).await,
        Verb::Save => save::save(ctx.clone()).await,
        Verb::Load => load::load(ctx.clone()).await,
        Verb::Login => login::login(ctx.clone(), &intent).await,
        Verb::Register => register::register(ctx.clone(), &intent).await,
        Verb::Logout => logout::logout(ctx.clone()).await,
        Verb::Quit => quit::quit(ctx.clone()).await,
        Verb::Unknown => Ok(failure!("I don't know what you mean...")),
    }
}

pub fn help_text() -> String {
    r#"Available commands
------------------
  help                         Show this help
  look                         Look around your current room
  go <direction>               Move (e.g. go north / go east)
  back                         Return to the previous room
  take <item> / drop <item>    Pick up or put down an item
  items                        List room contents and your inventory
  use <item>                   Use a usable item (key, map, ...)
  eat cookie                   Eat the magic cookie
  status                       Show your progress
  register <name> <password>   Create an account
  login <name> <password>      Log in (starts a fresh game)
  logout                       Log out
  save / load                  Save or restore your game (needs login)
  who                          List who is online
  quit                         Leave the game
"#
    .to_string()
}
