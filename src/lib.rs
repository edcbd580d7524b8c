pub mod banner;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod input;
pub mod models;
pub mod net;
pub mod state;

// Convenient re-exports (so call sites can do `mudlark::Registry`, etc.)
pub use commands::{CmdCtx, CommandOutput, process_command};
pub use state::{registry::Registry, session::GameSession};
