use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::banner::{BANNER, ENTRY};
use crate::commands::{CmdCtx, CommandError, process_command};
use crate::state::registry::Registry;

/// Line-based client loop. Every connection starts with its own guest
/// session; `login`/`register` swap it for a user session.
pub async fn handle_connection(stream: TcpStream, registry: Arc<Registry>) -> anyhow::Result<()> {
    let (r, mut w) = stream.into_split();
    let mut reader = BufReader::new(r);

    w.write_all(BANNER.as_bytes()).await?;
    w.write_all(ENTRY.as_bytes()).await?;
    w.write_all(b"> ").await?;
    w.flush().await?;

    let ctx = Arc::new(CmdCtx::new(registry.clone(), registry.create_guest()));
    let mut line = String::new();

    loop {
        line.clear();
        let n = reader.read_line(&mut line).await?;
        if n == 0 {
            break;
        }

        let raw = line.trim_matches(['\r', '\n']).trim();
        if raw.is_empty() {
            w.write_all(b"> ").await?;
            w.flush().await?;
            continue;
        }
        tracing::debug!(%raw, "received line");

        match process_command(raw, ctx.clone()).await {
            Ok(out) => {
                let mut message = out.message;
                if !message.ends_with('\n') {
                    message.push('\n');
                }
                w.write_all(message.as_bytes()).await?;
                if out.terminate {
                    w.flush().await?;
                    return Ok(());
                }
            }
            Err(CommandError::InvalidSession) => {
                // The session this connection held was replaced or destroyed
                // elsewhere (e.g. the same user logged in again). Hand the
                // player a fresh guest game rather than a dead prompt.
                ctx.bind_session(registry.create_guest());
                w.write_all(b"Invalid session. Starting a fresh guest game; log in again to continue.\n")
                    .await?;
            }
            Err(e) => {
                tracing::error!(error=%e, "command failed");
                w.write_all(format!("error: {e}\n").as_bytes()).await?;
            }
        }

        w.write_all(b"> ").await?;
        w.flush().await?;
    }

    // Disconnect without `quit` still tears the session down.
    let id = ctx.session_id();
    if let Err(e) = registry.destroy(id).await {
        tracing::warn!(error=%e, session=%id, "teardown after disconnect failed");
    }
    Ok(())
}
