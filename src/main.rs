use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use mudlark::config::Config;
use mudlark::db::Db;
use mudlark::db::repo::{DbStore, GameStore};
use mudlark::net::connection::handle_connection;
use mudlark::state::registry::Registry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cfg = Arc::new(Config::from_env()?);

    // Set up the database and create the schema if needed
    let db = Arc::new(Db::new(&cfg.database_url)?);
    db.init().await?;

    let store: Arc<dyn GameStore> = Arc::new(DbStore::new(db));
    let registry = Arc::new(Registry::new(cfg.clone(), store));

    let tcp_addr: SocketAddr = cfg.tcp_addr.parse()?;
    let listener = TcpListener::bind(tcp_addr).await?;
    tracing::info!(%tcp_addr, "Mudlark server listening");

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                tracing::info!(%peer, "client connected");
                let registry = registry.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, registry).await {
                        tracing::error!(%peer, error=%e, "connection error");
                    }
                    tracing::info!(%peer, "client disconnected");
                });
            }
            Err(e) => {
                tracing::error!(error=%e, "failed to accept connection");
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            }
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, prelude::*};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,mudlark=debug"))
        .expect("default tracing filter is valid");

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
