use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use std::str::FromStr;
use tokio_postgres::NoTls;

pub mod error;
pub mod repo;
pub mod users;

use error::DbError;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Clone)]
pub struct Db {
    pub(crate) pool: Pool,
}

impl Db {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let cfg = tokio_postgres::Config::from_str(url)?;
        let mgr = Manager::from_config(
            cfg,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );
        let pool = Pool::builder(mgr)
            .max_size(16)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| anyhow::anyhow!(e))?;
        Ok(Self { pool })
    }

    /// Creates the schema if it isn't there yet (idempotent).
    pub async fn init(&self) -> DbResult<()> {
        let client = self.pool.get().await?;
        client
            .batch_execute(
                r#"
                CREATE TABLE IF NOT EXISTS users (
                    user_id       SERIAL PRIMARY KEY,
                    username      TEXT UNIQUE NOT NULL,
                    password_hash TEXT NOT NULL,
                    created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
                );

                CREATE TABLE IF NOT EXISTS game_records (
                    record_id       SERIAL PRIMARY KEY,
                    user_id         INT NOT NULL REFERENCES users(user_id),
                    started_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
                    ended_at        TIMESTAMPTZ,
                    completed       BOOLEAN NOT NULL DEFAULT FALSE,
                    rooms_explored  INT NOT NULL DEFAULT 0,
                    items_collected INT NOT NULL DEFAULT 0,
                    cookie_eaten    BOOLEAN NOT NULL DEFAULT FALSE
                );

                CREATE TABLE IF NOT EXISTS player_states (
                    user_id         INT PRIMARY KEY REFERENCES users(user_id),
                    current_room    TEXT NOT NULL,
                    max_weight      DOUBLE PRECISION NOT NULL,
                    inventory       TEXT NOT NULL DEFAULT '',
                    rooms_visited   TEXT NOT NULL DEFAULT '',
                    items_collected TEXT NOT NULL DEFAULT '',
                    cookie_eaten    BOOLEAN NOT NULL DEFAULT FALSE
                );
                "#,
            )
            .await?;
        Ok(())
    }
}
