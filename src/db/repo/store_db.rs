use crate::db::repo::GameStore;
use crate::db::{Db, DbResult};
use crate::models::codec::{FlatState, join_names, split_names};
use crate::models::progress::Progress;
use crate::models::types::{RecordId, UserId};
use async_trait::async_trait;
use std::sync::Arc;

pub struct DbStore {
    db: Arc<Db>,
}

impl DbStore {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GameStore for DbStore {
    async fn register_user(&self, username: &str, password: &str) -> DbResult<Option<UserId>> {
        self.db.register_user(username, password).await
    }

    async fn verify_user(&self, username: &str, password: &str) -> DbResult<Option<UserId>> {
        self.db.verify_user(username, password).await
    }

    async fn load_flat_state(&self, user_id: UserId) -> DbResult<Option<FlatState>> {
        let client = self.db.pool.get().await?;
        let Some(row) = client
            .query_opt(
                "SELECT current_room, max_weight, inventory, rooms_visited,
                        items_collected, cookie_eaten
                 FROM player_states WHERE user_id = $1",
                &[&user_id.0],
            )
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(FlatState {
            current_room: row.get(0),
            max_weight: row.get(1),
            inventory: split_names(row.get(2)),
            rooms_visited: split_names(row.get(3)),
            items_collected: split_names(row.get(4)),
            cookie_eaten: row.get(5),
        }))
    }

    async fn save_flat_state(&self, user_id: UserId, state: &FlatState) -> DbResult<()> {
        let client = self.db.pool.get().await?;
        client
            .execute(
                "INSERT INTO player_states
                     (user_id, current_room, max_weight, inventory,
                      rooms_visited, items_collected, cookie_eaten)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)
                 ON CONFLICT (user_id) DO UPDATE SET
                     current_room    = EXCLUDED.current_room,
                     max_weight      = EXCLUDED.max_weight,
                     inventory       = EXCLUDED.inventory,
                     rooms_visited   = EXCLUDED.rooms_visited,
                     items_collected = EXCLUDED.items_collected,
                     cookie_eaten    = EXCLUDED.cookie_eaten",
                &[
                    &user_id.0,
                    &state.current_room,
                    &state.max_weight,
                    &join_names(&state.inventory),
                    &join_names(&state.rooms_visited),
                    &join_names(&state.items_collected),
                    &state.cookie_eaten,
                ],
            )
            .await?;
        Ok(())
    }

    async fn create_record(&self, user_id: UserId) -> DbResult<RecordId> {
        let client = self.db.pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO game_records (user_id) VALUES ($1) RETURNING record_id",
                &[&user_id.0],
            )
            .await?;
        Ok(RecordId(row.get::<_, i32>(0)))
    }

    async fn close_record(&self, record_id: RecordId, progress: &Progress) -> DbResult<()> {
        let client = self.db.pool.get().await?;
        client
            .execute(
                "UPDATE game_records SET
                     ended_at        = now(),
                     completed       = $2,
                     rooms_explored  = $3,
                     items_collected = $4,
                     cookie_eaten    = $5
                 WHERE record_id = $1",
                &[
                    &record_id.0,
                    &progress.completed,
                    &(progress.rooms_explored as i32),
                    &(progress.items_collected as i32),
                    &progress.cookie_eaten,
                ],
            )
            .await?;
        Ok(())
    }
}
