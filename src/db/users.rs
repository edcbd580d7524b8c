use super::{Db, DbResult};
use crate::db::error::DbError;
use crate::models::types::UserId;
use argon2::Argon2;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

impl Db {
    /// Creates a new user with an Argon2id password hash. Returns `None`
    /// when the name is already taken.
    pub async fn register_user(&self, username: &str, password: &str) -> DbResult<Option<UserId>> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| DbError::Validation(e.to_string()))?
            .to_string();

        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "INSERT INTO users (username, password_hash)
                 VALUES ($1, $2)
                 ON CONFLICT (username) DO NOTHING
                 RETURNING user_id",
                &[&username, &hash],
            )
            .await?;

        Ok(row.map(|r| UserId(r.get::<_, i32>(0))))
    }

    /// Verifies username/password; returns the user id on success.
    pub async fn verify_user(&self, username: &str, password: &str) -> DbResult<Option<UserId>> {
        let client = self.pool.get().await?;
        let Some(row) = client
            .query_opt(
                "SELECT user_id, password_hash FROM users WHERE username = $1",
                &[&username],
            )
            .await?
        else {
            return Ok(None);
        };

        let user_id: i32 = row.get(0);
        let stored: String = row.get(1);
        let parsed = PasswordHash::new(&stored).map_err(|e| DbError::Decode(e.to_string()))?;
        let ok = Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();

        Ok(ok.then_some(UserId(user_id)))
    }

    pub async fn user_exists(&self, username: &str) -> DbResult<bool> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt("SELECT 1 FROM users WHERE username = $1", &[&username])
            .await?;
        Ok(row.is_some())
    }
}
