use sqlx::PgPool;

use crate::auth::hash_password;
use crate::error::AppError;
use crate::models::User;

/// Case-sensitive exact lookup on the unique username column.
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Registers a new user: hashes the password and persists a single row.
/// The returned record carries the store-assigned id.
///
/// Uniqueness is enforced by the `users.username` constraint, not by a
/// check-then-insert, so two concurrent registrations of the same name
/// cannot both succeed; the loser gets the same conflict as a sequential
/// duplicate.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    let password_hash = hash_password(password)?;

    let result = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password_hash) VALUES ($1, $2)
         RETURNING id, username, password_hash",
    )
    .bind(username)
    .bind(&password_hash)
    .fetch_one(pool)
    .await;

    match result {
        Ok(user) => Ok(user),
        // 23505: unique_violation
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
            Err(AppError::Conflict("Username already registered".into()))
        }
        Err(e) => Err(e.into()),
    }
}
