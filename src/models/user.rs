use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row as persisted. Carries the password digest and is therefore
/// never serialized outward; see `PublicUser`.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

/// The outward-facing projection of a user. Constructed only through
/// `From<User>`, so the password digest is omitted by construction rather
/// than by convention.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}
