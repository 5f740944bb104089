use serde::{Deserialize, Serialize};

/// Full user row, password hash included. Never serialized to clients
/// directly; see `PublicUser` in `models.rs`.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub role: String,
    pub name: String,
    pub email: String,
}
