use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginReq {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "secret")]
    pub password: String,
}

/// User row as returned to clients: password hash stripped.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    #[schema(example = "hr")]
    pub role: String,
    pub name: String,
    pub email: String,
}

/// Signed session token payload. All three identity fields must be
/// present for the token to be accepted.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub username: String,
    pub role: String,
    pub exp: usize,
}
