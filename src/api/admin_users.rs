use crate::{
    auth::{auth::AuthUser, password::hash_password},
    error::ApiError,
    model::{role::Role, user::User},
    models::PublicUser,
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use std::str::FromStr;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct CreateUser {
    #[schema(example = "alice")]
    pub username: Option<String>,
    pub password: Option<String>,
    #[schema(example = "hr")]
    pub role: Option<String>,
    #[schema(example = "Alice Rahman")]
    pub name: Option<String>,
    #[schema(example = "alice@company.com")]
    pub email: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub password: Option<String>,
    #[schema(example = "hr")]
    pub role: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

fn is_duplicate_key(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23000"),
        _ => false,
    }
}

/// List users (admin)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "All users, passwords excluded", body = [PublicUser]),
        (status = 403, description = "Not an administrator")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse, ApiError> {
    auth.require_admin()?;

    let users = sqlx::query_as::<_, PublicUser>(
        "SELECT id, username, role, name, email FROM users ORDER BY username",
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(users))
}

/// Create user (admin)
#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = PublicUser),
        (status = 400, description = "Missing fields or unknown role"),
        (status = 403, description = "Not an administrator"),
        (status = 409, description = "Username already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_user(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateUser>,
) -> Result<HttpResponse, ApiError> {
    auth.require_admin()?;

    let nonempty = |v: &Option<String>| {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let (username, password, role_raw, name, email) = match (
        nonempty(&payload.username),
        payload.password.clone().filter(|p| !p.is_empty()),
        nonempty(&payload.role),
        nonempty(&payload.name),
        nonempty(&payload.email),
    ) {
        (Some(u), Some(p), Some(r), Some(n), Some(e)) => (u, p, r, n, e),
        _ => return Err(ApiError::validation("Missing required fields")),
    };

    let role =
        Role::from_str(&role_raw).map_err(|_| ApiError::validation("Role must be admin or hr"))?;

    let hashed = hash_password(&password).map_err(|_| ApiError::Internal("password hash failed"))?;
    let id = Uuid::new_v4().to_string();

    let result = sqlx::query(
        "INSERT INTO users (id, username, password, role, name, email) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&username)
    .bind(&hashed)
    .bind(role.to_string())
    .bind(&name)
    .bind(&email)
    .execute(pool.get_ref())
    .await;

    if let Err(e) = result {
        if is_duplicate_key(&e) {
            return Err(ApiError::Conflict("Username already exists"));
        }
        return Err(e.into());
    }

    info!(user_id = %id, %username, "User created");

    Ok(HttpResponse::Created().json(PublicUser {
        id,
        username,
        role: role.to_string(),
        name,
        email,
    }))
}

/// Update user (admin)
///
/// Merge-style update: omitted fields keep their current value, a supplied
/// password is rehashed.
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    params(("id", Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = PublicUser),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_user(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    payload: web::Json<UpdateUser>,
) -> Result<HttpResponse, ApiError> {
    auth.require_admin()?;

    let user_id = path.into_inner();

    let current = sqlx::query_as::<_, User>(
        "SELECT id, username, password, role, name, email FROM users WHERE id = ?",
    )
    .bind(&user_id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or(ApiError::NotFound("User not found"))?;

    let role = match payload.role.as_deref() {
        Some(r) => Role::from_str(r)
            .map_err(|_| ApiError::validation("Role must be admin or hr"))?
            .to_string(),
        None => current.role,
    };

    let password = match payload.password.as_deref().filter(|p| !p.is_empty()) {
        Some(p) => hash_password(p).map_err(|_| ApiError::Internal("password hash failed"))?,
        None => current.password,
    };

    let username = payload.username.clone().unwrap_or(current.username);
    let name = payload.name.clone().unwrap_or(current.name);
    let email = payload.email.clone().unwrap_or(current.email);

    let result = sqlx::query(
        "UPDATE users SET username = ?, password = ?, role = ?, name = ?, email = ? WHERE id = ?",
    )
    .bind(&username)
    .bind(&password)
    .bind(&role)
    .bind(&name)
    .bind(&email)
    .bind(&user_id)
    .execute(pool.get_ref())
    .await;

    if let Err(e) = result {
        if is_duplicate_key(&e) {
            return Err(ApiError::Conflict("Username already exists"));
        }
        return Err(e.into());
    }

    info!(%user_id, "User updated");

    Ok(HttpResponse::Ok().json(PublicUser {
        id: user_id,
        username,
        role,
        name,
        email,
    }))
}

/// Delete user (admin)
///
/// Outstanding tokens for the deleted user are not revoked; the session
/// check catches them lazily.
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(("id", Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_user(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    auth.require_admin()?;

    let user_id = path.into_inner();

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(&user_id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("User not found"));
    }

    info!(%user_id, "User deleted");

    Ok(HttpResponse::Ok().json(json!({ "message": "User deleted successfully" })))
}
