use crate::{
    auth::{auth::AuthUser, jwt::generate_token, password::verify_password},
    config::Config,
    error::ApiError,
    model::{role::Role, user::User},
    models::{LoginReq, PublicUser},
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use sqlx::MySqlPool;
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// Login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Authenticated", body = Object, example = json!({
            "user": { "id": "…", "username": "alice", "role": "hr", "name": "Alice", "email": "alice@company.com" },
            "token": "…"
        })),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(pool, config, payload), fields(username = %payload.username))]
pub async fn login(
    payload: web::Json<LoginReq>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("Username and password are required"));
    }

    debug!("Fetching user");

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password, role, name, email
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(&payload.username)
    .fetch_optional(pool.get_ref())
    .await?;

    // User-missing and password-mismatch are deliberately the same failure.
    let user = match user {
        Some(u) => u,
        None => {
            info!("Login rejected: unknown user");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password) {
        info!("Login rejected: password mismatch");
        return Err(ApiError::InvalidCredentials);
    }

    let role = Role::from_str(&user.role).map_err(|_| ApiError::InvalidCredentials)?;

    let token = generate_token(
        &user.id,
        &user.username,
        role,
        &config.jwt_secret,
        config.token_ttl,
    )
    .map_err(|_| ApiError::Internal("token signing failed"))?;

    info!("Login successful");

    Ok(HttpResponse::Ok().json(json!({
        "user": PublicUser {
            id: user.id,
            username: user.username,
            role: user.role,
            name: user.name,
            email: user.email,
        },
        "token": token,
    })))
}

/// Logout
///
/// Tokens are stateless; nothing is revoked server-side.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Logged out")),
    tag = "Auth"
)]
pub async fn logout() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Logged out successfully" }))
}

/// Session check
///
/// Re-reads the user row so a deleted user is caught here even though the
/// token itself still verifies.
#[utoipa::path(
    get,
    path = "/api/auth/check",
    responses(
        (status = 200, description = "Session valid", body = PublicUser),
        (status = 401, description = "User no longer exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn check(auth: AuthUser, pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let user = sqlx::query_as::<_, PublicUser>(
        r#"
        SELECT id, username, role, name, email
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(&auth.id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or(ApiError::StaleSession)?;

    Ok(HttpResponse::Ok().json(json!({ "user": user })))
}
