use crate::{auth::jwt::verify_token, config::Config, error::ApiError, model::role::Role};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};
use std::str::FromStr;

/// The authenticated caller, resolved from the bearer token.
#[derive(Clone)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub role: Role,
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(ApiError::MissingToken)),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => return ready(Err(ApiError::Internal("app config missing"))),
        };

        let claims = match verify_token(token, &config.jwt_secret) {
            Ok(c) => c,
            Err(_) => return ready(Err(ApiError::InvalidToken)),
        };

        let role = match Role::from_str(&claims.role) {
            Ok(r) => r,
            Err(_) => return ready(Err(ApiError::InvalidToken)),
        };

        ready(Ok(AuthUser {
            id: claims.id,
            username: claims.username,
            role,
        }))
    }
}

impl AuthUser {
    /// Gate for the admin user-management endpoints; nothing else is
    /// role-restricted.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Admin access required"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(role: Role) -> AuthUser {
        AuthUser {
            id: "u-1".to_string(),
            username: "alice".to_string(),
            role,
        }
    }

    #[test]
    fn admin_passes_the_gate() {
        assert!(caller(Role::Admin).require_admin().is_ok());
    }

    #[test]
    fn hr_is_denied() {
        let err = caller(Role::Hr).require_admin().unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
