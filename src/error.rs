use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

/// Request-level failure taxonomy. Every variant renders as
/// `{"error": "<message>"}` with the matching HTTP status.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "Invalid credentials")]
    InvalidCredentials,

    #[display(fmt = "Access token is required")]
    MissingToken,

    #[display(fmt = "Invalid or expired token")]
    InvalidToken,

    /// Token verified but the user row no longer exists.
    #[display(fmt = "User not found")]
    StaleSession,

    #[display(fmt = "{}", _0)]
    Forbidden(&'static str),

    #[display(fmt = "{}", _0)]
    NotFound(&'static str),

    #[display(fmt = "{}", _0)]
    Conflict(&'static str),

    #[display(fmt = "Internal server error")]
    Store(sqlx::Error),

    #[display(fmt = "Internal server error")]
    Internal(&'static str),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::MissingToken | ApiError::StaleSession => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::InvalidToken | ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Store(e) => error!(error = %e, "Database error"),
            ApiError::Internal(what) => error!(%what, "Internal error"),
            _ => {}
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Store(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            ApiError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::MissingToken.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::InvalidToken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::Forbidden("Admin only").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("Employee not found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Store(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_error_does_not_leak_detail() {
        let e = ApiError::Store(sqlx::Error::PoolTimedOut);
        assert_eq!(e.to_string(), "Internal server error");
    }

    #[test]
    fn credential_failures_share_one_message() {
        // User-missing and password-mismatch must be indistinguishable.
        assert_eq!(
            ApiError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
    }
}
