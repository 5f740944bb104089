use std::time::{SystemTime, UNIX_EPOCH};

use crate::{model::role::Role, models::Claims};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_secs() as usize
}

pub fn generate_token(
    user_id: &str,
    username: &str,
    role: Role,
    secret: &str,
    ttl: usize,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        id: user_id.to_string(),
        username: username.to_string(),
        role: role.to_string(),
        exp: now() + ttl,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Checks signature and expiry. A payload missing any of id/username/role
/// fails deserialization and is rejected the same way as a bad signature.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &str = "test-secret";

    #[test]
    fn round_trips_identity_claims() {
        let token = generate_token("u-1", "alice", Role::Hr, SECRET, 3600).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.id, "u-1");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, "hr");
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = generate_token("u-1", "alice", Role::Admin, SECRET, 3600).unwrap();
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn rejects_expired_token() {
        // Issued 25 hours ago with a 24 hour ttl.
        let claims = Claims {
            id: "u-1".to_string(),
            username: "alice".to_string(),
            role: "admin".to_string(),
            exp: now() - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn rejects_payload_missing_identity_fields() {
        let partial = json!({ "id": "u-1", "exp": now() + 3600 });
        let token = encode(
            &Header::default(),
            &partial,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(verify_token(&token, SECRET).is_err());
    }
}
