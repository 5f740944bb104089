use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hashes with a freshly generated salt per credential.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
}

/// Never errors: empty input or an unparseable stored hash verify as false.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    if password.is_empty() || hashed.is_empty() {
        return false;
    }

    let parsed = match PasswordHash::new(hashed) {
        Ok(p) => p,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_matching_password() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("battery staple", &hash));
    }

    #[test]
    fn salts_are_per_credential() {
        let a = hash_password("samepw").unwrap();
        let b = hash_password("samepw").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_inputs_verify_false_without_panicking() {
        let hash = hash_password("x").unwrap();
        assert!(!verify_password("", &hash));
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "not-a-phc-string"));
    }
}
