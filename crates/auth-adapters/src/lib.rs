//! # auth-adapters
//!
//! Argon2-based implementation of `AuthProvider`.
//! Handles password hashing/verification and bearer-token issuance.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use domains::{AppError, AuthProvider, Result};
use uuid::Uuid;

/// Argon2id hashing with the crate's default parameters, plus the
/// demo raw-id token scheme.
#[derive(Default)]
pub struct Argon2AuthProvider {
    hasher: Argon2<'static>,
}

impl Argon2AuthProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthProvider for Argon2AuthProvider {
    fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .hasher
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored PHC-format hash.
    /// An unparsable stored hash verifies as false rather than erroring.
    fn verify_password(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            tracing::warn!("stored password hash is not valid PHC format");
            return false;
        };
        self.hasher
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// The bearer token is the profile id, verbatim. Only acceptable
    /// behind a demo deployment; swap in a signed or opaque session
    /// token before exposing this anywhere real.
    fn issue_token(&self, profile_id: Uuid) -> String {
        profile_id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let provider = Argon2AuthProvider::new();
        let hash = provider.hash_password("demo123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(provider.verify_password("demo123", &hash));
        assert!(!provider.verify_password("demo124", &hash));
    }

    #[test]
    fn garbage_stored_hash_never_verifies() {
        let provider = Argon2AuthProvider::new();
        assert!(!provider.verify_password("demo123", "not-a-phc-string"));
    }

    #[test]
    fn token_is_the_raw_profile_id() {
        let provider = Argon2AuthProvider::new();
        let id = Uuid::now_v7();
        assert_eq!(provider.issue_token(id), id.to_string());
    }
}
