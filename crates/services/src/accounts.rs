//! Registration, login, and profile CRUD.
//!
//! The credential record ([`domains::Account`]) and the public
//! [`domains::Profile`] are created together; only the profile ever
//! leaves this layer.

use std::sync::Arc;

use chrono::Utc;
use domains::{
    Account, AppError, AuthProvider, DatingRepo, Profile, ProfilePatch, RelationshipStatus, Result,
};
use serde::Serialize;
use uuid::Uuid;

use crate::require_profile;

/// A freshly authenticated user plus their bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user: Profile,
    pub token: String,
}

pub struct AccountService {
    repo: Arc<dyn DatingRepo>,
    auth: Arc<dyn AuthProvider>,
}

impl AccountService {
    pub fn new(repo: Arc<dyn DatingRepo>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { repo, auth }
    }

    /// Creates an account + profile pair and logs the new user in.
    ///
    /// Fails with `Conflict` if the email is already registered.
    /// Emails are compared and stored lowercased.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        relationship_status: RelationshipStatus,
    ) -> Result<Session> {
        let email = email.trim().to_ascii_lowercase();
        if self.repo.find_account_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("email already exists".to_string()));
        }

        let now = Utc::now();
        let profile = Profile {
            id: Uuid::now_v7(),
            name: name.to_string(),
            relationship_status,
            photo: None,
            bio: None,
            age: None,
            created_at: now,
        };
        let account = Account {
            profile_id: profile.id,
            email,
            password_hash: self.auth.hash_password(password)?,
            created_at: now,
        };
        self.repo.create_account(account, profile.clone()).await?;

        tracing::info!(profile_id = %profile.id, "registered new profile");
        Ok(Session {
            token: self.auth.issue_token(profile.id),
            user: profile,
        })
    }

    /// Verifies credentials and issues a token.
    ///
    /// An unknown email and a wrong password are indistinguishable to
    /// the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim().to_ascii_lowercase();
        let unauthorized = || AppError::Unauthorized("invalid credentials".to_string());

        let account = self
            .repo
            .find_account_by_email(&email)
            .await?
            .ok_or_else(unauthorized)?;
        if !self.auth.verify_password(password, &account.password_hash) {
            return Err(unauthorized());
        }

        let user = require_profile(self.repo.as_ref(), account.profile_id).await?;
        Ok(Session {
            token: self.auth.issue_token(user.id),
            user,
        })
    }

    pub async fn get_profile(&self, id: Uuid) -> Result<Profile> {
        require_profile(self.repo.as_ref(), id).await
    }

    /// Applies a partial update; untouched fields keep their values.
    pub async fn update_profile(&self, id: Uuid, patch: ProfilePatch) -> Result<Profile> {
        self.repo
            .update_profile(id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("profile", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{MockAuthProvider, MockDatingRepo};

    fn profile(id: Uuid, name: &str) -> Profile {
        Profile {
            id,
            name: name.to_string(),
            relationship_status: RelationshipStatus::Single,
            photo: None,
            bio: None,
            age: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let mut repo = MockDatingRepo::new();
        let existing = Account {
            profile_id: Uuid::now_v7(),
            email: "sophie@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            created_at: Utc::now(),
        };
        repo.expect_find_account_by_email()
            .withf(|email| email == "sophie@example.com")
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_create_account().never();

        let service = AccountService::new(Arc::new(repo), Arc::new(MockAuthProvider::new()));
        // Mixed case must collide with the stored lowercase email.
        let err = service
            .register("Sophie@Example.com", "demo123", "Sophie", RelationshipStatus::Single)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn register_stores_hash_and_returns_id_token() {
        let mut repo = MockDatingRepo::new();
        repo.expect_find_account_by_email().returning(|_| Ok(None));
        repo.expect_create_account()
            .withf(|account, profile| {
                account.password_hash == "hashed" && account.profile_id == profile.id
            })
            .returning(|_, _| Ok(()));

        let mut auth = MockAuthProvider::new();
        auth.expect_hash_password()
            .withf(|password| password == "demo123")
            .returning(|_| Ok("hashed".to_string()));
        auth.expect_issue_token().returning(|id| id.to_string());

        let service = AccountService::new(Arc::new(repo), Arc::new(auth));
        let session = service
            .register("milan@example.com", "demo123", "Milan", RelationshipStatus::Single)
            .await
            .unwrap();
        assert_eq!(session.token, session.user.id.to_string());
        assert_eq!(session.user.name, "Milan");
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let account = Account {
            profile_id: Uuid::now_v7(),
            email: "nora@example.com".to_string(),
            password_hash: "stored-hash".to_string(),
            created_at: Utc::now(),
        };
        let mut repo = MockDatingRepo::new();
        repo.expect_find_account_by_email()
            .returning(move |_| Ok(Some(account.clone())));

        let mut auth = MockAuthProvider::new();
        auth.expect_verify_password().returning(|_, _| false);

        let service = AccountService::new(Arc::new(repo), Arc::new(auth));
        let err = service.login("nora@example.com", "nope").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn login_resolves_the_profile() {
        let user = profile(Uuid::now_v7(), "Nora");
        let user_id = user.id;
        let account = Account {
            profile_id: user_id,
            email: "nora@example.com".to_string(),
            password_hash: "stored-hash".to_string(),
            created_at: Utc::now(),
        };

        let mut repo = MockDatingRepo::new();
        repo.expect_find_account_by_email()
            .returning(move |_| Ok(Some(account.clone())));
        repo.expect_get_profile()
            .returning(move |_| Ok(Some(user.clone())));

        let mut auth = MockAuthProvider::new();
        auth.expect_verify_password().returning(|_, _| true);
        auth.expect_issue_token().returning(|id| id.to_string());

        let service = AccountService::new(Arc::new(repo), Arc::new(auth));
        let session = service.login("nora@example.com", "demo123").await.unwrap();
        assert_eq!(session.user.id, user_id);
    }

    #[tokio::test]
    async fn unknown_profile_update_is_not_found() {
        let mut repo = MockDatingRepo::new();
        repo.expect_update_profile().returning(|_, _| Ok(None));

        let service = AccountService::new(Arc::new(repo), Arc::new(MockAuthProvider::new()));
        let err = service
            .update_profile(Uuid::now_v7(), ProfilePatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_, _)));
    }
}
