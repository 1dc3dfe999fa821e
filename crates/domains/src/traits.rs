//! # Core Traits (Ports)
//!
//! Any storage or auth adapter must implement these traits to be wired
//! into the binary. Handlers and services only ever see the traits, so
//! no process-wide mutable singleton exists anywhere in the stack.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Account, ChatMessage, Friendship, Match, Profile, ProfilePatch, PullRequest, Swipe,
};

/// Data persistence contract for the whole relationship graph.
///
/// Lookup methods return `Ok(None)` for absent rows; turning absence
/// into [`crate::AppError::NotFound`] is the service layer's job.
/// Adapters must convert every backend failure into the `AppError`
/// taxonomy before it crosses this boundary.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DatingRepo: Send + Sync {
    // Account operations
    async fn create_account(&self, account: Account, profile: Profile) -> Result<()>;
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>>;

    // Profile operations
    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>>;
    async fn update_profile(&self, id: Uuid, patch: ProfilePatch) -> Result<Option<Profile>>;
    async fn list_profiles(&self) -> Result<Vec<Profile>>;

    // Swipe ledger operations (append-only)
    async fn record_swipe(&self, swipe: Swipe) -> Result<()>;
    /// Looks up a prior `like` swipe from `from` to `to`.
    async fn find_like(&self, from: Uuid, to: Uuid) -> Result<Option<Swipe>>;
    /// Every profile id referenced by a swipe involving `user`, in
    /// either direction.
    async fn swipe_partners(&self, user: Uuid) -> Result<Vec<Uuid>>;

    // Match operations
    /// `first`/`second` may arrive in any order; the adapter looks up
    /// the canonical pair.
    async fn find_match_by_pair(&self, first: Uuid, second: Uuid) -> Result<Option<Match>>;
    /// Inserts a match, or returns the existing row for the same
    /// canonical pair. The store's uniqueness constraint, not the
    /// caller's earlier lookup, is what deduplicates racing inserts.
    /// A created match has an empty chat thread from that moment on.
    async fn create_match(&self, candidate: Match) -> Result<Match>;
    async fn get_match(&self, id: Uuid) -> Result<Option<Match>>;
    async fn list_matches_for(&self, user: Uuid) -> Result<Vec<Match>>;

    // Friendship operations
    /// Finds the edge for the unordered pair, in either orientation.
    async fn find_friendship(&self, first: Uuid, second: Uuid) -> Result<Option<Friendship>>;
    /// Fails with `Conflict` if an edge already exists for the pair.
    async fn create_friendship(&self, friendship: Friendship) -> Result<Friendship>;
    async fn list_friendships_for(&self, user: Uuid) -> Result<Vec<Friendship>>;

    // Matchmaker pull requests
    async fn create_pull_request(&self, request: PullRequest) -> Result<PullRequest>;

    // Chat operations
    async fn append_message(&self, message: ChatMessage) -> Result<ChatMessage>;
    /// Messages for a match, ordered by creation time ascending (ties
    /// broken by id, which is insertion-ordered for v7 UUIDs).
    async fn list_messages(&self, match_id: Uuid) -> Result<Vec<ChatMessage>>;
}

/// Identity contract: password hashing and bearer-token issuance.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait AuthProvider: Send + Sync {
    /// Hashes a plaintext password for storage.
    fn hash_password(&self, password: &str) -> Result<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> bool;

    /// Issues the bearer token for a freshly authenticated profile.
    ///
    /// The current scheme returns the raw profile id, which is only
    /// acceptable for demo use; a real deployment must swap in a
    /// signed or opaque session token.
    fn issue_token(&self, profile_id: Uuid) -> String;
}
