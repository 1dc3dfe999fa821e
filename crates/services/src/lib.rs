//! wingmate/crates/services/src/lib.rs
//!
//! The domain services: everything between the HTTP handlers and the
//! storage port. Each service holds an `Arc<dyn DatingRepo>` handle
//! (the accounts service also holds the auth port) and no other state,
//! so a request is an independent unit of work against the store.

pub mod accounts;
pub mod chat;
pub mod discovery;
pub mod friends;
pub mod matching;
pub mod matchmaker;

pub use accounts::{AccountService, Session};
pub use chat::ChatService;
pub use discovery::DiscoveryService;
pub use friends::FriendService;
pub use matching::{MatchSummary, MatchingService};
pub use matchmaker::MatchmakerService;

use domains::{AppError, DatingRepo, Profile, Result};
use uuid::Uuid;

/// Resolves a profile id or fails with `NotFound`.
pub(crate) async fn require_profile(repo: &dyn DatingRepo, id: Uuid) -> Result<Profile> {
    repo.get_profile(id)
        .await?
        .ok_or_else(|| AppError::not_found("profile", id))
}
