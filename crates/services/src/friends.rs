//! The friend graph: undirected, immediately-accepted edges.

use std::sync::Arc;

use domains::{AppError, DatingRepo, Friendship, Profile, Result};
use uuid::Uuid;

use crate::require_profile;

pub struct FriendService {
    repo: Arc<dyn DatingRepo>,
}

impl FriendService {
    pub fn new(repo: Arc<dyn DatingRepo>) -> Self {
        Self { repo }
    }

    /// Creates an accepted friendship between two profiles.
    ///
    /// Fails with `Conflict` if an edge already exists for the pair in
    /// either orientation. The store's unique index on the unordered
    /// pair backs this check up under concurrent calls.
    pub async fn add_friend(&self, user_id: Uuid, friend_id: Uuid) -> Result<Friendship> {
        require_profile(self.repo.as_ref(), user_id).await?;
        require_profile(self.repo.as_ref(), friend_id).await?;

        if self.repo.find_friendship(user_id, friend_id).await?.is_some() {
            return Err(AppError::Conflict("already friends".to_string()));
        }

        let friendship = self
            .repo
            .create_friendship(Friendship::new(user_id, friend_id))
            .await?;
        tracing::info!(
            requester = %friendship.requester_id,
            addressee = %friendship.addressee_id,
            "friendship created"
        );
        Ok(friendship)
    }

    /// All profiles connected to `user_id` by an accepted friendship,
    /// with the counterpart resolved regardless of which side of the
    /// edge `user_id` occupies. An unknown user has no friends; this
    /// read path performs no existence check.
    pub async fn list_friends(&self, user_id: Uuid) -> Result<Vec<Profile>> {
        let mut friends = Vec::new();
        for friendship in self.repo.list_friendships_for(user_id).await? {
            let Some(other_id) = friendship.counterpart(user_id) else {
                continue;
            };
            if let Some(other) = self.repo.get_profile(other_id).await? {
                friends.push(other);
            }
        }
        Ok(friends)
    }
}
