//! The discovery feed: unseen, eligible candidates for a user.

use std::collections::HashSet;
use std::sync::Arc;

use domains::{DatingRepo, Profile, RelationshipStatus, Result};
use uuid::Uuid;

use crate::require_profile;

pub struct DiscoveryService {
    repo: Arc<dyn DatingRepo>,
}

impl DiscoveryService {
    pub fn new(repo: Arc<dyn DatingRepo>) -> Self {
        Self { repo }
    }

    /// Candidates for `user_id`: every `single` profile except the user
    /// themself and anyone already referenced by a swipe involving the
    /// user, in either direction.
    ///
    /// No ranking is applied; the result keeps whatever order the
    /// store returned, which is not guaranteed stable.
    pub async fn discover(&self, user_id: Uuid) -> Result<Vec<Profile>> {
        require_profile(self.repo.as_ref(), user_id).await?;

        let seen: HashSet<Uuid> = self
            .repo
            .swipe_partners(user_id)
            .await?
            .into_iter()
            .collect();

        Ok(self
            .repo
            .list_profiles()
            .await?
            .into_iter()
            .filter(|p| p.id != user_id)
            .filter(|p| p.relationship_status == RelationshipStatus::Single)
            .filter(|p| !seen.contains(&p.id))
            .collect())
    }
}
