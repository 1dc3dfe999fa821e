//! Matchmaker push and pull.
//!
//! Push: a third party vouches for both sides and creates a match
//! directly, bypassing mutual-swipe verification. Pull: a user asks a
//! friend to matchmake for them, which only leaves an advisory record.

use std::sync::Arc;

use domains::{DatingRepo, Match, PullRequest, Result};
use uuid::Uuid;

use crate::require_profile;

pub struct MatchmakerService {
    repo: Arc<dyn DatingRepo>,
}

impl MatchmakerService {
    pub fn new(repo: Arc<dyn DatingRepo>) -> Self {
        Self { repo }
    }

    /// Creates (or idempotently returns) the match for a pair on a
    /// matchmaker's say-so.
    ///
    /// Only the two matched people must resolve; the matchmaker id is
    /// not checked against the friend graph and is kept for the audit
    /// trail only (the match row itself does not carry it).
    pub async fn push(
        &self,
        matchmaker_id: Uuid,
        person1_id: Uuid,
        person2_id: Uuid,
    ) -> Result<Match> {
        require_profile(self.repo.as_ref(), person1_id).await?;
        require_profile(self.repo.as_ref(), person2_id).await?;

        if let Some(existing) = self
            .repo
            .find_match_by_pair(person1_id, person2_id)
            .await?
        {
            tracing::info!(
                matchmaker = %matchmaker_id,
                match_id = %existing.id,
                "push repeated for an already matched pair"
            );
            return Ok(existing);
        }

        let created = self
            .repo
            .create_match(Match::new(person1_id, person2_id))
            .await?;
        tracing::info!(
            matchmaker = %matchmaker_id,
            match_id = %created.id,
            user_a = %created.user_a,
            user_b = %created.user_b,
            "matchmaker pushed a match"
        );
        Ok(created)
    }

    /// Records a pending "matchmake for me" request.
    ///
    /// Repeated pulls to the same matchmaker each create a fresh
    /// record; nothing resolves them automatically.
    pub async fn pull(&self, requester_id: Uuid, matchmaker_id: Uuid) -> Result<PullRequest> {
        require_profile(self.repo.as_ref(), requester_id).await?;
        require_profile(self.repo.as_ref(), matchmaker_id).await?;

        self.repo
            .create_pull_request(PullRequest::new(requester_id, matchmaker_id))
            .await
    }
}
