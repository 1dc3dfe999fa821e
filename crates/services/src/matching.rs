//! Match formation: the swipe ledger and mutual-like detection.
//!
//! A swipe is durably recorded before any match determination happens,
//! so "swipe saved but no match resulted" is a normal outcome, not a
//! partial failure.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domains::{DatingRepo, Match, Profile, Result, Swipe, SwipeDirection};
use serde::Serialize;
use uuid::Uuid;

use crate::require_profile;

/// A match as listed for one of its members: the counterpart is
/// resolved to a full profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub other_user: Profile,
}

pub struct MatchingService {
    repo: Arc<dyn DatingRepo>,
}

impl MatchingService {
    pub fn new(repo: Arc<dyn DatingRepo>) -> Self {
        Self { repo }
    }

    /// Records a swipe and returns the match it completed, if any.
    ///
    /// Sequence: both profiles must resolve; the swipe is appended;
    /// a `pass` ends there. A `like` checks for the reverse like and,
    /// on a mutual like, resolves the canonical pair to exactly one
    /// match: an existing row is returned idempotently, otherwise one
    /// is created (which also opens its empty chat thread).
    pub async fn record_swipe(
        &self,
        from: Uuid,
        to: Uuid,
        direction: SwipeDirection,
    ) -> Result<Option<Match>> {
        require_profile(self.repo.as_ref(), from).await?;
        require_profile(self.repo.as_ref(), to).await?;

        self.repo
            .record_swipe(Swipe {
                from_user_id: from,
                to_user_id: to,
                direction,
                created_at: Utc::now(),
            })
            .await?;

        if direction == SwipeDirection::Pass {
            return Ok(None);
        }

        if self.repo.find_like(to, from).await?.is_none() {
            return Ok(None);
        }

        if let Some(existing) = self.repo.find_match_by_pair(from, to).await? {
            return Ok(Some(existing));
        }

        let created = self.repo.create_match(Match::new(from, to)).await?;
        tracing::info!(
            match_id = %created.id,
            user_a = %created.user_a,
            user_b = %created.user_b,
            "mutual like formed a match"
        );
        Ok(Some(created))
    }

    /// All matches involving `user`, with the counterpart resolved.
    ///
    /// An unknown user simply has no matches; there is no existence
    /// check on this read path.
    pub async fn matches_for(&self, user: Uuid) -> Result<Vec<MatchSummary>> {
        let mut summaries = Vec::new();
        for m in self.repo.list_matches_for(user).await? {
            let Some(other_id) = m.counterpart(user) else {
                continue;
            };
            let Some(other_user) = self.repo.get_profile(other_id).await? else {
                continue;
            };
            summaries.push(MatchSummary {
                id: m.id,
                created_at: m.created_at,
                other_user,
            });
        }
        Ok(summaries)
    }
}
