//! # Domain Models
//!
//! These structs represent the core entities of wingmate.
//! We use UUID v7 for time-ordered, globally unique identification.
//! JSON field names are camelCase to match the wire format the mobile
//! client consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a profile is on the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipStatus {
    #[serde(rename = "single")]
    Single,
    #[serde(rename = "not-single")]
    NotSingle,
}

/// Direction of a swipe action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Like,
    Pass,
}

/// The public identity record. Credentials live on [`Account`], never here,
/// so a `Profile` can be serialized to any caller as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub relationship_status: RelationshipStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i16>,
    pub created_at: DateTime<Utc>,
}

/// The credential side of a registration, keyed by the owning profile.
/// Email is stored lowercased; the password is an Argon2 hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub profile_id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A directional like/pass action. Append-only; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swipe {
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub direction: SwipeDirection,
    pub created_at: DateTime<Utc>,
}

/// A symmetric match between two profiles.
///
/// Invariant: `user_a < user_b` (canonical pair ordering), so the same
/// unordered pair always produces the same row. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: Uuid,
    pub user_a: Uuid,
    pub user_b: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// Builds a new match for the canonicalized pair.
    pub fn new(first: Uuid, second: Uuid) -> Self {
        let (user_a, user_b) = canonical_pair(first, second);
        Self {
            id: Uuid::now_v7(),
            user_a,
            user_b,
            created_at: Utc::now(),
        }
    }

    /// True if `user` is one of the two members.
    pub fn involves(&self, user: Uuid) -> bool {
        self.user_a == user || self.user_b == user
    }

    /// The member that is not `user`, if `user` is a member at all.
    pub fn counterpart(&self, user: Uuid) -> Option<Uuid> {
        if self.user_a == user {
            Some(self.user_b)
        } else if self.user_b == user {
            Some(self.user_a)
        } else {
            None
        }
    }
}

/// Sorts an unordered pair of profile ids into canonical storage order.
///
/// UUID `Ord` compares bytes, which for the canonical hyphenated string
/// form equals lexicographic order, so (A,B) and (B,A) always collapse
/// to the same key.
pub fn canonical_pair(first: Uuid, second: Uuid) -> (Uuid, Uuid) {
    if first <= second {
        (first, second)
    } else {
        (second, first)
    }
}

/// Lifecycle of a friendship. Only `accepted` exists in the current
/// design; there is no pending/approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendshipStatus {
    Accepted,
}

/// An undirected friendship edge. At most one per unordered pair,
/// regardless of which side initiated it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friendship {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub addressee_id: Uuid,
    pub status: FriendshipStatus,
    pub created_at: DateTime<Utc>,
}

impl Friendship {
    pub fn new(requester_id: Uuid, addressee_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            requester_id,
            addressee_id,
            status: FriendshipStatus::Accepted,
            created_at: Utc::now(),
        }
    }

    /// The side of the edge that is not `user`, if `user` is on it.
    pub fn counterpart(&self, user: Uuid) -> Option<Uuid> {
        if self.requester_id == user {
            Some(self.addressee_id)
        } else if self.addressee_id == user {
            Some(self.requester_id)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullStatus {
    Pending,
}

/// An advisory "matchmake for me" request. Creating one has no side
/// effect on Match or Friendship state; a human acts on it out of band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub matchmaker_id: Uuid,
    pub status: PullStatus,
    pub created_at: DateTime<Utc>,
}

impl PullRequest {
    pub fn new(requester_id: Uuid, matchmaker_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            requester_id,
            matchmaker_id,
            status: PullStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

/// A chat message scoped to a match. Exists only while its match does.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub match_id: Uuid,
    pub sender_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A partial profile update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub relationship_status: Option<RelationshipStatus>,
    pub photo: Option<String>,
    pub bio: Option<String>,
    pub age: Option<i16>,
}

impl ProfilePatch {
    /// Applies the patch in place.
    pub fn apply(&self, profile: &mut Profile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(status) = self.relationship_status {
            profile.relationship_status = status;
        }
        if let Some(photo) = &self.photo {
            profile.photo = Some(photo.clone());
        }
        if let Some(bio) = &self.bio {
            profile.bio = Some(bio.clone());
        }
        if let Some(age) = self.age {
            profile.age = Some(age);
        }
    }
}
