//! # Postgres store
//!
//! This module implements the data mapping between the Postgres
//! relational model and the `domains` models.
//!
//! De-duplication of matches and friendships lives in the schema: a
//! unique index on the canonical match pair and an expression index on
//! the unordered friendship pair. Racing check-then-insert callers
//! therefore converge on one row instead of producing duplicates.

use std::time::Duration;

use async_trait::async_trait;
use domains::{
    canonical_pair, Account, AppError, ChatMessage, DatingRepo, Friendship, FriendshipStatus,
    Match, Profile, ProfilePatch, PullRequest, PullStatus, Result, Swipe, SwipeDirection,
};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use uuid::Uuid;

pub struct PgDatingRepo {
    pool: PgPool,
}

impl PgDatingRepo {
    /// Connects with a bounded acquire timeout so a dead database
    /// surfaces as a `Transient` error instead of a hung request.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(16)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await
            .map_err(db_err)?;
        Ok(Self { pool })
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Converts every sqlx failure into the domain taxonomy before it
/// crosses the port boundary.
fn db_err(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => AppError::Transient(e.to_string()),
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(format!("unique constraint violated: {}", db.message()))
        }
        _ => AppError::Internal(e.to_string()),
    }
}

fn status_to_str(status: domains::RelationshipStatus) -> &'static str {
    match status {
        domains::RelationshipStatus::Single => "single",
        domains::RelationshipStatus::NotSingle => "not-single",
    }
}

fn str_to_status(raw: &str) -> Result<domains::RelationshipStatus> {
    match raw {
        "single" => Ok(domains::RelationshipStatus::Single),
        "not-single" => Ok(domains::RelationshipStatus::NotSingle),
        other => Err(AppError::Internal(format!(
            "unexpected relationship_status '{other}' in store"
        ))),
    }
}

fn direction_to_str(direction: SwipeDirection) -> &'static str {
    match direction {
        SwipeDirection::Like => "like",
        SwipeDirection::Pass => "pass",
    }
}

fn str_to_direction(raw: &str) -> Result<SwipeDirection> {
    match raw {
        "like" => Ok(SwipeDirection::Like),
        "pass" => Ok(SwipeDirection::Pass),
        other => Err(AppError::Internal(format!(
            "unexpected swipe direction '{other}' in store"
        ))),
    }
}

fn row_to_profile(row: &PgRow) -> Result<Profile> {
    Ok(Profile {
        id: row.get("id"),
        name: row.get("name"),
        relationship_status: str_to_status(row.get("relationship_status"))?,
        photo: row.get("photo"),
        bio: row.get("bio"),
        age: row.get("age"),
        created_at: row.get("created_at"),
    })
}

fn row_to_match(row: &PgRow) -> Match {
    Match {
        id: row.get("id"),
        user_a: row.get("user_a"),
        user_b: row.get("user_b"),
        created_at: row.get("created_at"),
    }
}

fn row_to_friendship(row: &PgRow) -> Friendship {
    Friendship {
        id: row.get("id"),
        requester_id: row.get("requester_id"),
        addressee_id: row.get("addressee_id"),
        // Only one status exists in the schema; a check constraint
        // keeps it that way.
        status: FriendshipStatus::Accepted,
        created_at: row.get("created_at"),
    }
}

fn row_to_message(row: &PgRow) -> ChatMessage {
    ChatMessage {
        id: row.get("id"),
        match_id: row.get("match_id"),
        sender_id: row.get("sender_id"),
        text: row.get("text"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl DatingRepo for PgDatingRepo {
    /// Inserts the profile and its credentials atomically, so no
    /// profile can exist without an account or vice versa.
    async fn create_account(&self, account: Account, profile: Profile) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query(
            "INSERT INTO profiles (id, name, relationship_status, photo, bio, age, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(profile.id)
        .bind(&profile.name)
        .bind(status_to_str(profile.relationship_status))
        .bind(&profile.photo)
        .bind(&profile.bio)
        .bind(profile.age)
        .bind(profile.created_at)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        sqlx::query(
            "INSERT INTO accounts (profile_id, email, password_hash, created_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(account.profile_id)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| match db_err(e) {
            AppError::Conflict(_) => AppError::Conflict("email already exists".to_string()),
            other => other,
        })?;

        tx.commit().await.map_err(db_err)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        let row = sqlx::query(
            "SELECT profile_id, email, password_hash, created_at \
             FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(|row| Account {
            profile_id: row.get("profile_id"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            created_at: row.get("created_at"),
        }))
    }

    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>> {
        let row = sqlx::query("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(row_to_profile).transpose()
    }

    async fn update_profile(&self, id: Uuid, patch: ProfilePatch) -> Result<Option<Profile>> {
        let row = sqlx::query(
            "UPDATE profiles SET \
                name = COALESCE($2, name), \
                relationship_status = COALESCE($3, relationship_status), \
                photo = COALESCE($4, photo), \
                bio = COALESCE($5, bio), \
                age = COALESCE($6, age) \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&patch.name)
        .bind(patch.relationship_status.map(status_to_str))
        .bind(&patch.photo)
        .bind(&patch.bio)
        .bind(patch.age)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.as_ref().map(row_to_profile).transpose()
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        let rows = sqlx::query("SELECT * FROM profiles")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter().map(row_to_profile).collect()
    }

    async fn record_swipe(&self, swipe: Swipe) -> Result<()> {
        sqlx::query(
            "INSERT INTO swipes (from_user_id, to_user_id, direction, created_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(swipe.from_user_id)
        .bind(swipe.to_user_id)
        .bind(direction_to_str(swipe.direction))
        .bind(swipe.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn find_like(&self, from: Uuid, to: Uuid) -> Result<Option<Swipe>> {
        let row = sqlx::query(
            "SELECT * FROM swipes \
             WHERE from_user_id = $1 AND to_user_id = $2 AND direction = 'like' \
             ORDER BY created_at LIMIT 1",
        )
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(|row| {
            Ok(Swipe {
                from_user_id: row.get("from_user_id"),
                to_user_id: row.get("to_user_id"),
                direction: str_to_direction(row.get("direction"))?,
                created_at: row.get("created_at"),
            })
        })
        .transpose()
    }

    async fn swipe_partners(&self, user: Uuid) -> Result<Vec<Uuid>> {
        let rows = sqlx::query(
            "SELECT CASE WHEN from_user_id = $1 THEN to_user_id ELSE from_user_id END AS partner \
             FROM swipes WHERE from_user_id = $1 OR to_user_id = $1",
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.iter().map(|row| row.get("partner")).collect())
    }

    async fn find_match_by_pair(&self, first: Uuid, second: Uuid) -> Result<Option<Match>> {
        let (user_a, user_b) = canonical_pair(first, second);
        let row = sqlx::query("SELECT * FROM matches WHERE user_a = $1 AND user_b = $2")
            .bind(user_a)
            .bind(user_b)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.as_ref().map(row_to_match))
    }

    /// Insert-or-fetch on the canonical pair. `ON CONFLICT DO NOTHING`
    /// plus the re-select means two racing creators both end up with
    /// the single surviving row.
    async fn create_match(&self, candidate: Match) -> Result<Match> {
        let inserted = sqlx::query(
            "INSERT INTO matches (id, user_a, user_b, created_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_a, user_b) DO NOTHING \
             RETURNING *",
        )
        .bind(candidate.id)
        .bind(candidate.user_a)
        .bind(candidate.user_b)
        .bind(candidate.created_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        if let Some(row) = inserted {
            return Ok(row_to_match(&row));
        }
        self.find_match_by_pair(candidate.user_a, candidate.user_b)
            .await?
            .ok_or_else(|| {
                AppError::Internal("match insert conflicted but no row exists".to_string())
            })
    }

    async fn get_match(&self, id: Uuid) -> Result<Option<Match>> {
        let row = sqlx::query("SELECT * FROM matches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.as_ref().map(row_to_match))
    }

    async fn list_matches_for(&self, user: Uuid) -> Result<Vec<Match>> {
        let rows = sqlx::query("SELECT * FROM matches WHERE user_a = $1 OR user_b = $1")
            .bind(user)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.iter().map(row_to_match).collect())
    }

    async fn find_friendship(&self, first: Uuid, second: Uuid) -> Result<Option<Friendship>> {
        let row = sqlx::query(
            "SELECT * FROM friendships \
             WHERE (requester_id = $1 AND addressee_id = $2) \
                OR (requester_id = $2 AND addressee_id = $1)",
        )
        .bind(first)
        .bind(second)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.as_ref().map(row_to_friendship))
    }

    async fn create_friendship(&self, friendship: Friendship) -> Result<Friendship> {
        let row = sqlx::query(
            "INSERT INTO friendships (id, requester_id, addressee_id, status, created_at) \
             VALUES ($1, $2, $3, 'accepted', $4) \
             RETURNING *",
        )
        .bind(friendship.id)
        .bind(friendship.requester_id)
        .bind(friendship.addressee_id)
        .bind(friendship.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match db_err(e) {
            AppError::Conflict(_) => AppError::Conflict("already friends".to_string()),
            other => other,
        })?;
        Ok(row_to_friendship(&row))
    }

    async fn list_friendships_for(&self, user: Uuid) -> Result<Vec<Friendship>> {
        let rows = sqlx::query(
            "SELECT * FROM friendships WHERE requester_id = $1 OR addressee_id = $1",
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.iter().map(row_to_friendship).collect())
    }

    async fn create_pull_request(&self, request: PullRequest) -> Result<PullRequest> {
        sqlx::query(
            "INSERT INTO pull_requests (id, requester_id, matchmaker_id, status, created_at) \
             VALUES ($1, $2, $3, 'pending', $4)",
        )
        .bind(request.id)
        .bind(request.requester_id)
        .bind(request.matchmaker_id)
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(PullRequest {
            status: PullStatus::Pending,
            ..request
        })
    }

    async fn append_message(&self, message: ChatMessage) -> Result<ChatMessage> {
        let row = sqlx::query(
            "INSERT INTO messages (id, match_id, sender_id, text, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(message.id)
        .bind(message.match_id)
        .bind(message.sender_id)
        .bind(&message.text)
        .bind(message.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            // FK violation on match_id means the thread does not exist.
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::not_found("match", message.match_id)
            }
            _ => db_err(e),
        })?;
        Ok(row_to_message(&row))
    }

    async fn list_messages(&self, match_id: Uuid) -> Result<Vec<ChatMessage>> {
        let rows = sqlx::query(
            "SELECT * FROM messages WHERE match_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.iter().map(row_to_message).collect())
    }
}
