//! # JSON file store
//!
//! A `DatingRepo` over a single JSON document: the whole state is
//! rewritten on every mutation. One process lock guards the state, so
//! this adapter is for single-process demo use and the integration
//! tests only. It must never sit under concurrent writers.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use domains::{
    canonical_pair, Account, AppError, ChatMessage, DatingRepo, Friendship, Match, Profile,
    ProfilePatch, PullRequest, Result, Swipe,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The persisted document. Field names are stable: they are the
/// on-disk format.
#[derive(Debug, Default, Serialize, Deserialize)]
struct DbState {
    accounts: Vec<Account>,
    profiles: Vec<Profile>,
    swipes: Vec<Swipe>,
    matches: Vec<Match>,
    friendships: Vec<Friendship>,
    pull_requests: Vec<PullRequest>,
    messages_by_match: HashMap<Uuid, Vec<ChatMessage>>,
}

pub struct JsonFileRepo {
    path: PathBuf,
    state: Mutex<DbState>,
}

impl JsonFileRepo {
    /// Opens (or creates) the store file. An unreadable or corrupt
    /// file is replaced with an empty state rather than failing the
    /// boot.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::Internal(format!("creating {}: {e}", parent.display())))?;
        }

        let state = match fs::read(&path) {
            Ok(raw) => match serde_json::from_slice::<DbState>(&raw) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "store file corrupt, resetting");
                    DbState::default()
                }
            },
            Err(_) => DbState::default(),
        };

        let repo = Self {
            path,
            state: Mutex::new(state),
        };
        {
            let state = repo.lock();
            repo.save(&state)?;
        }
        Ok(repo)
    }

    fn lock(&self) -> MutexGuard<'_, DbState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Full-state replace-and-save; called under the lock after every
    /// mutation.
    fn save(&self, state: &DbState) -> Result<()> {
        let raw = serde_json::to_vec_pretty(state)
            .map_err(|e| AppError::Internal(format!("serializing store: {e}")))?;
        fs::write(&self.path, raw)
            .map_err(|e| AppError::Internal(format!("writing {}: {e}", self.path.display())))
    }

    /// The on-disk path, mostly useful in logs.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DatingRepo for JsonFileRepo {
    async fn create_account(&self, account: Account, profile: Profile) -> Result<()> {
        let mut state = self.lock();
        if state
            .accounts
            .iter()
            .any(|a| a.email.eq_ignore_ascii_case(&account.email))
        {
            return Err(AppError::Conflict("email already exists".to_string()));
        }
        state.accounts.push(account);
        state.profiles.push(profile);
        self.save(&state)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        let state = self.lock();
        Ok(state
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>> {
        let state = self.lock();
        Ok(state.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn update_profile(&self, id: Uuid, patch: ProfilePatch) -> Result<Option<Profile>> {
        let mut state = self.lock();
        let Some(profile) = state.profiles.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        patch.apply(profile);
        let updated = profile.clone();
        self.save(&state)?;
        Ok(Some(updated))
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        Ok(self.lock().profiles.clone())
    }

    async fn record_swipe(&self, swipe: Swipe) -> Result<()> {
        let mut state = self.lock();
        state.swipes.push(swipe);
        self.save(&state)
    }

    async fn find_like(&self, from: Uuid, to: Uuid) -> Result<Option<Swipe>> {
        let state = self.lock();
        Ok(state
            .swipes
            .iter()
            .find(|s| {
                s.from_user_id == from
                    && s.to_user_id == to
                    && s.direction == domains::SwipeDirection::Like
            })
            .cloned())
    }

    async fn swipe_partners(&self, user: Uuid) -> Result<Vec<Uuid>> {
        let state = self.lock();
        Ok(state
            .swipes
            .iter()
            .filter_map(|s| {
                if s.from_user_id == user {
                    Some(s.to_user_id)
                } else if s.to_user_id == user {
                    Some(s.from_user_id)
                } else {
                    None
                }
            })
            .collect())
    }

    async fn find_match_by_pair(&self, first: Uuid, second: Uuid) -> Result<Option<Match>> {
        let (user_a, user_b) = canonical_pair(first, second);
        let state = self.lock();
        Ok(state
            .matches
            .iter()
            .find(|m| m.user_a == user_a && m.user_b == user_b)
            .cloned())
    }

    async fn create_match(&self, candidate: Match) -> Result<Match> {
        let mut state = self.lock();
        // The pair lookup under the same lock is this store's
        // equivalent of the relational unique index.
        if let Some(existing) = state
            .matches
            .iter()
            .find(|m| m.user_a == candidate.user_a && m.user_b == candidate.user_b)
        {
            return Ok(existing.clone());
        }
        state.matches.push(candidate.clone());
        state.messages_by_match.entry(candidate.id).or_default();
        self.save(&state)?;
        Ok(candidate)
    }

    async fn get_match(&self, id: Uuid) -> Result<Option<Match>> {
        let state = self.lock();
        Ok(state.matches.iter().find(|m| m.id == id).cloned())
    }

    async fn list_matches_for(&self, user: Uuid) -> Result<Vec<Match>> {
        let state = self.lock();
        Ok(state
            .matches
            .iter()
            .filter(|m| m.involves(user))
            .cloned()
            .collect())
    }

    async fn find_friendship(&self, first: Uuid, second: Uuid) -> Result<Option<Friendship>> {
        let state = self.lock();
        Ok(state
            .friendships
            .iter()
            .find(|f| {
                (f.requester_id == first && f.addressee_id == second)
                    || (f.requester_id == second && f.addressee_id == first)
            })
            .cloned())
    }

    async fn create_friendship(&self, friendship: Friendship) -> Result<Friendship> {
        let mut state = self.lock();
        if state.friendships.iter().any(|f| {
            (f.requester_id == friendship.requester_id && f.addressee_id == friendship.addressee_id)
                || (f.requester_id == friendship.addressee_id
                    && f.addressee_id == friendship.requester_id)
        }) {
            return Err(AppError::Conflict("already friends".to_string()));
        }
        state.friendships.push(friendship.clone());
        self.save(&state)?;
        Ok(friendship)
    }

    async fn list_friendships_for(&self, user: Uuid) -> Result<Vec<Friendship>> {
        let state = self.lock();
        Ok(state
            .friendships
            .iter()
            .filter(|f| f.requester_id == user || f.addressee_id == user)
            .cloned()
            .collect())
    }

    async fn create_pull_request(&self, request: PullRequest) -> Result<PullRequest> {
        let mut state = self.lock();
        state.pull_requests.push(request.clone());
        self.save(&state)?;
        Ok(request)
    }

    async fn append_message(&self, message: ChatMessage) -> Result<ChatMessage> {
        let mut state = self.lock();
        if !state.matches.iter().any(|m| m.id == message.match_id) {
            return Err(AppError::not_found("match", message.match_id));
        }
        state
            .messages_by_match
            .entry(message.match_id)
            .or_default()
            .push(message.clone());
        self.save(&state)?;
        Ok(message)
    }

    async fn list_messages(&self, match_id: Uuid) -> Result<Vec<ChatMessage>> {
        let state = self.lock();
        let mut messages = state
            .messages_by_match
            .get(&match_id)
            .cloned()
            .unwrap_or_default();
        // Creation order with v7 ids as the tiebreak for equal stamps.
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domains::{RelationshipStatus, SwipeDirection};

    fn profile(name: &str) -> Profile {
        Profile {
            id: Uuid::now_v7(),
            name: name.to_string(),
            relationship_status: RelationshipStatus::Single,
            photo: None,
            bio: None,
            age: None,
            created_at: Utc::now(),
        }
    }

    fn account(profile: &Profile, email: &str) -> Account {
        Account {
            profile_id: profile.id,
            email: email.to_string(),
            password_hash: "$argon2id$demo".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");

        let sophie = profile("Sophie");
        {
            let repo = JsonFileRepo::open(&path).unwrap();
            repo.create_account(account(&sophie, "sophie@example.com"), sophie.clone())
                .await
                .unwrap();
        }

        let repo = JsonFileRepo::open(&path).unwrap();
        let loaded = repo.get_profile(sophie.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Sophie");
        assert!(repo
            .find_account_by_email("SOPHIE@example.com")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn corrupt_file_resets_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, b"{ not json").unwrap();

        let repo = JsonFileRepo::open(&path).unwrap();
        assert!(repo.list_profiles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepo::open(dir.path().join("db.json")).unwrap();

        let sophie = profile("Sophie");
        repo.create_account(account(&sophie, "sophie@example.com"), sophie.clone())
            .await
            .unwrap();

        let dupe = profile("Imposter");
        let err = repo
            .create_account(account(&dupe, "sophie@example.com"), dupe)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn match_pair_is_unique_and_order_blind() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepo::open(dir.path().join("db.json")).unwrap();

        let (a, b) = (Uuid::now_v7(), Uuid::now_v7());
        let first = repo.create_match(Match::new(a, b)).await.unwrap();
        let second = repo.create_match(Match::new(b, a)).await.unwrap();
        assert_eq!(first.id, second.id);

        let found = repo.find_match_by_pair(b, a).await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
    }

    #[tokio::test]
    async fn friendship_pair_is_unique_in_either_orientation() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepo::open(dir.path().join("db.json")).unwrap();

        let (a, b) = (Uuid::now_v7(), Uuid::now_v7());
        repo.create_friendship(Friendship::new(a, b)).await.unwrap();
        let err = repo
            .create_friendship(Friendship::new(b, a))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn new_match_opens_an_empty_thread() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepo::open(dir.path().join("db.json")).unwrap();

        let m = repo
            .create_match(Match::new(Uuid::now_v7(), Uuid::now_v7()))
            .await
            .unwrap();
        assert!(repo.list_messages(m.id).await.unwrap().is_empty());

        let err = repo
            .append_message(ChatMessage {
                id: Uuid::now_v7(),
                match_id: Uuid::now_v7(),
                sender_id: m.user_a,
                text: "hello?".to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_, _)));
    }

    #[tokio::test]
    async fn swipe_partners_cover_both_directions() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepo::open(dir.path().join("db.json")).unwrap();

        let (me, liked, liked_me) = (Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7());
        for (from, to) in [(me, liked), (liked_me, me)] {
            repo.record_swipe(Swipe {
                from_user_id: from,
                to_user_id: to,
                direction: SwipeDirection::Like,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        }

        let mut partners = repo.swipe_partners(me).await.unwrap();
        partners.sort();
        let mut expected = vec![liked, liked_me];
        expected.sort();
        assert_eq!(partners, expected);
    }
}
