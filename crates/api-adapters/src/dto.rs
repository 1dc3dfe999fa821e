//! Wire types and input validation.
//!
//! Field names mirror the JSON the mobile client already sends
//! (camelCase). Validation failures surface as
//! `AppError::ValidationError` so they map to 400 like every other
//! malformed input.

use domains::{
    AppError, Friendship, Match, ProfilePatch, PullRequest, RelationshipStatus, Result,
    SwipeDirection,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_BIO_CHARS: usize = 500;
pub const MAX_MESSAGE_CHARS: usize = 1000;
pub const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub relationship_status: Option<RelationshipStatus>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AppError::ValidationError(format!(
                "password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(AppError::ValidationError(
                "name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(AppError::ValidationError(
                "password must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Validates a [`ProfilePatch`] before it reaches the store.
pub fn validate_patch(patch: &ProfilePatch) -> Result<()> {
    if matches!(&patch.name, Some(name) if name.trim().is_empty()) {
        return Err(AppError::ValidationError(
            "name must not be empty".to_string(),
        ));
    }
    if let Some(photo) = &patch.photo {
        if !photo.starts_with("http://") && !photo.starts_with("https://") {
            return Err(AppError::ValidationError(
                "photo must be an http(s) URL".to_string(),
            ));
        }
    }
    if matches!(&patch.bio, Some(bio) if bio.chars().count() > MAX_BIO_CHARS) {
        return Err(AppError::ValidationError(format!(
            "bio must be at most {MAX_BIO_CHARS} characters"
        )));
    }
    if matches!(patch.age, Some(age) if !(18..=120).contains(&age)) {
        return Err(AppError::ValidationError(
            "age must be between 18 and 120".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeRequest {
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub direction: SwipeDirection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFriendRequest {
    pub user_id: Uuid,
    pub friend_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushRequest {
    pub matchmaker_id: Uuid,
    pub person1_id: Uuid,
    pub person2_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullCreateRequest {
    pub requester_id: Uuid,
    pub matchmaker_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageRequest {
    pub sender_id: Uuid,
    pub text: String,
}

impl PostMessageRequest {
    pub fn validate(&self) -> Result<()> {
        let chars = self.text.chars().count();
        if chars == 0 || chars > MAX_MESSAGE_CHARS {
            return Err(AppError::ValidationError(format!(
                "text must be 1..={MAX_MESSAGE_CHARS} characters"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct Items<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct SwipeOutcome {
    /// `null` when the swipe formed no match.
    pub r#match: Option<Match>,
}

#[derive(Debug, Serialize)]
pub struct PushOutcome {
    pub r#match: Match,
}

#[derive(Debug, Serialize)]
pub struct FriendshipCreated {
    pub friendship: Friendship,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullCreated {
    pub pull_request: PullRequest,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub ok: bool,
    pub service: &'static str,
}

/// Accepts `local@domain` where the domain has a dot, rejecting
/// whitespace. Deliberately a shallow shape check, not RFC 5322.
pub fn validate_email(email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(AppError::ValidationError("invalid email".to_string()))
    }
}
