//! # API Handlers
//!
//! This module coordinates the flow between HTTP requests and the
//! domain services: validate the wire input, delegate, map the result.
//! No handler talks to a store directly.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use domains::{Profile, ProfilePatch, RelationshipStatus};
use services::Session;
use uuid::Uuid;

use crate::dto::{
    AddFriendRequest, FriendshipCreated, Health, Items, LoginRequest, PostMessageRequest,
    PullCreateRequest, PushOutcome, PushRequest, RegisterRequest, SwipeOutcome, SwipeRequest,
    validate_patch,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn health() -> Json<Health> {
    Json(Health {
        ok: true,
        service: "wingmate",
    })
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<Session>)> {
    body.validate()?;
    let session = state
        .accounts
        .register(
            &body.email,
            &body.password,
            body.name.as_deref().unwrap_or(""),
            body.relationship_status
                .unwrap_or(RelationshipStatus::Single),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<Session>> {
    body.validate()?;
    let session = state.accounts.login(&body.email, &body.password).await?;
    Ok(Json(session))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Profile>> {
    Ok(Json(state.accounts.get_profile(id).await?))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ProfilePatch>,
) -> ApiResult<Json<Profile>> {
    validate_patch(&patch)?;
    Ok(Json(state.accounts.update_profile(id, patch).await?))
}

pub async fn discovery(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Items<Profile>>> {
    let items = state.discovery.discover(id).await?;
    Ok(Json(Items { items }))
}

/// The swipe endpoint answers 200 whether or not a match formed; the
/// body's `match` field carries the outcome.
pub async fn create_swipe(
    State(state): State<AppState>,
    Json(body): Json<SwipeRequest>,
) -> ApiResult<Json<SwipeOutcome>> {
    let formed = state
        .matching
        .record_swipe(body.from_user_id, body.to_user_id, body.direction)
        .await?;
    Ok(Json(SwipeOutcome { r#match: formed }))
}

pub async fn list_matches(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Items<services::MatchSummary>>> {
    let items = state.matching.matches_for(id).await?;
    Ok(Json(Items { items }))
}

pub async fn add_friend(
    State(state): State<AppState>,
    Json(body): Json<AddFriendRequest>,
) -> ApiResult<(StatusCode, Json<FriendshipCreated>)> {
    let friendship = state
        .friends
        .add_friend(body.user_id, body.friend_id)
        .await?;
    Ok((StatusCode::CREATED, Json(FriendshipCreated { friendship })))
}

pub async fn list_friends(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Items<Profile>>> {
    let items = state.friends.list_friends(id).await?;
    Ok(Json(Items { items }))
}

pub async fn push(
    State(state): State<AppState>,
    Json(body): Json<PushRequest>,
) -> ApiResult<(StatusCode, Json<PushOutcome>)> {
    let formed = state
        .matchmaker
        .push(body.matchmaker_id, body.person1_id, body.person2_id)
        .await?;
    Ok((StatusCode::CREATED, Json(PushOutcome { r#match: formed })))
}

pub async fn pull(
    State(state): State<AppState>,
    Json(body): Json<PullCreateRequest>,
) -> ApiResult<(StatusCode, Json<crate::dto::PullCreated>)> {
    let pull_request = state
        .matchmaker
        .pull(body.requester_id, body.matchmaker_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(crate::dto::PullCreated { pull_request }),
    ))
}

pub async fn list_messages(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> ApiResult<Json<Items<domains::ChatMessage>>> {
    let items = state.chat.list_messages(match_id).await?;
    Ok(Json(Items { items }))
}

pub async fn post_message(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Json(body): Json<PostMessageRequest>,
) -> ApiResult<(StatusCode, Json<domains::ChatMessage>)> {
    body.validate()?;
    let message = state
        .chat
        .post_message(match_id, body.sender_id, body.text)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}
