//! Chat threads, one per match.
//!
//! A thread exists exactly as long as its match does; posting to an
//! unknown match id creates nothing.

use std::sync::Arc;

use chrono::Utc;
use domains::{AppError, ChatMessage, DatingRepo, Result};
use uuid::Uuid;

pub struct ChatService {
    repo: Arc<dyn DatingRepo>,
}

impl ChatService {
    pub fn new(repo: Arc<dyn DatingRepo>) -> Self {
        Self { repo }
    }

    /// Appends a message to a match's thread.
    ///
    /// The sender id is stored as given; there is no check that the
    /// sender is one of the match's two members.
    pub async fn post_message(
        &self,
        match_id: Uuid,
        sender_id: Uuid,
        text: String,
    ) -> Result<ChatMessage> {
        self.require_match(match_id).await?;
        self.repo
            .append_message(ChatMessage {
                id: Uuid::now_v7(),
                match_id,
                sender_id,
                text,
                created_at: Utc::now(),
            })
            .await
    }

    /// The thread for a match, ordered by creation time ascending.
    pub async fn list_messages(&self, match_id: Uuid) -> Result<Vec<ChatMessage>> {
        self.require_match(match_id).await?;
        self.repo.list_messages(match_id).await
    }

    async fn require_match(&self, match_id: Uuid) -> Result<()> {
        self.repo
            .get_match(match_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("match", match_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{Match, MockDatingRepo};

    #[tokio::test]
    async fn posting_to_an_unknown_match_creates_nothing() {
        let mut repo = MockDatingRepo::new();
        repo.expect_get_match().returning(|_| Ok(None));
        repo.expect_append_message().never();

        let service = ChatService::new(Arc::new(repo));
        let err = service
            .post_message(Uuid::now_v7(), Uuid::now_v7(), "hi".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_, _)));
    }

    #[tokio::test]
    async fn posted_message_carries_thread_and_sender() {
        let m = Match::new(Uuid::now_v7(), Uuid::now_v7());
        let match_id = m.id;
        let sender = m.user_a;

        let mut repo = MockDatingRepo::new();
        repo.expect_get_match()
            .returning(move |_| Ok(Some(m.clone())));
        repo.expect_append_message()
            .withf(move |msg| msg.match_id == match_id && msg.sender_id == sender)
            .returning(|msg| Ok(msg));

        let service = ChatService::new(Arc::new(repo));
        let message = service
            .post_message(match_id, sender, "coffee on saturday?".to_string())
            .await
            .unwrap();
        assert_eq!(message.text, "coffee on saturday?");
    }

    #[tokio::test]
    async fn listing_an_unknown_match_is_not_found() {
        let mut repo = MockDatingRepo::new();
        repo.expect_get_match().returning(|_| Ok(None));
        repo.expect_list_messages().never();

        let service = ChatService::new(Arc::new(repo));
        let err = service.list_messages(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_, _)));
    }
}
