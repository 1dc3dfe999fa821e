//! wingmate/crates/domains/src/lib.rs
//!
//! The central domain models and interface definitions for wingmate.

pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_message_creation_v7() {
        let id = Uuid::now_v7();
        let message = ChatMessage {
            id,
            match_id: Uuid::now_v7(),
            sender_id: Uuid::now_v7(),
            text: "Hey! Nora says we should meet.".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(message.id, id);
        assert!(message.text.len() <= 1000);
    }

    #[test]
    fn v7_ids_are_insertion_ordered() {
        // list_messages relies on id order as the tiebreak for equal
        // timestamps.
        let first = Uuid::now_v7();
        let second = Uuid::now_v7();
        assert!(first < second);
    }
}
