//! In-memory message store
//!
//! Rows are kept in the flat storage schema, ascending by id.

use chrono::Utc;

use crate::types::{ChatMessage, EmotionResult, MessageRow, NewMessage};

/// Insertion-ordered message rows
#[derive(Debug)]
pub struct MessageStore {
    rows: Vec<MessageRow>,
    next_id: u64,
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageStore {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }

    /// Store a message with its resolved emotion and return the row
    pub fn insert(&mut self, req: &NewMessage, emotion: EmotionResult) -> MessageRow {
        let message = ChatMessage {
            id: self.next_id,
            user_id: req.user_id.clone(),
            user_name: req.user_name.clone(),
            avatar: req.avatar.clone(),
            content: req.content.clone(),
            timestamp: Utc::now(),
            emotion,
        };
        self.next_id += 1;

        let row = MessageRow::from_message(&message);
        self.rows.push(row.clone());
        row
    }

    /// All rows, ascending
    pub fn list(&self) -> &[MessageRow] {
        &self.rows
    }

    pub fn get(&self, id: u64) -> Option<&MessageRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Drop every row; ids keep increasing
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Emotion;

    fn neutral() -> EmotionResult {
        EmotionResult::new(Emotion::Netral, "😐", 0.3, vec![])
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut store = MessageStore::new();
        let a = store.insert(&NewMessage::plain("u1", "A", "halo"), neutral());
        let b = store.insert(&NewMessage::plain("u2", "B", "hai"), neutral());
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[1].content, "hai");
        assert_eq!(store.get(1).map(|r| r.user_name.as_str()), Some("A"));
    }

    #[test]
    fn test_clear_keeps_counter() {
        let mut store = MessageStore::new();
        store.insert(&NewMessage::plain("u1", "A", "halo"), neutral());
        store.clear();
        assert!(store.is_empty());
        let row = store.insert(&NewMessage::plain("u1", "A", "lagi"), neutral());
        assert_eq!(row.id, 2);
    }

    #[test]
    fn test_keywords_stored_joined() {
        let mut store = MessageStore::new();
        let emotion = EmotionResult::new(
            Emotion::Terkejut,
            "😲",
            0.67,
            vec!["kaget".to_string(), "kaget banget".to_string()],
        );
        let row = store.insert(&NewMessage::plain("u1", "A", "kaget banget"), emotion);
        assert_eq!(row.keywords, "kaget,kaget banget");
        assert_eq!(row.emotion, "terkejut");
    }
}
