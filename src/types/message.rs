//! Chat message records
//!
//! `ChatMessage` is the shape clients see; `MessageRow` is the flat storage
//! schema where keywords live in one delimited column.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::result::{join_keywords, split_keywords};
use crate::types::EmotionResult;

/// A message with its emotion tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub user_id: String,
    pub user_name: String,
    pub avatar: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub emotion: EmotionResult,
}

impl ChatMessage {
    /// Rebuild a message from storage.
    ///
    /// A row whose annotation is malformed goes through `reclassify` on
    /// its raw content instead of being trusted.
    pub fn from_row<F>(row: &MessageRow, reclassify: F) -> Self
    where
        F: FnOnce(&str) -> EmotionResult,
    {
        let emotion = EmotionResult::from_annotation(
            Some(&row.emotion),
            Some(&row.emoji),
            Some(row.confidence),
            split_keywords(&row.keywords),
        )
        .unwrap_or_else(|| reclassify(&row.content));

        Self {
            id: row.id,
            user_id: row.user_id.clone(),
            user_name: row.user_name.clone(),
            avatar: row.avatar.clone(),
            content: row.content.clone(),
            timestamp: row.timestamp,
            emotion,
        }
    }

    /// Display name, falling back to the user id
    pub fn display_name(&self) -> &str {
        if self.user_name.is_empty() {
            &self.user_id
        } else {
            &self.user_name
        }
    }
}

/// Flat storage row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRow {
    pub id: u64,
    pub user_id: String,
    pub user_name: String,
    pub avatar: String,
    pub content: String,
    pub emotion: String,
    pub emoji: String,
    pub confidence: f64,
    /// Comma-joined keyword list
    pub keywords: String,
    pub timestamp: DateTime<Utc>,
}

impl MessageRow {
    /// Flatten a message for storage
    pub fn from_message(message: &ChatMessage) -> Self {
        Self {
            id: message.id,
            user_id: message.user_id.clone(),
            user_name: message.user_name.clone(),
            avatar: message.avatar.clone(),
            content: message.content.clone(),
            emotion: message.emotion.emotion.label().to_string(),
            emoji: message.emotion.emoji.clone(),
            confidence: message.emotion.confidence,
            keywords: join_keywords(&message.emotion.keywords),
            timestamp: message.timestamp,
        }
    }
}

/// Ingestion request.
///
/// Clients may send a precomputed annotation either flat (`emotion` is a
/// label, with `emoji`/`confidence`/`keywords` alongside) or nested
/// (`emotion` is an object). Anything else is treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMessage {
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub avatar: String,
    pub content: String,
    #[serde(default)]
    pub emotion: Option<Value>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub keywords: Option<Value>,
}

impl NewMessage {
    /// Convenience constructor for a message without annotation
    pub fn plain(
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// The client-supplied annotation, if it is well formed
    pub fn annotation(&self) -> Option<EmotionResult> {
        match self.emotion.as_ref()? {
            Value::String(label) => EmotionResult::from_annotation(
                Some(label),
                self.emoji.as_deref(),
                self.confidence,
                parse_keywords(self.keywords.as_ref())?,
            ),
            Value::Object(map) => EmotionResult::from_annotation(
                map.get("emotion").and_then(Value::as_str),
                map.get("emoji").and_then(Value::as_str),
                map.get("confidence").and_then(Value::as_f64),
                parse_keywords(map.get("keywords"))?,
            ),
            _ => None,
        }
    }
}

/// Keywords as list or delimited string; `None` for a malformed value
fn parse_keywords(value: Option<&Value>) -> Option<Vec<String>> {
    match value {
        None | Some(Value::Null) => Some(Vec::new()),
        Some(Value::String(joined)) => Some(split_keywords(joined)),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(String::from))
            .collect(),
        Some(_) => None,
    }
}

/// Who a bot message is posted as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatUser {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl ChatUser {
    pub fn new(id: impl Into<String>, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}
