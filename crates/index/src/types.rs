use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Open string-keyed metadata carried opaquely on a point
pub type Metadata = HashMap<String, Value>;

/// Point category discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointCategory {
    Conversation,
    Message,
}

impl fmt::Display for PointCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conversation => write!(f, "conversation"),
            Self::Message => write!(f, "message"),
        }
    }
}

/// Category-specific payload with required fields per variant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointPayload {
    /// Conversation summary payload
    Conversation {
        conversation_id: i64,
        title: String,
        content: String,
    },

    /// Question/answer message payload
    Message {
        message_id: i64,
        conversation_id: i64,
        prompt: String,
        response: String,
    },
}

impl PointPayload {
    /// Category of this payload
    pub fn category(&self) -> PointCategory {
        match self {
            Self::Conversation { .. } => PointCategory::Conversation,
            Self::Message { .. } => PointCategory::Message,
        }
    }

    /// Conversation id (present on both variants)
    pub fn conversation_id(&self) -> i64 {
        match self {
            Self::Conversation {
                conversation_id, ..
            } => *conversation_id,
            Self::Message {
                conversation_id, ..
            } => *conversation_id,
        }
    }

    /// Message id (message payloads only)
    pub fn message_id(&self) -> Option<i64> {
        match self {
            Self::Conversation { .. } => None,
            Self::Message { message_id, .. } => Some(*message_id),
        }
    }
}

/// Unique point identifier, generated at insertion time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointId(Uuid);

impl PointId {
    /// Generate a fresh id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PointId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One stored (vector, payload, metadata) record
///
/// Immutable after creation. The collection only ever appends points or
/// removes subsets of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    /// Unique id
    pub id: PointId,

    /// Embedding vector (fixed length for the lifetime of the index)
    pub vector: Vec<f32>,

    /// Category-specific payload
    pub payload: PointPayload,

    /// Caller-supplied metadata, returned verbatim on a match
    #[serde(default)]
    pub metadata: Metadata,

    /// Timestamp when stored
    pub created_at: DateTime<Utc>,
}

/// Conversation search result
#[derive(Debug, Clone, Serialize)]
pub struct ConversationMatch {
    /// Conversation id
    pub conversation_id: i64,

    /// Conversation title
    pub title: String,

    /// Conversation content
    pub content: String,

    /// Similarity score
    pub score: f32,

    /// Remaining metadata
    pub metadata: Metadata,
}

/// Message search result
#[derive(Debug, Clone, Serialize)]
pub struct MessageMatch {
    /// Message id
    pub message_id: i64,

    /// Owning conversation id
    pub conversation_id: i64,

    /// Prompt text
    pub prompt: String,

    /// Response text
    pub response: String,

    /// Similarity score
    pub score: f32,

    /// Remaining metadata
    pub metadata: Metadata,
}

/// Collection statistics snapshot
#[derive(Debug, Clone, Serialize)]
pub struct CollectionInfo {
    /// Collection name
    pub name: String,

    /// Embedding dimension (0 until the first insert fixes it)
    pub vector_size: usize,

    /// Distance metric
    pub distance: String,

    /// Number of stored points
    pub points_count: usize,
}
