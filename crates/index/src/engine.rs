use chrono::Utc;
use recall_common::{RecallError, Result};
use recall_embed::Embedder;
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::similarity::cosine_similarity;
use crate::types::{
    CollectionInfo, ConversationMatch, MessageMatch, Metadata, Point, PointCategory, PointId,
    PointPayload,
};

/// Default result count for searches
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Default minimum similarity score for searches
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.7;

/// Collection state guarded by the engine lock
#[derive(Debug, Default)]
struct IndexState {
    /// Stored points, append-only except for deletes
    points: Vec<Point>,

    /// Embedding dimension, fixed by the first successful insert
    vector_size: Option<usize>,
}

/// In-memory vector similarity index
///
/// Owns the full set of stored points behind a single RwLock: many
/// concurrent readers (search, stats) or one writer (insert, delete).
/// The embedder is always invoked before the lock is taken, so no lock
/// is ever held across an await into the embedding backend.
pub struct VectorIndex {
    name: String,
    state: Arc<RwLock<IndexState>>,
    embedder: Arc<dyn Embedder>,
}

impl VectorIndex {
    /// Create new empty index
    pub fn new(name: impl Into<String>, embedder: Arc<dyn Embedder>) -> Self {
        let name = name.into();
        info!("Vector index initialized: {}", name);
        Self {
            name,
            state: Arc::new(RwLock::new(IndexState::default())),
            embedder,
        }
    }

    /// Store a conversation summary point
    ///
    /// Embeds `"{title}: {content}"`. On any failure the collection is
    /// left unmodified.
    pub async fn insert_conversation(
        &self,
        conversation_id: i64,
        title: &str,
        content: &str,
        metadata: Metadata,
    ) -> Result<PointId> {
        if title.trim().is_empty() && content.trim().is_empty() {
            return Err(RecallError::invalid_input(
                "conversation title and content are both empty",
            ));
        }

        let text = format!("{}: {}", title, content);
        let payload = PointPayload::Conversation {
            conversation_id,
            title: title.to_string(),
            content: content.to_string(),
        };

        let id = self.insert_point(&text, payload, metadata).await?;
        info!(
            "Stored conversation embedding: conversation_id={}, point={}",
            conversation_id, id
        );
        Ok(id)
    }

    /// Store a question/answer message point
    ///
    /// Embeds `"Q: {prompt} A: {response}"`.
    pub async fn insert_message(
        &self,
        message_id: i64,
        conversation_id: i64,
        prompt: &str,
        response: &str,
        metadata: Metadata,
    ) -> Result<PointId> {
        if prompt.trim().is_empty() && response.trim().is_empty() {
            return Err(RecallError::invalid_input(
                "message prompt and response are both empty",
            ));
        }

        let text = format!("Q: {} A: {}", prompt, response);
        let payload = PointPayload::Message {
            message_id,
            conversation_id,
            prompt: prompt.to_string(),
            response: response.to_string(),
        };

        let id = self.insert_point(&text, payload, metadata).await?;
        info!(
            "Stored message embedding: message_id={}, conversation_id={}, point={}",
            message_id, conversation_id, id
        );
        Ok(id)
    }

    /// Embed text and append a point under the write lock
    async fn insert_point(
        &self,
        text: &str,
        payload: PointPayload,
        metadata: Metadata,
    ) -> Result<PointId> {
        // Embed before locking
        let vector = self.embed_checked(text).await?;

        let point = Point {
            id: PointId::new(),
            vector,
            payload,
            metadata,
            created_at: Utc::now(),
        };

        let mut state = self.state.write().await;
        if let Some(dim) = state.vector_size {
            if point.vector.len() != dim {
                return Err(RecallError::embedding(format!(
                    "dimension mismatch: index holds {}-dimensional vectors, embedder returned {}",
                    dim,
                    point.vector.len()
                )));
            }
        } else {
            state.vector_size = Some(point.vector.len());
        }

        let id = point.id;
        state.points.push(point);
        Ok(id)
    }

    /// Search for similar conversations
    pub async fn search_conversations(
        &self,
        query: &str,
        limit: usize,
        score_threshold: f32,
    ) -> Result<Vec<ConversationMatch>> {
        let scored = self
            .search_points(PointCategory::Conversation, query, limit, score_threshold)
            .await?;

        let matches = scored
            .into_iter()
            .map(|(score, point)| match point.payload {
                PointPayload::Conversation {
                    conversation_id,
                    title,
                    content,
                } => ConversationMatch {
                    conversation_id,
                    title,
                    content,
                    score,
                    metadata: point.metadata,
                },
                PointPayload::Message { .. } => unreachable!("category filter"),
            })
            .collect();

        Ok(matches)
    }

    /// Search for similar messages
    pub async fn search_messages(
        &self,
        query: &str,
        limit: usize,
        score_threshold: f32,
    ) -> Result<Vec<MessageMatch>> {
        let scored = self
            .search_points(PointCategory::Message, query, limit, score_threshold)
            .await?;

        let matches = scored
            .into_iter()
            .map(|(score, point)| match point.payload {
                PointPayload::Message {
                    message_id,
                    conversation_id,
                    prompt,
                    response,
                } => MessageMatch {
                    message_id,
                    conversation_id,
                    prompt,
                    response,
                    score,
                    metadata: point.metadata,
                },
                PointPayload::Conversation { .. } => unreachable!("category filter"),
            })
            .collect();

        Ok(matches)
    }

    /// Score every point of one category against the query
    ///
    /// Threshold is inclusive; survivors are sorted by score descending
    /// and truncated to `limit`.
    async fn search_points(
        &self,
        category: PointCategory,
        query: &str,
        limit: usize,
        score_threshold: f32,
    ) -> Result<Vec<(f32, Point)>> {
        debug!(
            "Searching {} points: limit={}, threshold={}",
            category, limit, score_threshold
        );

        let query_vector = self.embed_checked(query).await?;

        let state = self.state.read().await;
        if let Some(dim) = state.vector_size {
            if query_vector.len() != dim {
                return Err(RecallError::embedding(format!(
                    "dimension mismatch: index holds {}-dimensional vectors, query embedded to {}",
                    dim,
                    query_vector.len()
                )));
            }
        }
        let total_candidates = state.points.len();

        let mut scored: Vec<(f32, Point)> = state
            .points
            .iter()
            .filter(|point| point.payload.category() == category)
            .filter_map(|point| {
                let score = cosine_similarity(&query_vector, &point.vector);
                if score >= score_threshold {
                    Some((score, point.clone()))
                } else {
                    None
                }
            })
            .collect();
        drop(state);

        // Sort by score (descending); sort_by is stable, so ties keep
        // insertion order
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.truncate(limit);

        info!(
            "Search completed: {} {} results (scanned {} candidates)",
            scored.len(),
            category,
            total_candidates
        );
        Ok(scored)
    }

    /// Delete every point belonging to a conversation
    ///
    /// Removes conversation points and message points alike. Returns
    /// the number of points removed; a missing id removes zero.
    pub async fn delete_conversation(&self, conversation_id: i64) -> Result<usize> {
        let mut state = self.state.write().await;
        let before = state.points.len();
        state
            .points
            .retain(|point| point.payload.conversation_id() != conversation_id);
        let removed = before - state.points.len();
        drop(state);

        info!(
            "Deleted {} points for conversation_id={}",
            removed, conversation_id
        );
        Ok(removed)
    }

    /// Delete the point for a specific message
    pub async fn delete_message(&self, message_id: i64) -> Result<usize> {
        let mut state = self.state.write().await;
        let before = state.points.len();
        state
            .points
            .retain(|point| point.payload.message_id() != Some(message_id));
        let removed = before - state.points.len();
        drop(state);

        info!("Deleted {} points for message_id={}", removed, message_id);
        Ok(removed)
    }

    /// Get collection statistics
    pub async fn stats(&self) -> Result<CollectionInfo> {
        let state = self.state.read().await;
        Ok(CollectionInfo {
            name: self.name.clone(),
            vector_size: state.vector_size.unwrap_or(0),
            distance: "cosine".to_string(),
            points_count: state.points.len(),
        })
    }

    /// Embed text, rejecting empty results
    async fn embed_checked(&self, text: &str) -> Result<Vec<f32>> {
        let vector = self.embedder.embed(text).await?;
        if vector.is_empty() {
            return Err(RecallError::embedding("embedder returned an empty vector"));
        }
        Ok(vector)
    }
}
