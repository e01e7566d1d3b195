//! Recall Vector Index
//!
//! In-memory cosine-similarity index for conversation and message
//! embeddings

mod engine;
mod similarity;
mod types;

pub use engine::{VectorIndex, DEFAULT_SCORE_THRESHOLD, DEFAULT_SEARCH_LIMIT};
pub use similarity::cosine_similarity;
pub use types::{
    CollectionInfo, ConversationMatch, MessageMatch, Metadata, Point, PointCategory, PointId,
    PointPayload,
};
