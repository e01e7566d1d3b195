use async_trait::async_trait;
use recall_common::Result;

/// Common trait for text embedders
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embedding for text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}
