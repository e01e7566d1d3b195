//! Recall Embedding Client
//!
//! Ollama embedding API client and embedder trait

mod client;
mod embedder;
mod types;

pub use client::OllamaEmbedder;
pub use embedder::Embedder;
pub use types::{EmbedRequest, EmbedResponse};
