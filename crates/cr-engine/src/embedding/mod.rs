pub mod hash;
pub mod similarity;

use serde::{Deserialize, Serialize};

pub use hash::HashEmbedder;
pub use similarity::cosine_similarity;

/// Fixed-dimension vector capturing the semantic content of a profile's
/// text. Serialized as a bare array in the JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding {
    pub vector: Vec<f32>,
}

impl Embedding {
    pub fn new(vector: Vec<f32>) -> Self {
        Self { vector }
    }

    pub fn dimension(&self) -> usize {
        self.vector.len()
    }
}

/// Pluggable text-embedding model supplied by the caller. The engine
/// invokes it at most once per profile and treats it as best-effort: a
/// failed or timed-out embedding degrades the semantic sub-score to its
/// neutral default instead of failing the session.
pub trait Embedder: Send + Sync {
    /// Implementation name recorded for traceability ("hash", "onnx", ...).
    fn name(&self) -> &'static str;

    /// Model generation, bumped whenever output vectors change.
    fn version(&self) -> &str;

    fn dimension(&self) -> usize;

    fn embed(&self, text: &str) -> Embedding;
}
