use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher13;

use super::{Embedder, Embedding};

// Fixed seeds keep hashing deterministic across processes and Rust
// versions. Changing them changes every vector; bump `version()` if so.
const HASH_SEED_K0: u64 = 0x6372_656e_6769_6e65;
const HASH_SEED_K1: u64 = 0x7261_6e6b_6572_2e76;

const DEFAULT_DIMENSION: usize = 256;

/// Deterministic feature-hashing embedder: no model files, no training,
/// O(tokens) per call. Good enough for the worker binary and for tests;
/// production callers plug a real model in behind [`Embedder`].
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash_token(&self, token: &str) -> usize {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.dimension
    }

    fn token_sign(&self, token: &str) -> f32 {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K1, HASH_SEED_K0);
        token.hash(&mut hasher);
        if hasher.finish() % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl Embedder for HashEmbedder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn version(&self) -> &str {
        "v1"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Embedding {
        let mut vector = vec![0.0f32; self.dimension];

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let token = token.to_lowercase();
            let idx = self.hash_token(&token);
            vector[idx] += self.token_sign(&token);
        }

        // L2 normalization; all-stopword input stays a zero vector and
        // the similarity layer treats it as unusable.
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        Embedding::new(vector)
    }
}
