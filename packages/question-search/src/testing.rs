//! Testing utilities including a mock embedder.
//!
//! Useful for exercising the search pipeline without calling a real
//! embedding service.

use async_trait::async_trait;
use openai_client::OpenAIError;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::embedder::Embedder;
use crate::error::Result;
use crate::types::{AnswerOption, QuestionRecord};

/// Build a question record with no answer options.
pub fn question(
    text: &str,
    categories: &[&str],
    skills: &[&str],
    embedding: Vec<f32>,
) -> QuestionRecord {
    QuestionRecord {
        question: text.to_string(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        options: Vec::new(),
        embedding,
    }
}

/// Build an answer option.
pub fn option(description: &str, is_correct: bool) -> AnswerOption {
    AnswerOption {
        description: description.to_string(),
        is_correct,
    }
}

/// A mock embedder for testing.
///
/// Returns predefined vectors for known texts and a deterministic
/// hash-seeded vector otherwise.
#[derive(Clone, Default)]
pub struct MockEmbedder {
    /// Predefined embeddings by text
    embeddings: Arc<RwLock<HashMap<String, Vec<f32>>>>,

    /// Dimension of generated embeddings
    dimension: usize,

    /// Fail every call with a network error
    fail: bool,

    /// Texts embedded so far, in call order
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            ..Default::default()
        }
    }

    /// Add a predefined embedding for text.
    pub fn with_embedding(self, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        self.embeddings
            .write()
            .unwrap()
            .insert(text.into(), embedding);
        self
    }

    /// Make every call fail as if the service were unreachable.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Texts passed to `embed`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Generate a deterministic embedding based on text.
    fn generate_deterministic_embedding(&self, text: &str) -> Vec<f32> {
        use sha2::{Digest, Sha256};

        let hash = Sha256::digest(text.as_bytes());

        (0..self.dimension)
            .map(|i| {
                let byte = hash[i % 32] as f32;
                // Normalize to [-1, 1] range
                (byte / 127.5) - 1.0
            })
            .collect()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.write().unwrap().push(text.to_string());

        if self.fail {
            return Err(OpenAIError::Network("mock embedding failure".into()).into());
        }

        Ok(self
            .embeddings
            .read()
            .unwrap()
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.generate_deterministic_embedding(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deterministic_fallback() {
        let embedder = MockEmbedder::new(8);

        let a = embedder.embed("geometry").await.unwrap();
        let b = embedder.embed("geometry").await.unwrap();

        assert_eq!(a.len(), 8);
        assert_eq!(a, b);
        assert_eq!(embedder.calls(), vec!["geometry", "geometry"]);
    }

    #[tokio::test]
    async fn test_predefined_wins() {
        let embedder = MockEmbedder::new(2).with_embedding("x", vec![9.0, 9.0]);
        assert_eq!(embedder.embed("x").await.unwrap(), vec![9.0, 9.0]);
    }
}
