//! Query text → embedding vector.
//!
//! The `Embedder` trait is the seam between the search pipeline and the
//! external embedding service, so the pipeline can be exercised with
//! `testing::MockEmbedder`.

use async_trait::async_trait;
use openai_client::{ApiFlavor, OpenAIClient};
use tracing::debug;

use crate::config::EmbeddingConfig;
use crate::error::Result;

/// Produces embeddings in the same space as the question bank.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Embedder backed by the OpenAI or Azure OpenAI embeddings endpoint.
#[derive(Debug, Clone)]
pub struct OpenAIEmbedder {
    client: OpenAIClient,
    model: String,
}

impl OpenAIEmbedder {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Build the client described by `config`.
    ///
    /// An Azure endpoint switches the client to deployment routing and
    /// `api-key` authentication.
    pub fn from_config(config: &EmbeddingConfig) -> Self {
        let client = OpenAIClient::new(config.api_key.clone()).with_timeout(config.timeout);

        let client = match &config.azure_endpoint {
            Some(endpoint) => client
                .with_base_url(endpoint.as_str())
                .with_flavor(ApiFlavor::Azure {
                    api_version: config.api_version.clone(),
                }),
            None => client.with_base_url(config.base_url.as_str()),
        };

        Self::new(client, config.model.clone())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn client(&self) -> &OpenAIClient {
        &self.client
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(model = %self.model, text_len = text.len(), "Embedding query");
        Ok(self.client.create_embedding(text, &self.model).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openai_client::ApiKey;
    use std::time::Duration;

    fn config(azure_endpoint: Option<&str>) -> EmbeddingConfig {
        EmbeddingConfig {
            api_key: ApiKey::new("key"),
            azure_endpoint: azure_endpoint.map(String::from),
            api_version: "2023-05-15".into(),
            base_url: "https://api.openai.com/v1".into(),
            model: "text-embedding-3-large".into(),
            timeout: Duration::from_secs(7),
        }
    }

    #[test]
    fn test_openai_config() {
        let embedder = OpenAIEmbedder::from_config(&config(None));

        assert_eq!(embedder.model(), "text-embedding-3-large");
        assert_eq!(embedder.client().flavor(), &ApiFlavor::OpenAI);
        assert_eq!(embedder.client().timeout(), Duration::from_secs(7));
    }

    #[test]
    fn test_azure_config() {
        let embedder = OpenAIEmbedder::from_config(&config(Some("https://res.openai.azure.com/")));

        assert_eq!(
            embedder.client().embeddings_url(embedder.model()),
            "https://res.openai.azure.com/openai/deployments/text-embedding-3-large/embeddings?api-version=2023-05-15"
        );
    }
}
