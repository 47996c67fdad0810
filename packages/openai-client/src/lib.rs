//! Pure OpenAI embeddings REST client
//!
//! A small client for the OpenAI (or Azure OpenAI) embeddings endpoint with no
//! domain-specific logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{ApiFlavor, OpenAIClient};
//!
//! // OpenAI
//! let client = OpenAIClient::new(openai_key);
//! let embedding = client.create_embedding("text to embed", "text-embedding-3-large").await?;
//!
//! // Azure OpenAI: the model argument is the deployment name
//! let client = OpenAIClient::new(azure_key)
//!     .with_base_url("https://my-resource.openai.azure.com")
//!     .with_flavor(ApiFlavor::azure_default());
//! let embedding = client.create_embedding("text to embed", "text-embedding-3-large").await?;
//! ```

pub mod credentials;
pub mod error;
pub mod types;

pub use credentials::ApiKey;
pub use error::{OpenAIError, Result};
pub use types::{ApiFlavor, EmbeddingUsage, DEFAULT_AZURE_API_VERSION};

use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::{debug, warn};

/// Default OpenAI API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default per-request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pure OpenAI API client.
#[derive(Clone, Debug)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: ApiKey,
    base_url: String,
    flavor: ApiFlavor,
    timeout: Duration,
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            flavor: ApiFlavor::OpenAI,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Switch between OpenAI and Azure routing/authentication.
    pub fn with_flavor(mut self, flavor: ApiFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    /// Set the per-request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn flavor(&self) -> &ApiFlavor {
        &self.flavor
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// URL of the embeddings endpoint for `model`.
    ///
    /// For Azure the model is the deployment name.
    pub fn embeddings_url(&self, model: &str) -> String {
        match &self.flavor {
            ApiFlavor::OpenAI => format!("{}/embeddings", self.base_url),
            ApiFlavor::Azure { api_version } => format!(
                "{}/openai/deployments/{}/embeddings?api-version={}",
                self.base_url, model, api_version
            ),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.flavor {
            ApiFlavor::OpenAI => request.header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose()),
            ),
            ApiFlavor::Azure { .. } => request.header("api-key", self.api_key.expose()),
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> OpenAIError {
        if e.is_timeout() {
            warn!(timeout_ms = self.timeout.as_millis(), "Embedding request timed out");
            OpenAIError::Timeout(self.timeout)
        } else {
            warn!(error = %e, "Embedding request failed");
            OpenAIError::Network(e.to_string())
        }
    }

    /// Create embedding for text.
    ///
    /// Returns a vector (3072 dimensions for text-embedding-3-large).
    pub async fn create_embedding(&self, text: &str, model: &str) -> Result<Vec<f32>> {
        let start = std::time::Instant::now();
        let request = types::EmbeddingRequest { model, input: text };

        let response = self
            .authorize(self.http_client.post(self.embeddings_url(model)))
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI embedding error");
            return Err(OpenAIError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let embed_response: types::EmbeddingResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.map_send_error(e)
            } else {
                OpenAIError::Parse(e.to_string())
            }
        })?;

        let embedding = embed_response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| OpenAIError::Parse("No embedding in response".into()))?;

        if embedding.is_empty() {
            return Err(OpenAIError::Parse("Embedding vector is empty".into()));
        }

        debug!(
            model = %model,
            dimensions = embedding.len(),
            total_tokens = embed_response.usage.map(|u| u.total_tokens),
            duration_ms = start.elapsed().as_millis(),
            "OpenAI embedding"
        );

        Ok(embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = OpenAIClient::new("sk-test")
            .with_base_url("https://custom.api.com/")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(client.api_key.expose(), "sk-test");
        assert_eq!(client.base_url(), "https://custom.api.com");
        assert_eq!(client.timeout(), Duration::from_secs(5));
        assert_eq!(client.flavor(), &ApiFlavor::OpenAI);
    }

    #[test]
    fn test_openai_embeddings_url() {
        let client = OpenAIClient::new("sk-test");
        assert_eq!(
            client.embeddings_url("text-embedding-3-large"),
            "https://api.openai.com/v1/embeddings"
        );
    }

    #[test]
    fn test_azure_embeddings_url() {
        let client = OpenAIClient::new("key")
            .with_base_url("https://example.openai.azure.com/")
            .with_flavor(ApiFlavor::azure_default());
        assert_eq!(
            client.embeddings_url("text-embedding-3-large"),
            "https://example.openai.azure.com/openai/deployments/text-embedding-3-large/embeddings?api-version=2023-05-15"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = OpenAIClient::new("sk-very-secret");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("sk-very-secret"));
    }
}
