//! OpenAI API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Endpoint flavor
// =============================================================================

/// Which REST dialect the client speaks.
///
/// Plain OpenAI routes by model name and authenticates with a bearer token.
/// Azure OpenAI routes by deployment name, pins an `api-version` query
/// parameter and authenticates with an `api-key` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFlavor {
    OpenAI,
    Azure { api_version: String },
}

impl ApiFlavor {
    /// Azure flavor with the API version the question bank was embedded with.
    pub fn azure_default() -> Self {
        Self::Azure {
            api_version: DEFAULT_AZURE_API_VERSION.to_string(),
        }
    }
}

/// Default Azure OpenAI REST API version.
pub const DEFAULT_AZURE_API_VERSION: &str = "2023-05-15";

// =============================================================================
// Embeddings
// =============================================================================

/// Embedding request.
#[derive(Debug, Serialize)]
pub(crate) struct EmbeddingRequest<'a> {
    /// Model to use (e.g., "text-embedding-3-large")
    pub model: &'a str,

    /// Text to embed
    pub input: &'a str,
}

/// Embedding response.
#[derive(Debug, Deserialize)]
pub(crate) struct EmbeddingResponse {
    pub data: Vec<EmbeddingData>,

    #[serde(default)]
    pub usage: Option<EmbeddingUsage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmbeddingData {
    pub embedding: Vec<f32>,
}

/// Token accounting returned alongside an embedding.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EmbeddingUsage {
    pub prompt_tokens: u32,
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_model_and_input() {
        let req = EmbeddingRequest {
            model: "text-embedding-3-large",
            input: "quadratic equations",
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "text-embedding-3-large");
        assert_eq!(json["input"], "quadratic equations");
    }

    #[test]
    fn test_response_without_usage() {
        let raw = r#"{"data":[{"embedding":[0.1,0.2],"index":0,"object":"embedding"}]}"#;
        let resp: EmbeddingResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.data[0].embedding, vec![0.1, 0.2]);
        assert!(resp.usage.is_none());
    }

    #[test]
    fn test_azure_default_version() {
        assert_eq!(
            ApiFlavor::azure_default(),
            ApiFlavor::Azure {
                api_version: "2023-05-15".into()
            }
        );
    }
}
