use anyhow::{anyhow, bail, Context, Result};
use dotenvy::dotenv;
use openai_client::{ApiKey, DEFAULT_AZURE_API_VERSION, DEFAULT_BASE_URL};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::filter::EmptySkillPolicy;
use crate::index::DEFAULT_TOP_K;

/// Embedding model the question bank was embedded with.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-large";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub taxonomy_path: PathBuf,
    pub questions_path: PathBuf,
    pub top_k: usize,
    pub empty_skills: EmptySkillPolicy,
    pub embedding: EmbeddingConfig,
}

/// Settings for the embedding service client.
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub api_key: ApiKey,
    /// Azure resource endpoint; when set the client speaks the Azure dialect.
    pub azure_endpoint: Option<String>,
    pub api_version: String,
    pub base_url: String,
    /// Model name, or deployment name on Azure.
    pub model: String,
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let top_k: usize = var("QUESTION_SEARCH_TOP_K")
            .unwrap_or_else(|| DEFAULT_TOP_K.to_string())
            .parse()
            .context("QUESTION_SEARCH_TOP_K must be a positive number")?;
        if top_k == 0 {
            bail!("QUESTION_SEARCH_TOP_K must be at least 1");
        }

        let empty_skills = match var("QUESTION_SEARCH_EMPTY_SKILLS") {
            Some(raw) => raw
                .parse::<EmptySkillPolicy>()
                .map_err(|e| anyhow!("QUESTION_SEARCH_EMPTY_SKILLS is invalid: {}", e))?,
            None => EmptySkillPolicy::default(),
        };

        let azure_endpoint = var("AZURE_OPENAI_ENDPOINT");
        let api_key = match &azure_endpoint {
            Some(_) => var("AZURE_OPENAI_API_KEY")
                .or_else(|| var("OPENAI_API_KEY"))
                .context("AZURE_OPENAI_API_KEY must be set when AZURE_OPENAI_ENDPOINT is set")?,
            None => var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY (or AZURE_OPENAI_ENDPOINT + AZURE_OPENAI_API_KEY) must be set")?,
        };

        let timeout_secs: u64 = var("EMBEDDING_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .context("EMBEDDING_TIMEOUT_SECS must be a number of seconds")?;

        Ok(Self {
            taxonomy_path: var("QUESTION_SEARCH_TAXONOMY")
                .unwrap_or_else(|| "./data.json".to_string())
                .into(),
            questions_path: var("QUESTION_SEARCH_QUESTIONS")
                .unwrap_or_else(|| "./combined_data.json".to_string())
                .into(),
            top_k,
            empty_skills,
            embedding: EmbeddingConfig {
                api_key: ApiKey::new(api_key),
                azure_endpoint,
                api_version: var("AZURE_OPENAI_API_VERSION")
                    .unwrap_or_else(|| DEFAULT_AZURE_API_VERSION.to_string()),
                base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                model: var("EMBEDDING_MODEL").unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}
