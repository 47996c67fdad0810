//! Semantic question search
//!
//! Finds the questions in a pre-embedded question bank that are closest to a
//! free-text query, restricted to a category and a set of skills.
//!
//! # Usage
//!
//! ```rust,ignore
//! use question_search::{Config, OpenAIEmbedder, QuestionStore, SearchRequest, SearchService};
//!
//! let config = Config::from_env()?;
//! let store = QuestionStore::load(&config.questions_path)?;
//! let embedder = OpenAIEmbedder::from_config(&config.embedding);
//! let service = SearchService::new(store, embedder).with_top_k(config.top_k);
//!
//! let request = SearchRequest::new("Math", ["Algebra"], "solving linear equations");
//! let outcome = service.search(&request).await?;
//! ```
//!
//! # Modules
//!
//! - [`store`] - Question bank and skill taxonomy loading
//! - [`filter`] - Category/skill narrowing
//! - [`embedder`] - Query embedding via OpenAI or Azure OpenAI
//! - [`index`] - Exact flat Euclidean nearest-neighbor search
//! - [`search`] - The filter → embed → index pipeline
//! - [`render`] - Terminal output
//! - [`testing`] - Mock embedder and record builders

pub mod config;
pub mod embedder;
pub mod error;
pub mod filter;
pub mod index;
pub mod query;
pub mod render;
pub mod search;
pub mod store;
pub mod testing;
pub mod types;

pub use config::{Config, EmbeddingConfig};
pub use embedder::{Embedder, OpenAIEmbedder};
pub use error::{Result, SearchError};
pub use filter::{filter_questions, EmptySkillPolicy};
pub use index::{nearest, FlatIndex, Neighbor, DEFAULT_TOP_K};
pub use query::default_query;
pub use search::{SearchOutcome, SearchRequest, SearchService};
pub use store::QuestionStore;
pub use types::{AnswerOption, QuestionRecord, SkillGroup, SkillTaxonomy};
