//! Read-only question bank and skill taxonomy, loaded once per process.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{Result, SearchError};
use crate::types::{QuestionRecord, SkillTaxonomy, TaxonomyFile};

/// In-memory question bank.
///
/// Every record carries an embedding of the same, non-zero length. Cloning
/// is cheap; the records are shared behind an `Arc` and never mutated.
#[derive(Debug, Clone)]
pub struct QuestionStore {
    records: Arc<[QuestionRecord]>,
    dimension: Option<usize>,
    source: PathBuf,
}

impl QuestionStore {
    /// Load the question bank from a JSON list of records.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| SearchError::data_format(path, format!("failed to read file: {}", e)))?;

        let records: Vec<QuestionRecord> = serde_json::from_str(&raw)
            .map_err(|e| SearchError::data_format(path, e.to_string()))?;

        let store = Self::with_source(path, records)?;
        info!(
            path = %path.display(),
            questions = store.len(),
            dimension = store.dimension,
            "Loaded question bank"
        );
        Ok(store)
    }

    /// Build a store from records already in memory.
    pub fn from_records(records: Vec<QuestionRecord>) -> Result<Self> {
        Self::with_source("<memory>", records)
    }

    fn with_source(source: impl Into<PathBuf>, records: Vec<QuestionRecord>) -> Result<Self> {
        let source = source.into();
        let dimension = validate_embeddings(&records)
            .map_err(|reason| SearchError::data_format(&source, reason))?;

        Ok(Self {
            records: records.into(),
            dimension,
            source,
        })
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    /// Shared embedding length, or `None` for an empty bank.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// Check that every embedding is non-empty, finite, and as long as the first one.
fn validate_embeddings(records: &[QuestionRecord]) -> std::result::Result<Option<usize>, String> {
    let Some(first) = records.first() else {
        return Ok(None);
    };
    let expected = first.dimension();

    for (idx, record) in records.iter().enumerate() {
        let actual = record.dimension();
        if actual == 0 {
            return Err(format!("record {} has an empty embedding", idx));
        }
        if actual != expected {
            return Err(format!(
                "record {} has embedding dimension {}, expected {}",
                idx, actual, expected
            ));
        }
        if let Some(pos) = record.embedding.iter().position(|v| !v.is_finite()) {
            return Err(format!(
                "record {} has a non-finite embedding value at position {}",
                idx, pos
            ));
        }
    }

    debug!(records = records.len(), dimension = expected, "Embeddings validated");
    Ok(Some(expected))
}

impl SkillTaxonomy {
    /// Load the taxonomy from a JSON list or `{ "value": [...] }` envelope.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| SearchError::data_format(path, format!("failed to read file: {}", e)))?;

        let file: TaxonomyFile = serde_json::from_str(&raw).map_err(|e| {
            SearchError::data_format(
                path,
                format!("expected a list of {{category, skills}} entries: {}", e),
            )
        })?;

        let taxonomy = SkillTaxonomy::from(file);
        info!(
            path = %path.display(),
            categories = taxonomy.groups().len(),
            "Loaded skill taxonomy"
        );
        Ok(taxonomy)
    }
}
