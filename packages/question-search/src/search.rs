//! Filter → embed → index → query.

use std::time::Instant;

use tracing::{debug, info};

use crate::embedder::Embedder;
use crate::error::{Result, SearchError};
use crate::filter::{filter_questions, EmptySkillPolicy};
use crate::index::{nearest, Neighbor, DEFAULT_TOP_K};
use crate::store::QuestionStore;
use crate::types::QuestionRecord;

/// One user search action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub category: String,
    pub skills: Vec<String>,
    pub query: String,
}

impl SearchRequest {
    pub fn new(
        category: impl Into<String>,
        skills: impl IntoIterator<Item = impl Into<String>>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            skills: skills.into_iter().map(Into::into).collect(),
            query: query.into(),
        }
    }
}

/// Result of a search that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    /// Nothing in the bank matches the category/skill selection.
    NoMatchingQuestions,
    /// Nearest questions, ascending by distance.
    Found(Vec<Neighbor<'a>>),
}

impl<'a> SearchOutcome<'a> {
    pub fn neighbors(&self) -> &[Neighbor<'a>] {
        match self {
            Self::NoMatchingQuestions => &[],
            Self::Found(hits) => hits,
        }
    }
}

/// Runs searches against a loaded question bank.
///
/// Holds only read-only state; the similarity index is rebuilt per call over
/// the filtered subset, so concurrent calls share nothing mutable.
pub struct SearchService<E> {
    store: QuestionStore,
    embedder: E,
    top_k: usize,
    empty_skills: EmptySkillPolicy,
}

impl<E: Embedder> SearchService<E> {
    pub fn new(store: QuestionStore, embedder: E) -> Self {
        Self {
            store,
            embedder,
            top_k: DEFAULT_TOP_K,
            empty_skills: EmptySkillPolicy::default(),
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_empty_skill_policy(mut self, policy: EmptySkillPolicy) -> Self {
        self.empty_skills = policy;
        self
    }

    /// Maximum number of hits per search.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn store(&self) -> &QuestionStore {
        &self.store
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Questions matching the selection, in bank order.
    pub fn candidates<S: AsRef<str>>(&self, category: &str, skills: &[S]) -> Vec<&QuestionRecord> {
        filter_questions(self.store.records(), category, skills, self.empty_skills)
    }

    /// Run one search.
    ///
    /// The embedding service is only called when the selection matches at
    /// least one question.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome<'_>> {
        let query = request.query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidQuery {
                reason: "query text is empty".into(),
            });
        }

        let start = Instant::now();
        let candidates = self.candidates(&request.category, &request.skills);
        info!(
            category = %request.category,
            skills = ?request.skills,
            candidates = candidates.len(),
            "Filtered question bank"
        );

        if candidates.is_empty() {
            return Ok(SearchOutcome::NoMatchingQuestions);
        }

        let query_vector = self.embedder.embed(query).await?;
        let hits = nearest(candidates, &query_vector, self.top_k)?;

        debug!(
            returned = hits.len(),
            duration_ms = start.elapsed().as_millis(),
            "Search complete"
        );

        Ok(SearchOutcome::Found(hits))
    }
}
