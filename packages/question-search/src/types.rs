//! Question bank and skill taxonomy records, as stored in the JSON input files.

use serde::{Deserialize, Serialize};

/// One answer choice of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub description: String,

    /// Whether this option is a correct answer (`isAnswerKey` on disk).
    #[serde(rename = "isAnswerKey", default)]
    pub is_correct: bool,
}

/// A question with its precomputed embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,

    /// Categories the question is filed under (`category` on disk).
    #[serde(rename = "category", default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub options: Vec<AnswerOption>,

    pub embedding: Vec<f32>,
}

impl QuestionRecord {
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// True if any of `skills` is tagged on this question.
    pub fn has_any_skill<S: AsRef<str>>(&self, skills: &[S]) -> bool {
        skills
            .iter()
            .any(|wanted| self.skills.iter().any(|s| s == wanted.as_ref()))
    }

    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }
}

/// Skills available under one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,

    #[serde(default)]
    pub skills: Vec<String>,
}

/// Category → skills lookup used to populate the selection controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillTaxonomy {
    groups: Vec<SkillGroup>,
}

impl SkillTaxonomy {
    pub fn new(groups: Vec<SkillGroup>) -> Self {
        Self { groups }
    }

    /// Category names in file order.
    pub fn categories(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.category.as_str()).collect()
    }

    /// Skills for `category`; empty if the category is unknown.
    ///
    /// The first group with a matching name wins.
    pub fn skills_for(&self, category: &str) -> &[String] {
        self.groups
            .iter()
            .find(|g| g.category == category)
            .map(|g| g.skills.as_slice())
            .unwrap_or(&[])
    }

    pub fn groups(&self) -> &[SkillGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// On-disk taxonomy: either a bare list or the `{ "value": [...] }` export envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TaxonomyFile {
    Envelope { value: Vec<SkillGroup> },
    Bare(Vec<SkillGroup>),
}

impl From<TaxonomyFile> for SkillTaxonomy {
    fn from(file: TaxonomyFile) -> Self {
        match file {
            TaxonomyFile::Envelope { value } => Self::new(value),
            TaxonomyFile::Bare(groups) => Self::new(groups),
        }
    }
}
