//! Category and skill narrowing of the question bank.

use std::fmt;
use std::str::FromStr;

use crate::types::QuestionRecord;

/// What an empty skill selection means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptySkillPolicy {
    /// "Any of no skills" matches nothing.
    #[default]
    MatchNone,
    /// No skill constraint; every question in the category matches.
    MatchCategory,
}

impl FromStr for EmptySkillPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "match-none" => Ok(Self::MatchNone),
            "category" | "all" | "match-category" => Ok(Self::MatchCategory),
            other => Err(format!(
                "unknown empty-skill policy '{}' (expected 'none' or 'category')",
                other
            )),
        }
    }
}

impl fmt::Display for EmptySkillPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MatchNone => f.write_str("none"),
            Self::MatchCategory => f.write_str("category"),
        }
    }
}

/// Keep records filed under `category` that carry at least one of `skills`.
///
/// Output preserves input order.
pub fn filter_questions<'a, S: AsRef<str>>(
    records: &'a [QuestionRecord],
    category: &str,
    skills: &[S],
    policy: EmptySkillPolicy,
) -> Vec<&'a QuestionRecord> {
    if skills.is_empty() && policy == EmptySkillPolicy::MatchNone {
        return Vec::new();
    }

    records
        .iter()
        .filter(|record| record.has_category(category))
        .filter(|record| skills.is_empty() || record.has_any_skill(skills))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::question;

    fn corpus() -> Vec<QuestionRecord> {
        vec![
            question("m1", &["Math"], &["Algebra"], vec![0.0]),
            question("s1", &["Science"], &["Physics"], vec![0.0]),
            question("m2", &["Math"], &["Geometry"], vec![0.0]),
            question("m3", &["Math"], &["Algebra", "Geometry"], vec![0.0]),
            question("s2", &["Science"], &["Algebra"], vec![0.0]),
            question("m4", &["Math", "Science"], &["Algebra"], vec![0.0]),
        ]
    }

    fn names(records: &[&QuestionRecord]) -> Vec<String> {
        records.iter().map(|r| r.question.clone()).collect()
    }

    #[test]
    fn test_math_algebra_in_original_order() {
        let records = corpus();
        let hits = filter_questions(&records, "Math", &["Algebra"], EmptySkillPolicy::MatchNone);
        assert_eq!(names(&hits), vec!["m1", "m3", "m4"]);
    }

    #[test]
    fn test_any_of_skills() {
        let records = corpus();
        let hits = filter_questions(
            &records,
            "Math",
            &["Geometry", "Algebra"],
            EmptySkillPolicy::MatchNone,
        );
        assert_eq!(names(&hits), vec!["m1", "m2", "m3", "m4"]);
    }

    #[test]
    fn test_every_hit_satisfies_predicate() {
        let records = corpus();
        let skills = ["Algebra"];
        let hits = filter_questions(&records, "Science", &skills, EmptySkillPolicy::MatchNone);

        assert_eq!(names(&hits), vec!["s2", "m4"]);
        for hit in hits {
            assert!(hit.has_category("Science"));
            assert!(hit.has_any_skill(&skills));
        }
    }

    #[test]
    fn test_empty_skills_match_none() {
        let records = corpus();
        let hits = filter_questions::<&str>(&records, "Math", &[], EmptySkillPolicy::MatchNone);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_empty_skills_match_category() {
        let records = corpus();
        let hits =
            filter_questions::<&str>(&records, "Math", &[], EmptySkillPolicy::MatchCategory);
        assert_eq!(names(&hits), vec!["m1", "m2", "m3", "m4"]);
    }

    #[test]
    fn test_unknown_category() {
        let records = corpus();
        let hits = filter_questions(&records, "History", &["Algebra"], EmptySkillPolicy::MatchNone);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("none".parse::<EmptySkillPolicy>(), Ok(EmptySkillPolicy::MatchNone));
        assert_eq!(" Category ".parse::<EmptySkillPolicy>(), Ok(EmptySkillPolicy::MatchCategory));
        assert!("sometimes".parse::<EmptySkillPolicy>().is_err());
        assert_eq!(EmptySkillPolicy::MatchCategory.to_string(), "category");
    }
}
