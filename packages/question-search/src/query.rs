//! Default query text for a category/skill selection.

/// The prompt pre-filled into the query box for the current selection.
///
/// `top_k` is the number of results the search will return.
pub fn default_query<S: AsRef<str>>(top_k: usize, category: &str, skills: &[S]) -> String {
    let skills = skills
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Search for {} questions with category '{}' and skills {} about:",
        top_k, category, skills
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::DEFAULT_TOP_K;

    #[test]
    fn test_template() {
        assert_eq!(
            default_query(DEFAULT_TOP_K, "Math", &["Algebra", "Geometry"]),
            "Search for 5 questions with category 'Math' and skills Algebra, Geometry about:"
        );
    }

    #[test]
    fn test_template_follows_top_k() {
        assert_eq!(
            default_query(3, "Math", &["Algebra"]),
            "Search for 3 questions with category 'Math' and skills Algebra about:"
        );
    }

    #[test]
    fn test_template_without_skills() {
        assert_eq!(
            default_query::<&str>(DEFAULT_TOP_K, "Science", &[]),
            "Search for 5 questions with category 'Science' and skills  about:"
        );
    }
}
