//! Terminal rendering of search results.

use colored::Colorize;
use std::fmt::Write;

use crate::index::Neighbor;
use crate::search::SearchOutcome;
use crate::types::QuestionRecord;

pub fn answer_marker(is_correct: bool) -> &'static str {
    if is_correct {
        "✅"
    } else {
        "❌"
    }
}

/// One ranked question with its tags and marked options.
pub fn format_question(rank: usize, record: &QuestionRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}",
        format!("Question {}:", rank).bright_cyan().bold(),
        record.question
    );
    let _ = writeln!(out, "{} {}", "Category:".bold(), record.categories.join(", "));
    let _ = writeln!(out, "{} {}", "Related Skills:".bold(), record.skills.join(", "));
    let _ = writeln!(out, "{}", "Options:".bold());
    for option in &record.options {
        let _ = writeln!(out, "  - {} {}", option.description, answer_marker(option.is_correct));
    }
    let _ = writeln!(out, "{}", "---".dimmed());

    out
}

/// The ranked result list, or a "nothing similar" notice when empty.
pub fn format_results(hits: &[Neighbor<'_>]) -> String {
    if hits.is_empty() {
        return format!("{}\n", "No similar questions found.".yellow());
    }

    let mut out = format!(
        "{}\n\n",
        format!("Top {} most similar questions:", hits.len()).bright_green().bold()
    );
    for (idx, hit) in hits.iter().enumerate() {
        out.push_str(&format_question(idx + 1, hit.record));
    }
    out
}

pub fn format_outcome(outcome: &SearchOutcome<'_>) -> String {
    match outcome {
        SearchOutcome::NoMatchingQuestions => format!(
            "{}\n",
            "No questions found for the selected category and skills.".yellow()
        ),
        SearchOutcome::Found(hits) => format_results(hits),
    }
}
