use std::collections::BTreeSet;

use crate::classifiers::event_space::EventSpace;

/// Margin for the corpus-wide distinguishing-vocabulary report.
pub const GLOBAL_MARGIN: f64 = 0.1;
/// Margin for the per-article explanation.
pub const DOCUMENT_MARGIN: f64 = 0.05;
/// How many qualifying words the per-article explanation keeps.
pub const EXPLANATION_LIMIT: usize = 5;

/// Canonical reader age brackets. Diagnostic printout ordering only;
/// the salience computation itself uses whatever categories the event
/// space discovered.
pub const AGE_BRACKETS: [&str; 3] = ["18-24", "25-44", "45+"];

/// One ranked word: its conditional probability under the category
/// being reported, recomputed per report, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct WordRanking {
    pub word: String,
    pub probability: f64,
}

/// Distinguishing vocabulary for a single category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReport {
    pub category: String,
    /// Qualifying words, descending by probability. Probability ties
    /// break by word order so reruns are identical.
    pub words: Vec<WordRanking>,
}

/// A word qualifies for `category` when its probability under that
/// category exceeds the sum of its probabilities under every other
/// category by more than `margin`.
fn advantage(space: &EventSpace, word: &str, category: &str) -> f64 {
    let own = space.p(word, category);
    let others: f64 = space
        .categories()
        .filter(|c| *c != category)
        .map(|c| space.p(word, c))
        .sum();
    own - others
}

fn rank(
    space: &EventSpace,
    category: &str,
    words: impl Iterator<Item = String>,
    margin: f64,
) -> Vec<WordRanking> {
    let mut ranked: Vec<WordRanking> = words
        .filter(|word| advantage(space, word, category) > margin)
        .map(|word| WordRanking {
            probability: space.p(&word, category),
            word,
        })
        .collect();
    // descending probability, word order as the deterministic tie-break
    ranked.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.word.cmp(&b.word))
    });
    ranked
}

/// Corpus-wide diagnostic: for every category, every vocabulary word
/// whose probability advantage over the other categories exceeds
/// [`GLOBAL_MARGIN`], ranked descending. Idempotent over a frozen
/// event space.
pub fn global_report(space: &EventSpace) -> Vec<CategoryReport> {
    space
        .categories()
        .map(|category| CategoryReport {
            category: category.to_string(),
            words: rank(
                space,
                category,
                space.vocabulary().map(|w| w.to_string()),
                GLOBAL_MARGIN,
            ),
        })
        .collect()
}

/// Per-article explanation: the same advantage computation restricted
/// to the distinct words of one document, truncated to the top
/// [`EXPLANATION_LIMIT`] qualifying words under the winning category.
/// This is the "why was this classified this way" output.
pub fn explain_document(
    space: &EventSpace,
    winning_category: &str,
    document_words: &[String],
) -> Vec<WordRanking> {
    let distinct: BTreeSet<&String> = document_words.iter().collect();
    let mut ranked = rank(
        space,
        winning_category,
        distinct.into_iter().cloned(),
        DOCUMENT_MARGIN,
    );
    ranked.truncate(EXPLANATION_LIMIT);
    ranked
}

/// Render the global report for the console, canonical brackets first.
pub fn format_global_report(reports: &[CategoryReport]) -> String {
    let mut ordered: Vec<&CategoryReport> = Vec::new();
    for bracket in AGE_BRACKETS {
        if let Some(report) = reports.iter().find(|r| r.category == bracket) {
            ordered.push(report);
        }
    }
    for report in reports {
        if !AGE_BRACKETS.contains(&report.category.as_str()) {
            ordered.push(report);
        }
    }

    let mut out = String::new();
    for report in ordered {
        out.push_str(&format!("Category {}:\n", report.category));
        if report.words.is_empty() {
            out.push_str("  (no distinguishing words)\n");
        }
        for ranking in &report.words {
            out.push_str(&format!("  {}: {:.4}\n", ranking.word, ranking.probability));
        }
    }
    out
}
