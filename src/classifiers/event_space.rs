use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Accumulated co-occurrence statistics between categories and word
/// features. This is the trained model: written to only by `observe`
/// during the training pass, read-only afterwards.
///
/// All backing maps are ordered so that category iteration (and with it
/// classifier tie-breaking and report output) is deterministic.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EventSpace {
    /// Total feature observations per category.
    category_totals: BTreeMap<String, u64>,
    /// Co-occurrence counts: category -> word -> count.
    cooccurrences: BTreeMap<String, BTreeMap<String, u64>>,
    /// Every distinct word ever observed, across all categories.
    vocabulary: BTreeSet<String>,
}

impl EventSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one training document's words under `category`. Each word
    /// occurrence counts once; repeated words are repeated evidence.
    /// Accumulates across calls, never resets.
    pub fn observe<I, S>(&mut self, category: &str, features: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let word_counts = self
            .cooccurrences
            .entry(category.to_string())
            .or_insert_with(BTreeMap::new);
        let total = self.category_totals.entry(category.to_string()).or_insert(0);

        for feature in features {
            let word = feature.as_ref();
            *word_counts.entry(word.to_string()).or_insert(0) += 1;
            *total += 1;
            if !self.vocabulary.contains(word) {
                self.vocabulary.insert(word.to_string());
            }
        }
    }

    /// Conditional probability of observing `feature` given `category`,
    /// with Laplace (add-one) smoothing over the global vocabulary:
    ///
    ///   (count(category, feature) + 1) / (total(category) + |vocab|)
    ///
    /// Defined for every pair: an unseen word gets the smoothed floor,
    /// an unseen category the uniform 1/|vocab|. A completely empty
    /// model yields 0.0.
    pub fn p(&self, feature: &str, category: &str) -> f64 {
        let vocab_size = self.vocabulary.len() as f64;
        if vocab_size == 0.0 {
            return 0.0;
        }

        let count = self
            .cooccurrences
            .get(category)
            .and_then(|words| words.get(feature))
            .copied()
            .unwrap_or(0) as f64;
        let total = self.category_totals.get(category).copied().unwrap_or(0) as f64;

        (count + 1.0) / (total + vocab_size)
    }

    /// Categories in sorted order. This order is the classifier's
    /// documented tie-break order.
    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.category_totals.keys().map(|c| c.as_str())
    }

    /// Every distinct word seen during training.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> + '_ {
        self.vocabulary.iter().map(|w| w.as_str())
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn total_observations(&self, category: &str) -> u64 {
        self.category_totals.get(category).copied().unwrap_or(0)
    }

    /// Sum of observation counts across all categories.
    pub fn grand_total(&self) -> u64 {
        self.category_totals.values().sum()
    }

    pub fn category_count(&self) -> usize {
        self.category_totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.category_totals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space_yo() -> EventSpace {
        let mut space = EventSpace::new();
        space.observe("Y", ["a", "a", "b"]);
        space.observe("O", ["b", "b", "c"]);
        space
    }

    #[test]
    fn counts_accumulate() {
        let space = space_yo();
        assert_eq!(space.total_observations("Y"), 3);
        assert_eq!(space.total_observations("O"), 3);
        assert_eq!(space.vocabulary_size(), 3);
        assert_eq!(space.grand_total(), 6);
    }

    #[test]
    fn probabilities_are_bounded() {
        let space = space_yo();
        for category in ["Y", "O", "never-seen"] {
            for word in ["a", "b", "c", "zzz"] {
                let p = space.p(word, category);
                assert!(p > 0.0 && p <= 1.0, "p({word}|{category}) = {p}");
            }
        }
    }

    #[test]
    fn smoothing_is_a_proper_distribution() {
        let space = space_yo();
        for category in ["Y", "O"] {
            let sum: f64 = space.vocabulary().map(|w| space.p(w, category)).sum();
            assert!((sum - 1.0).abs() < 1e-12, "sum for {category} was {sum}");
        }
    }

    #[test]
    fn smoothed_floor_for_unseen_word() {
        let space = space_yo();
        // "c" never observed under Y: (0 + 1) / (3 + 3)
        assert!((space.p("c", "Y") - 1.0 / 6.0).abs() < 1e-12);
        // word outside the vocabulary gets the same floor
        assert!((space.p("zzz", "Y") - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn unseen_category_is_uniform() {
        let space = space_yo();
        // (0 + 1) / (0 + 3)
        assert!((space.p("a", "M") - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_model_is_defined() {
        let space = EventSpace::new();
        assert_eq!(space.p("anything", "anywhere"), 0.0);
        assert!(space.is_empty());
        assert_eq!(space.category_count(), 0);
    }

    #[test]
    fn observe_is_associative_across_calls() {
        let mut split = EventSpace::new();
        split.observe("Y", ["a", "b"]);
        split.observe("Y", ["c"]);

        let mut joined = EventSpace::new();
        joined.observe("Y", ["a", "b", "c"]);

        for word in ["a", "b", "c", "unseen"] {
            assert_eq!(split.p(word, "Y"), joined.p(word, "Y"));
        }
    }

    #[test]
    fn observe_is_commutative_within_a_call() {
        let mut forward = EventSpace::new();
        forward.observe("Y", ["a", "b", "a"]);

        let mut shuffled = EventSpace::new();
        shuffled.observe("Y", ["b", "a", "a"]);

        for word in ["a", "b"] {
            assert_eq!(forward.p(word, "Y"), shuffled.p(word, "Y"));
        }
    }

    #[test]
    fn conditioning_separates_categories() {
        let space = space_yo();
        assert!(space.p("a", "Y") > space.p("a", "O"));
        assert!(space.p("c", "O") > space.p("c", "Y"));
    }

    #[test]
    fn categories_iterate_sorted() {
        let mut space = EventSpace::new();
        space.observe("zeta", ["x"]);
        space.observe("alpha", ["x"]);
        let order: Vec<&str> = space.categories().collect();
        assert_eq!(order, vec!["alpha", "zeta"]);
    }
}
