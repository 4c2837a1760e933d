use tracing::debug;

use crate::classifiers::event_space::EventSpace;

/// Whether the posterior score includes a category-prior term.
///
/// With `WithPrior` the score is ln(prior) + sum of ln(p(word|category)),
/// where the prior is the category's share of all training observations.
/// `LikelihoodOnly` drops the prior term, treating categories as
/// equiprobable. The default matches the prior-weighted scoring used
/// when the model was first built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringPolicy {
    #[default]
    WithPrior,
    LikelihoodOnly,
}

/// Naive-Bayes classifier over a frozen [`EventSpace`]. Stateless beyond
/// the model it owns; read-only after construction.
#[derive(Debug, Clone)]
pub struct BayesianClassifier {
    event_space: EventSpace,
    policy: ScoringPolicy,
}

impl BayesianClassifier {
    /// Build a classifier from a trained event space. The event space is
    /// frozen from here on: no mutation path exists through this type.
    pub fn new(event_space: EventSpace) -> Self {
        BayesianClassifier {
            event_space,
            policy: ScoringPolicy::default(),
        }
    }

    pub fn with_policy(event_space: EventSpace, policy: ScoringPolicy) -> Self {
        BayesianClassifier { event_space, policy }
    }

    /// The underlying model, for probability queries and reporting.
    pub fn event_space(&self) -> &EventSpace {
        &self.event_space
    }

    /// Classify a bag of words, returning the maximum-posterior category.
    ///
    /// Scores are computed in log space so long documents cannot
    /// underflow to zero. Returns `None` when the event space knows no
    /// categories. Exact ties resolve to the category that sorts first:
    /// iteration is over sorted categories and only a strictly greater
    /// score displaces the current best.
    pub fn classify(&self, features: &[String]) -> Option<String> {
        if self.event_space.is_empty() {
            debug!("classify called against an empty event space");
            return None;
        }

        let mut best: Option<(&str, f64)> = None;
        for category in self.event_space.categories() {
            let score = self.score(category, features);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((category, score)),
            }
        }

        best.map(|(category, _)| category.to_string())
    }

    /// Log-space posterior score of `category` for the given words.
    fn score(&self, category: &str, features: &[String]) -> f64 {
        let mut log_prob = match self.policy {
            ScoringPolicy::WithPrior => self.log_prior(category),
            ScoringPolicy::LikelihoodOnly => 0.0,
        };
        for word in features {
            log_prob += self.event_space.p(word, category).ln();
        }
        log_prob
    }

    fn log_prior(&self, category: &str) -> f64 {
        let grand_total = self.event_space.grand_total();
        if grand_total == 0 {
            return 0.0;
        }
        let share = self.event_space.total_observations(category) as f64 / grand_total as f64;
        if share == 0.0 {
            // category known to the space but with zero observations
            return f64::MIN;
        }
        share.ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn trained() -> BayesianClassifier {
        let mut space = EventSpace::new();
        space.observe("Y", ["a", "a", "b"]);
        space.observe("O", ["b", "b", "c"]);
        BayesianClassifier::new(space)
    }

    #[test]
    fn picks_maximum_posterior_category() {
        let classifier = trained();
        assert_eq!(classifier.classify(&words(&["a", "a"])), Some("Y".into()));
        assert_eq!(classifier.classify(&words(&["c", "c"])), Some("O".into()));
    }

    #[test]
    fn empty_model_returns_none() {
        let classifier = BayesianClassifier::new(EventSpace::new());
        assert_eq!(classifier.classify(&words(&["anything"])), None);
        assert_eq!(classifier.classify(&[]), None);
    }

    #[test]
    fn word_order_does_not_matter() {
        let classifier = trained();
        let forward = classifier.classify(&words(&["a", "b", "c", "a"]));
        let shuffled = classifier.classify(&words(&["c", "a", "a", "b"]));
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn ties_break_to_first_sorted_category() {
        // Symmetric training data: every word equally likely under both
        // categories, equal priors. The winner must be the category that
        // sorts first.
        let mut space = EventSpace::new();
        space.observe("young", ["w"]);
        space.observe("old", ["w"]);
        let classifier = BayesianClassifier::new(space);
        assert_eq!(classifier.classify(&words(&["w"])), Some("old".into()));
    }

    #[test]
    fn unseen_words_still_classify() {
        // Only-unseen words fall back to smoothed floors; with the prior
        // term the larger training class wins.
        let mut space = EventSpace::new();
        space.observe("Y", ["a", "a", "a", "a"]);
        space.observe("O", ["b"]);
        let classifier = BayesianClassifier::new(space);
        assert_eq!(classifier.classify(&words(&["zzz"])), Some("Y".into()));
    }

    #[test]
    fn likelihood_only_policy_ignores_priors() {
        // "O" dominates in volume, but the single test word is evidence
        // for "Y" and without the prior the evidence decides alone.
        let mut space = EventSpace::new();
        space.observe("Y", ["a"]);
        space.observe("O", ["b", "b", "b", "b", "b", "b"]);
        let classifier = BayesianClassifier::with_policy(space, ScoringPolicy::LikelihoodOnly);
        assert_eq!(classifier.classify(&words(&["a"])), Some("Y".into()));
    }

    #[test]
    fn long_documents_do_not_underflow() {
        let classifier = trained();
        let long: Vec<String> = std::iter::repeat("a".to_string()).take(5000).collect();
        assert_eq!(classifier.classify(&long), Some("Y".into()));
    }
}
