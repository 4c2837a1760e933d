pub mod event_space;
pub mod naive_bayes;

pub use event_space::EventSpace;
pub use naive_bayes::{BayesianClassifier, ScoringPolicy};
