pub mod classifiers;
pub mod config;
pub mod corpus;
pub mod generic_types;
pub mod logging;
pub mod pipeline;
pub mod salience;
pub mod session;

pub use classifiers::event_space::EventSpace;
pub use classifiers::naive_bayes::{BayesianClassifier, ScoringPolicy};
pub use pipeline::{run_training, EvaluationReport, TrainingOptions, TrainingOutcome};
pub use session::{spawn_training, ArticleVerdict, ModelHandle, TrainedModel};
