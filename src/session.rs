use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use crate::classifiers::naive_bayes::BayesianClassifier;
use crate::corpus::{LabelTable, WordCountTable};
use crate::generic_types::{tokenize, Article};
use crate::pipeline::{run_training, EvaluationReport, TrainingOptions};
use crate::salience::{explain_document, WordRanking};

/// The published result of a training run: immutable, shared read-only
/// with every classification call site.
pub struct TrainedModel {
    pub classifier: BayesianClassifier,
    pub report: EvaluationReport,
}

/// Read handle onto the (eventually) trained model.
///
/// Training runs on its own task, off the interactive path. Consumers
/// pick their waiting policy: UI call sites use [`try_model`] and hide
/// their explanation view while it returns `None`; anything that needs
/// a result suspends on [`model`].
///
/// [`try_model`]: ModelHandle::try_model
/// [`model`]: ModelHandle::model
#[derive(Clone)]
pub struct ModelHandle {
    rx: watch::Receiver<Option<Arc<TrainedModel>>>,
}

impl ModelHandle {
    /// Fail-fast access: `None` until training has published.
    pub fn try_model(&self) -> Option<Arc<TrainedModel>> {
        self.rx.borrow().clone()
    }

    /// Suspend until the trained model is published, then share it.
    pub async fn model(&self) -> Arc<TrainedModel> {
        let mut rx = self.rx.clone();
        loop {
            if let Some(model) = rx.borrow_and_update().clone() {
                return model;
            }
            // the sender lives in the trainer task until it publishes;
            // a closed channel means that task died
            rx.changed()
                .await
                .expect("training task ended without publishing a model");
        }
    }

    /// Classify if the model is ready; `None` otherwise (also `None`
    /// for an empty model). Degrades instead of faulting.
    pub fn try_classify(&self, features: &[String]) -> Option<String> {
        self.try_model()?.classifier.classify(features)
    }

    /// One call per viewed article: tokenize its content, classify, and
    /// attach the top distinguishing words. `None` while the model is
    /// not ready or empty, so the caller can hide its explanation view.
    pub fn try_classify_article(&self, article: &Article) -> Option<ArticleVerdict> {
        let model = self.try_model()?;
        let words = tokenize(&article.content);
        let category = model.classifier.classify(&words)?;
        let top_words = explain_document(model.classifier.event_space(), &category, &words);
        Some(ArticleVerdict { category, top_words })
    }
}

/// What the article view renders: "Most likely age group" plus the
/// "Top 5 words" explanation.
#[derive(Debug, Clone)]
pub struct ArticleVerdict {
    pub category: String,
    pub top_words: Vec<WordRanking>,
}

/// Kick off training in the background and hand back the read handle
/// plus the join handle of the trainer task.
///
/// The corpora are moved into the task; the event space is exclusively
/// owned there during writes and published frozen behind an `Arc`.
pub fn spawn_training(
    labels: LabelTable,
    word_counts: WordCountTable,
    options: TrainingOptions,
) -> (ModelHandle, JoinHandle<()>) {
    let (tx, rx) = watch::channel(None);

    let join = tokio::spawn(async move {
        let outcome = run_training(&labels, &word_counts, options);
        let model = Arc::new(TrainedModel {
            classifier: outcome.classifier,
            report: outcome.report,
        });
        info!("Publishing trained model to waiting consumers");
        // keep tx alive until after the send so waiters never observe
        // a closed, empty channel
        let _ = tx.send(Some(model));
    });

    (ModelHandle { rx }, join)
}
