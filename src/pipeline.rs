use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::classifiers::event_space::EventSpace;
use crate::classifiers::naive_bayes::{BayesianClassifier, ScoringPolicy};
use crate::corpus::{expand_features, LabelTable, WordCountTable};

/// Knobs for a training run, fixed at call time.
#[derive(Debug, Clone, Copy)]
pub struct TrainingOptions {
    /// Share of documents (by sorted doc-id order) used for training;
    /// the remainder is held out for evaluation.
    pub train_fraction: f64,
    pub scoring: ScoringPolicy,
    /// Show an indicatif progress bar over the training loop.
    pub progress: bool,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        TrainingOptions {
            train_fraction: 0.7,
            scoring: ScoringPolicy::default(),
            progress: false,
        }
    }
}

/// Aggregate tally of one training/evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub train_count: usize,
    pub test_count: usize,
    pub correct: usize,
    /// Documents skipped as malformed: no label entry, or an empty
    /// word list. They never touch the event space.
    pub skipped: usize,
    /// `None` when there were no test documents; never NaN.
    pub accuracy: Option<f64>,
}

/// Everything a training run produces: the frozen classifier plus the
/// evaluation tally.
pub struct TrainingOutcome {
    pub classifier: BayesianClassifier,
    pub report: EvaluationReport,
}

/// Train on the first `train_fraction` of documents and evaluate on the
/// rest.
///
/// Documents are visited in lexicographic doc-id order, so the split is
/// reproducible run to run: the first `floor(total * fraction)` ids
/// train the model, the remainder are held out. Malformed documents
/// (missing label or empty word list) are skipped and counted on
/// whichever side of the split they fall.
pub fn run_training(
    labels: &LabelTable,
    word_counts: &WordCountTable,
    options: TrainingOptions,
) -> TrainingOutcome {
    let total = word_counts.len();
    let train_threshold = (total as f64 * options.train_fraction) as usize;

    let mut event_space = EventSpace::new();
    let mut skipped = 0usize;
    let mut train_count = 0usize;
    // Held-out documents, deferred until the event space is frozen.
    let mut held_out: Vec<(&String, Vec<String>)> = Vec::new();

    let pb = if options.progress {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message("Training in progress...");
        Some(pb)
    } else {
        None
    };

    for (index, (doc_id, counts)) in word_counts.iter().enumerate() {
        if let Some(pb) = &pb {
            pb.inc(1);
        }

        let features = expand_features(counts);
        let label = labels.get(doc_id);

        let (label, features) = match (label, features.is_empty()) {
            (Some(label), false) => (label, features),
            _ => {
                warn!("Skipping malformed document {doc_id}: missing label or empty word list");
                skipped += 1;
                continue;
            }
        };

        if index < train_threshold {
            event_space.observe(label, &features);
            train_count += 1;
        } else {
            held_out.push((doc_id, features));
        }
    }

    if let Some(pb) = &pb {
        pb.finish_with_message("Training complete!");
    }

    // Model is frozen from here on; the classifier takes ownership.
    let classifier = BayesianClassifier::with_policy(event_space, options.scoring);

    let mut correct = 0usize;
    let test_count = held_out.len();
    for (doc_id, features) in held_out {
        let predicted = classifier.classify(&features);
        // held-out docs always have a label; malformed ones were skipped
        if predicted.as_deref() == labels.get(doc_id).map(|l| l.as_str()) {
            correct += 1;
        }
    }

    let accuracy = if test_count > 0 {
        Some(correct as f64 / test_count as f64)
    } else {
        None
    };

    let report = EvaluationReport {
        train_count,
        test_count,
        correct,
        skipped,
        accuracy,
    };
    info!(
        "Training finished: {} trained, {} tested, {} correct, {} skipped, accuracy {}",
        report.train_count,
        report.test_count,
        report.correct,
        report.skipped,
        report
            .accuracy
            .map(|a| format!("{a:.3}"))
            .unwrap_or_else(|| "undefined".to_string()),
    );

    TrainingOutcome { classifier, report }
}
