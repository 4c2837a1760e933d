use anyhow::Result;
use clap::Parser;
use tracing::info;

use readership::classifiers::naive_bayes::ScoringPolicy;
use readership::config::Config;
use readership::corpus::{self, expand_features};
use readership::logging::setup_logger;
use readership::pipeline::TrainingOptions;
use readership::salience;
use readership::session::spawn_training;

/// Train the reader-age classifier from a bag-of-words corpus, report
/// held-out accuracy, and optionally print salience diagnostics.
#[derive(Parser, Debug)]
#[command(name = "readership", version)]
struct Args {
    /// Path to the labels JSON file (doc-id -> age bracket)
    #[arg(long)]
    labels: Option<String>,

    /// Path to the word-counts JSON file (doc-id -> word -> count)
    #[arg(long)]
    word_counts: Option<String>,

    /// Fraction of documents (by sorted id) used for training
    #[arg(long)]
    train_fraction: Option<f64>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long)]
    log_level: Option<String>,

    /// Score without the category-prior term
    #[arg(long)]
    no_prior: bool,

    /// Print the corpus-wide distinguishing-vocabulary report
    #[arg(long)]
    salience: bool,

    /// Classify one document from the corpus and explain the result
    #[arg(long, value_name = "DOC_ID")]
    explain: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load_or_default();

    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    setup_logger(level);

    let labels_path = args.labels.unwrap_or(config.corpus.labels);
    let counts_path = args.word_counts.unwrap_or(config.corpus.word_counts);

    let labels = corpus::load_labels(&labels_path);
    let word_counts = corpus::load_word_counts(&counts_path);

    let options = TrainingOptions {
        train_fraction: args.train_fraction.unwrap_or(config.pipeline.train_fraction),
        scoring: if args.no_prior {
            ScoringPolicy::LikelihoodOnly
        } else {
            ScoringPolicy::WithPrior
        },
        progress: true,
    };

    let explain_doc = args
        .explain
        .as_ref()
        .and_then(|id| word_counts.get(id).map(|counts| (id.clone(), counts.clone())));
    if let (Some(id), None) = (&args.explain, &explain_doc) {
        anyhow::bail!("document {id} is not in the word-count corpus");
    }

    let (handle, join) = spawn_training(labels, word_counts, options);
    let model = handle.model().await;
    join.await?;

    let report = &model.report;
    println!(
        "Trained on {} documents, tested on {}, skipped {} malformed.",
        report.train_count, report.test_count, report.skipped
    );
    match report.accuracy {
        Some(accuracy) => println!(
            "Held-out accuracy: {}/{} = {accuracy:.3}",
            report.correct, report.test_count
        ),
        None => println!("Held-out accuracy: undefined (no test documents)"),
    }

    let space = model.classifier.event_space();

    if args.salience {
        println!("\nDistinguishing vocabulary per category:");
        print!("{}", salience::format_global_report(&salience::global_report(space)));
    }

    if let Some((doc_id, counts)) = explain_doc {
        let words = expand_features(&counts);
        match model.classifier.classify(&words) {
            Some(category) => {
                println!("\nDocument {doc_id}: most likely age group {category}");
                let top = salience::explain_document(space, &category, &words);
                if top.is_empty() {
                    println!("  (no single word stands out)");
                }
                for ranking in top {
                    println!("  {}: {:.4}", ranking.word, ranking.probability);
                }
            }
            None => println!("\nDocument {doc_id}: no result (model is empty)"),
        }
    }

    info!("Done");
    Ok(())
}
