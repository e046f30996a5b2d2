//! WORDSIM Binary
//!
//! Evaluates an embedding table against a word-similarity corpus, then
//! appends answers to a list of analogy queries to the same report.

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use wordsim::corpus::read_pairs_file;
use wordsim::report::{append_analogies_file, write_evaluation_file};
use wordsim::{
    AnalogyQuery, AnalogySolver, Config, Metrics, SimilarityEvaluator, VectorStore,
    WorkerPoolConfig,
};

/// WORDSIM - Word Embedding Evaluation
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Embedding table in GloVe text format
    #[arg(short, long, default_value = "glove.6B.300d.txt")]
    embeddings: String,

    /// Tab-separated similarity corpus (tag, word 1, word 2, human score)
    #[arg(short, long, default_value = "wordsim-353.txt")]
    corpus: String,

    /// Report file
    #[arg(short, long, default_value = "output.txt")]
    output: String,

    /// Analogy query as a:b:c, repeatable (defaults to a built-in list)
    #[arg(short, long = "analogy", value_name = "A:B:C")]
    analogies: Vec<AnalogyQuery>,

    /// Number of analogy worker threads (0 = auto-detect based on CPU cores)
    #[arg(short, long, default_value_t = 0)]
    workers: usize,

    /// Pin analogy workers to CPU cores
    #[arg(long, default_value_t = false)]
    pin_to_cores: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("wordsim=info".parse()?))
        .init();

    let args = Args::parse();

    let config = Config::default()
        .with_embeddings(&args.embeddings)
        .with_corpus(&args.corpus)
        .with_output(&args.output)
        .with_analogies(args.analogies)
        .with_workers(WorkerPoolConfig {
            num_workers: args.workers,
            pin_to_cores: args.pin_to_cores,
            ..Default::default()
        });

    let metrics = Arc::new(Metrics::new());

    info!("Loading embeddings from {}", config.embeddings.display());
    let start = Instant::now();
    let store = VectorStore::load_file(&config.embeddings)
        .with_context(|| format!("loading {}", config.embeddings.display()))?;
    metrics.record_operation("load", start.elapsed(), true);

    info!("Evaluating word similarity on {}", config.corpus.display());
    let start = Instant::now();
    let pairs = read_pairs_file(&config.corpus)
        .with_context(|| format!("reading {}", config.corpus.display()))?;
    let evaluation = SimilarityEvaluator::new(store.clone()).score_pairs(&pairs)?;
    let correlation = match evaluation.correlation() {
        Ok(r) => Some(r),
        Err(e) => {
            warn!("Correlation unavailable: {}", e);
            None
        }
    };
    metrics.record_operation("evaluate", start.elapsed(), correlation.is_some());

    if !evaluation.skipped.is_empty() {
        warn!(
            "{} terms not found: {}",
            evaluation.skipped.len(),
            evaluation.skipped.join(", ")
        );
    }
    for pair in &evaluation.degenerate {
        warn!(
            "Pair {} / {} not scored: zero-magnitude vector",
            pair.word_a, pair.word_b
        );
    }
    write_evaluation_file(&config.output, &evaluation, correlation)
        .with_context(|| format!("writing {}", config.output.display()))?;
    if let Some(r) = correlation {
        info!("Word similarity correlation is {}", r);
    }

    for query in &config.analogies {
        info!("Analogy to find: {}: ?", query);
    }
    let solver = AnalogySolver::new(store)
        .with_pool(config.workers.clone())
        .with_metrics(metrics.clone());
    let results = solver.solve_batch(&config.analogies)?;

    for (query, result) in config.analogies.iter().zip(&results) {
        match result {
            Ok(result) => info!(
                "Analogy found: {}:{}",
                query,
                result.best_term.as_deref().unwrap_or("")
            ),
            Err(e) => warn!("Analogy {} failed: {}", query, e),
        }
    }
    append_analogies_file(&config.output, &config.analogies, &results)
        .with_context(|| format!("writing {}", config.output.display()))?;

    let summary = metrics.summary();
    info!(
        "Done: {} operations ({} failed), avg {}us, max {}us",
        summary.total_ops, summary.failed_ops, summary.avg_latency_us, summary.max_latency_us
    );

    Ok(())
}
