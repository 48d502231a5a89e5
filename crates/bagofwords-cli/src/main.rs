use std::{borrow::Cow, path::PathBuf};

use anyhow::{Context, Result};
use bagofwords::{LabelSet, TfidfVectorizer, VectorizerParams, VocabCache, VocabSnapshot};
use clap::{Parser, ValueEnum};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::debug;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Minimum number of documents to consider parallelization
const MIN_DOCS_FOR_PARALLEL: usize = 100;

#[derive(Parser)]
#[command(name = "bagofwords")]
#[command(about = "Vectorize documents with TF-IDF against a vocabulary snapshot", long_about = None)]
struct Cli {
    /// Text to vectorize (if not provided, reads from stdin)
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Read text from file
    #[arg(short, long, value_name = "PATH", conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Batch process documents (one per line)
    #[arg(short, long, value_name = "PATH", conflicts_with_all = ["text", "file"])]
    batch: Option<PathBuf>,

    /// Vocabulary snapshot (JSON)
    #[arg(long, value_name = "PATH")]
    vocab: PathBuf,

    /// Label set (comma-separated, order fixes one-hot positions)
    #[arg(long, value_delimiter = ',')]
    labels: Option<Vec<String>>,

    /// Label to attach to the document(s); requires --labels
    #[arg(short, long, requires = "labels")]
    label: Option<String>,

    /// Skip words with corpus frequency below this floor
    #[arg(long, value_name = "N", default_value_t = 0)]
    min_word_frequency: u64,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Quiet mode (no progress output)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose mode (debug logging to stderr)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy)]
enum OutputFormat {
    /// JSON object with features (and labels when a label is given)
    Json,
    /// Space-separated scores, full vector width
    Dense,
    /// index:score pairs for nonzero entries only
    Sparse,
}

enum InputSource {
    Single(String),
    Batch(Vec<String>),
}

/// Feature vector (plus optional label vector) ready for output
struct VectorizedDoc {
    features: Vec<f64>,
    labels: Option<Vec<f64>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    let vectorizer = build_vectorizer(&cli)?;
    let input_source = determine_input_source(&cli)?;

    match input_source {
        InputSource::Single(text) => {
            let result = process_single(&vectorizer, &text, cli.label.as_deref())?;
            output_result(&result, &cli);
        }
        InputSource::Batch(texts) => {
            let results = process_batch(&vectorizer, &texts, &cli)?;
            output_batch_results(&results, &cli);
        }
    }

    Ok(())
}

/// Load the vocabulary snapshot and label set, wire up the vectorizer
fn build_vectorizer(cli: &Cli) -> Result<TfidfVectorizer<VocabSnapshot>> {
    let vocab_json = std::fs::read_to_string(&cli.vocab)
        .with_context(|| format!("Failed to read vocabulary file: {}", cli.vocab.display()))?;
    let vocab: VocabSnapshot = serde_json::from_str(&vocab_json)
        .with_context(|| "Failed to parse vocabulary JSON")?;
    vocab
        .validate()
        .with_context(|| "Vocabulary snapshot failed validation")?;

    let labels = LabelSet::new(cli.labels.clone().unwrap_or_default())
        .with_context(|| "Invalid label set")?;
    debug!(
        num_words = vocab.num_words(),
        num_labels = labels.len(),
        "Vectorizer ready"
    );

    Ok(TfidfVectorizer::new(vocab, labels)
        .with_params(VectorizerParams::new(cli.min_word_frequency)))
}

/// Determine input source from CLI args
fn determine_input_source(cli: &Cli) -> Result<InputSource> {
    use std::io::Read;

    // Priority: text arg > file > batch > stdin
    if let Some(text) = &cli.text {
        return Ok(InputSource::Single(text.clone()));
    }

    if let Some(path) = &cli.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        return Ok(InputSource::Single(text));
    }

    if let Some(path) = &cli.batch {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch file: {}", path.display()))?;
        let texts: Vec<String> = contents.lines().map(String::from).collect();
        return Ok(InputSource::Batch(texts));
    }

    // Read from stdin
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(InputSource::Single(buffer))
}

/// Vectorize one document, with or without a label
fn process_single(
    vectorizer: &TfidfVectorizer<VocabSnapshot>,
    text: &str,
    label: Option<&str>,
) -> Result<VectorizedDoc> {
    match label {
        Some(label) => {
            let example = vectorizer.vectorize(text, label)?;
            let (features, labels) = example.into_parts();
            Ok(VectorizedDoc {
                features: features.to_vec(),
                labels: Some(labels.to_vec()),
            })
        }
        None => Ok(VectorizedDoc {
            features: vectorizer.transform(text).to_vec(),
            labels: None,
        }),
    }
}

fn progress_bar_setup(len: usize, message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("valid progress template")
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    pb
}

/// Vectorize many documents, in parallel when the batch is large enough
fn process_batch(
    vectorizer: &TfidfVectorizer<VocabSnapshot>,
    texts: &[String],
    cli: &Cli,
) -> Result<Vec<VectorizedDoc>> {
    let label = cli.label.as_deref();

    if texts.len() >= MIN_DOCS_FOR_PARALLEL {
        debug!(num_docs = texts.len(), "Using parallel vectorization");
        if cli.quiet {
            texts
                .par_iter()
                .map(|text| process_single(vectorizer, text, label))
                .collect()
        } else {
            let pb = progress_bar_setup(texts.len(), "Vectorizing documents");
            let results = texts
                .par_iter()
                .progress_with(pb.clone())
                .map(|text| process_single(vectorizer, text, label))
                .collect();
            pb.finish_with_message("Vectorization complete");
            results
        }
    } else {
        texts
            .iter()
            .map(|text| process_single(vectorizer, text, label))
            .collect()
    }
}

fn to_json(result: &VectorizedDoc) -> serde_json::Value {
    match &result.labels {
        Some(labels) => serde_json::json!({
            "features": result.features,
            "labels": labels,
        }),
        None => serde_json::json!({ "features": result.features }),
    }
}

/// Output single result based on format
fn output_result(result: &VectorizedDoc, cli: &Cli) {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", to_json(result));
        }
        OutputFormat::Dense => {
            let row = result
                .features
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            println!("{row}");
        }
        OutputFormat::Sparse => {
            let row = result
                .features
                .iter()
                .enumerate()
                .filter(|(_, &v)| v != 0.0)
                .map(|(i, v)| format!("{i}:{v}"))
                .collect::<Vec<_>>()
                .join(" ");
            println!("{row}");
        }
    }
}

/// Output batch results
fn output_batch_results(results: &[VectorizedDoc], cli: &Cli) {
    match cli.format {
        OutputFormat::Json => {
            let json_array: Vec<_> = results.iter().map(to_json).collect();
            println!("{}", serde_json::Value::Array(json_array));
        }
        _ => {
            // For other formats, output each result on its own line
            for result in results {
                output_result(result, cli);
            }
        }
    }
}
