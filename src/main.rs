use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use termfreq::{Config, IdAssignment, InvertedIndex, Scores, SearchEngine};
use tracing_subscriber::EnvFilter;

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Term frequency index and TF-IDF search over a folder of text files", long_about = None)]
struct Args {
    /// Frequency table file
    #[arg(short, long, global = true)]
    table: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record every .txt file in a folder and build the index
    Index {
        #[command(flatten)]
        index: IndexArgs,

        /// Print the resulting index as JSON
        #[arg(long)]
        print_index: bool,
    },
    /// Score documents 1..=300 against a query
    Search {
        query: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Index a folder, then run a query against the fresh table
    Run {
        #[command(flatten)]
        index: IndexArgs,

        query: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show statistics of the index built from the table
    Stats,
}

#[derive(clap::Args, Debug)]
struct IndexArgs {
    /// Folder holding the documents
    #[arg(short, long)]
    folder: PathBuf,

    /// Empty the table before recording
    #[arg(long)]
    fresh: bool,

    /// Give each document one ID instead of one bucket per token
    #[arg(long)]
    per_document_ids: bool,
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Number of top documents to print
    #[arg(short = 'n', long, default_value_t = 10)]
    top: usize,

    /// Print every document, including zero scores
    #[arg(long)]
    all: bool,

    /// Print the full score mapping as JSON
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(table) = &args.table {
        config.table_path = table.clone();
    }
    Ok(config)
}

fn do_index(engine: &mut SearchEngine, folder: &Path, fresh: bool) -> Result<InvertedIndex> {
    if fresh {
        engine.table_mut().clear().context("Failed to clear frequency table")?;
    }

    let start = Instant::now();
    let index = engine
        .index_folder(folder)
        .with_context(|| format!("Failed to index {}", folder.display()))?;
    let stats = index.stats();
    tracing::info!(
        "index ready in {:?}: {} terms, {} postings",
        start.elapsed(),
        stats.total_terms,
        stats.total_postings
    );
    Ok(index)
}

fn print_scores(query: &str, scores: &Scores, output: &OutputArgs) -> Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(scores)?);
        return Ok(());
    }

    println!("Searching for: \"{}\"", query);
    println!("{} of {} documents matched", scores.matched(), scores.len());
    println!();

    let limit = if output.all { scores.len() } else { output.top };
    for doc in scores
        .ranked()
        .into_iter()
        .filter(|d| output.all || d.score > 0.0)
        .take(limit)
    {
        println!("{}\t{:.4}", doc.doc_id, doc.score);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = load_config(&args)?;

    match &args.command {
        Command::Index { index, print_index } => {
            if index.per_document_ids {
                config.id_assignment = IdAssignment::PerDocument;
            }
            let mut engine = SearchEngine::open(&config);
            let built = do_index(&mut engine, &index.folder, index.fresh)?;
            if *print_index {
                println!("{}", serde_json::to_string_pretty(&built)?);
            }
        }
        Command::Search { query, output } => {
            let engine = SearchEngine::open(&config);
            let scores = engine
                .search(query)
                .with_context(|| format!("Failed to search {}", config.table_path.display()))?;
            print_scores(query, &scores, output)?;
        }
        Command::Run {
            index,
            query,
            output,
        } => {
            if index.per_document_ids {
                config.id_assignment = IdAssignment::PerDocument;
            }
            let mut engine = SearchEngine::open(&config);
            do_index(&mut engine, &index.folder, index.fresh)?;
            let scores = engine.search(query)?;
            print_scores(query, &scores, output)?;
        }
        Command::Stats => {
            let engine = SearchEngine::open(&config);
            let stats = engine.build_index()?.stats();
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}
