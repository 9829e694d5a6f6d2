//! lexitest CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lexitest", version, about = "Language-learning test assembly and grading")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate corpus TOML files
    Validate {
        /// Path to a corpus .toml file or directory
        #[arg(long)]
        corpus: PathBuf,
    },

    /// Derive sentence pairs from reading units
    Generate {
        /// Path to a corpus .toml file or directory
        #[arg(long)]
        corpus: PathBuf,

        /// Maximum sentences to generate
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Assemble a mixed-type test from the corpus
    Assemble {
        /// Path to a corpus .toml file or directory
        #[arg(long)]
        corpus: PathBuf,

        /// Number of items to draw
        #[arg(long, default_value = "50")]
        count: usize,

        /// Vocabulary share of the test
        #[arg(long, default_value = "0.4")]
        vocab_ratio: f64,

        /// Authored-sentence share of the test
        #[arg(long, default_value = "0.3")]
        sentence_ratio: f64,

        /// Reading-question share of the test
        #[arg(long, default_value = "0.3")]
        reading_ratio: f64,

        /// Write the assembled test as JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Seed for the shuffle (omit for a random order)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Grade a submitted answer set against the corpus
    Grade {
        /// Path to a corpus .toml file or directory
        #[arg(long)]
        corpus: PathBuf,

        /// JSON file with the submitted answers
        #[arg(long)]
        answers: PathBuf,

        /// Write the graded report as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Import a CSV spreadsheet into a corpus file
    Import {
        /// Sheet kind: vocab or reading
        #[arg(long)]
        kind: String,

        /// CSV file to import
        #[arg(long)]
        file: PathBuf,

        /// Corpus .toml file to update (created if missing)
        #[arg(long)]
        corpus: PathBuf,

        /// append or overwrite
        #[arg(long, default_value = "append")]
        mode: String,
    },

    /// Aggregate saved grading reports
    Stats {
        /// Directory of SubmitResponse JSON files
        #[arg(long)]
        reports: PathBuf,
    },

    /// Create a starter corpus file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lexitest=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { corpus } => commands::validate::execute(corpus),
        Commands::Generate { corpus, limit } => commands::generate::execute(corpus, limit).await,
        Commands::Assemble {
            corpus,
            count,
            vocab_ratio,
            sentence_ratio,
            reading_ratio,
            output,
            seed,
        } => {
            commands::assemble::execute(
                corpus,
                count,
                vocab_ratio,
                sentence_ratio,
                reading_ratio,
                output,
                seed,
            )
            .await
        }
        Commands::Grade {
            corpus,
            answers,
            output,
        } => commands::grade::execute(corpus, answers, output).await,
        Commands::Import {
            kind,
            file,
            corpus,
            mode,
        } => commands::import::execute(kind, file, corpus, mode),
        Commands::Stats { reports } => commands::stats::execute(reports),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
