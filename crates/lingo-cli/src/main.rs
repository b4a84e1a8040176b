//! lingo CLI: resolve, score and practice exercise payloads.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod files;

use commands::AttemptArgs;

#[derive(Parser)]
#[command(
    name = "lingo",
    version,
    about = "Exercise normalization and scoring for language practice"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an exercise payload and show its normalized view
    Resolve {
        /// Path to the exercise payload JSON
        #[arg(long)]
        payload: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Score a set of answers against an exercise payload
    Score {
        /// Path to the exercise payload JSON
        #[arg(long)]
        payload: PathBuf,

        /// Path to the answers JSON (e.g. {"q0": 1, "ex0": "suis"})
        #[arg(long)]
        answers: PathBuf,

        /// Seconds spent on the attempt, for the progress record
        #[arg(long, default_value = "0")]
        time_spent: u64,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        #[command(flatten)]
        attempt: AttemptArgs,
    },

    /// Take an exercise interactively on stdin
    Practice {
        /// Path to the exercise payload JSON
        #[arg(long)]
        payload: PathBuf,

        #[command(flatten)]
        attempt: AttemptArgs,
    },

    /// Report shape issues in exercise payloads
    Validate {
        /// Path to a payload file or directory of payloads
        #[arg(long)]
        payload: PathBuf,
    },

    /// Summarize recorded progress
    Stats {
        /// Progress file (defaults to the configured one)
        #[arg(long)]
        progress: Option<PathBuf>,

        /// Only consider one skill
        #[arg(long)]
        skill: Option<String>,

        /// Difficulty to adapt from (1-5)
        #[arg(long, default_value = "3")]
        base_difficulty: u8,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example payload
    Init,
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lingo=info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Resolve { payload, format } => commands::resolve::execute(payload, format),
        Commands::Score {
            payload,
            answers,
            time_spent,
            format,
            attempt,
        } => commands::score::execute(payload, answers, time_spent, format, attempt),
        Commands::Practice { payload, attempt } => commands::practice::execute(payload, attempt),
        Commands::Validate { payload } => commands::validate::execute(payload),
        Commands::Stats {
            progress,
            skill,
            base_difficulty,
            format,
            config,
        } => commands::stats::execute(progress, skill, base_difficulty, format, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
