//! The `lingomark` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "lingomark", version, about = "Quiz answer correction and timing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Correct submissions and write reports
    Correct {
        /// Path to a .toml/.json submission or a directory of them
        #[arg(long)]
        submission: PathBuf,

        /// Output directory (default from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, text, all (default from config)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate submission files
    Validate {
        /// Path to a submission file or directory
        #[arg(long)]
        submission: PathBuf,
    },

    /// Run a quiz countdown in the terminal
    Timer {
        /// Total duration in seconds
        #[arg(long)]
        seconds: u64,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example submission
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lingomark=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Correct {
            submission,
            output,
            format,
            config,
        } => commands::correct::execute(submission, output, format, config),
        Commands::Validate { submission } => commands::validate::execute(submission),
        Commands::Timer { seconds, config } => commands::timer::execute(seconds, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
