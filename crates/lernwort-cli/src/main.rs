//! lernwort CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lernwort", version, about = "Vocabulary training in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive training session
    Train {
        /// Training set id (omit to pick interactively)
        #[arg(long)]
        set: Option<u64>,

        /// Named source from the config
        #[arg(long)]
        source: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for saved session summaries
        #[arg(long)]
        output: Option<PathBuf>,

        /// Save each finished pass as a JSON summary
        #[arg(long)]
        save_summary: bool,
    },

    /// List available training sets
    Sets {
        /// Named source from the config
        #[arg(long)]
        source: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate training set TOML files
    Validate {
        /// Path to a training set file or directory
        #[arg(long)]
        set_file: PathBuf,
    },

    /// Create starter config and example training set
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lernwort=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Train {
            set,
            source,
            config,
            output,
            save_summary,
        } => commands::train::execute(set, source, config, output, save_summary).await,
        Commands::Sets { source, config } => commands::sets::execute(source, config).await,
        Commands::Validate { set_file } => commands::validate::execute(set_file),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
