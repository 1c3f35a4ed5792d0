mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "umaocr",
    version,
    about = "Extract name/points tables from game result screenshots"
)]
struct Cli {
    /// Log pipeline decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Aligned "#  Name  Points" table
    Table,
    /// Records as JSON
    Json,
    /// "name,value" per row (Copy All)
    Csv,
    /// Points column only (Copy Points)
    Points,
}

#[derive(Subcommand)]
enum Commands {
    /// Run each input as one paste and print the accumulated table
    Scan {
        /// Screenshot images, or pre-recognized fragment JSON files, in paste order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Sort the final table by column: no, name, points
        #[arg(short, long, value_name = "COLUMN")]
        sort: Option<String>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,

        /// Write an annotated preview per image into this directory
        #[arg(long, value_name = "DIR")]
        annotate_dir: Option<PathBuf>,

        /// Print per-paste statistics to stderr
        #[arg(long)]
        stats: bool,
    },
    /// Show the reconstructed lines of one input
    Lines {
        /// Screenshot image or fragment JSON file
        input: PathBuf,

        /// JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Inspect and validate configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config as JSON
    Show {
        /// JSON config file (defaults are shown if omitted)
        file: Option<PathBuf>,
    },
    /// Validate a config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
    /// Print the config field reference
    Schema,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Scan {
            inputs,
            config,
            sort,
            desc,
            output,
            annotate_dir,
            stats,
        } => commands::scan::run(
            inputs,
            config,
            sort.as_deref(),
            desc,
            output,
            annotate_dir,
            stats,
        ),
        Commands::Lines { input, config } => commands::lines::run(input, config),
        Commands::Config { action } => match action {
            ConfigAction::Show { file } => commands::config::show(file.as_deref()),
            ConfigAction::Validate { file } => commands::config::validate(&file),
            ConfigAction::Schema => commands::config::schema(),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
