use std::path::PathBuf;
use std::process::exit;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use livros_backend::{COMENTARIOS_URL, DEFAULT_CSV_PATH};
use livros_cli::export::{self, ExportConfig};
use livros_cli::stats;

#[derive(Parser, Debug)]
#[command(author, version, about = "Livros data cleaning CLI", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory the SQL files are written to. Created if missing.
    #[arg(long, global = true, value_name = "DIRECTORY_PATH", env = "LIVROS_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clean the books CSV and export the SQL insert files
    Export {
        /// Path to the source books CSV
        #[arg(value_name = "CSV_PATH", env = "LIVROS_CSV")]
        csv_path: Option<PathBuf>,

        /// URL of the comments JSON dataset
        #[arg(long, value_name = "URL", env = "COMENTARIOS_URL")]
        comments_url: Option<String>,

        /// Skip the remote comments fetch and comentarios.sql
        #[arg(long, default_value_t = false)]
        skip_comments: bool,
    },

    /// Print summary statistics for the source CSV
    Stats {
        /// Path to the source books CSV
        #[arg(value_name = "CSV_PATH", env = "LIVROS_CSV")]
        csv_path: Option<PathBuf>,

        /// How many of the most frequent authors to list
        #[arg(long, default_value_t = 10)]
        top_authors: usize,
    },
}

fn main() {
    // Attempt to load .env file. This may define LIVROS_CSV and friends if
    // they are not already in the environment; clap picks them up via `env`.
    if dotenv().is_err() {
        println!("Info: No .env file found or failed to load.");
    }

    let cli = Cli::parse();

    let output_dir = cli.output_dir.unwrap_or_else(|| PathBuf::from("."));

    let command_result: Result<()> = match cli.command {
        Commands::Export { csv_path, comments_url, skip_comments } => {
            let config = ExportConfig {
                csv_path: csv_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH)),
                output_dir,
                comments_url: comments_url.unwrap_or_else(|| COMENTARIOS_URL.to_string()),
                skip_comments,
            };
            export::export(&config)
        }

        Commands::Stats { csv_path, top_authors } => {
            let csv_path = csv_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH));
            stats::stats(&csv_path, top_authors)
        }
    };

    if let Err(e) = command_result {
        eprintln!("Error executing command: {:#}", e);
        exit(1);
    }
}
