mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use time::OffsetDateTime;

use commands::CliError;

#[derive(Parser, Debug)]
#[command(name = "pinboard", about = "Create, inspect, and repair pinboard board files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a new board file.
    New {
        path: PathBuf,
        #[arg(long, env = "PINBOARD_TITLE")]
        title: Option<String>,
        /// Start from the starter board instead of an empty one.
        #[arg(long, default_value_t = false)]
        demo: bool,
        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print a summary of a board file.
    Inspect { path: PathBuf },
    /// Strictly load a board file; fails on any malformed field or dangling connection.
    Validate { path: PathBuf },
    /// Drop connections whose endpoints are missing.
    Prune {
        path: PathBuf,
        #[arg(long, help = "Output path (defaults to rewriting the input)")]
        output: Option<PathBuf>,
    },
    /// Print the export filename a board with this title gets today.
    Filename { title: String },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let now = OffsetDateTime::now_utc();

    match cli.command {
        Command::New { path, title, demo, force } => {
            if path.exists() && !force {
                return Err(CliError::Exists(path.display().to_string()));
            }
            let json = commands::new_board(title.as_deref(), demo, now)?;
            commands::write_file(&path, &json)?;
            tracing::info!(path = %path.display(), demo, "wrote new board");
        }
        Command::Inspect { path } => {
            let summary = commands::inspect(&commands::read_file(&path)?)?;
            print!("{summary}");
        }
        Command::Validate { path } => {
            let summary = commands::validate(&commands::read_file(&path)?)?;
            println!("ok: \"{}\" ({} cards, {} connections)", summary.title, summary.card_count(), summary.connections);
        }
        Command::Prune { path, output } => {
            let (json, removed) = commands::prune(&commands::read_file(&path)?, now)?;
            let target = output.unwrap_or(path);
            commands::write_file(&target, &json)?;
            if removed.is_empty() {
                tracing::info!(path = %target.display(), "no dangling connections");
            } else {
                tracing::warn!(path = %target.display(), count = removed.len(), "pruned dangling connections");
            }
            println!("removed {} connection(s)", removed.len());
        }
        Command::Filename { title } => {
            println!("{}", commands::filename(&title, now.date()));
        }
    }
    Ok(())
}
