//! ECM Graph CLI - Command-line interface for the component graph
//!
//! Loads a `graph.json` snapshot, builds the relation graph, and answers
//! the same questions the web console asks when a node is hovered.

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use ecm_graph::HighlightMode;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "ecm-graph")]
#[command(author = "ECM Graph Contributors")]
#[command(version)]
#[command(about = "Blood relation queries over the ECM component graph", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Snapshot file (graph.json). Defaults to the one in .ecm-graph/config.json
    #[arg(short, long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Hover highlighting mode.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    /// Every ancestor and descendant
    Blood,
    /// Direct parents and children only
    Neighbours,
}

impl From<ModeArg> for HighlightMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Blood => HighlightMode::BloodRelation,
            ModeArg::Neighbours => HighlightMode::ClosestNeighbours,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create .ecm-graph/config.json in a directory
    Init {
        /// Project root (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Snapshot file the config should point at
        #[arg(long, default_value = "graph.json")]
        default_snapshot: PathBuf,
    },

    /// Show node and edge counts
    Stats {
        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List every ancestor and descendant of a node
    BloodPath {
        /// Node identifier
        id: String,

        /// Only ancestors
        #[arg(long, conflicts_with = "descendants")]
        ancestors: bool,

        /// Only descendants
        #[arg(long)]
        descendants: bool,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List the edges connecting a node to its blood relation
    Edges {
        /// Node identifier
        id: String,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List direct parents and children of a node
    Neighbours {
        /// Node identifier
        id: String,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show what hovering a node highlights
    Highlight {
        /// Node identifier
        id: String,

        /// Which relatives to highlight
        #[arg(short, long, value_enum, default_value = "blood")]
        mode: ModeArg,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Search node attributes
    Search {
        /// Text to look for
        value: String,

        /// Restrict the search to one attribute
        #[arg(short, long, default_value = "")]
        key: String,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Export nodes and edges to JSON
    Export {
        /// Output file
        #[arg(short, long, default_value = "ecm-graph-export.json")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let snapshot = cli.snapshot.as_deref();

    let result = match cli.command {
        Commands::Init {
            path,
            default_snapshot,
        } => commands::init(&path, &default_snapshot),
        Commands::Stats { json } => commands::stats(snapshot, json),
        Commands::BloodPath {
            id,
            ancestors,
            descendants,
            json,
        } => commands::blood_path(snapshot, &id, ancestors, descendants, json),
        Commands::Edges { id, json } => commands::edges(snapshot, &id, json),
        Commands::Neighbours { id, json } => commands::neighbours(snapshot, &id, json),
        Commands::Highlight { id, mode, json } => {
            commands::highlight(snapshot, &id, mode.into(), json)
        }
        Commands::Search { value, key, json } => commands::search(snapshot, &key, &value, json),
        Commands::Export { output } => commands::export(snapshot, &output),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
