//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use args::{InputArgs, OutputArgs};
use clap::{Parser, Subcommand};
use folio::config::Config;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Section model tools for long Markdown documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document into flat sections (JSON)
    Parse {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the section outline
    Tree {
        #[command(flatten)]
        input: InputArgs,
        /// Keep only sections that have subsections
        #[arg(long)]
        branches: bool,
    },

    /// Full nested content and ancestor chain of one section
    Extract {
        #[command(flatten)]
        input: InputArgs,
        /// Section id, title or slug
        section: String,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Convert a document to the editor block tree (JSON)
    Blocks {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write flat sections (JSON) back out as markup
    Markup {
        /// JSON file holding a list of sections
        file: PathBuf,
        /// Title of the document's implicit root section
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Resolve a link target against a document
    Resolve {
        #[command(flatten)]
        input: InputArgs,
        /// Link target: `#ref`, `/path#ref` or `/path`
        target: String,
        /// Directory of documents for cross-document links
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Search every `.md` document under a directory
    Search {
        /// Directory to scan
        root: PathBuf,
        query: String,
        /// Print the best N results only
        #[arg(short, long)]
        limit: Option<usize>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

fn init_logging(verbose: bool) {
    // RUST_LOG wins; --verbose falls back to DEBUG.
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse { input, output } => commands::outline::parse(&input, &output),
        Commands::Tree { input, branches } => commands::outline::tree(&input, branches),
        Commands::Extract {
            input,
            section,
            output,
        } => commands::extract::run(&input, &section, &output),
        Commands::Blocks { input, output } => commands::outline::blocks(&input, &output),
        Commands::Markup {
            file,
            title,
            output,
        } => commands::outline::markup(&file, title.as_deref(), &output),
        Commands::Resolve {
            input,
            target,
            root,
        } => commands::resolve::run(&input, &target, root.as_deref()),
        Commands::Search {
            root,
            query,
            limit,
            output,
        } => commands::search::run(&root, &query, limit, &config, &output),
    }
}
