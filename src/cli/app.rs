//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{book, tui};
use crate::storage::{Config, Library};

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(author, version, about = "Personal library catalog backed by a single sheet")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Library file to use instead of the configured one
    #[arg(long, short = 'l', global = true, env = "BOOKSHELF_LIBRARY")]
    pub library: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every book in the library
    List {
        /// Show the raw table (header row plus one tab-separated row per book)
        #[arg(long)]
        table: bool,
    },

    /// Search by title keyword and/or author
    Search {
        /// Case-insensitive keyword matched against titles
        #[arg(long, short)]
        title: Option<String>,

        /// Exact author name ("All" for any author)
        #[arg(long, short, default_value = "All")]
        author: String,
    },

    /// List the distinct authors in the library
    Authors,

    /// Add a book
    ///
    /// Examples:
    ///   bookshelf add "Dune" --author "Frank Herbert" --language ENG --location "Shelf A"
    Add {
        /// Book title (must be unique)
        title: String,

        /// Author(s)
        #[arg(long, short, default_value = "")]
        author: String,

        /// Language, one of the configured languages (defaults to the first)
        #[arg(long, short = 'L')]
        language: Option<String>,

        /// Storage location (e.g. "BOX PANINI")
        #[arg(long, short = 'o', default_value = "")]
        location: String,
    },

    /// Delete a book by exact title
    Delete {
        /// Title of the book to delete
        title: String,

        /// Confirm the deletion
        #[arg(long, short)]
        yes: bool,
    },

    /// Browse and edit the library in an interactive terminal UI
    Tui {
        /// Initial page (view, search, add, delete)
        #[arg(long, default_value = "view")]
        page: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let output = Output::new(cli.format.unwrap_or(config.default_format), cli.verbose);
    output.verbose("Bookshelf CLI starting");

    let path = cli.library.clone().unwrap_or_else(|| config.library.clone());
    output.verbose_ctx("library", &format!("Using library file: {}", path.display()));
    let mut library = Library::open(path);

    match cli.command {
        Commands::List { table } => {
            output.verbose_ctx("list", &format!("Listing books, table={}", table));
            book::list(&output, &mut library, table)?
        }

        Commands::Search { title, author } => {
            output.verbose_ctx(
                "search",
                &format!("Searching: title={:?}, author={:?}", title, author),
            );
            book::search(&output, &mut library, title.as_deref(), &author)?
        }

        Commands::Authors => book::authors(&output, &mut library)?,

        Commands::Add {
            title,
            author,
            language,
            location,
        } => {
            output.verbose_ctx("add", &format!("Adding book: {:?}", title));
            book::add(
                &output,
                &mut library,
                &config,
                &title,
                &author,
                language.as_deref(),
                &location,
            )?
        }

        Commands::Delete { title, yes } => {
            output.verbose_ctx("delete", &format!("Deleting book: {:?}, confirmed={}", title, yes));
            book::delete(&output, &mut library, &title, yes)?
        }

        Commands::Tui { page } => tui::run(&output, library, &config, &page)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
