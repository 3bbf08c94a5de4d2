//! # Command-Line Interface
//!
//! User-facing commands and output formatting on top of [`crate::storage::Library`].
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `list` | Show every book (`--table` for the raw sheet) |
//! | `search` | Filter by title keyword and/or exact author |
//! | `authors` | Distinct authors, sorted |
//! | `add` | Add a book with a unique title |
//! | `delete` | Remove a book by exact title (`--yes` required) |
//! | `tui` | Interactive terminal UI with the same four views |
//!
//! ## Output Formats
//!
//! All commands support `--format text|json`; the default comes from the
//! configuration. `--verbose` prints debug lines to stderr.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod book;
mod tui;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
