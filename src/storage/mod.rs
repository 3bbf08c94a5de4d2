//! # Storage Layer
//!
//! Persistence and the query/mutation layer for the book catalog.
//!
//! ## Storage Format
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Books | CSV with header `Titre,Auteur(s),Langue,Lieu de stockage` | `books.csv` (configurable) |
//! | Config | TOML | `bookshelf.toml`, `~/.config/bookshelf/config.toml` |
//!
//! ## Write Model
//!
//! Every mutation loads the collection, changes a copy in memory, rewrites
//! the whole sheet (temp file + rename) and then drops the load cache.
//! There is no cross-process coordination: two processes writing the same
//! sheet follow last-writer-wins.
//!
//! ## Key Types
//!
//! - [`Library`] - Entry point: list, search, add, delete
//! - [`Store`] - Cached load / persist / invalidate over a backend
//! - [`SheetBackend`] - Where the collection lives; [`CsvSheet`] is the file backend
//! - [`Config`] - Global and local configuration

mod error;
mod sheet;
mod store;
mod library;
mod config;

pub use error::{LibraryError, LibraryResult};
pub use sheet::{CsvSheet, SheetBackend};
pub use store::Store;
pub use library::Library;
pub use config::{Config, ConfigError, ConfigFile, OutputFormat, DEFAULT_LIBRARY_FILE, LOCAL_CONFIG_FILE};
