//! Bookshelf CLI - A local-first personal library catalog
//!
//! Books (title, authors, language, storage location) live in a single
//! spreadsheet-style file. The [`storage::Library`] layer loads, filters,
//! adds and deletes books; the [`cli`] module is the front end on top of it.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Book, Collection, SearchFilter};
pub use storage::{Library, LibraryError, LibraryResult};
