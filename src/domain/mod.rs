//! Domain models for Bookshelf
//!
//! Contains the catalog types and search logic without any I/O concerns.

mod book;
mod filter;

pub use book::{Book, Collection, COLUMNS};
pub use filter::{SearchFilter, ALL_AUTHORS};
