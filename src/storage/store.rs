//! Cached access to a sheet backend
//!
//! [`Store`] keeps the last loaded collection so repeated reads within one
//! command or one screen refresh hit the file once. The cache is only ever
//! dropped by [`Store::invalidate`]; mutations call it right after a
//! successful [`Store::persist`].

use super::error::LibraryResult;
use super::sheet::SheetBackend;
use crate::domain::Collection;

/// Bridge between a sheet backend and the in-memory collection
pub struct Store<B: SheetBackend> {
    backend: B,
    cached: Option<Collection>,
}

impl<B: SheetBackend> Store<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            cached: None,
        }
    }

    /// Returns the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the cached collection, reading the backend on a miss.
    ///
    /// A backend with nothing persisted yields an empty collection; nothing
    /// is created on disk.
    pub fn load(&mut self) -> LibraryResult<&Collection> {
        let books = match self.cached.take() {
            Some(books) => books,
            None => self.backend.read()?.unwrap_or_default(),
        };
        Ok(self.cached.insert(books))
    }

    /// Drops the cached collection so the next load re-reads the backend
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Returns true if a load result is cached
    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    /// Writes the full collection to the backend. The cache is left as is.
    pub fn persist(&self, books: &Collection) -> LibraryResult<()> {
        self.backend.write(books)
    }
}
