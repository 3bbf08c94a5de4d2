//! Query and mutation operations over the book collection
//!
//! Every front end goes through [`Library`]. Reads are served from the
//! store's cache; each mutation copies the current collection, applies the
//! change, persists the whole copy and only then invalidates the cache.
//! A failed mutation leaves both the cache and the file untouched.

use std::path::PathBuf;

use super::error::{LibraryError, LibraryResult};
use super::sheet::{CsvSheet, SheetBackend};
use super::store::Store;
use crate::domain::{Book, Collection, SearchFilter};

/// Book catalog backed by a sheet
pub struct Library<B: SheetBackend = CsvSheet> {
    store: Store<B>,
}

impl Library<CsvSheet> {
    /// Opens the CSV-backed library at `path`. The file is not created
    /// until the first successful mutation.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(CsvSheet::new(path))
    }
}

impl<B: SheetBackend> Library<B> {
    pub fn new(backend: B) -> Self {
        Self {
            store: Store::new(backend),
        }
    }

    /// Returns where the collection is persisted
    pub fn location(&self) -> String {
        self.store.backend().location()
    }

    /// Returns the underlying store
    pub fn store(&self) -> &Store<B> {
        &self.store
    }

    /// Returns every book, in collection order
    pub fn list_all(&mut self) -> LibraryResult<Collection> {
        Ok(self.store.load()?.clone())
    }

    /// Returns the books whose title contains `title` (case-insensitive) and
    /// whose authors equal `author`. An empty keyword or the `All` author
    /// does not filter.
    pub fn search(&mut self, title: Option<&str>, author: Option<&str>) -> LibraryResult<Collection> {
        self.search_with(&SearchFilter::new(title, author))
    }

    pub fn search_with(&mut self, filter: &SearchFilter) -> LibraryResult<Collection> {
        Ok(filter.apply(self.store.load()?))
    }

    /// Distinct authors, sorted
    pub fn authors(&mut self) -> LibraryResult<Vec<String>> {
        Ok(self.store.load()?.authors())
    }

    /// Titles in collection order
    pub fn titles(&mut self) -> LibraryResult<Vec<String>> {
        Ok(self
            .store
            .load()?
            .titles()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Appends a book and persists the collection.
    ///
    /// Fails with [`LibraryError::EmptyTitle`] for a blank title and with
    /// [`LibraryError::DuplicateTitle`] if the exact title is already present.
    pub fn add(&mut self, book: Book) -> LibraryResult<()> {
        if book.has_blank_title() {
            return Err(LibraryError::EmptyTitle);
        }

        let current = self.store.load()?;
        if current.contains_title(&book.title) {
            return Err(LibraryError::DuplicateTitle(book.title));
        }

        let mut updated = current.clone();
        updated.push(book);
        self.commit(&updated)
    }

    /// Removes every book titled exactly `title` and persists the collection.
    ///
    /// Returns the number of rows removed, which is more than one only if
    /// the file was edited by hand to hold duplicate titles.
    pub fn delete(&mut self, title: &str) -> LibraryResult<usize> {
        let mut updated = self.store.load()?.clone();
        let removed = updated.remove_title(title);
        if removed == 0 {
            return Err(LibraryError::NotFound(title.to_string()));
        }

        self.commit(&updated)?;
        Ok(removed)
    }

    fn commit(&mut self, books: &Collection) -> LibraryResult<()> {
        self.store.persist(books)?;
        self.store.invalidate();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ALL_AUTHORS;
    use crate::storage::sheet::memory::MemorySheet;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn memory_library(books: Vec<Book>) -> Library<MemorySheet> {
        Library::new(MemorySheet::with_books(books))
    }

    fn dune() -> Book {
        Book::new("Dune", "Frank Herbert", "ENG", "Shelf A")
    }

    #[test]
    fn end_to_end_add_then_delete() {
        let dir = TempDir::new().unwrap();
        let mut library = Library::open(dir.path().join("books.csv"));

        assert!(library.list_all().unwrap().is_empty());

        library.add(dune()).unwrap();
        assert_eq!(library.list_all().unwrap().as_slice(), &[dune()]);

        assert_eq!(library.delete("Dune").unwrap(), 1);
        assert!(library.list_all().unwrap().is_empty());
    }

    #[test]
    fn list_all_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("books.csv");
        let mut library = Library::open(&path);

        library.list_all().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn add_persists_and_reloads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("books.csv");

        let mut library = Library::open(&path);
        library.add(dune()).unwrap();
        library.add(Book::new("Emma", "Jane Austen", "ENG", "Shelf B")).unwrap();

        let mut reopened = Library::open(&path);
        assert_eq!(reopened.list_all().unwrap(), library.list_all().unwrap());
        assert_eq!(reopened.titles().unwrap(), vec!["Dune", "Emma"]);
    }

    #[test]
    fn add_blank_title_is_rejected() {
        let mut library = memory_library(vec![dune()]);

        for title in ["", "   "] {
            let err = library.add(Book::new(title, "x", "ENG", "y")).unwrap_err();
            assert!(matches!(err, LibraryError::EmptyTitle));
        }

        assert_eq!(library.list_all().unwrap().len(), 1);
        assert_eq!(library.store().backend().writes.get(), 0);
    }

    #[test]
    fn add_duplicate_is_rejected() {
        let mut library = memory_library(vec![]);

        library.add(dune()).unwrap();
        let err = library.add(Book::new("Dune", "Someone", "FRA", "Attic")).unwrap_err();

        assert!(matches!(err, LibraryError::DuplicateTitle(ref t) if t == "Dune"));
        let books = library.list_all().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books.get("Dune").unwrap().authors, "Frank Herbert");
    }

    #[test]
    fn duplicate_check_is_case_sensitive() {
        let mut library = memory_library(vec![dune()]);
        library.add(Book::new("DUNE", "Frank Herbert", "FRA", "Shelf A")).unwrap();
        assert_eq!(library.list_all().unwrap().len(), 2);
    }

    #[test]
    fn delete_missing_is_not_found() {
        let mut library = memory_library(vec![dune()]);

        let err = library.delete("Emma").unwrap_err();
        assert!(matches!(err, LibraryError::NotFound(ref t) if t == "Emma"));
        assert_eq!(library.list_all().unwrap().len(), 1);
        assert_eq!(library.store().backend().writes.get(), 0);
    }

    #[test]
    fn delete_removes_all_exact_matches() {
        let mut library = memory_library(vec![
            dune(),
            Book::new("Emma", "Jane Austen", "ENG", "B"),
            Book::new("Dune", "Frank Herbert", "FRA", "C"),
        ]);

        assert_eq!(library.delete("Dune").unwrap(), 2);
        assert_eq!(library.titles().unwrap(), vec!["Emma"]);
    }

    #[test]
    fn mutations_invalidate_cache() {
        let mut library = memory_library(vec![]);

        library.list_all().unwrap();
        library.add(dune()).unwrap();
        assert!(!library.store().is_cached());

        assert_eq!(library.list_all().unwrap().len(), 1);
        assert_eq!(library.store().backend().reads.get(), 2);
    }

    #[test]
    fn reads_share_one_load() {
        let mut library = memory_library(vec![dune()]);

        library.list_all().unwrap();
        library.search(Some("du"), None).unwrap();
        library.authors().unwrap();

        assert_eq!(library.store().backend().reads.get(), 1);
    }

    #[test]
    fn failed_persist_leaves_collection_unchanged() {
        let mut library = memory_library(vec![dune()]);
        library.store().backend().fail_writes.set(true);

        assert!(library.add(Book::new("Emma", "Jane Austen", "ENG", "B")).is_err());
        assert!(library.delete("Dune").is_err());

        assert_eq!(library.titles().unwrap(), vec!["Dune"]);
    }

    #[test]
    fn search_examples() {
        let mut library = memory_library(vec![
            Book::new("Harry Potter", "J. K. Rowling", "ENG", "A"),
            Book::new("The Hobbit", "J. R. R. Tolkien", "ENG", "B"),
        ]);

        let lower = library.search(Some("har"), None).unwrap();
        let upper = library.search(Some("HAR"), None).unwrap();
        assert_eq!(lower.titles(), vec!["Harry Potter"]);
        assert_eq!(lower, upper);

        let all = library.search(None, Some(ALL_AUTHORS)).unwrap();
        assert_eq!(all, library.list_all().unwrap());

        assert!(library.search(Some("dune"), None).unwrap().is_empty());
    }

    #[test]
    fn format_error_surfaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("books.csv");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();

        let mut library = Library::open(&path);
        assert!(matches!(library.list_all(), Err(LibraryError::Format { .. })));
        assert!(matches!(library.add(dune()), Err(LibraryError::Format { .. })));
    }

    fn title_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z0-9][A-Za-z0-9 ,'\"]{0,20}"
    }

    proptest! {
        #[test]
        fn added_book_round_trips(title in title_strategy(), authors in "[A-Za-z ,.'\"éà-]{0,20}", location in "[A-Za-z0-9 ,.\n-]{0,20}") {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("books.csv");
            let book = Book::new(title.clone(), authors, "FRA", location);

            let mut library = Library::open(&path);
            library.add(book.clone()).unwrap();

            let books = library.list_all().unwrap();
            prop_assert_eq!(books.as_slice(), &[book]);

            let mut reopened = Library::open(&path);
            prop_assert_eq!(reopened.list_all().unwrap(), books);
        }

        #[test]
        fn second_add_is_duplicate(title in title_strategy()) {
            let mut library = memory_library(vec![]);

            library.add(Book::new(title.clone(), "a", "ENG", "x")).unwrap();
            let second = library.add(Book::new(title.clone(), "b", "FRA", "y"));

            prop_assert!(matches!(second, Err(LibraryError::DuplicateTitle(_))));
            let books = library.list_all().unwrap();
            prop_assert_eq!(books.iter().filter(|b| b.title == title).count(), 1);
        }

        #[test]
        fn whitespace_titles_are_rejected(title in "[ \t]{0,8}") {
            let mut library = memory_library(vec![dune()]);

            let result = library.add(Book::new(title, "a", "ENG", "x"));
            prop_assert!(matches!(result, Err(LibraryError::EmptyTitle)));
            prop_assert_eq!(library.list_all().unwrap().len(), 1);
        }
    }
}
