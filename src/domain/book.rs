//! Book domain model
//!
//! A book is one row of the catalog sheet. The title is the business key:
//! exact, case-sensitive equality decides duplicates and deletions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Column names of the persisted sheet, in order
pub const COLUMNS: [&str; 4] = ["Titre", "Auteur(s)", "Langue", "Lieu de stockage"];

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "Titre")]
    pub title: String,

    /// Free text, may name several authors
    #[serde(rename = "Auteur(s)")]
    pub authors: String,

    #[serde(rename = "Langue")]
    pub language: String,

    /// Where the physical copy is kept (e.g. "BOX PANINI")
    #[serde(rename = "Lieu de stockage")]
    pub location: String,
}

impl Book {
    /// Creates a new book
    pub fn new(
        title: impl Into<String>,
        authors: impl Into<String>,
        language: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            authors: authors.into(),
            language: language.into(),
            location: location.into(),
        }
    }

    /// Returns true if the title is empty or only whitespace
    pub fn has_blank_title(&self) -> bool {
        self.title.trim().is_empty()
    }

    /// Cell values in column order
    pub fn cells(&self) -> [&str; 4] {
        [&self.title, &self.authors, &self.language, &self.location]
    }
}

/// Ordered sequence of books, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Collection(Vec<Book>);

impl Collection {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.0.iter()
    }

    /// Returns the books as a slice
    pub fn as_slice(&self) -> &[Book] {
        &self.0
    }

    /// Appends a book at the end
    pub fn push(&mut self, book: Book) {
        self.0.push(book);
    }

    /// Returns true if some book has exactly this title
    pub fn contains_title(&self, title: &str) -> bool {
        self.0.iter().any(|b| b.title == title)
    }

    /// Finds the first book with exactly this title
    pub fn get(&self, title: &str) -> Option<&Book> {
        self.0.iter().find(|b| b.title == title)
    }

    /// Removes every book whose title equals `title`, returning how many went
    pub fn remove_title(&mut self, title: &str) -> usize {
        let before = self.0.len();
        self.0.retain(|b| b.title != title);
        before - self.0.len()
    }

    /// Titles in collection order
    pub fn titles(&self) -> Vec<&str> {
        self.0.iter().map(|b| b.title.as_str()).collect()
    }

    /// Distinct non-empty author strings, sorted
    pub fn authors(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|b| b.authors.as_str())
            .filter(|a| !a.trim().is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl From<Vec<Book>> for Collection {
    fn from(books: Vec<Book>) -> Self {
        Self(books)
    }
}

impl FromIterator<Book> for Collection {
    fn from_iter<I: IntoIterator<Item = Book>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Collection {
    type Item = Book;
    type IntoIter = std::vec::IntoIter<Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
