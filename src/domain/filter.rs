//! Search filters over a collection

use super::book::{Book, Collection};

/// Author value meaning "no author filter"
pub const ALL_AUTHORS: &str = "All";

/// Title keyword and author filter, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Case-insensitive substring of the title
    pub title: Option<String>,

    /// Exact authors value, or [`ALL_AUTHORS`]
    pub author: Option<String>,
}

impl SearchFilter {
    pub fn new(title: Option<&str>, author: Option<&str>) -> Self {
        Self {
            title: title.map(str::to_string),
            author: author.map(str::to_string),
        }
    }

    /// Returns the title keyword if it narrows the result
    fn title_keyword(&self) -> Option<String> {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    /// Returns the author if it narrows the result
    fn author_exact(&self) -> Option<&str> {
        self.author.as_deref().filter(|a| *a != ALL_AUTHORS)
    }

    /// Returns true if neither filter narrows the result
    pub fn is_unfiltered(&self) -> bool {
        self.title_keyword().is_none() && self.author_exact().is_none()
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.matches_keyword(book, self.title_keyword().as_deref())
    }

    fn matches_keyword(&self, book: &Book, keyword: Option<&str>) -> bool {
        if let Some(keyword) = keyword {
            if !book.title.to_lowercase().contains(keyword) {
                return false;
            }
        }

        match self.author_exact() {
            Some(author) => book.authors == author,
            None => true,
        }
    }

    /// Returns the matching books, preserving order
    pub fn apply(&self, books: &Collection) -> Collection {
        let keyword = self.title_keyword();
        books
            .iter()
            .filter(|b| self.matches_keyword(b, keyword.as_deref()))
            .cloned()
            .collect()
    }
}
