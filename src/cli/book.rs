//! Book CLI commands

use anyhow::{Context, Result};

use super::output::Output;
use crate::domain::{Book, Collection, SearchFilter, COLUMNS};
use crate::storage::{Config, Library, LibraryError};

pub fn list(output: &Output, library: &mut Library, table: bool) -> Result<()> {
    let books = library
        .list_all()
        .with_context(|| format!("Failed to load library: {}", library.location()))?;
    output.verbose_ctx("list", &format!("Loaded {} books", books.len()));

    if output.is_json() {
        output.data(&books);
    } else if table {
        print_table(output, &books);
    } else if books.is_empty() {
        println!("Library is empty.");
    } else {
        print_cards(output, &books);
    }

    Ok(())
}

pub fn search(
    output: &Output,
    library: &mut Library,
    title: Option<&str>,
    author: &str,
) -> Result<()> {
    let filter = SearchFilter::new(title, Some(author));
    if filter.is_unfiltered() {
        output.verbose_ctx("search", "No title keyword or author given, matching every book");
    }

    let found = library
        .search_with(&filter)
        .with_context(|| format!("Failed to load library: {}", library.location()))?;
    output.verbose_ctx("search", &format!("Found {} books", found.len()));

    if output.is_json() {
        output.data(&found);
    } else if found.is_empty() {
        println!("No matching book found.");
    } else {
        print_cards(output, &found);
        println!("Found {} book(s)", found.len());
    }

    Ok(())
}

pub fn authors(output: &Output, library: &mut Library) -> Result<()> {
    let authors = library
        .authors()
        .with_context(|| format!("Failed to load library: {}", library.location()))?;

    if output.is_json() {
        output.data(&authors);
    } else if authors.is_empty() {
        println!("No authors yet.");
    } else {
        for author in &authors {
            println!("{}", author);
        }
    }

    Ok(())
}

pub fn add(
    output: &Output,
    library: &mut Library,
    config: &Config,
    title: &str,
    author: &str,
    language: Option<&str>,
    location: &str,
) -> Result<()> {
    let language = match language {
        None => config.default_language(),
        Some(value) => config.language(value).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown language '{}'. Choose one of: {}",
                value,
                config.languages.join(", ")
            )
        })?,
    };

    let book = Book::new(title, author, language, location);

    match library.add(book.clone()) {
        Ok(()) => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "added": true,
                    "book": book,
                }));
            } else {
                output.success(&format!("'{}' was added to the library.", book.title));
            }
            Ok(())
        }
        Err(LibraryError::DuplicateTitle(title)) => {
            output.verbose_ctx("add", "Title already present, skipping");
            if output.is_json() {
                output.data(&serde_json::json!({
                    "added": false,
                    "reason": "duplicate",
                    "title": title,
                }));
            } else {
                output.notice(&format!("This book already exists: '{}'", title));
            }
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn delete(output: &Output, library: &mut Library, title: &str, confirmed: bool) -> Result<()> {
    let books = library
        .list_all()
        .with_context(|| format!("Failed to load library: {}", library.location()))?;

    if books.is_empty() {
        anyhow::bail!("Library is empty.");
    }

    if !confirmed {
        output.warning("Please confirm before deleting (pass --yes).");
        anyhow::bail!("Deletion of '{}' not confirmed", title);
    }

    let removed = library.delete(title)?;
    if removed > 1 {
        output.verbose_ctx("delete", &format!("Removed {} rows sharing the title", removed));
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "deleted": title,
            "removed": removed,
        }));
    } else {
        output.success(&format!("'{}' was deleted.", title));
    }

    Ok(())
}

fn print_cards(output: &Output, books: &Collection) {
    for book in books {
        println!("{}", book.title);
        println!("  Author:   {}", book.authors);
        println!("  Language: {}    Location: {}", book.language, book.location);
        output.blank();
    }
}

fn print_table(output: &Output, books: &Collection) {
    output.row(&COLUMNS);
    for book in books {
        output.row(&book.cells());
    }
}
