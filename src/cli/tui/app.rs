//! TUI application state and key handling

use std::str::FromStr;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::event::Events;
use super::views;
use super::Terminal;
use crate::domain::{Book, Collection, SearchFilter, ALL_AUTHORS};
use crate::storage::{Library, LibraryError, LibraryResult};

/// Pages listed in the sidebar menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    View,
    Search,
    Add,
    Delete,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::View, Page::Search, Page::Add, Page::Delete];

    pub fn label(self) -> &'static str {
        match self {
            Page::View => "View Books",
            Page::Search => "Search",
            Page::Add => "Add Book",
            Page::Delete => "Delete Book",
        }
    }

    pub fn index(self) -> usize {
        Page::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    fn prev(self) -> Self {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }
}

impl FromStr for Page {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "view" | "v" | "1" => Ok(Page::View),
            "search" | "s" | "2" => Ok(Page::Search),
            "add" | "a" | "3" => Ok(Page::Add),
            "delete" | "d" | "4" => Ok(Page::Delete),
            _ => Err(()),
        }
    }
}

/// Which panel receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Menu,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Info,
    Warning,
    Error,
}

/// Message shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

/// Field of the add form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Author,
    Language,
    Location,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Author,
            FormField::Author => FormField::Language,
            FormField::Language => FormField::Location,
            FormField::Location => FormField::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Location,
            FormField::Author => FormField::Title,
            FormField::Language => FormField::Author,
            FormField::Location => FormField::Language,
        }
    }
}

/// Add form contents
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    pub title: String,
    pub author: String,
    /// Index into the configured languages
    pub language: usize,
    pub location: String,
    pub field: FormField,
}

impl AddForm {
    fn text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Title => Some(&mut self.title),
            FormField::Author => Some(&mut self.author),
            FormField::Location => Some(&mut self.location),
            FormField::Language => None,
        }
    }
}

/// Search page state
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub keyword: String,
    /// 0 is "All", otherwise an index into the author list plus one
    pub author: usize,
    pub results: Collection,
}

/// Application state
pub struct App {
    library: Library,

    /// Languages offered by the add form
    languages: Vec<String>,

    page: Page,
    focus: Focus,

    /// Full collection, refreshed after every mutation
    books: Collection,

    /// Distinct authors for the search picker
    authors: Vec<String>,

    view_index: usize,
    search: SearchState,
    form: AddForm,
    delete_index: usize,

    /// Title awaiting a y/n confirmation
    pending_delete: Option<String>,

    status: Option<Status>,
    should_quit: bool,
}

impl App {
    /// Create a new application, loading the library once
    pub fn new(library: Library, languages: Vec<String>, page: Page) -> LibraryResult<Self> {
        let mut app = Self {
            library,
            languages,
            page,
            focus: Focus::Menu,
            books: Collection::new(),
            authors: Vec::new(),
            view_index: 0,
            search: SearchState::default(),
            form: AddForm::default(),
            delete_index: 0,
            pending_delete: None,
            status: None,
            should_quit: false,
        };

        app.refresh()?;
        Ok(app)
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: &Events) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| views::draw(frame, self))?;

            if let Some(key) = events.next_key()? {
                self.handle_key(key);
            }
        }

        Ok(())
    }

    /// Reloads everything shown on screen from the library
    fn refresh(&mut self) -> LibraryResult<()> {
        let selected = self.selected_author().to_string();
        self.books = self.library.list_all()?;
        self.authors = self.library.authors()?;

        // Keep the picked author by name; fall back to "All" once it is gone
        self.search.author = self
            .authors
            .iter()
            .position(|a| *a == selected)
            .map_or(0, |i| i + 1);
        let filter = self.search_filter();
        self.search.results = self.library.search_with(&filter)?;

        let last = self.books.len().saturating_sub(1);
        self.view_index = self.view_index.min(last);
        self.delete_index = self.delete_index.min(last);
        Ok(())
    }

    fn refresh_or_report(&mut self) {
        if let Err(e) = self.refresh() {
            self.report(e);
        }
    }

    fn search_filter(&self) -> SearchFilter {
        SearchFilter::new(Some(self.search.keyword.as_str()), Some(self.selected_author()))
    }

    fn update_search(&mut self) {
        let filter = self.search_filter();
        match self.library.search_with(&filter) {
            Ok(results) => self.search.results = results,
            Err(e) => self.report(e),
        }
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(Status {
            kind,
            text: text.into(),
        });
    }

    /// Shows a library error with a severity matching its kind
    fn report(&mut self, err: LibraryError) {
        let kind = match err {
            _ if !err.is_recoverable() => StatusKind::Error,
            LibraryError::EmptyTitle => StatusKind::Warning,
            _ => StatusKind::Info,
        };
        self.set_status(kind, err.to_string());
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if let Some(title) = self.pending_delete.take() {
            self.handle_confirm_key(key, title);
            return;
        }

        match self.focus {
            Focus::Menu => self.handle_menu_key(key),
            Focus::Page if key.code == KeyCode::Esc => self.focus = Focus::Menu,
            Focus::Page => match self.page {
                Page::View => self.handle_view_key(key),
                Page::Search => self.handle_search_key(key),
                Page::Add => self.handle_add_key(key),
                Page::Delete => self.handle_delete_key(key),
            },
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.page = self.page.next(),
            KeyCode::Up | KeyCode::Char('k') => self.page = self.page.prev(),
            KeyCode::Char(c @ '1'..='4') => {
                if let Ok(page) = c.to_string().parse() {
                    self.page = page;
                }
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Tab => {
                self.focus = Focus::Page;
                self.status = None;
            }
            _ => {}
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if self.view_index + 1 < self.books.len() {
                    self.view_index += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.view_index = self.view_index.saturating_sub(1),
            KeyCode::Char('r') => self.refresh_or_report(),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let options = self.authors.len() + 1;
        match key.code {
            KeyCode::Char(c) => self.search.keyword.push(c),
            KeyCode::Backspace => {
                self.search.keyword.pop();
            }
            KeyCode::Right => self.search.author = (self.search.author + 1) % options,
            KeyCode::Left => self.search.author = (self.search.author + options - 1) % options,
            _ => return,
        }
        self.update_search();
    }

    fn handle_add_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.form.field = self.form.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.form.field = self.form.field.prev(),
            KeyCode::Enter => self.submit_add(),
            KeyCode::Left | KeyCode::Right if self.form.field == FormField::Language => {
                let count = self.languages.len().max(1);
                self.form.language = if key.code == KeyCode::Right {
                    (self.form.language + 1) % count
                } else {
                    (self.form.language + count - 1) % count
                };
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.form.text_mut() {
                    text.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(text) = self.form.text_mut() {
                    text.pop();
                }
            }
            _ => {}
        }
    }

    fn submit_add(&mut self) {
        let book = Book::new(
            self.form.title.clone(),
            self.form.author.clone(),
            self.selected_language(),
            self.form.location.clone(),
        );

        match self.library.add(book) {
            Ok(()) => {
                let text = format!("'{}' was added to the library.", self.form.title);
                self.form = AddForm {
                    language: self.form.language,
                    ..AddForm::default()
                };
                self.refresh_or_report();
                self.set_status(StatusKind::Success, text);
            }
            Err(e) => self.report(e),
        }
    }

    fn handle_delete_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if self.delete_index + 1 < self.books.len() {
                    self.delete_index += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.delete_index = self.delete_index.saturating_sub(1)
            }
            KeyCode::Enter => match self.books.as_slice().get(self.delete_index) {
                Some(book) => {
                    let title = book.title.clone();
                    self.set_status(
                        StatusKind::Warning,
                        format!("Delete '{}'? Press y to confirm, any other key to cancel.", title),
                    );
                    self.pending_delete = Some(title);
                }
                None => self.set_status(StatusKind::Info, "Library is empty."),
            },
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, title: String) {
        if !matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            self.set_status(StatusKind::Info, "Deletion cancelled.");
            return;
        }

        match self.library.delete(&title) {
            Ok(_) => {
                self.refresh_or_report();
                self.set_status(StatusKind::Success, format!("'{}' was deleted.", title));
            }
            Err(e) => self.report(e),
        }
    }

    // Accessors for views

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn books(&self) -> &Collection {
        &self.books
    }

    pub fn view_index(&self) -> usize {
        self.view_index
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn selected_author(&self) -> &str {
        match self.search.author {
            0 => ALL_AUTHORS,
            n => self.authors.get(n - 1).map(String::as_str).unwrap_or(ALL_AUTHORS),
        }
    }

    pub fn form(&self) -> &AddForm {
        &self.form
    }

    pub fn selected_language(&self) -> &str {
        self.languages
            .get(self.form.language)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn delete_index(&self) -> usize {
        self.delete_index
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn location(&self) -> String {
        self.library.location()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
