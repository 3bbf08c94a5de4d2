//! Drawing for the TUI pages

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::app::{App, Focus, FormField, Page, StatusKind};
use crate::domain::{Book, Collection};

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Menu + page
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(30)])
        .split(rows[0]);

    draw_menu(frame, app, columns[0]);

    match app.page() {
        Page::View => draw_view(frame, app, columns[1]),
        Page::Search => draw_search(frame, app, columns[1]),
        Page::Add => draw_add(frame, app, columns[1]),
        Page::Delete => draw_delete(frame, app, columns[1]),
    }

    draw_status_bar(frame, app, rows[1]);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn page_block(app: &App, title: &str) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(border_style(app.focus() == Focus::Page))
}

fn draw_menu(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = Page::ALL
        .iter()
        .map(|page| ListItem::new(page.label()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Library")
                .borders(Borders::ALL)
                .border_style(border_style(app.focus() == Focus::Menu)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Blue))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.page().index()));

    frame.render_stateful_widget(list, area, &mut state);
}

/// One book rendered as a three-line card
fn card(book: &Book) -> ListItem<'static> {
    let label = Style::default().add_modifier(Modifier::BOLD);
    ListItem::new(Text::from(vec![
        Line::from(Span::styled(
            book.title.clone(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  Author: ", label),
            Span::raw(book.authors.clone()),
        ]),
        Line::from(vec![
            Span::styled("  Language: ", label),
            Span::raw(format!("{}   ", book.language)),
            Span::styled("Location: ", label),
            Span::raw(book.location.clone()),
        ]),
    ]))
}

fn book_list(books: &Collection, block: Block<'static>) -> List<'static> {
    List::new(books.iter().map(card).collect::<Vec<_>>())
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
}

fn draw_empty(frame: &mut Frame, area: Rect, block: Block<'static>, message: &str) {
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Yellow))
        .block(block);
    frame.render_widget(paragraph, area);
}

fn draw_view(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!("Book Collection ({})", app.books().len());
    let block = page_block(app, &title);

    if app.books().is_empty() {
        draw_empty(frame, area, block, "Library is empty.");
        return;
    }

    let mut state = ListState::default();
    state.select(Some(app.view_index()));
    frame.render_stateful_widget(book_list(app.books(), block), area, &mut state);
}

fn draw_search(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Keyword
            Constraint::Length(3), // Author picker
            Constraint::Min(3),    // Results
        ])
        .split(area);

    let search = app.search();

    let keyword = Paragraph::new(format!("{}_", search.keyword)).block(page_block(app, "Title keyword"));
    frame.render_widget(keyword, chunks[0]);

    let author = Paragraph::new(format!("< {} >", app.selected_author()))
        .block(page_block(app, "Author (Left/Right)"));
    frame.render_widget(author, chunks[1]);

    let block = page_block(app, &format!("Results ({})", search.results.len()));
    if search.results.is_empty() {
        draw_empty(frame, chunks[2], block, "No matching book found.");
    } else {
        frame.render_widget(book_list(&search.results, block), chunks[2]);
    }
}

fn draw_add(frame: &mut Frame, app: &App, area: Rect) {
    let form = app.form();
    let editing = app.focus() == Focus::Page;

    let fields = [
        (FormField::Title, "Book Title", form.title.clone()),
        (FormField::Author, "Author(s)", form.author.clone()),
        (FormField::Language, "Language", format!("< {} >", app.selected_language())),
        (FormField::Location, "Storage Location (e.g. BOX PANINI)", form.location.clone()),
    ];

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    for (i, (field, label, value)) in fields.into_iter().enumerate() {
        let active = editing && form.field == field;
        let style = if active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        let text = if active && field != FormField::Language {
            format!("{}_", value)
        } else {
            value
        };

        let paragraph = Paragraph::new(text).block(
            Block::default()
                .title(label)
                .borders(Borders::ALL)
                .border_style(style),
        );
        frame.render_widget(paragraph, chunks[i]);
    }

    let hint = Paragraph::new("Tab/Up/Down: field   Left/Right: language   Enter: add book")
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    frame.render_widget(hint, chunks[4]);
}

fn draw_delete(frame: &mut Frame, app: &App, area: Rect) {
    let block = page_block(app, "Select a book to delete");

    if app.books().is_empty() {
        draw_empty(frame, area, block, "Library is empty.");
        return;
    }

    let width = area.width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = app
        .books()
        .iter()
        .map(|b| ListItem::new(truncate(&b.title, width)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(if app.pending_delete().is_some() { Color::Red } else { Color::White })
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.delete_index()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match app.status() {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Success => Color::Green,
                StatusKind::Info => Color::Cyan,
                StatusKind::Warning => Color::Yellow,
                StatusKind::Error => Color::Red,
            };
            (status.text.clone(), Style::default().fg(color))
        }
        None => {
            let keys = match app.focus() {
                Focus::Menu => "Up/Down: choose   Enter: open   q: quit",
                Focus::Page => "Esc: menu   Ctrl-C: quit",
            };
            (format!("{}   [{}]", keys, app.location()), Style::default().fg(Color::DarkGray))
        }
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Cuts `s` to at most `max` characters, ending with an ellipsis when cut
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
