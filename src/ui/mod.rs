//! Rendering for the demo browser: a search bar on top, the explorer tree
//! pane on the left, the folder-contents listing on the right, and a key
//! hint line at the bottom. Pure presentation over [`App`]'s derived state.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, Pane, TreeRow};
use crate::explorer::{DocRef, OpenState};
use crate::listing::{Listing, SelectionMode};

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_search_bar(frame, chunks[0], app);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    draw_tree_pane(frame, panes[0], app);
    draw_listing_pane(frame, panes[1], app);
    draw_hints(frame, chunks[2], app);
}

fn draw_search_bar(frame: &mut Frame, area: Rect, app: &App) {
    let style = if app.is_searching() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search = Paragraph::new(app.search_term().to_string()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .border_style(style),
    );
    frame.render_widget(search, area);
}

fn draw_tree_pane(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.pane() == Pane::Tree;
    let items: Vec<ListItem> = app.rows().iter().map(render_tree_row).collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Documents ")
                .border_style(if is_focused {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                }),
        )
        .highlight_style(if is_focused {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        } else {
            Style::default().bg(Color::DarkGray)
        });

    let mut state = ListState::default();
    if !app.rows().is_empty() {
        state.select(Some(app.cursor()));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_tree_row(row: &TreeRow) -> ListItem<'static> {
    let mut spans = Vec::new();
    if row.depth > 0 {
        spans.push(Span::raw("  ".repeat(row.depth)));
    }
    if row.is_folder {
        let marker = if row.open.is_open() { "▼ " } else { "▶ " };
        let marker_style = if row.open == OpenState::OpenedBySearch {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(marker, marker_style));
        spans.push(Span::styled(
            row.name.clone(),
            Style::default().fg(Color::Cyan),
        ));
    } else {
        spans.push(Span::raw("  "));
        spans.push(Span::raw(row.name.clone()));
        spans.push(Span::styled(
            format!(" ({})", row.doc_type),
            Style::default().fg(Color::DarkGray),
        ));
    }
    ListItem::new(Line::from(spans))
}

fn draw_listing_pane(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.pane() == Pane::Listing;
    let title = format!(" {} ", app.listing_folder_name());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(if is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        });

    let Some(listing) = app.listing() else {
        frame.render_widget(block, area);
        return;
    };

    let items: Vec<ListItem> = listing
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| render_listing_item(listing, index, item))
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default();
    state.select(listing.focus_index());
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_listing_item(
    listing: &Listing<DocRef>,
    index: usize,
    item: &DocRef,
) -> ListItem<'static> {
    let mut spans = Vec::new();
    if listing.mode() != SelectionMode::None {
        spans.push(Span::raw(if listing.is_selected(index) {
            "[x] "
        } else {
            "[ ] "
        }));
    }
    let name_style = if listing.is_selected(index) {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };
    spans.push(Span::styled(item.name.clone(), name_style));
    spans.push(Span::styled(
        format!(" ({})", item.doc_type),
        Style::default().fg(Color::DarkGray),
    ));
    ListItem::new(Line::from(spans))
}

fn draw_hints(frame: &mut Frame, area: Rect, app: &App) {
    let hints = if app.is_searching() {
        "type to search | Enter/Esc done"
    } else {
        "q quit | / search | Tab pane | j/k move | Enter open | Space select | d delete"
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
