//! Shared layout for the farms and devices lists: header, optional search
//! box, scrolling rows and a status line.

use ratatui::{
    prelude::*,
    widgets::{List, ListItem, ListState, Paragraph},
};

use super::helpers::spinner;
use super::theme::{COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_SELECTED_BG, COLOR_WARNING};
use crate::app::ListView;
use crate::traits::PageSource;

/// Snapshot of the list flags shown in the header and status line.
struct ListStatus {
    loaded: usize,
    total: Option<u64>,
    exhausted: bool,
    loading_initial: bool,
    loading_more: bool,
}

pub(super) fn render_list_view<S, F>(
    frame: &mut Frame,
    area: Rect,
    view: &ListView<S>,
    title: &str,
    noun: &str,
    tick: u64,
    row: F,
) where
    S: PageSource,
    F: Fn(&S::Item) -> Line<'static>,
{
    let status = view.controller.inspect(|list| ListStatus {
        loaded: list.len(),
        total: list.total(),
        exhausted: list.is_exhausted(),
        loading_initial: list.is_loading_initial(),
        loading_more: list.is_loading_more(),
    });
    let items = view.visible();
    let show_search = view.searching || !view.query().is_empty();

    let [header, search, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(if show_search { 3 } else { 0 }),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header, title, items.len(), &status);
    if show_search {
        view.search
            .render_with_title(search, frame.buffer_mut(), "Search", view.searching);
    }

    if items.is_empty() {
        let message = if status.loading_initial {
            format!("{} Loading {}...", spinner(tick), noun)
        } else if !view.query().is_empty() {
            format!("No {} match \"{}\"", noun, view.query())
        } else if view.error.is_some() {
            String::new()
        } else {
            format!("No {} found.", noun)
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(COLOR_DIM))
                .alignment(Alignment::Center),
            body,
        );
    } else {
        let rows: Vec<ListItem> = items.iter().map(|item| ListItem::new(row(item))).collect();
        let list = List::new(rows)
            .highlight_style(Style::default().bg(COLOR_SELECTED_BG).add_modifier(Modifier::BOLD))
            .highlight_symbol("▸ ");
        let mut state = ListState::default().with_selected(Some(view.selected));
        frame.render_stateful_widget(list, body, &mut state);
    }

    frame.render_widget(Paragraph::new(status_line(view, &status, noun, tick)), footer);
}

fn render_header(frame: &mut Frame, area: Rect, title: &str, shown: usize, status: &ListStatus) {
    let count = match status.total {
        Some(total) if shown == status.loaded => format!("{} of {}", status.loaded, total),
        Some(total) => format!("{} shown, {} of {}", shown, status.loaded, total),
        None if shown == status.loaded => status.loaded.to_string(),
        None => format!("{} of {}", shown, status.loaded),
    };
    let [left, right] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(count.len() as u16 + 1)])
            .areas(area);
    frame.render_widget(
        Paragraph::new(Span::styled(
            title.to_string(),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        )),
        left,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(count, Style::default().fg(COLOR_DIM)))
            .alignment(Alignment::Right),
        right,
    );
}

fn status_line<S: PageSource>(
    view: &ListView<S>,
    status: &ListStatus,
    noun: &str,
    tick: u64,
) -> Line<'static> {
    if let Some(error) = &view.error {
        return Line::from(Span::styled(
            format!("✗ {}  (r to retry)", error),
            Style::default().fg(COLOR_ERROR),
        ));
    }
    if status.loading_more {
        return Line::from(Span::styled(
            format!("{} Loading more {}...", spinner(tick), noun),
            Style::default().fg(COLOR_WARNING),
        ));
    }
    if status.exhausted && status.loaded > 0 {
        return Line::from(Span::styled(
            format!("All {} loaded", noun),
            Style::default().fg(COLOR_DIM),
        ));
    }
    Line::default()
}
