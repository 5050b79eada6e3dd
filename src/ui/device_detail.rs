use chrono::{DateTime, Utc};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::helpers::spinner;
use super::theme::{status_color, COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER};
use crate::app::DetailView;
use crate::cli::device::{connector_lines, detail_fields};
use crate::cli_output::field_line;
use crate::models::Atlas;

pub(super) fn render_device_detail_screen(
    frame: &mut Frame,
    area: Rect,
    view: &DetailView,
    tick: u64,
) {
    let title = if view.title.is_empty() {
        view.imei.clone()
    } else {
        format!("{} · {}", view.title, view.imei)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ));

    let mut lines = Vec::new();
    if view.loading {
        lines.push(Line::from(Span::styled(
            format!("{} Loading device...", spinner(tick)),
            Style::default().fg(COLOR_DIM),
        )));
    }
    if let Some(error) = &view.error {
        lines.push(Line::from(Span::styled(
            format!("✗ {}  (r to retry)", error),
            Style::default().fg(COLOR_ERROR),
        )));
    }
    if let Some(atlas) = &view.atlas {
        lines.extend(device_lines(atlas, Utc::now()));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((view.scroll, 0)),
        area,
    );
}

/// Summary fields, then each non-empty connector group.
fn device_lines(atlas: &Atlas, now: DateTime<Utc>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (label, value) in detail_fields(atlas, now) {
        let style = if label == "Status" {
            Style::default().fg(status_color(atlas.atlas_status))
        } else {
            Style::default().fg(COLOR_ACCENT)
        };
        lines.push(Line::from(Span::styled(field_line(label, &value), style)));
    }

    for (group, connectors) in atlas.connectors.groups() {
        if connectors.is_empty() {
            continue;
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("{} ({})", group, connectors.len()),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        )));
        for connector in connectors {
            let mut connector_text = connector_lines(connector).into_iter();
            if let Some(heading) = connector_text.next() {
                lines.push(Line::from(Span::styled(
                    heading,
                    Style::default().add_modifier(Modifier::BOLD),
                )));
            }
            lines.extend(
                connector_text.map(|text| Line::from(Span::styled(text, Style::default().fg(COLOR_DIM)))),
            );
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_device_lines_skip_empty_groups() {
        let atlas: Atlas = serde_json::from_value(json!({
            "imei": "861",
            "name": "Well",
        }))
        .unwrap();
        let lines = device_lines(&atlas, Utc::now());
        assert_eq!(lines.len(), detail_fields(&atlas, Utc::now()).len());
    }
}
