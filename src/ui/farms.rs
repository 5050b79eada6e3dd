use ratatui::prelude::*;

use super::list::render_list_view;
use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_FAVORITE};
use crate::api::SystemsSource;
use crate::app::ListView;
use crate::models::System;
use crate::traits::HttpClient;

pub(super) fn render_farms_screen<C: HttpClient + 'static>(
    frame: &mut Frame,
    area: Rect,
    view: &ListView<SystemsSource<C>>,
    tick: u64,
) {
    render_list_view(frame, area, view, "Farms", "farms", tick, farm_row);
}

fn farm_row(farm: &System) -> Line<'static> {
    let star = if farm.favorite {
        Span::styled("★ ", Style::default().fg(COLOR_FAVORITE))
    } else {
        Span::raw("  ")
    };
    let mut spans = vec![
        star,
        Span::styled(farm.name.clone(), Style::default().fg(COLOR_ACCENT)),
    ];
    let place = [farm.country.as_deref(), farm.timezone.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" · ");
    if !place.is_empty() {
        spans.push(Span::styled(
            format!("  {}", place),
            Style::default().fg(COLOR_DIM),
        ));
    }
    Line::from(spans)
}
