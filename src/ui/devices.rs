use ratatui::prelude::*;

use super::list::render_list_view;
use super::theme::{status_color, COLOR_ACCENT, COLOR_DIM};
use crate::api::AtlasesSource;
use crate::app::DevicesView;
use crate::cli_output::fit;
use crate::models::Atlas;
use crate::traits::HttpClient;

const NAME_WIDTH: usize = 24;
const IMEI_WIDTH: usize = 17;
const BATTERY_WIDTH: usize = 12;

pub(super) fn render_devices_screen<C: HttpClient + 'static>(
    frame: &mut Frame,
    area: Rect,
    view: &DevicesView<AtlasesSource<C>>,
    tick: u64,
) {
    let title = format!("Devices · {}", view.farm.name);
    render_list_view(frame, area, &view.list, &title, "devices", tick, device_row);
}

fn device_row(atlas: &Atlas) -> Line<'static> {
    Line::from(vec![
        Span::styled("● ", Style::default().fg(status_color(atlas.atlas_status))),
        Span::styled(fit(&atlas.name, NAME_WIDTH), Style::default().fg(COLOR_ACCENT)),
        Span::raw(" "),
        Span::styled(fit(&atlas.imei, IMEI_WIDTH), Style::default().fg(COLOR_DIM)),
        Span::raw(" "),
        Span::raw(fit(&atlas.battery_display(), BATTERY_WIDTH)),
        Span::raw(" "),
        Span::styled(
            format!("▂▄▆ {}", atlas.signal_display()),
            Style::default().fg(COLOR_DIM),
        ),
    ])
}
