//! UI rendering for the spherag browser
//!
//! One module per screen, plus a shared list layout:
//! - `login`: username/password form
//! - `farms` and `devices`: searchable paginated lists built on `list`
//! - `device_detail`: one device with its connector readouts
//!
//! Rendering reads [`App`] and never mutates it. The footer shows the
//! current notice or the key hints of the active screen.

mod device_detail;
mod devices;
mod farms;
mod helpers;
mod list;
mod login;
pub mod theme;

pub use helpers::{centered_rect, spinner, SPINNER_FRAMES};

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Screen};
use crate::traits::HttpClient;
use device_detail::render_device_detail_screen;
use devices::render_devices_screen;
use farms::render_farms_screen;
use login::render_login_screen;
use theme::{COLOR_DIM, COLOR_HEADER};

/// Render the UI based on current screen
pub fn render<C: HttpClient + 'static>(frame: &mut Frame, app: &App<C>) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(frame.area());

    match app.screen {
        Screen::Login => render_login_screen(frame, body, &app.login, app.tick_count),
        Screen::Farms => {
            if let Some(view) = &app.farms {
                render_farms_screen(frame, body, view, app.tick_count);
            }
        }
        Screen::Devices => {
            if let Some(view) = &app.devices {
                render_devices_screen(frame, body, view, app.tick_count);
            }
        }
        Screen::DeviceDetail => {
            if let Some(view) = &app.detail {
                render_device_detail_screen(frame, body, view, app.tick_count);
            }
        }
    }

    render_footer(frame, footer, app);
}

fn render_footer<C: HttpClient + 'static>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let line = match &app.notice {
        Some(notice) => Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(COLOR_HEADER),
        )),
        None => Line::from(Span::styled(
            key_hints(app),
            Style::default().fg(COLOR_DIM),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn key_hints<C: HttpClient + 'static>(app: &App<C>) -> &'static str {
    let searching = match app.screen {
        Screen::Farms => app.farms.as_ref().is_some_and(|v| v.searching),
        Screen::Devices => app.devices.as_ref().is_some_and(|v| v.list.searching),
        _ => false,
    };
    if searching {
        return "type to filter · enter done · esc clear";
    }
    match app.screen {
        Screen::Login => "tab switch field · enter sign in · esc quit",
        Screen::Farms => {
            "↑↓ move · enter devices · / search · f favourite · r reload · x sign out · q quit"
        }
        Screen::Devices => "↑↓ move · enter details · / search · r reload · esc back · q quit",
        Screen::DeviceDetail => "↑↓ scroll · r reload · esc back · q quit",
    }
}
