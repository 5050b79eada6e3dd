//! Color theme constants for the spherag UI.

use ratatui::style::Color;

use crate::models::AtlasStatus;

/// Primary border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Text and focused borders
pub const COLOR_ACCENT: Color = Color::White;

/// Screen titles
pub const COLOR_HEADER: Color = Color::Rgb(0, 208, 130); // #00d082

/// Less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Text drawn on top of the input cursor block
pub const COLOR_CURSOR: Color = Color::Black;

/// Background of the selected list row
pub const COLOR_SELECTED_BG: Color = Color::Rgb(30, 40, 60);

pub const COLOR_ERROR: Color = Color::Red;

pub const COLOR_WARNING: Color = Color::Rgb(252, 185, 0); // #fcb900

/// Favourite star
pub const COLOR_FAVORITE: Color = Color::Yellow;

/// Device status dot color, from the status code's palette entry.
pub fn status_color(status: Option<AtlasStatus>) -> Color {
    match status {
        Some(status) => {
            let (r, g, b) = status.colour_rgb();
            Color::Rgb(r, g, b)
        }
        None => COLOR_DIM,
    }
}
