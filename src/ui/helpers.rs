//! Helper functions and constants for UI rendering

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Spinner frames for loading indicators
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner frame for the given tick.
pub fn spinner(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize]
}

/// A `width` x `height` rect centred in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner(0), SPINNER_FRAMES[0]);
        assert_eq!(spinner(10), SPINNER_FRAMES[0]);
        assert_eq!(spinner(13), SPINNER_FRAMES[3]);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(40, 10, area);
        assert_eq!((rect.width, rect.height), (40, 10));
        assert_eq!((rect.x, rect.y), (20, 7));

        let small = centered_rect(100, 50, Rect::new(0, 0, 30, 8));
        assert_eq!((small.width, small.height), (30, 8));
    }
}
