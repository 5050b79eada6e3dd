//! Low-level enter/leave functions used by [`TerminalManager`](super::TerminalManager).

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Switch to the alternate screen and hide the cursor. Raw mode is enabled
/// separately by the caller.
pub fn enter_tui_mode<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(writer, EnterAlternateScreen, Hide)
}

/// Undo [`enter_tui_mode`] and raw mode. Errors are ignored so this is safe
/// to call more than once, including from a panic hook.
pub fn leave_tui_mode<W: Write>(writer: &mut W) {
    let _ = disable_raw_mode();
    let _ = execute!(writer, LeaveAlternateScreen, Show);
    let _ = writer.flush();
}

/// Restore the real terminal after a panic.
pub fn emergency_restore() {
    leave_tui_mode(&mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_and_leave_write_escape_codes() {
        let mut buffer = Vec::new();
        enter_tui_mode(&mut buffer).unwrap();
        assert!(!buffer.is_empty());

        let before = buffer.len();
        leave_tui_mode(&mut buffer);
        assert!(buffer.len() > before);
    }
}
