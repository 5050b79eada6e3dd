use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::ui::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_CURSOR};

/// Single-line text input with a cursor and horizontal scrolling.
///
/// The cursor is a character index, so multi-byte input (`Muñoz`, `Água`)
/// edits correctly. A masked box renders every character as `•`.
#[derive(Debug, Clone, Default)]
pub struct InputBox {
    content: String,
    /// Character index of the cursor
    cursor: usize,
    masked: bool,
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// A box whose content is hidden, for passwords.
    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(i, _)| i)
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character under the cursor (Delete key)
    pub fn delete_char(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character before the cursor (Backspace key)
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Replace the content and put the cursor at the end.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Characters as displayed, masked if needed.
    fn display_chars(&self) -> Vec<char> {
        if self.masked {
            vec!['•'; self.char_count()]
        } else {
            self.content.chars().collect()
        }
    }

    /// First character index shown so the cursor fits in `width` cells.
    fn scroll_offset(&self, chars: &[char], width: usize) -> usize {
        // Cells from the cursor back to `offset`, with one cell for the cursor itself.
        let mut used = 1;
        let mut offset = self.cursor.min(chars.len());
        while offset > 0 {
            let w = chars[offset - 1].width().unwrap_or(0);
            if used + w > width {
                break;
            }
            used += w;
            offset -= 1;
        }
        offset
    }

    pub fn render_with_title(&self, area: Rect, buf: &mut Buffer, title: &str, focused: bool) {
        let border = if focused { COLOR_ACCENT } else { COLOR_BORDER };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let width = inner.width as usize;
        let chars = self.display_chars();
        let offset = self.scroll_offset(&chars, width);

        let mut x = 0usize;
        for (i, c) in chars.iter().enumerate().skip(offset) {
            let w = c.width().unwrap_or(0);
            if x + w > width {
                break;
            }
            let style = if focused && i == self.cursor {
                Style::default().fg(COLOR_CURSOR).bg(COLOR_ACCENT)
            } else {
                Style::default().fg(COLOR_ACCENT)
            };
            buf.set_string(inner.x + x as u16, inner.y, c.to_string(), style);
            x += w;
        }

        if focused && self.cursor >= chars.len() && x < width {
            buf.set_string(
                inner.x + x as u16,
                inner.y,
                " ",
                Style::default().bg(COLOR_ACCENT),
            );
        }
    }
}

/// Widget adapter for [`InputBox`].
pub struct InputBoxWidget<'a> {
    input_box: &'a InputBox,
    title: &'a str,
    focused: bool,
}

impl<'a> InputBoxWidget<'a> {
    pub fn new(input_box: &'a InputBox, title: &'a str, focused: bool) -> Self {
        Self {
            input_box,
            title,
            focused,
        }
    }
}

impl Widget for InputBoxWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.input_box
            .render_with_title(area, buf, self.title, self.focused);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut input = InputBox::new();
        input.insert_char('H');
        input.insert_char('i');
        assert_eq!(input.content(), "Hi");
        assert_eq!(input.cursor_position(), 2);

        input.backspace();
        assert_eq!(input.content(), "H");
        assert_eq!(input.cursor_position(), 1);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = InputBox::new();
        input.set_content("Muoz");
        input.move_cursor_left();
        input.move_cursor_left();
        input.insert_char('ñ');
        assert_eq!(input.content(), "Muñoz");

        input.move_cursor_left();
        input.delete_char();
        assert_eq!(input.content(), "Muoz");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = InputBox::new();
        input.insert_char('X');
        input.move_cursor_home();
        input.move_cursor_left();
        assert_eq!(input.cursor_position(), 0);

        input.move_cursor_end();
        input.move_cursor_right();
        assert_eq!(input.cursor_position(), 1);

        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.cursor_position(), 0);
    }

    #[test]
    fn test_masked_render_hides_content() {
        let mut input = InputBox::masked();
        input.set_content("secret");
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        input.render_with_title(area, &mut buf, "Password", false);

        let line = row(&buf, 1);
        assert!(line.contains("••••••"));
        assert!(!line.contains("secret"));
    }

    #[test]
    fn test_long_content_scrolls_to_cursor() {
        let mut input = InputBox::new();
        input.set_content("abcdefghijklmnopqrstuvwxyz");
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        input.render_with_title(area, &mut buf, "", true);

        let line = row(&buf, 1);
        assert!(line.contains("rstuvwxyz"));
        assert!(!line.contains('q'));
    }
}
