//! Fixed-width text tables measured in terminal cells.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Cut `text` to at most `width` cells, ending in `…` when shortened.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

/// Truncate or right-pad `text` to exactly `width` cells.
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let pad = width.saturating_sub(cut.width());
    format!("{}{}", cut, " ".repeat(pad))
}

/// Columns with a maximum width each; rows are fitted on render.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<(String, usize)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = (S, usize)>) -> Self {
        Self {
            columns: columns.into_iter().map(|(h, w)| (h.into(), w)).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row. Missing cells render empty; extra cells are ignored.
    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header, separator and one line per row, trailing blanks trimmed.
    pub fn render(&self) -> Vec<String> {
        let header: Vec<&str> = self.columns.iter().map(|(h, _)| h.as_str()).collect();
        let mut lines = vec![self.line(&header)];
        let rule: usize = self.columns.iter().map(|(_, w)| w + 2).sum();
        lines.push("─".repeat(rule.saturating_sub(2)));
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            lines.push(self.line(&cells));
        }
        lines
    }

    pub fn print(&self) {
        for line in self.render() {
            println!("{}", line);
        }
    }

    fn line(&self, cells: &[&str]) -> String {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, (_, width))| fit(cells.get(i).copied().unwrap_or(""), *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }
}
