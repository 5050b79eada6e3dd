//! Simple line-based CLI output utilities.

/// Line width for separators.
pub const LINE_WIDTH: usize = 60;

/// Column the value of a [`field_line`] starts at.
const LABEL_WIDTH: usize = 14;

/// Print the main header.
///
/// ```text
/// FARMS
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_header(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "═".repeat(LINE_WIDTH));
}

/// Print a section title.
///
/// ```text
/// INPUTS
/// ────────────────────────────────────────────────────────────
/// ```
pub fn print_section(title: &str) {
    println!();
    println!("{}", title.to_uppercase());
    println!("{}", "─".repeat(LINE_WIDTH));
}

/// `  Battery:      80%`
pub fn field_line(label: &str, value: &str) -> String {
    let label = format!("{}:", label);
    format!("  {:<width$}{}", label, value, width = LABEL_WIDTH)
}

pub fn print_field(label: &str, value: &str) {
    println!("{}", field_line(label, value));
}

/// Print a status line.
///
/// ```text
///   ✓ Signed in as ana
/// ```
pub fn print_line(icon: &str, message: &str) {
    println!("  {} {}", icon, message);
}

/// Print an error and an optional hint to stderr.
pub fn print_error(message: &str, hint: Option<&str>) {
    eprintln!("{} {}", icons::FAILURE, message);
    if let Some(hint) = hint {
        eprintln!("  {}", hint);
    }
}

/// Print the closing separator with a summary.
pub fn print_footer(summary: &str) {
    println!("{}", "═".repeat(LINE_WIDTH));
    println!("{}", summary);
}

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const FAVORITE: &str = "★";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_line_aligns_values() {
        assert_eq!(field_line("IMEI", "8600"), "  IMEI:         8600");
        assert_eq!(field_line("Battery", "80%"), "  Battery:      80%");
    }

    #[test]
    fn test_field_line_long_label_still_separates() {
        let line = field_line("A very long label", "x");
        assert!(line.ends_with(":x"));
    }
}
