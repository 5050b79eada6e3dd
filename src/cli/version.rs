//! Version and help output.

use super::args::USAGE;

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_line() -> String {
    format!("spherag {}", VERSION)
}

pub fn print_version() {
    println!("{}", version_line());
}

pub fn print_help() {
    println!("{}\n", version_line());
    println!("{}", USAGE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
        assert!(version_line().starts_with("spherag "));
    }
}
