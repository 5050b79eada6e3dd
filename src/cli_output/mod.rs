//! Plain-text output for the one-shot CLI commands.
//!
//! Headers and aligned fields live in `boxes`, column tables in `table`.

mod boxes;
mod table;

pub use boxes::*;
pub use table::{fit, truncate, Table};
