//! Panic hook that puts the terminal back before the panic message prints.

use super::setup::emergency_restore;
use std::panic;

/// Install the hook. Call it before creating a
/// [`TerminalManager`](super::TerminalManager) and after `color_eyre::install`,
/// so the eyre report still prints.
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        emergency_restore();
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_panic_hook_does_not_panic() {
        setup_panic_hook();
        let _ = panic::take_hook();
    }
}
