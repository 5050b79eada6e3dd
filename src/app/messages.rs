//! AppMessage enum for async communication within the application.

use crate::error::SpheragResult;
use crate::models::Atlas;
use crate::state::LoadOutcome;

/// Results posted back to the event loop by background tasks.
///
/// Every data message carries the `generation` of the view that asked for
/// it; the handler drops it if that view is gone.
#[derive(Debug)]
pub enum AppMessage {
    /// Login accepted and the session set
    LoginSucceeded { username: String },
    /// Login rejected or failed; `message` is ready to display
    LoginFailed { message: String },
    /// A farms page finished loading
    FarmsLoaded {
        generation: u64,
        result: SpheragResult<LoadOutcome>,
    },
    /// A devices page finished loading
    DevicesLoaded {
        generation: u64,
        result: SpheragResult<LoadOutcome>,
    },
    /// The detail request finished
    DeviceLoaded {
        generation: u64,
        result: SpheragResult<Option<Atlas>>,
    },
}
