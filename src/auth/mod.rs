//! Authentication: the live session and its on-disk copy.

pub mod credentials;
pub mod login;
pub mod session;

pub use credentials::{config_dir, Credentials, CredentialsManager};
pub use login::{LoginRequest, LoginResponse};
pub use session::Session;
