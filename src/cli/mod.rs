//! One-shot CLI commands.
//!
//! `main` parses the arguments, handles `--version`, `--help` and `tui`
//! itself, and hands everything else to [`run_cli_command`]:
//!
//! ```ignore
//! use spherag::cli::{parse_args, run_cli_command, CliContext};
//!
//! let command = parse_args(std::env::args())?;
//! let ctx = CliContext::new(ReqwestHttpClient::new(), ClientConfig::from_env()?, provider);
//! restore_session(&ctx.credentials, ctx.store.session()).await?;
//! run_cli_command(&ctx, command).await?;
//! ```

pub mod args;
pub mod device;
pub mod lists;
pub mod session;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, USAGE};
pub use device::run_device;
pub use lists::{run_devices, run_farms};
pub use session::{restore_session, run_login, run_logout};
pub use version::{print_help, print_version, VERSION};

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::SpheragResult;
use crate::state::Store;
use crate::traits::{CredentialsProvider, HttpClient};

/// Everything a command needs: the API client, the store it shares a
/// session with, and where credentials are persisted.
pub struct CliContext<C: HttpClient, P: CredentialsProvider> {
    pub api: ApiClient<C>,
    pub store: Store,
    pub credentials: P,
}

impl<C: HttpClient, P: CredentialsProvider> CliContext<C, P> {
    pub fn new(http: C, config: ClientConfig, credentials: P) -> Self {
        let store = Store::new();
        let api = ApiClient::new(http, config, store.session().clone());
        Self {
            api,
            store,
            credentials,
        }
    }
}

/// Run a data or session command.
///
/// `Version`, `Help` and `Tui` have nothing to do here and return `Ok`.
pub async fn run_cli_command<C, P>(ctx: &CliContext<C, P>, command: CliCommand) -> SpheragResult<()>
where
    C: HttpClient + 'static,
    P: CredentialsProvider,
{
    match command {
        CliCommand::Login { username, password } => run_login(ctx, &username, password).await,
        CliCommand::Logout => run_logout(ctx).await,
        CliCommand::Farms { search, all } => run_farms(ctx, search.as_deref(), all).await,
        CliCommand::Devices {
            system_id,
            search,
            all,
        } => run_devices(ctx, system_id, search.as_deref(), all).await,
        CliCommand::Device { imei } => run_device(ctx, &imei).await,
        CliCommand::Version | CliCommand::Help | CliCommand::Tui => Ok(()),
    }
}
