use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use tracing::{error, info};

use spherag::adapters::{FileCredentialsProvider, ReqwestHttpClient};
use spherag::app::App;
use spherag::cli::{self, parse_args, restore_session, run_cli_command, CliCommand, CliContext, USAGE};
use spherag::cli_output::print_error;
use spherag::config::ClientConfig;
use spherag::error::SpheragError;
use spherag::logging::{default_log_path, LogTarget, LoggingConfig};
use spherag::state::Store;
use spherag::terminal::{setup_panic_hook, TerminalManager};
use spherag::traits::HttpClient;
use spherag::ui;

/// Spinner and redraw cadence.
const TICK: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    match command {
        CliCommand::Version => {
            cli::print_version();
            Ok(())
        }
        CliCommand::Help => {
            cli::print_help();
            Ok(())
        }
        CliCommand::Tui => run_tui(),
        command => {
            color_eyre::install()?;
            LoggingConfig::from_env(LogTarget::Stderr).init()?;
            let runtime = tokio::runtime::Runtime::new()?;
            if let Err(e) = runtime.block_on(run_command(command)) {
                error!("{} [{}]", e, e.error_code());
                print_error(&e.user_message(), Some(e.recovery_hint()));
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

async fn run_command(command: CliCommand) -> Result<(), SpheragError> {
    let provider = FileCredentialsProvider::new()?;
    let ctx = CliContext::new(ReqwestHttpClient::new(), ClientConfig::from_env()?, provider);
    restore_session(&ctx.credentials, ctx.api.session()).await?;
    run_cli_command(&ctx, command).await
}

fn run_tui() -> Result<()> {
    color_eyre::install()?;
    LoggingConfig::from_env(LogTarget::File(default_log_path()?)).init()?;
    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let provider = FileCredentialsProvider::new()?;
        let store = Store::new();
        if let Err(e) = restore_session(&provider, store.session()).await {
            // Unreadable credentials fall back to the login form.
            error!("Could not restore session: {}", e);
        }

        let mut app = App::new(
            ReqwestHttpClient::new(),
            ClientConfig::from_env()?,
            store,
            Arc::new(provider),
        );
        app.start();
        info!("spherag {} started", cli::VERSION);

        let mut manager = TerminalManager::new()?;
        let result = run_app(manager.terminal(), &mut app).await;
        manager.restore();
        result
    })
}

async fn run_app<B: Backend, C: HttpClient + 'static>(
    terminal: &mut Terminal<B>,
    app: &mut App<C>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    // Taken so select! can borrow it alongside `app`.
    let mut message_rx = app.message_rx.take();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = tokio::time::sleep(TICK) => app.tick(),

            event = event_stream.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    error!("Terminal event error: {}", e);
                    app.quit();
                }
                None => app.quit(),
            },

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }

        if app.should_quit {
            info!("spherag exiting");
            return Ok(());
        }
    }
}
