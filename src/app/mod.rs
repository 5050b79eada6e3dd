//! Application state and logic for the TUI.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`Screen`] - Which screen is currently displayed
//! - [`AppMessage`] - Results sent back by background loads
//!
//! The event loop in `main` feeds key events to [`App::handle_key`] and
//! channel messages to [`App::handle_message`], and redraws when
//! `needs_redraw` is set. Network work is always spawned; handlers never
//! await.

mod handlers;
mod keys;
mod messages;
mod navigation;
mod types;

pub use messages::AppMessage;
pub use types::{DetailView, DevicesView, ListView, LoginField, LoginForm, Screen};

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::{ApiClient, AtlasesSource, SystemsSource};
use crate::config::ClientConfig;
use crate::state::Store;
use crate::traits::{CredentialsProvider, HttpClient};

/// Main application state
pub struct App<C: HttpClient + 'static> {
    /// Current screen being displayed
    pub screen: Screen,
    /// Session and farms list shared with the API client
    pub store: Store,
    pub api: ApiClient<C>,
    credentials: Arc<dyn CredentialsProvider>,
    pub login: LoginForm,
    pub farms: Option<ListView<SystemsSource<C>>>,
    pub devices: Option<DevicesView<AtlasesSource<C>>>,
    pub detail: Option<DetailView>,
    /// One-line status shown in the footer until the next key press
    pub notice: Option<String>,
    pub should_quit: bool,
    /// Set whenever visible state changed
    pub needs_redraw: bool,
    /// Tick counter for the loading spinner
    pub tick_count: u64,
    /// Receiver for async messages; taken by the event loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for async messages (clone this to pass to async tasks)
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    generation: u64,
}

impl<C: HttpClient + 'static> App<C> {
    /// Build the app around `store`. The API client reads its token from the
    /// store's session.
    pub fn new(
        http: C,
        config: ClientConfig,
        store: Store,
        credentials: Arc<dyn CredentialsProvider>,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let api = ApiClient::new(http, config, store.session().clone());
        Self {
            screen: Screen::Login,
            store,
            api,
            credentials,
            login: LoginForm::default(),
            farms: None,
            devices: None,
            detail: None,
            notice: None,
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            message_rx: Some(message_rx),
            message_tx,
            generation: 0,
        }
    }

    /// Show the farms if a session was restored, the login form otherwise.
    pub fn start(&mut self) {
        if self.store.session().is_authenticated() {
            self.open_farms();
        } else {
            self.open_login(None);
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.close_all();
        self.should_quit = true;
    }

    /// Advance the spinner. Only redraws while something is loading.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.is_loading() {
            self.mark_dirty();
        }
    }

    /// Whether the current screen is waiting on the network.
    pub fn is_loading(&self) -> bool {
        match self.screen {
            Screen::Login => self.login.submitting,
            Screen::Farms => self.farms.as_ref().is_some_and(ListView::is_loading),
            Screen::Devices => self
                .devices
                .as_ref()
                .is_some_and(|view| view.list.is_loading()),
            Screen::DeviceDetail => self.detail.as_ref().is_some_and(|view| view.loading),
        }
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}
