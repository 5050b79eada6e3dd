//! Screen transitions and the background loads each screen starts.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{App, AppMessage, DetailView, DevicesView, ListView, LoginForm, Screen};
use crate::api::{AtlasesSource, SystemsSource};
use crate::auth::Credentials;
use crate::models::{Atlas, System};
use crate::state::ListController;
use crate::traits::HttpClient;

impl<C: HttpClient + 'static> App<C> {
    /// Show the login form, keeping the typed username.
    pub fn open_login(&mut self, error: Option<String>) {
        let username = self.login.username.content().to_string();
        self.login = LoginForm::default();
        self.login.username.set_content(username);
        self.login.error = error;
        self.screen = Screen::Login;
        self.mark_dirty();
    }

    /// Validate the form and sign in in the background.
    pub fn submit_login(&mut self) {
        if self.login.submitting {
            return;
        }
        if !self.login.is_complete() {
            self.login.error = Some("Enter a username and a password.".to_string());
            return;
        }
        self.login.submitting = true;
        self.login.error = None;

        let api = self.api.clone();
        let credentials = Arc::clone(&self.credentials);
        let username = self.login.username.content().trim().to_string();
        let password = self.login.password.content().to_string();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match api.login(&username, &password).await {
                Ok(response) => {
                    let stored = Credentials::new(username.as_str(), response.token);
                    if let Err(e) = credentials.save(&stored).await {
                        warn!("Signed in but could not store credentials: {}", e);
                    }
                    AppMessage::LoginSucceeded { username }
                }
                Err(e) => AppMessage::LoginFailed {
                    message: e.user_message(),
                },
            };
            let _ = tx.send(msg);
        });
    }

    /// Show the farms list, loading page 1 the first time.
    pub fn open_farms(&mut self) {
        self.screen = Screen::Farms;
        self.mark_dirty();
        if self.farms.is_none() {
            let generation = self.next_generation();
            let controller = ListController::with_list(
                SystemsSource::new(self.api.clone()),
                self.store.systems_list(),
            );
            self.farms = Some(ListView::new(controller, generation));
            self.load_farms();
        }
    }

    /// Reload the farms from page 1.
    pub fn load_farms(&mut self) {
        let Some(view) = self.farms.as_mut() else {
            return;
        };
        view.error = None;
        let generation = view.generation;
        let tx = self.message_tx.clone();
        view.controller.spawn_load_initial(move |result| {
            let _ = tx.send(AppMessage::FarmsLoaded { generation, result });
        });
    }

    /// Ask for the next farms page unless one is loading or none are left.
    pub fn load_more_farms(&mut self) {
        if let Some(view) = self.farms.as_ref() {
            let generation = view.generation;
            let tx = self.message_tx.clone();
            let started = view.controller.spawn_load_more(move |result| {
                let _ = tx.send(AppMessage::FarmsLoaded { generation, result });
            });
            if started {
                debug!("farms: next page requested");
            }
        }
    }

    /// Open the device list of `farm`. Any previous device list is closed.
    pub fn open_devices(&mut self, farm: System) {
        self.close_devices();
        let generation = self.next_generation();
        let controller = ListController::new(AtlasesSource::new(self.api.clone(), farm.id));
        self.devices = Some(DevicesView {
            farm,
            list: ListView::new(controller, generation),
        });
        self.screen = Screen::Devices;
        self.mark_dirty();
        self.load_devices();
    }

    pub fn load_devices(&mut self) {
        let Some(view) = self.devices.as_mut() else {
            return;
        };
        view.list.error = None;
        let generation = view.list.generation;
        let tx = self.message_tx.clone();
        view.list.controller.spawn_load_initial(move |result| {
            let _ = tx.send(AppMessage::DevicesLoaded { generation, result });
        });
    }

    pub fn load_more_devices(&mut self) {
        if let Some(view) = self.devices.as_ref() {
            let generation = view.list.generation;
            let tx = self.message_tx.clone();
            view.list.controller.spawn_load_more(move |result| {
                let _ = tx.send(AppMessage::DevicesLoaded { generation, result });
            });
        }
    }

    /// Open the detail of a device picked from the list.
    pub fn open_detail(&mut self, atlas: &Atlas) {
        self.close_detail();
        let generation = self.next_generation();
        self.detail = Some(DetailView::new(
            atlas.imei.clone(),
            atlas.name.clone(),
            generation,
        ));
        self.screen = Screen::DeviceDetail;
        self.mark_dirty();
        self.load_detail();
    }

    pub fn load_detail(&mut self) {
        let api = self.api.clone();
        let tx = self.message_tx.clone();
        let Some(view) = self.detail.as_mut() else {
            return;
        };
        if let Some(task) = view.task.take() {
            task.abort();
        }
        view.loading = true;
        view.error = None;

        let imei = view.imei.clone();
        let generation = view.generation;
        let handle = tokio::spawn(async move {
            let result = api.get_atlas(&imei).await;
            let _ = tx.send(AppMessage::DeviceLoaded { generation, result });
        });
        view.task = Some(handle.abort_handle());
    }

    /// Go up one level: detail to devices, devices to farms.
    pub fn back(&mut self) {
        match self.screen {
            Screen::DeviceDetail => {
                self.close_detail();
                self.screen = Screen::Devices;
            }
            Screen::Devices => {
                self.close_devices();
                self.screen = Screen::Farms;
            }
            Screen::Farms | Screen::Login => return,
        }
        self.mark_dirty();
    }

    /// Flip the favourite flag of the selected farm. Local only.
    pub fn toggle_selected_favorite(&mut self) {
        let Some(farm) = self.farms.as_ref().and_then(ListView::selected_item) else {
            return;
        };
        if self.store.toggle_favorite(farm.id) {
            self.mark_dirty();
        }
    }

    /// Sign out: forget the token here and on disk, drop all loaded data.
    pub fn logout(&mut self) {
        if let Some(user) = self.store.session().username() {
            info!("Signing out {}", user);
        }
        self.end_session();
        self.open_login(None);
        self.login.username.clear();
    }

    /// The server rejected the token. Back to the login form.
    pub(crate) fn expire_session(&mut self) {
        warn!("Session rejected by the server; returning to login");
        self.end_session();
        self.open_login(Some("Your session expired. Sign in again.".to_string()));
    }

    fn end_session(&mut self) {
        self.close_all();
        self.farms = None;
        self.store.clear_credential();
        self.store.replace_all(Vec::new());

        let credentials = Arc::clone(&self.credentials);
        tokio::spawn(async move {
            if let Err(e) = credentials.clear().await {
                warn!("Could not remove stored credentials: {}", e);
            }
        });
    }

    pub(crate) fn close_all(&mut self) {
        self.close_detail();
        self.close_devices();
        if let Some(view) = self.farms.as_ref() {
            view.close();
        }
    }

    fn close_devices(&mut self) {
        if let Some(view) = self.devices.take() {
            view.list.close();
        }
    }

    fn close_detail(&mut self) {
        if let Some(mut view) = self.detail.take() {
            view.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::adapters::{InMemoryCredentials, MockHttpClient, MockResponse};
    use serde_json::json;

    fn farm(id: i64) -> System {
        serde_json::from_value(json!({"id": id, "name": format!("Farm {}", id)})).unwrap()
    }

    #[tokio::test]
    async fn test_start_without_session_shows_login() {
        let mut app = test_app(&MockHttpClient::new(), &InMemoryCredentials::new());
        app.start();
        assert_eq!(app.screen, Screen::Login);
        assert!(app.farms.is_none());
    }

    #[tokio::test]
    async fn test_back_closes_device_list() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::json(200, json!({"records": []})));
        let mut app = test_app(&http, &InMemoryCredentials::new());
        app.store.set_credential("ana", "tok");

        app.open_devices(farm(4));
        let controller = app.devices.as_ref().unwrap().list.controller.clone();
        app.back();

        assert_eq!(app.screen, Screen::Farms);
        assert!(app.devices.is_none());
        assert!(controller.is_closed());
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::json(200, json!({"records": []})));
        let creds = InMemoryCredentials::with_credentials(Credentials::new("ana", "tok"));
        let mut app = test_app(&http, &creds);
        app.store.set_credential("ana", "tok");
        app.store.replace_all(vec![farm(1)]);
        app.open_farms();

        app.logout();
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        assert_eq!(app.screen, Screen::Login);
        assert!(!app.store.session().is_authenticated());
        assert!(app.store.systems().is_empty());
        assert!(app.farms.is_none());
        assert!(creds.get_credentials().is_none());
    }

    #[tokio::test]
    async fn test_submit_login_requires_both_fields() {
        let http = MockHttpClient::new();
        let mut app = test_app(&http, &InMemoryCredentials::new());
        app.login.username.set_content("ana");
        app.submit_login();

        assert!(!app.login.submitting);
        assert!(app.login.error.is_some());
        assert_eq!(http.request_count(), 0);
    }
}
