//! Message handling for the App.

use tracing::{debug, warn};

use super::{App, AppMessage, Screen};
use crate::error::SpheragError;
use crate::traits::HttpClient;

impl<C: HttpClient + 'static> App<C> {
    /// Apply a background result. Results for a view that has since been
    /// closed or replaced are dropped.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::LoginSucceeded { username } => {
                if self.screen != Screen::Login {
                    return;
                }
                debug!("login complete for {}", username);
                self.login.submitting = false;
                self.login.password.clear();
                self.notice = Some(format!("Signed in as {}", username));
                self.open_farms();
            }
            AppMessage::LoginFailed { message } => {
                self.login.submitting = false;
                self.login.password.clear();
                self.login.error = Some(message);
            }
            AppMessage::FarmsLoaded { generation, result } => {
                let Some(view) = self.farms.as_mut().filter(|v| v.generation == generation)
                else {
                    debug!("dropping stale farms result");
                    return;
                };
                match result {
                    Ok(_) => {
                        let len = view.visible().len();
                        view.clamp(len);
                    }
                    Err(e) => {
                        let message = e.user_message();
                        view.error = Some(message);
                        self.on_load_error(&e);
                    }
                }
            }
            AppMessage::DevicesLoaded { generation, result } => {
                let Some(view) = self
                    .devices
                    .as_mut()
                    .filter(|v| v.list.generation == generation)
                else {
                    debug!("dropping stale devices result");
                    return;
                };
                match result {
                    Ok(_) => {
                        let len = view.list.visible().len();
                        view.list.clamp(len);
                    }
                    Err(e) => {
                        view.list.error = Some(e.user_message());
                        self.on_load_error(&e);
                    }
                }
            }
            AppMessage::DeviceLoaded { generation, result } => {
                let Some(view) = self.detail.as_mut().filter(|v| v.generation == generation)
                else {
                    debug!("dropping stale device result");
                    return;
                };
                view.loading = false;
                view.task = None;
                match result {
                    Ok(Some(atlas)) => view.atlas = Some(atlas),
                    Ok(None) => view.error = Some("No data for this device.".to_string()),
                    Err(e) => {
                        view.error = Some(e.user_message());
                        self.on_load_error(&e);
                    }
                }
            }
        }
    }

    fn on_load_error(&mut self, err: &SpheragError) {
        if err.requires_reauth() {
            self.expire_session();
        } else {
            warn!("load failed: {} [{}]", err, err.error_code());
        }
    }
}
