//! Per-screen state for the TUI.
//!
//! - [`Screen`]: which screen is displayed
//! - [`LoginForm`]: the two login fields
//! - [`ListView`]: a searchable, scrollable view over a [`ListController`]
//! - [`DetailView`]: one device and its connectors

use tokio::task::AbortHandle;

use crate::models::{Atlas, System};
use crate::state::ListController;
use crate::traits::PageSource;
use crate::widgets::InputBox;

/// Represents which screen is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Farms,
    Devices,
    DeviceDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: InputBox,
    pub password: InputBox,
    pub focus: LoginField,
    pub submitting: bool,
    pub error: Option<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: InputBox::new(),
            password: InputBox::masked(),
            focus: LoginField::Username,
            submitting: false,
            error: None,
        }
    }
}

impl LoginForm {
    pub fn focused_mut(&mut self) -> &mut InputBox {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    /// Both fields filled in.
    pub fn is_complete(&self) -> bool {
        !self.username.content().trim().is_empty() && !self.password.is_empty()
    }
}

/// A list screen. `generation` identifies this instance so results that
/// belong to an earlier visit of the same screen are dropped.
pub struct ListView<S: PageSource> {
    pub controller: ListController<S>,
    pub search: InputBox,
    pub searching: bool,
    pub selected: usize,
    pub error: Option<String>,
    pub generation: u64,
}

impl<S: PageSource> ListView<S> {
    pub fn new(controller: ListController<S>, generation: u64) -> Self {
        Self {
            controller,
            search: InputBox::new(),
            searching: false,
            selected: 0,
            error: None,
            generation,
        }
    }

    pub fn query(&self) -> &str {
        self.search.content()
    }

    /// Items matching the current search, in list order.
    pub fn visible(&self) -> Vec<S::Item> {
        self.controller.filtered(self.query())
    }

    pub fn selected_item(&self) -> Option<S::Item> {
        self.visible().into_iter().nth(self.selected)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move down within `len` rows. Returns `true` when the selection is on
    /// the last row afterwards.
    pub fn move_down(&mut self, len: usize) -> bool {
        if self.selected + 1 < len {
            self.selected += 1;
        }
        len > 0 && self.selected + 1 >= len
    }

    /// Keep the selection inside `len` rows.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn is_loading(&self) -> bool {
        self.controller
            .inspect(|list| list.is_loading_initial() || list.is_loading_more())
    }

    /// Abort any in-flight page request.
    pub fn close(&self) {
        self.controller.shutdown();
    }
}

/// The device list of one farm.
pub struct DevicesView<S: PageSource> {
    pub farm: System,
    pub list: ListView<S>,
}

#[derive(Debug)]
pub struct DetailView {
    pub imei: String,
    /// Device name as shown in the list, until the full record arrives.
    pub title: String,
    pub atlas: Option<Atlas>,
    pub loading: bool,
    pub error: Option<String>,
    pub scroll: u16,
    pub generation: u64,
    pub(crate) task: Option<AbortHandle>,
}

impl DetailView {
    pub fn new(imei: String, title: String, generation: u64) -> Self {
        Self {
            imei,
            title,
            atlas: None,
            loading: false,
            error: None,
            scroll: 0,
            generation,
            task: None,
        }
    }

    pub fn close(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_focus_and_completion() {
        let mut form = LoginForm::default();
        assert!(form.password.is_masked());
        form.focused_mut().set_content("ana");
        assert!(!form.is_complete());

        form.toggle_focus();
        assert_eq!(form.focus, LoginField::Password);
        form.focused_mut().set_content("pw");
        assert!(form.is_complete());
    }
}
