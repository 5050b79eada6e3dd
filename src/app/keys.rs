//! Key bindings per screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, ListView, LoginField, Screen};
use crate::traits::{HttpClient, PageSource};
use crate::widgets::InputBox;

/// What a list key asked for, applied by the screen that owns the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKey {
    Handled,
    ReachedEnd,
    Unhandled,
}

impl<C: HttpClient + 'static> App<C> {
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }
        self.notice = None;

        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Farms => self.handle_farms_key(key),
            Screen::Devices => self.handle_devices_key(key),
            Screen::DeviceDetail => self.handle_detail_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        if self.login.submitting {
            if key.code == KeyCode::Esc {
                self.quit();
            }
            return;
        }
        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.toggle_focus();
            }
            KeyCode::Enter => match self.login.focus {
                LoginField::Username => self.login.focus = LoginField::Password,
                LoginField::Password => self.submit_login(),
            },
            _ => {
                if edit_input(self.login.focused_mut(), key) {
                    self.login.error = None;
                }
            }
        }
    }

    fn handle_farms_key(&mut self, key: KeyEvent) {
        let Some(view) = self.farms.as_mut() else {
            return;
        };
        match list_key(view, key) {
            ListKey::ReachedEnd => return self.load_more_farms(),
            ListKey::Handled => return,
            ListKey::Unhandled => {}
        }
        match key.code {
            KeyCode::Enter => {
                if let Some(farm) = view.selected_item() {
                    self.open_devices(farm);
                }
            }
            KeyCode::Char('f') => self.toggle_selected_favorite(),
            KeyCode::Char('r') => self.load_farms(),
            KeyCode::Char('x') => self.logout(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            _ => {}
        }
    }

    fn handle_devices_key(&mut self, key: KeyEvent) {
        let Some(view) = self.devices.as_mut() else {
            return;
        };
        match list_key(&mut view.list, key) {
            ListKey::ReachedEnd => return self.load_more_devices(),
            ListKey::Handled => return,
            ListKey::Unhandled => {}
        }
        match key.code {
            KeyCode::Enter => {
                if let Some(atlas) = view.list.selected_item() {
                    self.open_detail(&atlas);
                }
            }
            KeyCode::Char('r') => self.load_devices(),
            KeyCode::Esc | KeyCode::Char('b') => self.back(),
            KeyCode::Char('q') => self.quit(),
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        let Some(view) = self.detail.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => view.scroll = view.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => view.scroll = view.scroll.saturating_add(1),
            KeyCode::PageUp => view.scroll = view.scroll.saturating_sub(10),
            KeyCode::PageDown => view.scroll = view.scroll.saturating_add(10),
            KeyCode::Home => view.scroll = 0,
            KeyCode::Char('r') => self.load_detail(),
            KeyCode::Esc | KeyCode::Char('b') => self.back(),
            KeyCode::Char('q') => self.quit(),
            _ => {}
        }
    }
}

/// Search and movement keys shared by both lists.
fn list_key<S: PageSource>(view: &mut ListView<S>, key: KeyEvent) -> ListKey {
    if view.searching {
        match key.code {
            KeyCode::Enter | KeyCode::Down => view.searching = false,
            KeyCode::Esc => {
                view.search.clear();
                view.searching = false;
                view.selected = 0;
            }
            _ => {
                if edit_input(&mut view.search, key) {
                    view.selected = 0;
                }
            }
        }
        return ListKey::Handled;
    }

    match key.code {
        KeyCode::Char('/') => {
            view.searching = true;
            ListKey::Handled
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view.move_up();
            ListKey::Handled
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let len = view.visible().len();
            if view.move_down(len) {
                ListKey::ReachedEnd
            } else {
                ListKey::Handled
            }
        }
        KeyCode::Home | KeyCode::Char('g') => {
            view.selected = 0;
            ListKey::Handled
        }
        KeyCode::End | KeyCode::Char('G') => {
            let len = view.visible().len();
            view.selected = len.saturating_sub(1);
            ListKey::ReachedEnd
        }
        _ => ListKey::Unhandled,
    }
}

/// Apply an editing key to `input`. Returns `true` if the content changed.
fn edit_input(input: &mut InputBox, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            input.insert_char(c);
            true
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.clear();
            true
        }
        KeyCode::Backspace => {
            input.backspace();
            true
        }
        KeyCode::Delete => {
            input.delete_char();
            true
        }
        KeyCode::Left => {
            input.move_cursor_left();
            false
        }
        KeyCode::Right => {
            input.move_cursor_right();
            false
        }
        KeyCode::Home => {
            input.move_cursor_home();
            false
        }
        KeyCode::End => {
            input.move_cursor_end();
            false
        }
        _ => false,
    }
}
