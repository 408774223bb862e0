//! Keyboard input handling.
//!
//! The endpoint and token editors are modal: while one is open it captures
//! every key, with Enter committing and Esc cancelling. Mode and entity keys
//! are inert while the endpoint is inactive or still loading, matching the
//! gating of the panels they drive.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{App, Composer, FocusArea};
use crate::event::Event;

impl App {
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key_event) = event {
            self.handle_key_event(key_event);
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if self.endpoint_editor.is_some() {
            self.handle_endpoint_edit_keys(key_event);
            return;
        }
        if self.token_editor.is_some() {
            self.handle_token_edit_keys(key_event);
            return;
        }

        let selectors_usable = self.endpoint_active && !self.endpoint_loading;

        let global_handled = match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => {
                self.quit();
                true
            }
            (KeyCode::Char('b'), KeyModifiers::CONTROL) => {
                self.sidebar_collapsed = !self.sidebar_collapsed;
                true
            }
            (KeyCode::Char('n'), KeyModifiers::CONTROL) => {
                self.new_chat();
                true
            }
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.begin_endpoint_edit();
                true
            }
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
                self.refresh_endpoint();
                true
            }
            (KeyCode::Char('y'), KeyModifiers::CONTROL) => {
                self.copy_ports();
                true
            }
            (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                self.begin_token_edit();
                true
            }
            (KeyCode::Tab, _) => {
                self.focus = self.focus.next();
                true
            }
            (KeyCode::F(2), _) => {
                if selectors_usable {
                    self.cycle_mode();
                }
                true
            }
            (KeyCode::F(3), _) => {
                if selectors_usable {
                    self.select_next_entity();
                }
                true
            }
            _ => false,
        };
        if global_handled {
            return;
        }

        match self.focus {
            FocusArea::Composer => self.handle_composer_keys(key_event),
            FocusArea::Sessions => self.handle_session_keys(key_event),
            FocusArea::Chat => self.handle_chat_keys(key_event),
        }
    }

    fn handle_endpoint_edit_keys(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Enter => self.commit_endpoint(),
            KeyCode::Esc => self.cancel_endpoint_edit(),
            _ => {
                if let Some(editor) = self.endpoint_editor.as_mut() {
                    apply_editor_key(editor, key_event);
                }
            }
        }
    }

    fn handle_token_edit_keys(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Enter => self.commit_token(),
            KeyCode::Esc => self.cancel_token_edit(),
            _ => {
                if let Some(editor) = self.token_editor.as_mut() {
                    apply_editor_key(editor, key_event);
                }
            }
        }
    }

    fn handle_composer_keys(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Enter => self.submit_prompt(),
            KeyCode::Char(ch) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.composer.insert_char(ch)
            }
            KeyCode::Backspace => self.composer.backspace(),
            KeyCode::Delete => self.composer.delete(),
            KeyCode::Left => self.composer.move_left(),
            KeyCode::Right => self.composer.move_right(),
            KeyCode::Home => self.composer.move_to_start(),
            KeyCode::End => self.composer.move_to_end(),
            KeyCode::Up => {
                self.composer.history_previous();
            }
            KeyCode::Down => {
                self.composer.history_next();
            }
            _ => {}
        }
    }

    fn handle_session_keys(&mut self, key_event: KeyEvent) {
        if !self.endpoint_active {
            return;
        }
        match key_event.code {
            KeyCode::Up => self.sessions.move_selection(-1),
            KeyCode::Down => self.sessions.move_selection(1),
            KeyCode::Enter => self.load_selected_session(),
            KeyCode::Char('d') => self.delete_selected_session(),
            _ => {}
        }
    }

    fn handle_chat_keys(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Up => self.chat.move_selection(-1),
            KeyCode::Down => self.chat.move_selection(1),
            _ => {}
        }
    }
}

/// Shared single-line editing keys for the modal draft editors.
fn apply_editor_key(editor: &mut Composer, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Char(ch) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            editor.insert_char(ch)
        }
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Home => editor.move_to_start(),
        KeyCode::End => editor.move_to_end(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[tokio::test]
    async fn enter_commits_and_esc_cancels_endpoint_edit() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = App::new(dir.path().to_path_buf()).expect("app");

        app.handle_event(Event::Key(ctrl('e')));
        assert!(app.endpoint_editor.is_some());
        app.handle_event(Event::Key(key(KeyCode::Esc)));
        assert!(app.endpoint_editor.is_none());

        app.handle_event(Event::Key(ctrl('e')));
        for _ in 0..app.config.endpoint.len() {
            app.handle_event(Event::Key(key(KeyCode::Backspace)));
        }
        for ch in "http://localhost:9999".chars() {
            app.handle_event(Event::Key(key(KeyCode::Char(ch))));
        }
        app.handle_event(Event::Key(key(KeyCode::Enter)));
        assert!(app.endpoint_editor.is_none());
        assert_eq!(app.config.endpoint, "http://localhost:9999");
    }

    #[tokio::test]
    async fn mode_key_is_inert_while_endpoint_inactive() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = App::new(dir.path().to_path_buf()).expect("app");
        assert!(!app.endpoint_active);
        let mode_before = app.mode();
        app.handle_event(Event::Key(key(KeyCode::F(2))));
        assert_eq!(app.mode(), mode_before);
    }

    #[tokio::test]
    async fn token_edit_captures_keys_until_commit() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = App::new(dir.path().to_path_buf()).expect("app");

        app.handle_event(Event::Key(ctrl('t')));
        assert!(app.token_editor.is_some());
        for ch in "secret".chars() {
            app.handle_event(Event::Key(key(KeyCode::Char(ch))));
        }
        app.handle_event(Event::Key(key(KeyCode::Enter)));
        assert!(app.token_editor.is_none());
        assert_eq!(app.config.auth_token.as_deref(), Some("secret"));

        app.handle_event(Event::Key(ctrl('t')));
        app.handle_event(Event::Key(key(KeyCode::Esc)));
        assert_eq!(app.config.auth_token.as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn ctrl_q_quits() {
        let dir = TempDir::new().expect("temp dir");
        let mut app = App::new(dir.path().to_path_buf()).expect("app");
        app.handle_event(Event::Key(ctrl('q')));
        assert!(!app.running);
    }
}
