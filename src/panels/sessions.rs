//! Session list state for the sidebar.

use crate::api::models::SessionSummary;

/// Selectable list of session summaries for the current entity.
#[derive(Default)]
pub struct SessionList {
    sessions: Vec<SessionSummary>,
    selected: usize,
}

impl SessionList {
    pub fn sessions(&self) -> &[SessionSummary] {
        &self.sessions
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn replace(&mut self, sessions: Vec<SessionSummary>) {
        self.sessions = sessions;
        self.selected = 0;
    }

    pub fn clear(&mut self) {
        self.sessions.clear();
        self.selected = 0;
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_session(&self) -> Option<&SessionSummary> {
        self.sessions.get(self.selected)
    }

    /// Removes a session by id, keeping the cursor on a valid row.
    pub fn remove(&mut self, session_id: &str) {
        self.sessions
            .retain(|session| session.session_id != session_id);
        if !self.sessions.is_empty() {
            self.selected = self.selected.min(self.sessions.len() - 1);
        } else {
            self.selected = 0;
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.sessions.is_empty() {
            return;
        }
        let len = self.sessions.len() as isize;
        let mut next = self.selected as isize + delta;
        if next < 0 {
            next = 0;
        }
        if next >= len {
            next = len - 1;
        }
        self.selected = next as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str) -> SessionSummary {
        SessionSummary {
            session_id: id.to_string(),
            title: None,
            created_at: None,
        }
    }

    #[test]
    fn remove_keeps_cursor_valid() {
        let mut list = SessionList::default();
        list.replace(vec![summary("a"), summary("b"), summary("c")]);
        list.move_selection(2);
        list.remove("c");
        assert_eq!(list.selected_index(), 1);
        list.remove("a");
        list.remove("b");
        assert!(list.is_empty());
        assert_eq!(list.selected_index(), 0);
    }

    #[test]
    fn display_title_falls_back_to_id() {
        let session = summary("sess-1");
        assert_eq!(session.display_title(), "sess-1");
    }
}
