//! Conversation state for the chat area.

use crate::api::models::{ChatMessage, Role};

/// A single displayable entry in the conversation history.
///
/// User input, assistant replies and system notices are folded into one type
/// so the renderer only has to deal with a flat list.
#[derive(Debug, Clone)]
pub enum ChatEntry {
    /// A prompt typed by the user.
    UserPrompt { prompt: String },
    /// A reply from the selected agent or team.
    Reply { content: String },
    /// System-generated reference information.
    Info { title: String, detail: String },
    /// System-generated error message.
    Error { title: String, detail: String },
}

impl ChatEntry {
    /// Unified label for list rendering.
    pub fn title(&self) -> &str {
        match self {
            ChatEntry::UserPrompt { prompt } => prompt,
            ChatEntry::Reply { content } => content,
            ChatEntry::Info { title, .. } => title,
            ChatEntry::Error { title, .. } => title,
        }
    }

    /// True for entries that belong to the actual exchange, as opposed to
    /// system notices. "New Chat" availability is gated on these.
    pub fn is_message(&self) -> bool {
        matches!(self, ChatEntry::UserPrompt { .. } | ChatEntry::Reply { .. })
    }
}

/// The chat panel: ordered entries plus a selection cursor and a flag for an
/// in-flight run.
#[derive(Default)]
pub struct ChatPanel {
    entries: Vec<ChatEntry>,
    selected: usize,
    awaiting_reply: bool,
}

impl ChatPanel {
    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    /// Count of user/assistant messages, ignoring system notices.
    pub fn message_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_message()).count()
    }

    pub fn awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    pub fn set_awaiting_reply(&mut self, awaiting: bool) {
        self.awaiting_reply = awaiting;
    }

    pub fn push(&mut self, entry: ChatEntry) {
        self.entries.push(entry);
        self.selected = self.entries.len().saturating_sub(1);
    }

    pub fn push_user_prompt(&mut self, prompt: impl Into<String>) {
        self.push(ChatEntry::UserPrompt {
            prompt: prompt.into(),
        });
    }

    pub fn push_reply(&mut self, content: impl Into<String>) {
        self.push(ChatEntry::Reply {
            content: content.into(),
        });
    }

    pub fn push_info(&mut self, title: impl Into<String>, detail: impl Into<String>) {
        self.push(ChatEntry::Info {
            title: title.into(),
            detail: detail.into(),
        });
    }

    pub fn push_error(&mut self, title: impl Into<String>, detail: impl Into<String>) {
        self.push(ChatEntry::Error {
            title: title.into(),
            detail: detail.into(),
        });
    }

    /// Replaces the conversation with a loaded transcript.
    pub fn load_transcript(&mut self, messages: &[ChatMessage]) {
        self.entries = messages
            .iter()
            .filter_map(|message| match message.role {
                Role::User => Some(ChatEntry::UserPrompt {
                    prompt: message.content.clone(),
                }),
                Role::Assistant => Some(ChatEntry::Reply {
                    content: message.content.clone(),
                }),
                Role::System => None,
            })
            .collect();
        self.selected = self.entries.len().saturating_sub(1);
        self.awaiting_reply = false;
    }

    /// Empties the conversation. Used by "New Chat" and endpoint commits.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected = 0;
        self.awaiting_reply = false;
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&ChatEntry> {
        self.entries.get(self.selected)
    }

    /// Moves the selection cursor, clamped to the list bounds.
    pub fn move_selection(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let len = self.entries.len() as isize;
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

    #[test]
    fn message_count_ignores_system_notices() {
        let mut panel = ChatPanel::default();
        panel.push_info("Status", "connected");
        assert_eq!(panel.message_count(), 0);
        panel.push_user_prompt("hello");
        panel.push_reply("hi there");
        assert_eq!(panel.message_count(), 2);
    }

    #[test]
    fn clear_empties_entries_and_resets_cursor() {
        let mut panel = ChatPanel::default();
        panel.push_user_prompt("one");
        panel.push_reply("two");
        panel.clear();
        assert!(panel.entries().is_empty());
        assert_eq!(panel.selected_index(), 0);
        assert!(!panel.awaiting_reply());
    }

    #[test]
    fn load_transcript_maps_roles_and_drops_system() {
        let mut panel = ChatPanel::default();
        let transcript = vec![
            ChatMessage {
                role: Role::System,
                content: String::from("instructions"),
                created_at: None,
            },
            ChatMessage {
                role: Role::User,
                content: String::from("question"),
                created_at: None,
            },
            ChatMessage {
                role: Role::Assistant,
                content: String::from("answer"),
                created_at: None,
            },
        ];
        panel.load_transcript(&transcript);
        assert_eq!(panel.entries().len(), 2);
        assert_eq!(panel.selected_index(), 1);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut panel = ChatPanel::default();
        panel.push_user_prompt("a");
        panel.push_reply("b");
        panel.move_selection(-10);
        assert_eq!(panel.selected_index(), 0);
        panel.move_selection(10);
        assert_eq!(panel.selected_index(), 1);
    }
}
