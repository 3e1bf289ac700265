use dashmap::DashMap;
use teloxide::types::ChatId;

use crate::movies::Snapshot;

/// Where a chat is in the conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChatMode {
    #[default]
    Idle,
    /// A numbered list was shown; the next text is the number to delete.
    AwaitingDeleteIndex(Snapshot),
}

/// Per-chat mode, kept in memory for the lifetime of the process.
///
/// Entries are never evicted: a chat that opens the delete flow and walks away
/// keeps its snapshot until it finishes the flow or the process restarts.
#[derive(Debug, Default)]
pub struct ChatStateStore {
    modes: DashMap<ChatId, ChatMode>,
}

impl ChatStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, chat_id: ChatId) -> ChatMode {
        self.modes
            .get(&chat_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn set(&self, chat_id: ChatId, mode: ChatMode) {
        match mode {
            ChatMode::Idle => self.clear(chat_id),
            mode => {
                self.modes.insert(chat_id, mode);
            }
        }
    }

    pub fn clear(&self, chat_id: ChatId) {
        self.modes.remove(&chat_id);
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Movie;

    fn awaiting() -> ChatMode {
        ChatMode::AwaitingDeleteIndex(Snapshot::new(vec![Movie {
            id: 1,
            title: "A".to_string(),
        }]))
    }

    #[test]
    fn absent_chat_is_idle() {
        let store = ChatStateStore::new();
        assert_eq!(store.get(ChatId(5)), ChatMode::Idle);
    }

    #[test]
    fn set_and_clear_are_per_chat() {
        let store = ChatStateStore::new();
        store.set(ChatId(1), awaiting());

        assert_eq!(store.get(ChatId(1)), awaiting());
        assert_eq!(store.get(ChatId(2)), ChatMode::Idle);

        store.clear(ChatId(1));
        assert_eq!(store.get(ChatId(1)), ChatMode::Idle);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn setting_idle_drops_the_entry() {
        let store = ChatStateStore::new();
        store.set(ChatId(1), awaiting());
        store.set(ChatId(1), ChatMode::Idle);
        assert_eq!(store.len(), 0);
    }
}
