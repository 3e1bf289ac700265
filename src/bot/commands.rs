use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

pub const CALLBACK_LIST: &str = "list";
pub const CALLBACK_RANDOM: &str = "random";
pub const CALLBACK_DELETE: &str = "delete";

/// User-visible actions reachable by a keyword or a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    List,
    Random,
    Delete,
}

impl Command {
    /// Match a typed keyword, ignoring case.
    pub fn from_keyword(text: &str) -> Option<Self> {
        match text.to_lowercase().as_str() {
            "/start" => Some(Self::Start),
            "список" => Some(Self::List),
            "рандом" => Some(Self::Random),
            "удалить" => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn from_callback(token: &str) -> Option<Self> {
        match token {
            CALLBACK_LIST => Some(Self::List),
            CALLBACK_RANDOM => Some(Self::Random),
            CALLBACK_DELETE => Some(Self::Delete),
            _ => None,
        }
    }
}

/// Reply keyboard sent with the greeting.
pub fn main_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new("Список"),
        KeyboardButton::new("Рандом"),
        KeyboardButton::new("Удалить"),
    ]])
}

/// Inline shortcuts attached to the "saved" confirmation.
pub fn actions_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("📜 Список", CALLBACK_LIST),
        InlineKeyboardButton::callback("🎲 Рандом", CALLBACK_RANDOM),
        InlineKeyboardButton::callback("🗑 Удалить", CALLBACK_DELETE),
    ]])
}
