use std::path::PathBuf;

use teloxide::prelude::*;
use teloxide::types::InputFile;

use crate::bot::commands::{actions_keyboard, main_keyboard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// Persistent keyboard with the three keywords.
    Keywords,
    /// Inline buttons that fire list/random/delete callbacks.
    Actions,
}

/// One outbound message, independent of the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub markup: Option<Markup>,
    /// When set, the reply goes out as a photo and `text` becomes its caption.
    pub photo: Option<PathBuf>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: None,
            photo: None,
        }
    }

    pub fn photo(path: PathBuf, caption: impl Into<String>) -> Self {
        Self {
            text: caption.into(),
            markup: None,
            photo: Some(path),
        }
    }

    pub fn with_markup(mut self, markup: Markup) -> Self {
        self.markup = Some(markup);
        self
    }
}

/// Deliver replies to a chat one after another, keeping their order.
pub async fn send_replies(
    bot: &Bot,
    chat_id: ChatId,
    replies: Vec<Reply>,
) -> Result<(), teloxide::RequestError> {
    for reply in replies {
        if let Some(path) = reply.photo {
            let sent = bot
                .send_photo(chat_id, InputFile::file(path.clone()))
                .caption(reply.text.clone())
                .await;
            if let Err(e) = sent {
                tracing::error!("Sending photo {} failed: {}", path.display(), e);
                // Fallback to text
                bot.send_message(chat_id, reply.text).await?;
            }
            continue;
        }

        let request = bot.send_message(chat_id, reply.text);
        match reply.markup {
            Some(Markup::Keywords) => request.reply_markup(main_keyboard()).await?,
            Some(Markup::Actions) => request.reply_markup(actions_keyboard()).await?,
            None => request.await?,
        };
    }

    Ok(())
}
