use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use teloxide::prelude::*;

use crate::bot::reply::{send_replies, Reply};
use crate::bot::router::{handle_event, EventKind, InboundEvent};
use crate::bot::AppState;

/// Entry point for inline button presses.
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let answer = async { bot.answer_callback_query(&q.id).await };

    let chat_id = q.message.as_ref().map(|message| message.chat().id);
    let (Some(data), Some(chat_id)) = (q.data.as_deref(), chat_id) else {
        tracing::warn!("Callback {} without data or message, ignoring", q.id);
        acknowledge(&q.id, answer).await;
        return Ok(());
    };

    let event = InboundEvent {
        chat_id,
        kind: EventKind::Callback(data.to_string()),
    };
    answer_and_route(&state, &q.id, &event, answer, |replies| {
        send_replies(&bot, chat_id, replies)
    })
    .await?;

    Ok(())
}

/// Stop the button's loading spinner. Failing to do so (a query that went stale
/// while the bot was down) is logged and otherwise ignored.
async fn acknowledge<T, AE: Display>(query_id: &str, answer: impl Future<Output = Result<T, AE>>) {
    if let Err(e) = answer.await {
        tracing::warn!("Answering callback {} failed: {}", query_id, e);
    }
}

/// Answer the query, then run the button's action regardless of the answer's fate.
pub(crate) async fn answer_and_route<T, AE, F, Fut, E>(
    state: &AppState,
    query_id: &str,
    event: &InboundEvent,
    answer: impl Future<Output = Result<T, AE>>,
    send: F,
) -> Result<(), E>
where
    AE: Display,
    F: FnOnce(Vec<Reply>) -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    acknowledge(query_id, answer).await;
    handle_event(state, event, send).await
}
