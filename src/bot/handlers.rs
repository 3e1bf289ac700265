use std::sync::Arc;

use teloxide::prelude::*;

use crate::bot::reply::{send_replies, Markup, Reply};
use crate::bot::router::{handle_event, EventKind, InboundEvent, Outcome};
use crate::bot::state::ChatMode;
use crate::bot::AppState;
use crate::db::models::Movie;
use crate::error::MovieError;
use crate::movies::Snapshot;

const EMPTY_LIST: &str = "Список фильмов пуст.";
const GENERIC_FAILURE: &str = "Что-то пошло не так, попробуйте позже.";
const TRUNCATION_NOTICE: &str = "...\n(список обрезан из-за ограничений Telegram)";
const LIST_HEADER: &str = "Список фильмов:\n";
const DELETE_HEADER: &str = "Выберите фильм для удаления:\n";

/// Telegram rejects longer messages; the limit counts UTF-16 code units.
const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Entry point for text messages.
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let Some(text) = msg.text() else {
        // Stickers, photos and the like carry nothing to route.
        return Ok(());
    };

    let event = InboundEvent {
        chat_id: msg.chat.id,
        kind: EventKind::Text(text.to_string()),
    };
    let send = |replies| send_replies(&bot, msg.chat.id, replies);
    handle_event(&state, &event, send).await?;

    Ok(())
}

pub fn start() -> Vec<Reply> {
    vec![Reply::text("Привет! Отправь мне название фильма, и я сохраню его.")
        .with_markup(Markup::Keywords)]
}

pub async fn list(state: &AppState) -> Vec<Reply> {
    let movies = match state.movies.list().await {
        Ok(movies) => movies,
        Err(e) => return vec![failure(e)],
    };
    if movies.is_empty() {
        return vec![Reply::text("Список фильмов пуст")];
    }

    let text = fit_message(
        LIST_HEADER,
        &render_list(&movies),
        state.config.list_max_len,
    );
    vec![Reply::text(text)]
}

pub async fn random(state: &AppState) -> Vec<Reply> {
    match state.movies.pick_random().await {
        Ok(movie) => vec![Reply::text(format!("Будем смотреть это!: {}", movie.title))],
        Err(MovieError::NoMovies) => vec![Reply::text(EMPTY_LIST)],
        Err(e) => vec![failure(e)],
    }
}

/// Show the numbered list. The chat starts waiting for a number only once the
/// list was actually delivered, see `handle_event`.
pub async fn delete_request(state: &AppState, chat_id: ChatId) -> Outcome {
    let snapshot = match state.movies.snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => return vec![failure(e)].into(),
    };
    if snapshot.is_empty() {
        state.chats.clear(chat_id);
        return vec![Reply::text(EMPTY_LIST)].into();
    }

    let text = fit_message(
        DELETE_HEADER,
        &render_numbered(snapshot.movies()),
        state.config.list_max_len,
    );
    tracing::info!("Chat {} choosing from {} movies to delete", chat_id, snapshot.len());

    Outcome {
        replies: vec![Reply::text(text)],
        pending: Some(ChatMode::AwaitingDeleteIndex(snapshot)),
    }
}

/// Answer to a pending delete. Anything but a successful delete keeps the chat waiting.
pub async fn delete_confirm(
    state: &AppState,
    chat_id: ChatId,
    text: &str,
    snapshot: &Snapshot,
) -> Vec<Reply> {
    let result = match parse_index(text) {
        Ok(index) => state.movies.delete_by_index(index, snapshot).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(movie) => {
            state.chats.clear(chat_id);
            let caption = format!("Фильм '{}' удален.", movie.title);
            let reply = match &state.config.delete_image_path {
                Some(path) => Reply::photo(path.clone(), caption),
                None => Reply::text(caption),
            };
            vec![reply]
        }
        Err(MovieError::InvalidNumber(_)) => vec![Reply::text(
            "Введите корректный номер фильма (положительное число).",
        )],
        Err(MovieError::IndexOutOfRange { .. }) => {
            vec![Reply::text("Некорректный номер фильма.")]
        }
        Err(MovieError::AlreadyDeleted(title)) => vec![Reply::text(format!(
            "Фильм '{}' уже удален. Выберите другой номер.",
            title
        ))],
        Err(e) => vec![failure(e)],
    }
}

/// Any text that is not a keyword is a title to save.
pub async fn add_default(state: &AppState, title: &str) -> Vec<Reply> {
    if state.filter.is_rejected(title) {
        tracing::warn!("Rejected title '{}' by deny list", title);
        return vec![Reply::text("Этот фильм нельзя добавить в список.")];
    }

    match state.movies.add(title).await {
        Ok(movie) => vec![
            Reply::text(format!("Фильм '{}' сохранен.", movie.title)).with_markup(Markup::Actions),
        ],
        Err(e) => {
            match &e {
                MovieError::DuplicateTitle(_) => tracing::info!("Not saved: {}", e),
                _ => tracing::error!("Saving '{}' failed: {}", title, e),
            }
            // Duplicates and store failures share one answer.
            vec![Reply::text(format!(
                "Не удалось сохранить фильм '{}'. Возможно, он уже есть в списке.",
                title
            ))]
        }
    }
}

fn failure(e: MovieError) -> Reply {
    tracing::error!("Movie store request failed: {}", e);
    Reply::text(GENERIC_FAILURE)
}

fn parse_index(text: &str) -> Result<i64, MovieError> {
    match text.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(MovieError::InvalidNumber(text.to_string())),
    }
}

pub fn render_list(movies: &[Movie]) -> String {
    movies.iter().map(|m| format!("- {}\n", m.title)).collect()
}

pub fn render_numbered(movies: &[Movie]) -> String {
    movies
        .iter()
        .enumerate()
        .map(|(i, m)| format!("{}. {}\n", i + 1, m.title))
        .collect()
}

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Join `header` and `body` so the message stays within `max_units` UTF-16 code
/// units (never more than Telegram allows). An oversized body is cut at a char
/// boundary and the truncation notice takes its place in the budget.
fn fit_message(header: &str, body: &str, max_units: usize) -> String {
    let max_units = max_units.min(TELEGRAM_MESSAGE_LIMIT);
    let header_units = utf16_len(header);
    if header_units + utf16_len(body) <= max_units {
        return format!("{}{}", header, body);
    }

    let budget = max_units.saturating_sub(header_units + utf16_len(TRUNCATION_NOTICE));
    let mut used = 0;
    let cut = body
        .char_indices()
        .find_map(|(i, c)| {
            used += c.len_utf16();
            (used > budget).then_some(i)
        })
        .unwrap_or(body.len());

    format!("{}{}{}", header, &body[..cut], TRUNCATION_NOTICE)
}
