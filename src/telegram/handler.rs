use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::UpdateKind;
use tracing::error;

use super::AppState;
use super::replies;

/// Which handler an incoming update is routed to. Exactly one route matches
/// per update; content the bot does not recognize matches none.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Route<'a> {
    Command(&'a str),
    Text(&'a str),
    Photo,
}

/// Select the handler for an update, in priority order:
/// command, then plain text, then photo.
pub(crate) fn route(text: Option<&str>, has_photo: bool) -> Option<Route<'_>> {
    if let Some(text) = text {
        let trimmed = text.trim();
        if trimmed.starts_with('/') {
            let command = trimmed.split_whitespace().next().unwrap_or(trimmed);
            return Some(Route::Command(command));
        }
        if !trimmed.is_empty() {
            return Some(Route::Text(trimmed));
        }
    }
    if has_photo {
        return Some(Route::Photo);
    }
    None
}

/// Entry point for updates delivered over the webhook. Handler failures are
/// logged here and never reach the HTTP boundary.
pub(crate) async fn dispatch_update(bot: Bot, update: Update, state: Arc<AppState>) {
    if let UpdateKind::Message(msg) = update.kind {
        if let Err(err) = handle_message(msg, bot, state).await {
            error!("Handler failed: {err}");
        }
    }
}

pub(crate) async fn handle_message(
    msg: Message,
    bot: Bot,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let has_photo = msg.photo().is_some_and(|photos| !photos.is_empty());

    match route(msg.text(), has_photo) {
        Some(Route::Command(_)) => {
            bot.send_message(msg.chat.id, replies::GREETING).await?;
            Ok(())
        }
        Some(Route::Text(query)) => handle_text(&bot, msg.chat.id, query, &state).await,
        Some(Route::Photo) => {
            bot.send_message(msg.chat.id, replies::PHOTO_NOT_SUPPORTED)
                .await?;
            Ok(())
        }
        // Unrecognized content (stickers, voice, ...) is dropped silently.
        None => Ok(()),
    }
}

/// Text lookup: acknowledge immediately, then send exactly one terminal
/// reply once the Spoonacular call resolves. Lookup errors stop here.
async fn handle_text(
    bot: &Bot,
    chat_id: ChatId,
    query: &str,
    state: &AppState,
) -> ResponseResult<()> {
    bot.send_message(chat_id, replies::SEARCHING).await?;

    match state.nutrition.search(query).await {
        Ok(Some(product)) => {
            bot.send_message(chat_id, replies::format_found(query, &product))
                .await?;
        }
        Ok(None) => {
            bot.send_message(chat_id, replies::NOT_FOUND).await?;
        }
        Err(err) => {
            error!("Nutrition lookup failed for {query:?}: {err}");
            bot.send_message(chat_id, replies::LOOKUP_FAILED).await?;
        }
    }

    Ok(())
}
