mod handler;
mod replies;
mod webhook;

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{error, info};

use crate::config::Config;
use crate::nutrition::NutritionClient;

/// Read-only context shared by every handler invocation. Built once at
/// startup; replaces the module-level singletons of earlier iterations.
pub(crate) struct AppState {
    pub(crate) nutrition: NutritionClient,
    pub(crate) config: Config,
}

pub async fn run_bot(config: Config) {
    let bot = Bot::new(&config.telegram_bot_token);

    let state = Arc::new(AppState {
        nutrition: NutritionClient::new(config.spoonacular_api_key.clone()),
        config,
    });

    // Register bot commands
    let commands = vec![
        BotCommand::new("start", "Как пользоваться ботом"),
        BotCommand::new("help", "Как пользоваться ботом"),
    ];
    if let Err(err) = bot.set_my_commands(commands).await {
        error!("Failed to set bot commands: {err}");
    }

    match state.config.webhook_url.clone() {
        Some(url) => {
            info!("Webhook URL configured: {url}");
            webhook::serve(bot, state, &url).await;
        }
        None => {
            info!("No webhook URL configured, starting long polling");
            run_polling(bot, state).await;
        }
    }
}

async fn run_polling(bot: Bot, state: Arc<AppState>) {
    let handler = Update::filter_message().endpoint(handler::handle_message);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;
}
