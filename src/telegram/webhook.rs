//! Webhook hosting mode: Telegram pushes updates to `POST /`, plus liveness
//! and administrative endpoints. Handler outcomes never surface as HTTP
//! errors; an invalid payload is answered with a structured error body.

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use reqwest::Url;
use serde_json::json;
use teloxide::prelude::*;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use super::AppState;
use super::handler;

#[derive(Clone)]
struct WebhookContext {
    bot: Bot,
    state: Arc<AppState>,
}

pub(super) async fn serve(bot: Bot, state: Arc<AppState>, url: &str) {
    register_webhook(&bot, url).await;

    let addr = format!("0.0.0.0:{}", state.config.port);
    let app = router(WebhookContext { bot, state });

    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind webhook port");
    info!("Webhook server listening on {addr}");

    axum::serve(listener, app)
        .await
        .expect("Webhook server failed");
}

/// Point Telegram at the configured URL. A failure here is logged, not
/// fatal; `GET /setwebhook` can re-register later.
async fn register_webhook(bot: &Bot, url: &str) {
    let parsed = match url.parse::<Url>() {
        Ok(parsed) => parsed,
        Err(err) => {
            error!("Invalid WEBHOOK_URL {url:?}: {err}");
            return;
        }
    };
    match bot.set_webhook(parsed).await {
        Ok(_) => info!("Webhook registered: {url}"),
        Err(err) => error!("Failed to register webhook: {err}"),
    }
}

fn router(ctx: WebhookContext) -> Router {
    Router::new()
        .route("/", get(root_info).post(receive_update))
        .route("/health", get(health))
        .route("/setwebhook", get(set_webhook_manual))
        .with_state(ctx)
}

async fn receive_update(
    State(ctx): State<WebhookContext>,
    Json(payload): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    let update: Update = match serde_json::from_value(payload) {
        Ok(update) => update,
        Err(err) => {
            warn!("Discarding undeserializable webhook payload: {err}");
            return Json(json!({ "status": "error", "message": err.to_string() }));
        }
    };

    info!("Webhook received update {}", update.id.0);

    // Direct dispatch. The acknowledgment does not wait for the handler,
    // so Telegram never retries an update the bot already accepted.
    tokio::spawn(handler::dispatch_update(ctx.bot, update, ctx.state));

    Json(json!({ "status": "ok" }))
}

async fn root_info() -> Json<serde_json::Value> {
    Json(json!({ "status": "bot is running", "service": "calorie-bot" }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

async fn set_webhook_manual(State(ctx): State<WebhookContext>) -> Json<serde_json::Value> {
    let Some(url) = ctx.state.config.webhook_url.clone() else {
        return Json(json!({ "error": "WEBHOOK_URL is not set" }));
    };
    let parsed = match url.parse::<Url>() {
        Ok(parsed) => parsed,
        Err(err) => return Json(json!({ "error": err.to_string() })),
    };

    if let Err(err) = ctx.bot.delete_webhook().await {
        return Json(json!({ "error": err.to_string() }));
    }
    match ctx.bot.set_webhook(parsed).await {
        Ok(_) => Json(json!({ "status": "success", "webhook_url": url })),
        Err(err) => Json(json!({ "error": err.to_string() })),
    }
}
