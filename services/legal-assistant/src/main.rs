//! Chat endpoint for the legal assistant.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use shared::assistant;
use shared::completion_client::{CompletionProvider, GeminiClient};
use shared::config::Settings;
use shared::dto::ChatRequest;
use tracing::{info, warn};

const PORT: u16 = 8085;

#[derive(Clone, Default)]
struct AppState {
    provider: Option<Arc<dyn CompletionProvider>>,
}

async fn health() -> impl Responder {
    "OK"
}

/// `POST /api/chat`. Always answers 200 with an assistant message.
async fn chat(state: web::Data<AppState>, req: web::Json<ChatRequest>) -> HttpResponse {
    let messages = req.into_inner().messages;
    info!(turns = messages.len(), "chat request");
    let reply = assistant::reply(&messages, state.provider.as_deref()).await;
    HttpResponse::Ok().json(reply)
}

fn build_state(settings: &Settings) -> AppState {
    match GeminiClient::from_settings(settings) {
        Ok(Some(client)) => {
            info!("completion provider enabled");
            AppState {
                provider: Some(Arc::new(client)),
            }
        }
        Ok(None) => {
            info!("no completion key configured, canned answers only");
            AppState::default()
        }
        Err(e) => {
            warn!(%e, "completion client unavailable, canned answers only");
            AppState::default()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    shared::logging::init();
    info!(port = PORT, "starting legal-assistant");

    let settings = Settings::new().unwrap_or_else(|e| {
        warn!(%e, "invalid settings, using defaults");
        Settings::default()
    });
    let state = web::Data::new(build_state(&settings));

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .route("/health", web::get().to(health))
            .route("/api/chat", web::post().to(chat))
    })
    .bind(("0.0.0.0", PORT))?
    .run()
    .await
}
