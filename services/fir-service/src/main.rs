//! FIR filing wizard, document upload and FIR registry endpoints.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use shared::config::Settings;
use shared::ipfs::{FirStorage, PinningClient};
use shared::ledger::{FirLedger, InMemoryLedger, SignerBridgeLedger};
use tracing::{info, warn};

const PORT: u16 = 8086;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn FirStorage>,
    pub ledger: Arc<dyn FirLedger>,
    /// Accepted clock drift for signed wallet authorizations.
    pub proof_window_secs: i64,
}

/// A blank `LEDGER_BRIDGE_URL` selects the in-process registry owned by
/// `LEDGER_OWNER`, or by the contract address when that is unset.
fn build_state(settings: &Settings) -> shared::error::Result<AppState> {
    let storage = Arc::new(PinningClient::from_settings(settings)?);
    let ledger: Arc<dyn FirLedger> = if settings.ledger_bridge_url.trim().is_empty() {
        warn!("no signer bridge configured, using in-memory registry");
        Arc::new(InMemoryLedger::new(settings.registry_owner()))
    } else {
        Arc::new(SignerBridgeLedger::from_settings(settings)?)
    };
    Ok(AppState {
        storage,
        ledger,
        proof_window_secs: settings.wallet_proof_window_secs,
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health))
        .route("/api/fir/wizard/next", web::post().to(handlers::wizard_next))
        .route("/api/fir/wizard/back", web::post().to(handlers::wizard_back))
        .route("/api/fir/wizard/submit", web::post().to(handlers::wizard_submit))
        .route("/api/fir/register", web::post().to(handlers::register))
        .route("/api/fir/{id}", web::get().to(handlers::get_fir))
        .route("/api/fir/{id}/status", web::put().to(handlers::update_status))
        .route("/api/officers", web::get().to(handlers::list_officers))
        .route("/api/officers", web::post().to(handlers::add_officer))
        .route("/api/officers/{address}", web::delete().to(handlers::remove_officer))
        .route("/api/wallet/connect", web::post().to(handlers::connect_wallet));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    shared::logging::init();
    info!(port = PORT, "starting fir-service");

    let settings = Settings::new().unwrap_or_else(|e| {
        warn!(%e, "invalid settings, using defaults");
        Settings::default()
    });
    let state = build_state(&settings).map_err(std::io::Error::other)?;
    let data = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .configure(configure)
    })
    .bind(("0.0.0.0", PORT))?
    .run()
    .await
}
