use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use shared::account_proof::{self, ProofError};
use shared::fir::{FilingWizard, UploadedFir};
use shared::ledger::actions::{self, OfficerRoster};
use shared::ledger::address::format_address;
use shared::ledger::{FirRecord, FirStatus};
use shared::toast::Toast;
use shared::wallet::WalletSession;
use tracing::{info, warn};

use crate::AppState;

pub const WALLET_HEADER: &str = "X-Wallet-Address";
/// Hex `personal_sign` signature over the authorization message.
pub const SIGNATURE_HEADER: &str = "X-Wallet-Signature";
/// Unix seconds embedded in the signed authorization message.
pub const ISSUED_AT_HEADER: &str = "X-Wallet-Issued-At";

#[derive(Serialize, Deserialize)]
pub struct WizardResponse {
    pub wizard: FilingWizard,
    pub toast: Option<Toast>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub uploaded: UploadedFir,
    pub toast: Toast,
}

/// FIR as shown to the user, with the officer already formatted.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirView {
    #[serde(flatten)]
    pub record: FirRecord,
    pub assigned_officer_display: String,
}

impl From<FirRecord> for FirView {
    fn from(record: FirRecord) -> Self {
        Self {
            assigned_officer_display: format_address(&record.assigned_officer),
            record,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct FirResponse {
    pub fir: Option<FirView>,
    pub toast: Option<Toast>,
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: FirStatus,
}

#[derive(Serialize, Deserialize)]
pub struct OfficersResponse {
    pub roster: Option<OfficerRoster>,
    pub toast: Option<Toast>,
}

#[derive(Deserialize)]
pub struct OfficerRequest {
    #[serde(default)]
    pub address: String,
}

#[derive(Serialize, Deserialize)]
pub struct ToastResponse {
    pub toast: Toast,
}

#[derive(Deserialize)]
pub struct ConnectRequest {
    #[serde(default)]
    pub session: WalletSession,
    /// Account offered by the signer; absent when no signer is installed.
    #[serde(default)]
    pub account: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ConnectResponse {
    pub session: WalletSession,
    pub toast: Option<Toast>,
}

fn header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// Session for the account in `X-Wallet-Address`, accepted only with a valid
/// signed authorization from that account. No account means disconnected.
fn session(req: &HttpRequest, state: &AppState) -> Result<WalletSession, Toast> {
    let session = WalletSession::from_header(header(req, WALLET_HEADER));
    let Some(account) = session.account() else {
        return Ok(session);
    };

    let proof = match header(req, ISSUED_AT_HEADER).and_then(|v| v.trim().parse::<i64>().ok()) {
        Some(issued_at) => account_proof::verify(
            account,
            issued_at,
            header(req, SIGNATURE_HEADER),
            state.proof_window_secs,
        ),
        None => Err(ProofError::Missing),
    };
    match proof {
        Ok(()) => Ok(session),
        Err(e) => {
            warn!(account, %e, "wallet authorization refused");
            Err(Toast::destructive(
                "Wallet Verification Failed",
                "Please sign the authorization request in your wallet and try again.",
            ))
        }
    }
}

pub async fn health() -> impl Responder {
    "OK"
}

pub async fn wizard_next(body: web::Json<FilingWizard>) -> HttpResponse {
    let mut wizard = body.into_inner();
    let toast = wizard.next();
    info!(stage = %wizard.stage, blocked = toast.is_some(), "wizard next");
    HttpResponse::Ok().json(WizardResponse { wizard, toast })
}

pub async fn wizard_back(body: web::Json<FilingWizard>) -> HttpResponse {
    let mut wizard = body.into_inner();
    wizard.back();
    HttpResponse::Ok().json(WizardResponse {
        wizard,
        toast: None,
    })
}

pub async fn wizard_submit(
    state: web::Data<AppState>,
    body: web::Json<FilingWizard>,
) -> HttpResponse {
    let mut wizard = body.into_inner();
    let toast = wizard.submit(state.storage.as_ref()).await;
    info!(stage = %wizard.stage, outcome = %toast.title, "wizard submit");
    HttpResponse::Ok().json(WizardResponse {
        wizard,
        toast: Some(toast),
    })
}

pub async fn register(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<UploadedFir>,
) -> HttpResponse {
    let mut uploaded = body.into_inner();
    let toast = match session(&req, &state) {
        Ok(session) => {
            actions::register_uploaded(state.ledger.as_ref(), &session, &mut uploaded).await
        }
        Err(toast) => toast,
    };
    HttpResponse::Ok().json(RegisterResponse { uploaded, toast })
}

pub async fn get_fir(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let outcome = match session(&req, &state) {
        Ok(session) => actions::fetch_fir(state.ledger.as_ref(), &session, &path).await,
        Err(toast) => Err(toast),
    };
    let response = match outcome {
        Ok(record) => FirResponse {
            fir: Some(record.into()),
            toast: None,
        },
        Err(toast) => FirResponse {
            fir: None,
            toast: Some(toast),
        },
    };
    HttpResponse::Ok().json(response)
}

pub async fn update_status(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<StatusRequest>,
) -> HttpResponse {
    let outcome = match session(&req, &state) {
        Ok(session) => {
            actions::update_status(state.ledger.as_ref(), &session, &path, body.status).await
        }
        Err(toast) => Err(toast),
    };
    let response = match outcome {
        Ok((record, toast)) => FirResponse {
            fir: Some(record.into()),
            toast: Some(toast),
        },
        Err(toast) => FirResponse {
            fir: None,
            toast: Some(toast),
        },
    };
    HttpResponse::Ok().json(response)
}

pub async fn list_officers(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let outcome = match session(&req, &state) {
        Ok(session) => actions::load_officers(state.ledger.as_ref(), &session).await,
        Err(toast) => Err(toast),
    };
    let response = match outcome {
        Ok(roster) => OfficersResponse {
            roster: Some(roster),
            toast: None,
        },
        Err(toast) => OfficersResponse {
            roster: None,
            toast: Some(toast),
        },
    };
    HttpResponse::Ok().json(response)
}

pub async fn add_officer(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<OfficerRequest>,
) -> HttpResponse {
    let toast = match session(&req, &state) {
        Ok(session) => {
            actions::add_officer(state.ledger.as_ref(), &session, body.address.trim()).await
        }
        Err(toast) => toast,
    };
    HttpResponse::Ok().json(ToastResponse { toast })
}

pub async fn remove_officer(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let toast = match session(&req, &state) {
        Ok(session) => actions::remove_officer(state.ledger.as_ref(), &session, &path).await,
        Err(toast) => toast,
    };
    HttpResponse::Ok().json(ToastResponse { toast })
}

pub async fn connect_wallet(body: web::Json<ConnectRequest>) -> HttpResponse {
    let ConnectRequest {
        mut session,
        account,
    } = body.into_inner();
    let outcome = session.connect(account.as_deref());
    HttpResponse::Ok().json(ConnectResponse {
        session,
        toast: outcome.toast().cloned(),
    })
}
