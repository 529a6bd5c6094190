use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error};

use super::{FirLedger, FirRecord, FirStatus, LedgerError};
use crate::config::Settings;

#[derive(Serialize)]
struct CallRequest<'a> {
    contract: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<&'a str>,
    method: &'static str,
    args: Vec<Value>,
}

#[derive(Deserialize)]
struct CallResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFir {
    id: u64,
    cid: String,
    status: String,
    complainant: String,
    assigned_officer: String,
    /// Seconds since the epoch.
    timestamp: i64,
}

impl TryFrom<RawFir> for FirRecord {
    type Error = LedgerError;

    fn try_from(raw: RawFir) -> Result<Self, Self::Error> {
        let status = FirStatus::from_str(&raw.status)
            .map_err(|_| LedgerError::InvalidResponse(format!("unknown status {}", raw.status)))?;
        let timestamp = DateTime::from_timestamp(raw.timestamp, 0).ok_or_else(|| {
            LedgerError::InvalidResponse(format!("bad timestamp {}", raw.timestamp))
        })?;
        Ok(FirRecord {
            id: raw.id,
            cid: raw.cid,
            status,
            complainant: raw.complainant,
            assigned_officer: raw.assigned_officer,
            timestamp,
        })
    }
}

/// Talks to a wallet-signer bridge that holds the keys and submits
/// transactions: `POST {url}/call` with `{contract, from, method, args}`,
/// answered by `{result}` or `{error}`.
#[derive(Clone)]
pub struct SignerBridgeLedger {
    client: Client,
    call_url: String,
    contract: String,
}

impl SignerBridgeLedger {
    pub fn new(
        base_url: &str,
        contract: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LedgerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            call_url: format!("{}/call", base_url.trim_end_matches('/')),
            contract: contract.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, LedgerError> {
        Self::new(
            &settings.ledger_bridge_url,
            &settings.contract_address,
            settings.http_timeout(),
        )
    }

    async fn call_raw(
        &self,
        from: Option<&str>,
        method: &'static str,
        args: Vec<Value>,
    ) -> Result<Option<Value>, LedgerError> {
        let req = CallRequest {
            contract: &self.contract,
            from,
            method,
            args,
        };
        debug!(method, from = from.unwrap_or("-"), "\u{2192} contract call");

        let res = self
            .client
            .post(&self.call_url)
            .json(&req)
            .send()
            .await
            .map_err(|e| {
                error!(method, "network error to signer bridge: {e}");
                LedgerError::Transport(e.to_string())
            })?;

        let status = res.status();
        let body = res
            .bytes()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;
        let parsed = serde_json::from_slice::<CallResponse>(&body);

        match (status.is_success(), parsed) {
            (
                _,
                Ok(CallResponse {
                    error: Some(reason),
                    ..
                }),
            ) => {
                debug!(method, %status, %reason, "contract call refused");
                Err(LedgerError::Rejected(reason))
            }
            (true, Ok(CallResponse { result, .. })) => Ok(result),
            (true, Err(e)) => Err(LedgerError::InvalidResponse(e.to_string())),
            (false, _) => {
                error!(method, %status, "signer bridge returned an error");
                Err(LedgerError::Transport(format!("status {}", status.as_u16())))
            }
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        from: Option<&str>,
        method: &'static str,
        args: Vec<Value>,
    ) -> Result<T, LedgerError> {
        let result = self
            .call_raw(from, method, args)
            .await?
            .ok_or_else(|| LedgerError::InvalidResponse(format!("{method} returned no result")))?;
        serde_json::from_value(result).map_err(|e| LedgerError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl FirLedger for SignerBridgeLedger {
    async fn owner(&self) -> Result<String, LedgerError> {
        self.call(None, "owner", vec![]).await
    }

    async fn all_police_officers(&self) -> Result<Vec<String>, LedgerError> {
        self.call(None, "getAllPoliceOfficers", vec![]).await
    }

    async fn add_police_officer(&self, from: &str, officer: &str) -> Result<(), LedgerError> {
        self.call_raw(Some(from), "addPoliceOfficer", vec![json!(officer)])
            .await
            .map(|_| ())
    }

    async fn remove_police_officer(&self, from: &str, officer: &str) -> Result<(), LedgerError> {
        self.call_raw(Some(from), "removePoliceOfficer", vec![json!(officer)])
            .await
            .map(|_| ())
    }

    async fn register_fir(&self, from: &str, cid: &str) -> Result<Option<u64>, LedgerError> {
        let result = self
            .call_raw(Some(from), "registerFIR", vec![json!(cid)])
            .await?;
        // registerFIR has no outputs; bridges may relay the transaction hash.
        Ok(result.and_then(|v| v.as_u64()))
    }

    async fn update_fir_status(
        &self,
        from: &str,
        fir_id: u64,
        status: FirStatus,
    ) -> Result<(), LedgerError> {
        self.call_raw(
            Some(from),
            "updateFIRStatus",
            vec![json!(fir_id), json!(status.as_ref()), json!(from)],
        )
        .await
        .map(|_| ())
    }

    async fn get_fir(&self, fir_id: u64) -> Result<FirRecord, LedgerError> {
        let raw: RawFir = self.call(None, "getFIR", vec![json!(fir_id)]).await?;
        raw.try_into()
    }
}
