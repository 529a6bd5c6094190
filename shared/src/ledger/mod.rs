//! FIR registry contract: types, the [`FirLedger`] seam and its two backends.

pub mod actions;
pub mod address;
pub mod bridge;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

pub use bridge::SignerBridgeLedger;
pub use memory::InMemoryLedger;

/// Status strings exactly as stored on chain.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
pub enum FirStatus {
    #[default]
    Registered,
    UnderInvestigation,
    PendingEvidence,
    Resolved,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FirRecord {
    pub id: u64,
    pub cid: String,
    pub status: FirStatus,
    pub complainant: String,
    pub assigned_officer: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum LedgerEvent {
    #[serde(rename = "FIRRegistered", rename_all = "camelCase")]
    FirRegistered {
        fir_id: u64,
        complainant: String,
        cid: String,
    },
    #[serde(rename = "FIRStatusUpdated", rename_all = "camelCase")]
    FirStatusUpdated {
        fir_id: u64,
        status: FirStatus,
        officer: String,
    },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The signer declined or the contract reverted.
    #[error("transaction rejected: {0}")]
    Rejected(String),
    #[error("caller is not the contract owner")]
    NotOwner,
    #[error("caller is not a police officer")]
    NotOfficer,
    #[error("FIR {0} does not exist")]
    NotFound(u64),
    #[error("ledger unreachable: {0}")]
    Transport(String),
    #[error("unexpected ledger response: {0}")]
    InvalidResponse(String),
}

impl LedgerError {
    /// True when the call reached the contract and was refused there.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Rejected(_) | Self::NotOwner | Self::NotOfficer | Self::NotFound(_)
        )
    }
}

/// Contract surface. Mutating calls take the sending account in `from`.
#[async_trait]
pub trait FirLedger: Send + Sync {
    async fn owner(&self) -> Result<String, LedgerError>;

    async fn all_police_officers(&self) -> Result<Vec<String>, LedgerError>;

    async fn is_police_officer(&self, account: &str) -> Result<bool, LedgerError> {
        Ok(self
            .all_police_officers()
            .await?
            .iter()
            .any(|o| address::same_address(o, account)))
    }

    async fn add_police_officer(&self, from: &str, officer: &str) -> Result<(), LedgerError>;

    async fn remove_police_officer(&self, from: &str, officer: &str) -> Result<(), LedgerError>;

    /// The new FIR's id when the backend reports it. A relayed transaction
    /// has no return value, so the bridge usually yields `None`.
    async fn register_fir(&self, from: &str, cid: &str) -> Result<Option<u64>, LedgerError>;

    /// The sender becomes the assigned officer.
    async fn update_fir_status(
        &self,
        from: &str,
        fir_id: u64,
        status: FirStatus,
    ) -> Result<(), LedgerError>;

    async fn get_fir(&self, fir_id: u64) -> Result<FirRecord, LedgerError>;
}
