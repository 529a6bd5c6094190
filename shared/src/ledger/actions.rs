//! Guarded ledger operations. Every outcome, success or failure, is a toast.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::address::{is_valid_address, parse_fir_id, same_address, shorten_address, FirIdError};
use super::{FirLedger, FirRecord, FirStatus, LedgerError};
use crate::fir::UploadedFir;
use crate::toast::Toast;
use crate::wallet::WalletSession;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OfficerRoster {
    pub owner: String,
    pub officers: Vec<String>,
}

fn wallet_required(purpose: &str) -> Toast {
    Toast::destructive(
        "Wallet Not Connected",
        format!("Please connect your wallet first to {purpose}."),
    )
}

fn rejected(what: &str) -> Toast {
    Toast::destructive(
        "Transaction Rejected",
        format!("You rejected the transaction in MetaMask. {what}"),
    )
}

fn fir_id_toast(e: FirIdError) -> Toast {
    let title = match e {
        FirIdError::Missing => "Missing FIR ID",
        FirIdError::Invalid => "Invalid FIR ID",
    };
    Toast::destructive(title, e.to_string())
}

async fn is_owner(ledger: &dyn FirLedger, account: &str) -> Result<bool, LedgerError> {
    Ok(same_address(&ledger.owner().await?, account))
}

/// Anchors an uploaded FIR's CID on the ledger from the connected account.
pub async fn register_uploaded(
    ledger: &dyn FirLedger,
    session: &WalletSession,
    uploaded: &mut UploadedFir,
) -> Toast {
    let Some(account) = session.account() else {
        return wallet_required("register the FIR on blockchain");
    };

    match ledger.register_fir(account, &uploaded.cid).await {
        Ok(fir_id) => {
            info!(?fir_id, cid = %uploaded.cid, "FIR anchored on ledger");
            uploaded.blockchain_registered = true;
            Toast::info(
                "FIR Registered on Blockchain",
                "Your FIR has been permanently registered on the blockchain.",
            )
        }
        Err(e) if e.is_rejection() => {
            warn!(%e, "FIR registration rejected");
            rejected("The FIR was not registered on the blockchain.")
        }
        Err(e) => {
            warn!(%e, "FIR registration failed");
            Toast::destructive(
                "Registration Failed",
                "Failed to register FIR on blockchain. Please try again.",
            )
        }
    }
}

pub async fn fetch_fir(
    ledger: &dyn FirLedger,
    session: &WalletSession,
    raw_id: &str,
) -> Result<FirRecord, Toast> {
    if !session.is_connected() {
        return Err(wallet_required("view FIR details"));
    }
    let fir_id = parse_fir_id(raw_id).map_err(fir_id_toast)?;

    ledger.get_fir(fir_id).await.map_err(|e| {
        warn!(fir_id, %e, "FIR lookup failed");
        Toast::destructive(
            "Fetch Failed",
            "Failed to fetch FIR details. The FIR might not exist or you may not have permission to view it.",
        )
    })
}

/// Sets a FIR's status as the connected officer, who becomes its assignee.
pub async fn update_status(
    ledger: &dyn FirLedger,
    session: &WalletSession,
    raw_id: &str,
    status: FirStatus,
) -> Result<(FirRecord, Toast), Toast> {
    let Some(account) = session.account() else {
        return Err(wallet_required("update FIR status"));
    };

    let officer = ledger.is_police_officer(account).await.unwrap_or_else(|e| {
        warn!(%e, "officer check failed");
        false
    });
    if !officer {
        return Err(Toast::destructive(
            "Access Denied",
            "Only registered police officers can update FIR status.",
        ));
    }

    let fir_id = parse_fir_id(raw_id).map_err(fir_id_toast)?;
    let mut record = ledger.get_fir(fir_id).await.map_err(|e| {
        warn!(fir_id, %e, "no FIR to update");
        Toast::destructive(
            "No FIR Selected",
            "Please fetch an FIR first before updating its status.",
        )
    })?;

    match ledger.update_fir_status(account, fir_id, status).await {
        Ok(()) => {
            info!(fir_id, %status, "FIR status updated");
            record.status = status;
            record.assigned_officer = account.to_string();
            let toast = Toast::info(
                "Status Updated",
                format!("FIR #{fir_id} status has been updated to {status}."),
            );
            Ok((record, toast))
        }
        Err(e) if e.is_rejection() => {
            warn!(fir_id, %e, "status update rejected");
            Err(rejected("The FIR status was not updated."))
        }
        Err(e) => {
            warn!(fir_id, %e, "status update failed");
            Err(Toast::destructive(
                "Update Failed",
                "Failed to update FIR status. Please try again.",
            ))
        }
    }
}

/// Officer list, visible to the contract owner only.
pub async fn load_officers(
    ledger: &dyn FirLedger,
    session: &WalletSession,
) -> Result<OfficerRoster, Toast> {
    let loading_failed = || {
        Toast::destructive(
            "Loading Failed",
            "Failed to load police officers. Please try again.",
        )
    };
    let Some(account) = session.account() else {
        return Err(wallet_required("manage police officers"));
    };

    let owner = ledger.owner().await.map_err(|e| {
        warn!(%e, "owner lookup failed");
        loading_failed()
    })?;
    if !same_address(&owner, account) {
        return Err(Toast::destructive(
            "Access Restricted",
            "Only the contract owner can manage police officers.",
        ));
    }

    let officers = ledger.all_police_officers().await.map_err(|e| {
        warn!(%e, "officer list failed");
        loading_failed()
    })?;
    Ok(OfficerRoster { owner, officers })
}

pub async fn add_officer(ledger: &dyn FirLedger, session: &WalletSession, address: &str) -> Toast {
    let addition_failed = || {
        Toast::destructive(
            "Addition Failed",
            "Failed to add police officer. The address might already be registered.",
        )
    };
    let Some(account) = session.account() else {
        return wallet_required("add a police officer");
    };

    match is_owner(ledger, account).await {
        Ok(true) => {}
        Ok(false) => {
            return Toast::destructive(
                "Access Denied",
                "Only the contract owner can add police officers.",
            )
        }
        Err(e) => {
            warn!(%e, "owner lookup failed");
            return addition_failed();
        }
    }

    if address.is_empty() {
        return Toast::destructive("Missing Address", "Please enter an Ethereum address.");
    }
    if !is_valid_address(address) {
        return Toast::destructive(
            "Invalid Ethereum Address",
            "Please enter a valid Ethereum address (0x followed by 40 hexadecimal characters).",
        );
    }
    match ledger.is_police_officer(address).await {
        Ok(true) => {
            return Toast::destructive(
                "Duplicate Officer",
                "This address is already registered as a police officer.",
            )
        }
        Ok(false) => {}
        Err(e) => {
            warn!(%e, "officer list failed");
            return addition_failed();
        }
    }

    match ledger.add_police_officer(account, address).await {
        Ok(()) => {
            info!(officer = address, "police officer added");
            Toast::info(
                "Officer Added",
                format!("Police officer {} has been added.", shorten_address(address)),
            )
        }
        Err(e) if e.is_rejection() => {
            warn!(%e, "officer addition rejected");
            rejected("The officer was not added.")
        }
        Err(e) => {
            warn!(%e, "officer addition failed");
            addition_failed()
        }
    }
}

pub async fn remove_officer(
    ledger: &dyn FirLedger,
    session: &WalletSession,
    address: &str,
) -> Toast {
    let removal_failed = || {
        Toast::destructive(
            "Removal Failed",
            "Failed to remove police officer. Please try again.",
        )
    };
    let Some(account) = session.account() else {
        return wallet_required("remove a police officer");
    };

    match is_owner(ledger, account).await {
        Ok(true) => {}
        Ok(false) => {
            return Toast::destructive(
                "Access Denied",
                "Only the contract owner can remove police officers.",
            )
        }
        Err(e) => {
            warn!(%e, "owner lookup failed");
            return removal_failed();
        }
    }

    match ledger.remove_police_officer(account, address).await {
        Ok(()) => {
            info!(officer = address, "police officer removed");
            Toast::info(
                "Officer Removed",
                format!(
                    "Police officer {} has been removed.",
                    shorten_address(address)
                ),
            )
        }
        Err(e) if e.is_rejection() => {
            warn!(%e, "officer removal rejected");
            rejected("The officer was not removed.")
        }
        Err(e) => {
            warn!(%e, "officer removal failed");
            removal_failed()
        }
    }
}
