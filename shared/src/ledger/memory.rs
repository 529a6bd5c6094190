use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use super::address::{same_address, ZERO_ADDRESS};
use super::{FirLedger, FirRecord, FirStatus, LedgerError, LedgerEvent};

#[derive(Default)]
struct State {
    officers: Vec<String>,
    firs: Vec<FirRecord>,
    events: Vec<LedgerEvent>,
}

/// Process-local registry with the contract's access rules. FIR ids start at 1.
pub struct InMemoryLedger {
    owner: String,
    state: Mutex<State>,
}

impl InMemoryLedger {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            state: Mutex::new(State::default()),
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, LedgerError> {
        self.state
            .lock()
            .map_err(|_| LedgerError::Transport("ledger state poisoned".into()))
    }

    /// Emitted contract events, oldest first.
    pub fn events(&self) -> Result<Vec<LedgerEvent>, LedgerError> {
        Ok(self.state()?.events.clone())
    }

    fn require_owner(&self, from: &str) -> Result<(), LedgerError> {
        if same_address(from, &self.owner) {
            Ok(())
        } else {
            Err(LedgerError::NotOwner)
        }
    }
}

#[async_trait]
impl FirLedger for InMemoryLedger {
    async fn owner(&self) -> Result<String, LedgerError> {
        Ok(self.owner.clone())
    }

    async fn all_police_officers(&self) -> Result<Vec<String>, LedgerError> {
        Ok(self.state()?.officers.clone())
    }

    async fn add_police_officer(&self, from: &str, officer: &str) -> Result<(), LedgerError> {
        self.require_owner(from)?;
        let mut state = self.state()?;
        if state.officers.iter().any(|o| same_address(o, officer)) {
            return Err(LedgerError::Rejected("already a police officer".into()));
        }
        state.officers.push(officer.to_string());
        debug!(officer, "officer added");
        Ok(())
    }

    async fn remove_police_officer(&self, from: &str, officer: &str) -> Result<(), LedgerError> {
        self.require_owner(from)?;
        let mut state = self.state()?;
        let before = state.officers.len();
        state.officers.retain(|o| !same_address(o, officer));
        if state.officers.len() == before {
            return Err(LedgerError::Rejected("not a police officer".into()));
        }
        debug!(officer, "officer removed");
        Ok(())
    }

    async fn register_fir(&self, from: &str, cid: &str) -> Result<Option<u64>, LedgerError> {
        let mut state = self.state()?;
        let id = state.firs.len() as u64 + 1;
        state.firs.push(FirRecord {
            id,
            cid: cid.to_string(),
            status: FirStatus::Registered,
            complainant: from.to_string(),
            assigned_officer: ZERO_ADDRESS.to_string(),
            timestamp: Utc::now(),
        });
        state.events.push(LedgerEvent::FirRegistered {
            fir_id: id,
            complainant: from.to_string(),
            cid: cid.to_string(),
        });
        debug!(fir_id = id, cid, "FIR registered");
        Ok(Some(id))
    }

    async fn update_fir_status(
        &self,
        from: &str,
        fir_id: u64,
        status: FirStatus,
    ) -> Result<(), LedgerError> {
        let mut state = self.state()?;
        if !state.officers.iter().any(|o| same_address(o, from)) {
            return Err(LedgerError::NotOfficer);
        }
        let record = fir_id
            .checked_sub(1)
            .and_then(|idx| state.firs.get_mut(idx as usize))
            .ok_or(LedgerError::NotFound(fir_id))?;
        record.status = status;
        record.assigned_officer = from.to_string();
        state.events.push(LedgerEvent::FirStatusUpdated {
            fir_id,
            status,
            officer: from.to_string(),
        });
        debug!(fir_id, %status, "FIR status updated");
        Ok(())
    }

    async fn get_fir(&self, fir_id: u64) -> Result<FirRecord, LedgerError> {
        let state = self.state()?;
        fir_id
            .checked_sub(1)
            .and_then(|idx| state.firs.get(idx as usize))
            .cloned()
            .ok_or(LedgerError::NotFound(fir_id))
    }
}
