use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ledger::address::{format_address, is_valid_address};
use crate::toast::Toast;

/// Connected signer account, if any. Unknown fields on input are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WalletSession {
    pub account: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Connected(Toast),
    /// Nothing changed and nothing is shown.
    AlreadyConnected,
    Failed(Toast),
}

impl ConnectOutcome {
    pub fn toast(&self) -> Option<&Toast> {
        match self {
            Self::Connected(t) | Self::Failed(t) => Some(t),
            Self::AlreadyConnected => None,
        }
    }
}

impl WalletSession {
    pub fn connected(account: impl Into<String>) -> Self {
        Self {
            account: Some(account.into()),
        }
    }

    /// Session from an optional account header; blank means disconnected.
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(account) => Self::connected(account),
            None => Self::default(),
        }
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    /// Connects to the account offered by the signer. `offered` is `None` when
    /// no signer is installed. Repeated calls on a connected session are
    /// no-ops.
    pub fn connect(&mut self, offered: Option<&str>) -> ConnectOutcome {
        if self.is_connected() {
            debug!("wallet already connected");
            return ConnectOutcome::AlreadyConnected;
        }

        let Some(account) = offered else {
            return ConnectOutcome::Failed(Toast::destructive(
                "MetaMask Not Found",
                "Please install MetaMask browser extension to use blockchain features.",
            ));
        };
        if !is_valid_address(account) {
            return ConnectOutcome::Failed(Toast::destructive(
                "Connection Failed",
                "Failed to connect to your wallet. Please try again.",
            ));
        }

        self.account = Some(account.to_string());
        ConnectOutcome::Connected(Toast::info(
            "Wallet Connected",
            format!("Connected to wallet: {}", format_address(account)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = "0x1111111111111111111111111111111111111111";

    #[test]
    fn connect_is_idempotent() {
        let mut session = WalletSession::default();
        let first = session.connect(Some(ACCOUNT));
        assert_eq!(first.toast().unwrap().title, "Wallet Connected");
        assert_eq!(
            first.toast().unwrap().description,
            "Connected to wallet: 0x1111...1111"
        );
        assert_eq!(session.account(), Some(ACCOUNT));

        let other = "0x2222222222222222222222222222222222222222";
        assert_eq!(session.connect(Some(other)), ConnectOutcome::AlreadyConnected);
        assert_eq!(session.account(), Some(ACCOUNT));
    }

    #[test]
    fn missing_signer_and_bad_account() {
        let mut session = WalletSession::default();
        let outcome = session.connect(None);
        assert_eq!(outcome.toast().unwrap().title, "MetaMask Not Found");
        assert!(!session.is_connected());

        let outcome = session.connect(Some("0x123"));
        assert_eq!(outcome.toast().unwrap().title, "Connection Failed");
        assert!(!session.is_connected());
    }

    #[test]
    fn client_connecting_flag_is_ignored() {
        let mut session: WalletSession =
            serde_json::from_str(r#"{"account":null,"connecting":true}"#).unwrap();
        let outcome = session.connect(Some(ACCOUNT));
        assert_eq!(outcome.toast().unwrap().title, "Wallet Connected");
        assert_eq!(session.account(), Some(ACCOUNT));
        assert_eq!(
            serde_json::to_value(&session).unwrap(),
            serde_json::json!({"account": ACCOUNT})
        );
    }

    #[test]
    fn header_parsing() {
        assert!(!WalletSession::from_header(None).is_connected());
        assert!(!WalletSession::from_header(Some("  ")).is_connected());
        assert_eq!(
            WalletSession::from_header(Some(ACCOUNT)).account(),
            Some(ACCOUNT)
        );
    }
}
