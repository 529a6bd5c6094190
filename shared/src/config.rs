use serde::Deserialize;
use std::time::Duration;

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent".into()
}

fn default_ipfs_upload_url() -> String {
    "http://localhost:3001/upload".into()
}

fn default_ledger_bridge_url() -> String {
    "http://localhost:8545".into()
}

fn default_contract_address() -> String {
    "0x3033C34AA1b345EAc587E930c777A05683636B1f".into()
}

fn default_predictor_url() -> String {
    "http://ipc-predictor:8084".into()
}

fn default_assistant_url() -> String {
    "http://legal-assistant:8085".into()
}

fn default_fir_service_url() -> String {
    "http://fir-service:8086".into()
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_wallet_proof_window_secs() -> i64 {
    300
}

/// Runtime settings shared by all services, read from the environment.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Without a key the chat assistant never leaves its canned answers.
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    #[serde(default = "default_gemini_endpoint")]
    pub gemini_endpoint: String,
    #[serde(default = "default_ipfs_upload_url")]
    pub ipfs_upload_url: String,
    #[serde(default = "default_ledger_bridge_url")]
    pub ledger_bridge_url: String,
    #[serde(default = "default_contract_address")]
    pub contract_address: String,
    /// Owner of the in-memory registry; falls back to the contract address.
    #[serde(default)]
    pub ledger_owner: Option<String>,
    #[serde(default = "default_predictor_url")]
    pub predictor_url: String,
    #[serde(default = "default_assistant_url")]
    pub assistant_url: String,
    #[serde(default = "default_fir_service_url")]
    pub fir_service_url: String,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    /// How far a signed wallet authorization may drift from server time.
    #[serde(default = "default_wallet_proof_window_secs")]
    pub wallet_proof_window_secs: i64,
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()
    }

    /// The configured API key, treating a blank value as absent.
    pub fn completion_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn registry_owner(&self) -> &str {
        self.ledger_owner
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .unwrap_or(&self.contract_address)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_endpoint: default_gemini_endpoint(),
            ipfs_upload_url: default_ipfs_upload_url(),
            ledger_bridge_url: default_ledger_bridge_url(),
            contract_address: default_contract_address(),
            ledger_owner: None,
            predictor_url: default_predictor_url(),
            assistant_url: default_assistant_url(),
            fir_service_url: default_fir_service_url(),
            http_timeout_secs: default_http_timeout_secs(),
            wallet_proof_window_secs: default_wallet_proof_window_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_counts_as_missing() {
        let mut settings = Settings::default();
        assert!(settings.completion_key().is_none());
        settings.gemini_api_key = Some("   ".into());
        assert!(settings.completion_key().is_none());
        settings.gemini_api_key = Some("abc".into());
        assert_eq!(settings.completion_key(), Some("abc"));
    }

    #[test]
    fn registry_owner_defaults_to_contract() {
        let mut settings = Settings::default();
        assert_eq!(settings.registry_owner(), settings.contract_address);
        settings.ledger_owner = Some(" 0x2c7536e3605d9c16a7a3d7b1898e529396a65c23 ".into());
        assert_eq!(
            settings.registry_owner(),
            "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23"
        );
    }

    #[test]
    fn timeout_never_zero() {
        let settings = Settings {
            http_timeout_secs: 0,
            ..Settings::default()
        };
        assert_eq!(settings.http_timeout(), Duration::from_secs(1));
    }
}
