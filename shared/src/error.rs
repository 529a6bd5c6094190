use thiserror::Error;

use crate::completion_client::CompletionError;
use crate::ipfs::StorageError;
use crate::ledger::LedgerError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Completion client error: {0}")]
    Completion(#[from] CompletionError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error("IO error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
