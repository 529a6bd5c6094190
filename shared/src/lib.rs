//! Domain logic shared by the LegalTrack services: IPC section prediction,
//! the legal assistant's canned answers and completion client, the FIR
//! filing wizard, document storage and the FIR registry ledger, plus the
//! configuration, error and logging plumbing they all use.

pub mod account_proof;
pub mod assistant;
pub mod completion_client;
pub mod config;
pub mod dto;
pub mod error;
pub mod fir;
pub mod ipc_catalog;
pub mod ipc_predictor;
pub mod ipfs;
pub mod ledger;
pub mod legal_responses;
pub mod logging;
pub mod toast;
pub mod wallet;
