use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use serial_test::serial;
use tokio::runtime::Builder;

use shared::assistant;
use shared::completion_client::{CompletionError, CompletionProvider, GeminiClient, EMPTY_COMPLETION};
use shared::config::Settings;
use shared::dto::ChatMessage;
use shared::fir::{ComplaintDraft, FilingWizard, IdType, UploadedFir, WizardStage};
use shared::ipfs::{FirStorage, PinningClient, StorageError};
use shared::ledger::actions::register_uploaded;
use shared::ledger::{FirLedger, FirStatus, LedgerError, SignerBridgeLedger};
use shared::legal_responses::DEFAULT_RESPONSE;
use shared::wallet::WalletSession;

const CONTRACT: &str = "0x3033C34AA1b345EAc587E930c777A05683636B1f";
const OFFICER: &str = "0x1111111111111111111111111111111111111111";

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(anyhow::Error::new)
}

fn ready_draft() -> ComplaintDraft {
    ComplaintDraft {
        first_name: "Asha".into(),
        last_name: "Rao".into(),
        email: "asha@example.in".into(),
        phone: "9876543210".into(),
        address: "12 MG Road".into(),
        id_type: IdType::Passport,
        id_number: "K1234567".into(),
        incident_date: "2024-03-01".into(),
        incident_time: "21:30".into(),
        incident_location: "Brigade Road".into(),
        incident_description: "Bag snatched".into(),
        declaration_accepted: true,
        ..Default::default()
    }
}

#[test]
fn completion_relays_first_candidate() -> anyhow::Result<()> {
    runtime()?.block_on(async {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/generate")
                    .query_param("key", "test-key")
                    .body_contains("You are a helpful legal assistant for LegalTrack")
                    .body_contains("\"maxOutputTokens\":1024");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"candidates":[{"content":{"parts":[{"text":"Bail is the release of an accused."}]}}]}"#);
            })
            .await;

        let client = GeminiClient::new(server.url("/generate"), "test-key", Duration::from_secs(5))?;
        let text = client
            .complete(&[ChatMessage::user("Can you explain bail?")])
            .await?;
        assert_eq!(text, "Bail is the release of an accused.");

        mock.assert_async().await;
        Ok(())
    })
}

#[test]
fn completion_without_candidates_apologises() -> anyhow::Result<()> {
    runtime()?.block_on(async {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/generate");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"candidates":[]}"#);
            })
            .await;

        let client = GeminiClient::new(server.url("/generate"), "k", Duration::from_secs(5))?;
        let text = client.complete(&[ChatMessage::user("anything")]).await?;
        assert_eq!(text, EMPTY_COMPLETION);
        Ok(())
    })
}

#[test]
fn completion_error_falls_back_to_default_answer() -> anyhow::Result<()> {
    runtime()?.block_on(async {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/generate");
                then.status(500).body("upstream exploded");
            })
            .await;

        let client = GeminiClient::new(server.url("/generate"), "k", Duration::from_secs(5))?;
        let conversation = [ChatMessage::user("Can you explain bail?")];
        let err = client.complete(&conversation).await.unwrap_err();
        assert!(matches!(err, CompletionError::Http(500)));

        let reply = assistant::reply(&conversation, Some(&client)).await;
        assert_eq!(reply.content, DEFAULT_RESPONSE);
        Ok(())
    })
}

#[test]
fn pinning_posts_pdf_as_file_part() -> anyhow::Result<()> {
    runtime()?.block_on(async {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/upload")
                    .body_contains("name=\"file\"")
                    .body_contains("filename=\"fir.pdf\"")
                    .body_contains("application/pdf");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({"ipfsHash": "QmPinned"}));
            })
            .await;

        let storage = PinningClient::new(server.url("/upload"), Duration::from_secs(5))?;
        let mut wizard = FilingWizard::new(ready_draft());
        wizard.stage = WizardStage::Review;
        let toast = wizard.submit(&storage).await;

        assert_eq!(toast.title, "FIR Uploaded Successfully!");
        assert_eq!(wizard.stage, WizardStage::Status);
        assert_eq!(wizard.uploaded.as_ref().map(|u| u.cid.as_str()), Some("QmPinned"));
        mock.assert_async().await;
        Ok(())
    })
}

#[test]
fn pinning_failure_keeps_review_stage() -> anyhow::Result<()> {
    runtime()?.block_on(async {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/upload");
                then.status(503);
            })
            .await;

        let storage = PinningClient::new(server.url("/upload"), Duration::from_secs(5))?;
        let err = storage.store("fir.pdf", b"%PDF".to_vec()).await.unwrap_err();
        assert!(matches!(err, StorageError::Http(503)));

        let mut wizard = FilingWizard::new(ready_draft());
        wizard.stage = WizardStage::Review;
        let toast = wizard.submit(&storage).await;
        assert_eq!(toast.title, "Upload Failed");
        assert_eq!(wizard.stage, WizardStage::Review);
        assert!(wizard.uploaded.is_none());
        Ok(())
    })
}

#[test]
fn bridge_reads_and_writes_contract() -> anyhow::Result<()> {
    runtime()?.block_on(async {
        let server = MockServer::start_async().await;
        let officers = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/call")
                    .json_body_partial(r#"{"method":"getAllPoliceOfficers"}"#);
                then.status(200).json_body(json!({"result": [OFFICER]}));
            })
            .await;
        let fir = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/call")
                    .json_body_partial(r#"{"method":"getFIR","args":[7]}"#);
                then.status(200).json_body(json!({"result": {
                    "id": 7,
                    "cid": "QmSeven",
                    "status": "PendingEvidence",
                    "complainant": "0x2222222222222222222222222222222222222222",
                    "assignedOfficer": OFFICER,
                    "timestamp": 1_700_000_000
                }}));
            })
            .await;
        let update = server
            .mock_async(|when, then| {
                when.method(POST).path("/call").json_body_partial(
                    r#"{"method":"updateFIRStatus","args":[7,"Resolved","0x1111111111111111111111111111111111111111"]}"#,
                );
                then.status(200).json_body(json!({"result": null}));
            })
            .await;

        let ledger = SignerBridgeLedger::new(&server.base_url(), CONTRACT, Duration::from_secs(5))?;
        assert!(ledger.is_police_officer(&OFFICER.to_uppercase().replace("0X", "0x")).await?);

        let record = ledger.get_fir(7).await?;
        assert_eq!(record.status, FirStatus::PendingEvidence);
        assert_eq!(record.timestamp.timestamp(), 1_700_000_000);

        ledger.update_fir_status(OFFICER, 7, FirStatus::Resolved).await?;

        officers.assert_async().await;
        fir.assert_async().await;
        update.assert_async().await;
        Ok(())
    })
}

#[test]
fn bridge_registration_without_return_value_succeeds() -> anyhow::Result<()> {
    runtime()?.block_on(async {
        let server = MockServer::start_async().await;
        let register = server
            .mock_async(|when, then| {
                when.method(POST).path("/call").json_body_partial(
                    r#"{"method":"registerFIR","from":"0x2222222222222222222222222222222222222222","args":["QmFiled"]}"#,
                );
                then.status(200).json_body(json!({"result": null}));
            })
            .await;

        let ledger = SignerBridgeLedger::new(&server.base_url(), CONTRACT, Duration::from_secs(5))?;
        let citizen = "0x2222222222222222222222222222222222222222";
        assert_eq!(ledger.register_fir(citizen, "QmFiled").await?, None);

        let mut uploaded = UploadedFir::new("QmFiled".into(), 2048, chrono::Utc::now());
        let toast = register_uploaded(&ledger, &WalletSession::connected(citizen), &mut uploaded).await;
        assert_eq!(toast.title, "FIR Registered on Blockchain");
        assert!(!toast.is_destructive());
        assert!(uploaded.blockchain_registered);

        register.assert_hits_async(2).await;
        Ok(())
    })
}

#[test]
fn bridge_registration_relaying_tx_hash_succeeds() -> anyhow::Result<()> {
    runtime()?.block_on(async {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/call")
                    .json_body_partial(r#"{"method":"registerFIR"}"#);
                then.status(200).json_body(json!({"result": "0xabc123"}));
            })
            .await;

        let ledger = SignerBridgeLedger::new(&server.base_url(), CONTRACT, Duration::from_secs(5))?;
        assert_eq!(ledger.register_fir(OFFICER, "QmCid").await?, None);
        Ok(())
    })
}

#[test]
fn bridge_maps_refusals_and_outages() -> anyhow::Result<()> {
    runtime()?.block_on(async {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/call")
                    .json_body_partial(r#"{"method":"registerFIR"}"#);
                then.status(400).json_body(json!({"error": "user rejected transaction"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/call")
                    .json_body_partial(r#"{"method":"owner"}"#);
                then.status(502).body("bad gateway");
            })
            .await;

        let ledger = SignerBridgeLedger::new(&server.base_url(), CONTRACT, Duration::from_secs(5))?;
        let err = ledger.register_fir(OFFICER, "QmCid").await.unwrap_err();
        assert_eq!(err, LedgerError::Rejected("user rejected transaction".into()));
        assert!(err.is_rejection());

        let err = ledger.owner().await.unwrap_err();
        assert!(matches!(err, LedgerError::Transport(_)));
        assert!(!err.is_rejection());
        Ok(())
    })
}

#[serial]
#[test]
fn settings_come_from_environment() -> anyhow::Result<()> {
    std::env::set_var("GEMINI_API_KEY", "  ");
    std::env::set_var("HTTP_TIMEOUT_SECS", "7");
    std::env::set_var("IPFS_UPLOAD_URL", "http://pinning.local/upload");

    let settings = Settings::new()?;
    assert_eq!(settings.completion_key(), None);
    assert!(GeminiClient::from_settings(&settings)?.is_none());
    assert_eq!(settings.http_timeout(), Duration::from_secs(7));
    assert_eq!(settings.ipfs_upload_url, "http://pinning.local/upload");

    std::env::set_var("GEMINI_API_KEY", "real-key");
    let settings = Settings::new()?;
    assert_eq!(settings.completion_key(), Some("real-key"));
    assert!(GeminiClient::from_settings(&settings)?.is_some());

    for key in ["GEMINI_API_KEY", "HTTP_TIMEOUT_SECS", "IPFS_UPLOAD_URL"] {
        std::env::remove_var(key);
    }
    Ok(())
}
