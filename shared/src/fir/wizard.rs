//! Four-stage filing wizard. The whole state travels with each request, so the
//! server keeps nothing between steps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use tracing::{info, warn};

use super::document::{self, FIR_FILE_NAME};
use super::draft::ComplaintDraft;
use super::file_hash::display_checksum;
use super::validation::{check_incident_step, check_personal_step, check_submission};
use crate::ipfs::FirStorage;
use crate::toast::Toast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WizardStage {
    #[default]
    Personal,
    Incident,
    Review,
    Status,
}

/// Receipt for a pinned FIR document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFir {
    pub cid: String,
    pub id: String,
    pub size: String,
    pub creation_date: String,
    pub file_name: String,
    pub file_hash: String,
    #[serde(default)]
    pub blockchain_registered: bool,
}

impl UploadedFir {
    pub fn new(cid: String, byte_len: usize, at: DateTime<Utc>) -> Self {
        let id = format!("{}-{FIR_FILE_NAME}", at.timestamp_millis());
        let file_hash = display_checksum(&format!("{cid}{id}"));
        Self {
            size: format!("{:.2} KB", byte_len as f64 / 1024.0),
            creation_date: at.format("%-m/%-d/%Y").to_string(),
            file_name: FIR_FILE_NAME.to_string(),
            file_hash,
            blockchain_registered: false,
            cid,
            id,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilingWizard {
    pub stage: WizardStage,
    pub draft: ComplaintDraft,
    pub uploaded: Option<UploadedFir>,
}

fn upload_failed() -> Toast {
    Toast::destructive(
        "Upload Failed",
        "Failed to upload FIR to IPFS. Please try again.",
    )
}

impl FilingWizard {
    pub fn new(draft: ComplaintDraft) -> Self {
        Self {
            draft,
            ..Default::default()
        }
    }

    /// Advances one stage when the current stage's fields pass.
    /// Review and Status do not advance through `next`.
    pub fn next(&mut self) -> Option<Toast> {
        let (check, target) = match self.stage {
            WizardStage::Personal => (check_personal_step(&self.draft), WizardStage::Incident),
            WizardStage::Incident => (check_incident_step(&self.draft), WizardStage::Review),
            WizardStage::Review | WizardStage::Status => return None,
        };
        match check {
            Ok(()) => {
                self.stage = target;
                None
            }
            Err(e) => Some(e.toast()),
        }
    }

    pub fn back(&mut self) {
        self.stage = match self.stage {
            WizardStage::Incident => WizardStage::Personal,
            WizardStage::Review => WizardStage::Incident,
            other => other,
        };
    }

    /// Validates, renders and uploads the complaint.
    ///
    /// A failed check moves to the stage holding the field. Rendering or
    /// upload failures leave the wizard on Review with "Upload Failed".
    pub async fn submit(&mut self, storage: &dyn FirStorage) -> Toast {
        if let Err(e) = check_submission(&self.draft) {
            self.stage = e.stage();
            return e.toast();
        }
        self.stage = WizardStage::Review;

        let pdf = match document::render(&self.draft) {
            Ok(pdf) => pdf,
            Err(e) => {
                warn!(%e, "rendering FIR failed");
                return upload_failed();
            }
        };
        let byte_len = pdf.len();

        match storage.store(FIR_FILE_NAME, pdf).await {
            Ok(cid) => {
                info!(%cid, bytes = byte_len, "FIR uploaded");
                let toast = Toast::info(
                    "FIR Uploaded Successfully!",
                    format!("Your FIR has been uploaded to IPFS with CID: {cid}"),
                );
                self.uploaded = Some(UploadedFir::new(cid, byte_len, Utc::now()));
                self.stage = WizardStage::Status;
                toast
            }
            Err(e) => {
                warn!(%e, "FIR upload failed");
                upload_failed()
            }
        }
    }
}
