//! Online FIR filing: draft, validation, report rendering and upload.

pub mod document;
pub mod draft;
pub mod file_hash;
pub mod validation;
pub mod wizard;

pub use draft::{ComplaintDraft, IdType, IncidentType};
pub use file_hash::display_checksum;
pub use validation::ValidationError;
pub use wizard::{FilingWizard, UploadedFir, WizardStage};
