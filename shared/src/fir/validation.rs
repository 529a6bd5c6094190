//! Field checks gating wizard transitions.

use once_cell::sync::Lazy;
use regex::Regex;

use super::draft::{ComplaintDraft, IdType};
use super::wizard::WizardStage;
use crate::toast::Toast;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

/// A failed check. `Display` is the toast description.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all personal details")]
    MissingPersonal,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Phone number must be exactly 10 digits")]
    InvalidPhone,
    #[error("Please enter a valid 12-digit Aadhaar number")]
    InvalidAadhaar,
    #[error("Please enter a valid 10-character PAN number")]
    InvalidPan,
    #[error("Please enter a valid Voter ID number")]
    InvalidVoterId,
    #[error("Please enter a valid Passport number")]
    InvalidPassport,
    #[error("Please fill in all incident details")]
    MissingIncident,
    #[error("Please check the declaration checkbox to proceed")]
    DeclarationRequired,
}

impl ValidationError {
    pub fn title(&self) -> &'static str {
        match self {
            Self::MissingPersonal => "Missing Personal Information",
            Self::InvalidEmail => "Invalid Email",
            Self::InvalidPhone => "Invalid Phone Number",
            Self::InvalidAadhaar => "Invalid Aadhaar Number",
            Self::InvalidPan => "Invalid PAN Number",
            Self::InvalidVoterId => "Invalid Voter ID",
            Self::InvalidPassport => "Invalid Passport Number",
            Self::MissingIncident => "Missing Incident Information",
            Self::DeclarationRequired => "Declaration Required",
        }
    }

    /// Stage holding the offending field.
    pub fn stage(&self) -> WizardStage {
        match self {
            Self::MissingIncident => WizardStage::Incident,
            Self::DeclarationRequired => WizardStage::Review,
            _ => WizardStage::Personal,
        }
    }

    pub fn toast(&self) -> Toast {
        Toast::destructive(self.title(), self.to_string())
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

pub fn check_id(id_type: IdType, number: &str) -> Result<(), ValidationError> {
    let len = number.chars().count();
    match id_type {
        IdType::Aadhar if len != 12 || !number.bytes().all(|b| b.is_ascii_digit()) => {
            Err(ValidationError::InvalidAadhaar)
        }
        IdType::Pan if len != 10 => Err(ValidationError::InvalidPan),
        IdType::Voter if len < 10 => Err(ValidationError::InvalidVoterId),
        IdType::Passport if len < 8 => Err(ValidationError::InvalidPassport),
        _ => Ok(()),
    }
}

/// Gate for Personal -> Incident. Email is only checked once typed.
pub fn check_personal_step(draft: &ComplaintDraft) -> Result<(), ValidationError> {
    if !draft.email.is_empty() && !is_valid_email(&draft.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_valid_phone(&draft.phone) {
        return Err(ValidationError::InvalidPhone);
    }
    check_id(draft.id_type, &draft.id_number)
}

/// Gate for Incident -> Review.
pub fn check_incident_step(draft: &ComplaintDraft) -> Result<(), ValidationError> {
    if draft.incident_complete() {
        Ok(())
    } else {
        Err(ValidationError::MissingIncident)
    }
}

/// Full re-validation before upload, in form order.
pub fn check_submission(draft: &ComplaintDraft) -> Result<(), ValidationError> {
    if !draft.personal_complete() {
        return Err(ValidationError::MissingPersonal);
    }
    if !is_valid_email(&draft.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_valid_phone(&draft.phone) {
        return Err(ValidationError::InvalidPhone);
    }
    check_id(draft.id_type, &draft.id_number)?;
    check_incident_step(draft)?;
    if !draft.declaration_accepted {
        return Err(ValidationError::DeclarationRequired);
    }
    Ok(())
}
