use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IdType {
    #[default]
    Aadhar,
    Pan,
    Voter,
    Passport,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IncidentType {
    #[default]
    Theft,
    Assault,
    Fraud,
    Property,
    Cybercrime,
    Other,
}

/// Complaint form contents. Lives only in the filing session; never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplaintDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub id_type: IdType,
    pub id_number: String,

    pub incident_date: String,
    pub incident_time: String,
    pub incident_location: String,
    pub incident_type: IncidentType,
    pub incident_description: String,
    pub witnesses: String,

    pub declaration_accepted: bool,
}

impl ComplaintDraft {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub(crate) fn personal_complete(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.address,
            &self.id_number,
        ]
        .iter()
        .all(|f| !f.is_empty())
    }

    pub(crate) fn incident_complete(&self) -> bool {
        [
            &self.incident_date,
            &self.incident_time,
            &self.incident_location,
            &self.incident_description,
        ]
        .iter()
        .all(|f| !f.is_empty())
    }
}
