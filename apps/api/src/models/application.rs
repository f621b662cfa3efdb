use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Progress labels a job application can carry. Written in canonical case,
/// read through `FromStr` so stored labels in any case still decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ApplicationStatus {
    Applied,
    Interviewing,
    Offer,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interviewing,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
        ApplicationStatus::Withdrawn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Interviewing => "Interviewing",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Withdrawn => "Withdrawn",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<_> = ApplicationStatus::ALL.iter().map(|s| s.as_str()).collect();
        write!(
            f,
            "Unknown status '{}' (expected one of: {})",
            self.0,
            labels.join(", ")
        )
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownStatus(trimmed.to_string()))
    }
}

impl TryFrom<String> for ApplicationStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A row of the `job_applications` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: i64,
    pub user_id: Uuid,
    pub company_name: String,
    pub role: String,
    pub application_date: NaiveDate,
    pub status: ApplicationStatus,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

impl JobApplication {
    pub fn fields(&self) -> ApplicationFields {
        ApplicationFields {
            company_name: self.company_name.clone(),
            role: self.role.clone(),
            application_date: self.application_date,
            status: self.status,
            notes: self.notes.clone(),
        }
    }
}

/// The user-editable columns. A full edit replaces all of them at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationFields {
    pub company_name: String,
    pub role: String,
    pub application_date: NaiveDate,
    pub status: ApplicationStatus,
    pub notes: String,
}

/// Insert payload: the editable columns tagged with their owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewApplication {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub fields: ApplicationFields,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
