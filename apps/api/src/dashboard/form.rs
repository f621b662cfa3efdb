use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::application::{ApplicationFields, ApplicationStatus, UnknownStatus};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Invalid application date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error(transparent)]
    Status(#[from] UnknownStatus),
}

/// Raw add/edit form state, exactly as typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationForm {
    pub company_name: String,
    pub role: String,
    pub application_date: String,
    pub status: String,
    pub notes: String,
}

impl Default for ApplicationForm {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            role: String::new(),
            application_date: String::new(),
            status: ApplicationStatus::Applied.to_string(),
            notes: String::new(),
        }
    }
}

impl From<&ApplicationFields> for ApplicationForm {
    fn from(fields: &ApplicationFields) -> Self {
        Self {
            company_name: fields.company_name.clone(),
            role: fields.role.clone(),
            application_date: fields.application_date.format(DATE_FORMAT).to_string(),
            status: fields.status.to_string(),
            notes: fields.notes.clone(),
        }
    }
}

fn required<'a>(value: &'a str, label: &'static str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Missing(label))
    } else {
        Ok(value)
    }
}

impl ApplicationForm {
    /// Checks required-field presence (company, role, date, status) and
    /// parses the typed values. Notes are optional and kept as typed.
    pub fn validate(&self) -> Result<ApplicationFields, FormError> {
        let company_name = required(&self.company_name, "Company")?;
        let role = required(&self.role, "Role")?;
        let date = required(&self.application_date, "Application date")?;
        let status = required(&self.status, "Status")?;

        let application_date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| FormError::InvalidDate(date.to_string()))?;

        Ok(ApplicationFields {
            company_name: company_name.to_string(),
            role: role.to_string(),
            application_date,
            status: status.parse()?,
            notes: self.notes.clone(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ApplicationForm {
        ApplicationForm {
            company_name: " Globex ".into(),
            role: "Data Engineer".into(),
            application_date: "2024-02-29".into(),
            status: "interviewing".into(),
            notes: "Referral from Sam".into(),
        }
    }

    #[test]
    fn test_validate_trims_and_parses() {
        let fields = filled().validate().unwrap();
        assert_eq!(fields.company_name, "Globex");
        assert_eq!(
            fields.application_date,
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(fields.status, ApplicationStatus::Interviewing);
        assert_eq!(fields.notes, "Referral from Sam");
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mut form = filled();
        form.role = "   ".into();
        assert_eq!(form.validate(), Err(FormError::Missing("Role")));

        form.company_name.clear();
        assert_eq!(form.validate(), Err(FormError::Missing("Company")));
    }

    #[test]
    fn test_validate_notes_optional() {
        let mut form = filled();
        form.notes.clear();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_date() {
        let mut form = filled();
        form.application_date = "29/02/2024".into();
        assert_eq!(
            form.validate(),
            Err(FormError::InvalidDate("29/02/2024".into()))
        );
    }

    #[test]
    fn test_validate_rejects_unknown_status() {
        let mut form = filled();
        form.status = "Ghosted".into();
        let err = form.validate().unwrap_err();
        assert!(err.to_string().starts_with("Unknown status 'Ghosted'"));
    }

    #[test]
    fn test_clear_resets_to_defaults() {
        let mut form = filled();
        form.clear();
        assert_eq!(form, ApplicationForm::default());
        assert_eq!(form.status, "Applied");
    }

    #[test]
    fn test_prefill_from_fields() {
        let fields = filled().validate().unwrap();
        let form = ApplicationForm::from(&fields);
        assert_eq!(form.application_date, "2024-02-29");
        assert_eq!(form.status, "Interviewing");
        assert_eq!(form.validate().unwrap(), fields);
    }
}
