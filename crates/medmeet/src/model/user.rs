// ── User and patient domain types ──

use chrono::NaiveDate;
use uuid::Uuid;

/// The signed-in account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

/// Who the appointment is for. Not necessarily the account holder --
/// people book for family members.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatientInfo {
    pub full_name: String,
    pub phone_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub note: String,
}

pub(crate) fn digit_count(s: &str) -> usize {
    s.chars().filter(char::is_ascii_digit).count()
}

impl PatientInfo {
    /// Gate for leaving the patient-info booking step.
    pub fn validate(&self) -> Result<(), String> {
        if self.full_name.trim().is_empty() {
            return Err("patient name is required".into());
        }
        if digit_count(&self.phone_number) < 10 {
            return Err("phone number must have at least 10 digits".into());
        }
        Ok(())
    }
}
