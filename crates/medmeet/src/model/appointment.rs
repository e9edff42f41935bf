// ── Appointment domain types ──

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Unknown,
}

impl AppointmentStatus {
    /// A booking the user still plans to attend.
    pub fn is_upcoming(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub clinic_name: String,
    pub service_name: String,
    pub starts_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub patient_name: String,
}
