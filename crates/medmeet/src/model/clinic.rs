// ── Clinic, service, and schedule domain types ──

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Clinic {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub specialty: Option<String>,
}

/// A bookable service offered by a clinic (consultation, checkup, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub name: String,
    pub duration_minutes: u32,
    /// Price in minor currency units, if the clinic publishes one.
    pub price: Option<i64>,
}

/// A free time slot for one service on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub id: Uuid,
    pub service_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub available: bool,
}
