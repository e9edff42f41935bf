// MedMeet backend HTTP client.
//
// Thin endpoint layer over the shared ApiClient; returns wire DTOs.
// Domain mapping and session handling happen in the repository.

pub mod types;

use chrono::NaiveDate;
use uuid::Uuid;

use apibase::{ApiClient, ApiError};

use self::types::{
    AppointmentDto, AuthResponse, ClinicDto, CreateBookingRequest, LoginRequest, RegisterRequest,
    ServiceDto, SlotDto, UpdateProfileRequest, UserDto,
};

/// Raw client for the MedMeet backend.
pub struct MedMeetClient {
    api: ApiClient,
}

impl MedMeetClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    // ── Auth ─────────────────────────────────────────────────────────

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.api.post("auth/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.api.post("auth/register", request).await
    }

    // ── Profile ──────────────────────────────────────────────────────

    pub async fn profile(&self) -> Result<UserDto, ApiError> {
        self.api.get("profile").await
    }

    pub async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<UserDto, ApiError> {
        self.api.put("profile", request).await
    }

    // ── Clinics / services / slots ───────────────────────────────────

    pub async fn clinics(&self) -> Result<Vec<ClinicDto>, ApiError> {
        self.api.get("clinics").await
    }

    pub async fn services(&self, clinic_id: Uuid) -> Result<Vec<ServiceDto>, ApiError> {
        self.api.get(&format!("clinics/{clinic_id}/services")).await
    }

    pub async fn slots(
        &self,
        service_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<SlotDto>, ApiError> {
        self.api
            .get(&format!("services/{service_id}/slots?date={date}"))
            .await
    }

    // ── Bookings ─────────────────────────────────────────────────────

    pub async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> Result<AppointmentDto, ApiError> {
        self.api.post("bookings", request).await
    }

    pub async fn appointments(&self) -> Result<Vec<AppointmentDto>, ApiError> {
        self.api.get("bookings").await
    }

    pub async fn cancel_appointment(&self, id: Uuid) -> Result<AppointmentDto, ApiError> {
        self.api
            .post(&format!("bookings/{id}/cancel"), &serde_json::json!({}))
            .await
    }
}
