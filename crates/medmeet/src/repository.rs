// ── MedMeet repositories ──
//
// Data access seams for the screen stores, split by concern the way the
// screens consume them. One concrete repository implements all of them
// over the backend client; tests substitute in-memory fakes per trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use secrecy::SecretString;
use tracing::info;
use uuid::Uuid;

use apibase::{ApiError, Session, SessionHandle};

use crate::api::MedMeetClient;
use crate::api::types::{
    CreateBookingRequest, LoginRequest, RegisterRequest, UpdateProfileRequest,
};
use crate::model::{Appointment, Clinic, PatientInfo, Service, Slot, User};

// ── Domain-side request shapes ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub service_id: Uuid,
    pub slot_id: Uuid,
    pub patient: PatientInfo,
}

// ── Seams ────────────────────────────────────────────────────────────

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Authenticate and install the resulting session into the shared
    /// session handle.
    async fn login(&self, username: &str, password: &str) -> Result<User, ApiError>;

    /// Create an account; the backend signs the new user in directly.
    async fn register(&self, registration: Registration) -> Result<User, ApiError>;
}

#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn profile(&self) -> Result<User, ApiError>;

    async fn update_profile(&self, update: ProfileUpdate) -> Result<User, ApiError>;
}

#[async_trait]
pub trait ClinicApi: Send + Sync {
    async fn clinics(&self) -> Result<Vec<Clinic>, ApiError>;

    async fn services(&self, clinic_id: Uuid) -> Result<Vec<Service>, ApiError>;

    async fn slots(&self, service_id: Uuid, date: NaiveDate) -> Result<Vec<Slot>, ApiError>;
}

#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn create_booking(&self, request: BookingRequest) -> Result<Appointment, ApiError>;

    async fn appointments(&self) -> Result<Vec<Appointment>, ApiError>;

    async fn cancel(&self, id: Uuid) -> Result<Appointment, ApiError>;
}

// ── Concrete implementation ──────────────────────────────────────────

/// Production repository over the MedMeet backend.
pub struct MedMeetRepository {
    client: MedMeetClient,
    session: SessionHandle,
}

impl MedMeetRepository {
    pub fn new(client: MedMeetClient, session: SessionHandle) -> Self {
        Self { client, session }
    }

    fn install_session(&self, token: String, user: &User) {
        self.session.install(Session::new(
            user.id.to_string(),
            Some(user.full_name.clone()),
            SecretString::from(token),
        ));
    }
}

#[async_trait]
impl AuthApi for MedMeetRepository {
    async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let response = self
            .client
            .login(&LoginRequest {
                username: username.to_owned(),
                password: password.to_owned(),
            })
            .await?;

        let user = User::from(response.user);
        self.install_session(response.token, &user);
        info!(user = %user.username, "signed in");
        Ok(user)
    }

    async fn register(&self, registration: Registration) -> Result<User, ApiError> {
        let response = self
            .client
            .register(&RegisterRequest {
                username: registration.username,
                password: registration.password,
                full_name: registration.full_name,
                email: registration.email,
            })
            .await?;

        let user = User::from(response.user);
        self.install_session(response.token, &user);
        info!(user = %user.username, "account created");
        Ok(user)
    }
}

#[async_trait]
impl ProfileApi for MedMeetRepository {
    async fn profile(&self) -> Result<User, ApiError> {
        Ok(self.client.profile().await?.into())
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<User, ApiError> {
        let dto = self
            .client
            .update_profile(&UpdateProfileRequest {
                full_name: update.full_name,
                email: update.email,
                phone_number: update.phone_number,
                date_of_birth: update.date_of_birth,
            })
            .await?;
        Ok(dto.into())
    }
}

#[async_trait]
impl ClinicApi for MedMeetRepository {
    async fn clinics(&self) -> Result<Vec<Clinic>, ApiError> {
        let dtos = self.client.clinics().await?;
        Ok(dtos.into_iter().map(Clinic::from).collect())
    }

    async fn services(&self, clinic_id: Uuid) -> Result<Vec<Service>, ApiError> {
        let dtos = self.client.services(clinic_id).await?;
        Ok(dtos.into_iter().map(Service::from).collect())
    }

    async fn slots(&self, service_id: Uuid, date: NaiveDate) -> Result<Vec<Slot>, ApiError> {
        let dtos = self.client.slots(service_id, date).await?;
        Ok(dtos.into_iter().map(Slot::from).collect())
    }
}

#[async_trait]
impl BookingApi for MedMeetRepository {
    async fn create_booking(&self, request: BookingRequest) -> Result<Appointment, ApiError> {
        let dto = self
            .client
            .create_booking(&CreateBookingRequest {
                service_id: request.service_id,
                slot_id: request.slot_id,
                patient: request.patient.into(),
            })
            .await?;
        Ok(dto.into())
    }

    async fn appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        let dtos = self.client.appointments().await?;
        Ok(dtos.into_iter().map(Appointment::from).collect())
    }

    async fn cancel(&self, id: Uuid) -> Result<Appointment, ApiError> {
        Ok(self.client.cancel_appointment(id).await?.into())
    }
}
