//! MedMeet app core: appointment-booking API client, domain model, and
//! screen stores.
//!
//! The UI layer subscribes to each store's state stream, forwards user
//! intent as actions, and reacts to one-shot effects (navigation, toasts).

pub mod api;
pub mod convert;
pub mod model;
pub mod repository;
pub mod store;

pub use model::{Appointment, AppointmentStatus, Clinic, PatientInfo, Service, Slot, User};
pub use repository::{
    AuthApi, BookingApi, BookingRequest, ClinicApi, MedMeetRepository, ProfileApi, ProfileUpdate,
    Registration,
};
