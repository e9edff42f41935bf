pub mod appointment;
pub mod clinic;
pub mod user;

pub use appointment::{Appointment, AppointmentStatus};
pub use clinic::{Clinic, Service, Slot};
pub use user::{PatientInfo, User};
