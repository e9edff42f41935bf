//! Screen stores for the appointment app. One feature per screen/flow,
//! all running on [`uniflow::Store`].

pub mod appointments;
pub mod booking;
pub mod home;
pub mod login;
pub mod profile;
pub mod register;

pub use appointments::{
    AppointmentsAction, AppointmentsEffect, AppointmentsFeature, AppointmentsState,
};
pub use booking::{BookingAction, BookingEffect, BookingFeature, BookingState, BookingStep};
pub use home::{HomeAction, HomeEffect, HomeFeature, HomeState};
pub use login::{LoginAction, LoginEffect, LoginFeature, LoginState};
pub use profile::{ProfileAction, ProfileEffect, ProfileFeature, ProfileState};
pub use register::{RegisterAction, RegisterEffect, RegisterFeature, RegisterState};
