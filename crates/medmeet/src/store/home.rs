//! Home screen store: clinic directory plus upcoming appointments.

use std::sync::Arc;

use uuid::Uuid;

use uniflow::{Context, Feature};

use apibase::ApiError;

use crate::model::{Appointment, Clinic};
use crate::repository::{BookingApi, ClinicApi};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeState {
    pub clinics: Vec<Clinic>,
    pub upcoming: Vec<Appointment>,
    /// Number of in-flight load calls; the screen shows a spinner while
    /// this is non-zero.
    pub pending_loads: u8,
    pub error: Option<String>,
}

impl HomeState {
    pub fn is_loading(&self) -> bool {
        self.pending_loads > 0
    }
}

#[derive(Debug, Clone)]
pub enum HomeAction {
    /// Load (or reload) both halves of the screen.
    Load,
    ClinicsLoaded(Vec<Clinic>),
    AppointmentsLoaded(Vec<Appointment>),
    ClinicSelected(Uuid),
    OpenAppointments,
    Failed(String),
    DismissError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HomeEffect {
    OpenBooking(Uuid),
    OpenAppointments,
}

pub struct HomeFeature {
    clinics: Arc<dyn ClinicApi>,
    bookings: Arc<dyn BookingApi>,
}

impl HomeFeature {
    pub fn new(clinics: Arc<dyn ClinicApi>, bookings: Arc<dyn BookingApi>) -> Self {
        Self { clinics, bookings }
    }
}

impl Feature for HomeFeature {
    type State = HomeState;
    type Action = HomeAction;
    type Effect = HomeEffect;
    type Error = ApiError;

    fn reduce(
        &mut self,
        state: &HomeState,
        action: HomeAction,
        ctx: &mut Context<'_, Self>,
    ) -> HomeState {
        match action {
            HomeAction::Load => {
                let clinics = Arc::clone(&self.clinics);
                ctx.run(async move { clinics.clinics().await.map(HomeAction::ClinicsLoaded) });

                let bookings = Arc::clone(&self.bookings);
                ctx.run(async move {
                    bookings
                        .appointments()
                        .await
                        .map(HomeAction::AppointmentsLoaded)
                });

                HomeState {
                    pending_loads: 2,
                    error: None,
                    ..state.clone()
                }
            }

            HomeAction::ClinicsLoaded(clinics) => HomeState {
                clinics,
                pending_loads: state.pending_loads.saturating_sub(1),
                ..state.clone()
            },

            HomeAction::AppointmentsLoaded(appointments) => HomeState {
                upcoming: appointments
                    .into_iter()
                    .filter(|a| a.status.is_upcoming())
                    .collect(),
                pending_loads: state.pending_loads.saturating_sub(1),
                ..state.clone()
            },

            HomeAction::ClinicSelected(clinic_id) => {
                ctx.effect(HomeEffect::OpenBooking(clinic_id));
                state.clone()
            }

            HomeAction::OpenAppointments => {
                ctx.effect(HomeEffect::OpenAppointments);
                state.clone()
            }

            HomeAction::Failed(message) => HomeState {
                pending_loads: state.pending_loads.saturating_sub(1),
                error: Some(message),
                ..state.clone()
            },

            HomeAction::DismissError => HomeState {
                error: None,
                ..state.clone()
            },
        }
    }

    fn on_error(&self, error: ApiError) -> HomeAction {
        HomeAction::Failed(error.to_string())
    }
}
