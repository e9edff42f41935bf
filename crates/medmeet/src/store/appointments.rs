//! Appointment list store: upcoming and past bookings, cancel-with-confirm.

use std::sync::Arc;

use uuid::Uuid;

use uniflow::{Context, Feature};

use apibase::ApiError;

use crate::model::Appointment;
use crate::repository::BookingApi;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppointmentsState {
    pub appointments: Vec<Appointment>,
    pub is_loading: bool,
    /// Appointment awaiting cancel confirmation, if the dialog is open.
    pub pending_cancel: Option<Uuid>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum AppointmentsAction {
    Load,
    Loaded(Vec<Appointment>),
    RequestCancel(Uuid),
    ConfirmCancel,
    DismissCancel,
    /// Backend acknowledged; carries the updated appointment.
    Cancelled(Appointment),
    Failed(String),
    DismissError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppointmentsEffect {
    CancelledToast,
}

pub struct AppointmentsFeature {
    bookings: Arc<dyn BookingApi>,
}

impl AppointmentsFeature {
    pub fn new(bookings: Arc<dyn BookingApi>) -> Self {
        Self { bookings }
    }
}

impl Feature for AppointmentsFeature {
    type State = AppointmentsState;
    type Action = AppointmentsAction;
    type Effect = AppointmentsEffect;
    type Error = ApiError;

    fn reduce(
        &mut self,
        state: &AppointmentsState,
        action: AppointmentsAction,
        ctx: &mut Context<'_, Self>,
    ) -> AppointmentsState {
        match action {
            AppointmentsAction::Load => {
                let bookings = Arc::clone(&self.bookings);
                ctx.run(async move {
                    bookings
                        .appointments()
                        .await
                        .map(AppointmentsAction::Loaded)
                });
                AppointmentsState {
                    is_loading: true,
                    ..state.clone()
                }
            }

            AppointmentsAction::Loaded(appointments) => AppointmentsState {
                is_loading: false,
                appointments,
                ..state.clone()
            },

            AppointmentsAction::RequestCancel(id) => AppointmentsState {
                pending_cancel: Some(id),
                ..state.clone()
            },

            AppointmentsAction::DismissCancel => AppointmentsState {
                pending_cancel: None,
                ..state.clone()
            },

            AppointmentsAction::ConfirmCancel => {
                let Some(id) = state.pending_cancel else {
                    return state.clone();
                };
                let bookings = Arc::clone(&self.bookings);
                ctx.run(async move {
                    bookings.cancel(id).await.map(AppointmentsAction::Cancelled)
                });
                AppointmentsState {
                    pending_cancel: None,
                    ..state.clone()
                }
            }

            AppointmentsAction::Cancelled(updated) => {
                let mut appointments = state.appointments.clone();
                if let Some(slot) = appointments.iter_mut().find(|a| a.id == updated.id) {
                    *slot = updated;
                }
                ctx.effect(AppointmentsEffect::CancelledToast);
                AppointmentsState {
                    appointments,
                    ..state.clone()
                }
            }

            AppointmentsAction::Failed(message) => AppointmentsState {
                is_loading: false,
                error: Some(message),
                ..state.clone()
            },

            AppointmentsAction::DismissError => AppointmentsState {
                error: None,
                ..state.clone()
            },
        }
    }

    fn on_error(&self, error: ApiError) -> AppointmentsAction {
        AppointmentsAction::Failed(error.to_string())
    }
}
