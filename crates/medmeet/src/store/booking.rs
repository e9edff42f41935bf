//! Booking flow store: the four-step wizard from service selection to
//! confirmation.
//!
//! Forward transitions are gated by per-step validation; a failed gate
//! records a validation error and leaves the step unchanged. Slots are
//! fetched when the schedule step is entered and refetched on date change.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use uniflow::{Context, Feature};

use apibase::ApiError;

use crate::model::{Appointment, PatientInfo, Service, Slot};
use crate::repository::{BookingApi, BookingRequest, ClinicApi};

/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum BookingStep {
    #[strum(serialize = "Select service")]
    SelectService,
    #[strum(serialize = "Patient info")]
    PatientInfo,
    #[strum(serialize = "Select schedule")]
    SelectSchedule,
    #[strum(serialize = "Confirmation")]
    Confirmation,
}

impl BookingStep {
    pub fn next(self) -> Option<Self> {
        match self {
            Self::SelectService => Some(Self::PatientInfo),
            Self::PatientInfo => Some(Self::SelectSchedule),
            Self::SelectSchedule => Some(Self::Confirmation),
            Self::Confirmation => None,
        }
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            Self::SelectService => None,
            Self::PatientInfo => Some(Self::SelectService),
            Self::SelectSchedule => Some(Self::PatientInfo),
            Self::Confirmation => Some(Self::SelectSchedule),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingState {
    pub clinic_id: Uuid,
    pub step: BookingStep,
    pub services: Vec<Service>,
    pub selected_service: Option<Uuid>,
    pub patient: PatientInfo,
    pub date: NaiveDate,
    pub slots: Vec<Slot>,
    pub selected_slot: Option<Uuid>,
    pub is_loading: bool,
    pub is_submitting: bool,
    /// Step-gate failure shown inline; cleared on the next field edit or
    /// via ClearValidateError.
    pub validate_error: Option<String>,
    pub error: Option<String>,
}

impl BookingState {
    /// `date` is the initially shown schedule day (the UI passes today).
    pub fn new(clinic_id: Uuid, date: NaiveDate) -> Self {
        Self {
            clinic_id,
            step: BookingStep::SelectService,
            services: Vec::new(),
            selected_service: None,
            patient: PatientInfo::default(),
            date,
            slots: Vec::new(),
            selected_slot: None,
            is_loading: false,
            is_submitting: false,
            validate_error: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum BookingAction {
    /// Screen appeared: load the clinic's services.
    Opened,
    ServicesLoaded(Vec<Service>),
    SelectService(Uuid),
    PatientNameChanged(String),
    PatientPhoneChanged(String),
    PatientDobChanged(Option<NaiveDate>),
    PatientNoteChanged(String),
    DateChanged(NaiveDate),
    SlotsLoaded(Vec<Slot>),
    SelectSlot(Uuid),
    NextStep,
    PrevStep,
    ClearValidateError,
    Submit,
    Booked(Appointment),
    Failed(String),
    DismissError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookingEffect {
    /// Booking created; navigate to the confirmation screen.
    Confirmed(Uuid),
}

pub struct BookingFeature {
    clinics: Arc<dyn ClinicApi>,
    bookings: Arc<dyn BookingApi>,
}

impl BookingFeature {
    pub fn new(clinics: Arc<dyn ClinicApi>, bookings: Arc<dyn BookingApi>) -> Self {
        Self { clinics, bookings }
    }

    /// Gate for leaving the current step.
    fn validate_step(state: &BookingState) -> Result<(), String> {
        match state.step {
            BookingStep::SelectService => {
                if state.selected_service.is_none() {
                    return Err("select a service to continue".into());
                }
                Ok(())
            }
            BookingStep::PatientInfo => state.patient.validate(),
            BookingStep::SelectSchedule => {
                if state.selected_slot.is_none() {
                    return Err("select a time slot".into());
                }
                Ok(())
            }
            BookingStep::Confirmation => Ok(()),
        }
    }

    fn load_slots(&self, ctx: &mut Context<'_, Self>, service_id: Uuid, date: NaiveDate) {
        let clinics = Arc::clone(&self.clinics);
        ctx.run(async move {
            clinics
                .slots(service_id, date)
                .await
                .map(BookingAction::SlotsLoaded)
        });
    }
}

impl Feature for BookingFeature {
    type State = BookingState;
    type Action = BookingAction;
    type Effect = BookingEffect;
    type Error = ApiError;

    fn reduce(
        &mut self,
        state: &BookingState,
        action: BookingAction,
        ctx: &mut Context<'_, Self>,
    ) -> BookingState {
        match action {
            BookingAction::Opened => {
                let clinics = Arc::clone(&self.clinics);
                let clinic_id = state.clinic_id;
                ctx.run(async move {
                    clinics
                        .services(clinic_id)
                        .await
                        .map(BookingAction::ServicesLoaded)
                });
                BookingState {
                    is_loading: true,
                    ..state.clone()
                }
            }

            BookingAction::ServicesLoaded(services) => BookingState {
                is_loading: false,
                services,
                ..state.clone()
            },

            BookingAction::SelectService(id) => BookingState {
                selected_service: Some(id),
                // A different service has different slots.
                slots: Vec::new(),
                selected_slot: None,
                validate_error: None,
                ..state.clone()
            },

            BookingAction::PatientNameChanged(full_name) => BookingState {
                patient: PatientInfo {
                    full_name,
                    ..state.patient.clone()
                },
                validate_error: None,
                ..state.clone()
            },

            BookingAction::PatientPhoneChanged(phone_number) => BookingState {
                patient: PatientInfo {
                    phone_number,
                    ..state.patient.clone()
                },
                validate_error: None,
                ..state.clone()
            },

            BookingAction::PatientDobChanged(date_of_birth) => BookingState {
                patient: PatientInfo {
                    date_of_birth,
                    ..state.patient.clone()
                },
                validate_error: None,
                ..state.clone()
            },

            BookingAction::PatientNoteChanged(note) => BookingState {
                patient: PatientInfo {
                    note,
                    ..state.patient.clone()
                },
                ..state.clone()
            },

            BookingAction::DateChanged(date) => {
                let mut next = BookingState {
                    date,
                    slots: Vec::new(),
                    selected_slot: None,
                    ..state.clone()
                };
                if state.step == BookingStep::SelectSchedule {
                    if let Some(service_id) = state.selected_service {
                        self.load_slots(ctx, service_id, date);
                        next.is_loading = true;
                    }
                }
                next
            }

            BookingAction::SlotsLoaded(slots) => BookingState {
                is_loading: false,
                slots,
                ..state.clone()
            },

            BookingAction::SelectSlot(id) => {
                let available = state
                    .slots
                    .iter()
                    .any(|s| s.id == id && s.available);
                if !available {
                    return state.clone();
                }
                BookingState {
                    selected_slot: Some(id),
                    validate_error: None,
                    ..state.clone()
                }
            }

            BookingAction::NextStep => {
                if let Err(message) = Self::validate_step(state) {
                    return BookingState {
                        validate_error: Some(message),
                        ..state.clone()
                    };
                }
                let Some(next_step) = state.step.next() else {
                    return state.clone();
                };

                let mut next = BookingState {
                    step: next_step,
                    validate_error: None,
                    ..state.clone()
                };
                if next_step == BookingStep::SelectSchedule {
                    if let Some(service_id) = state.selected_service {
                        self.load_slots(ctx, service_id, state.date);
                        next.is_loading = true;
                    }
                }
                next
            }

            BookingAction::PrevStep => match state.step.prev() {
                Some(prev_step) => BookingState {
                    step: prev_step,
                    validate_error: None,
                    ..state.clone()
                },
                None => state.clone(),
            },

            BookingAction::ClearValidateError => BookingState {
                validate_error: None,
                ..state.clone()
            },

            BookingAction::Submit => {
                if state.step != BookingStep::Confirmation || state.is_submitting {
                    return state.clone();
                }
                let (Some(service_id), Some(slot_id)) =
                    (state.selected_service, state.selected_slot)
                else {
                    return BookingState {
                        validate_error: Some("booking is incomplete".into()),
                        ..state.clone()
                    };
                };

                let bookings = Arc::clone(&self.bookings);
                let request = BookingRequest {
                    service_id,
                    slot_id,
                    patient: state.patient.clone(),
                };
                ctx.run(async move {
                    bookings
                        .create_booking(request)
                        .await
                        .map(BookingAction::Booked)
                });
                BookingState {
                    is_submitting: true,
                    ..state.clone()
                }
            }

            BookingAction::Booked(appointment) => {
                ctx.effect(BookingEffect::Confirmed(appointment.id));
                BookingState {
                    is_submitting: false,
                    ..state.clone()
                }
            }

            BookingAction::Failed(message) => BookingState {
                is_loading: false,
                is_submitting: false,
                error: Some(message),
                ..state.clone()
            },

            BookingAction::DismissError => BookingState {
                error: None,
                ..state.clone()
            },
        }
    }

    fn on_error(&self, error: ApiError) -> BookingAction {
        BookingAction::Failed(error.to_string())
    }
}
