// Booking wizard tests: step gates, validation errors, and the full
// happy-path flow against in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use apibase::ApiError;
use medmeet::store::{
    BookingAction, BookingEffect, BookingFeature, BookingState, BookingStep,
};
use medmeet::{
    Appointment, AppointmentStatus, BookingApi, BookingRequest, Clinic, ClinicApi, PatientInfo,
    Service, Slot,
};
use uniflow::{ReducerHarness, Store};

fn clinic_id() -> Uuid {
    Uuid::from_u128(1)
}
fn service_id() -> Uuid {
    Uuid::from_u128(2)
}
fn slot_id() -> Uuid {
    Uuid::from_u128(3)
}

fn a_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 10).unwrap()
}

fn a_service() -> Service {
    Service {
        id: service_id(),
        clinic_id: clinic_id(),
        name: "General checkup".into(),
        duration_minutes: 30,
        price: Some(350_000),
    }
}

fn a_slot(available: bool) -> Slot {
    Slot {
        id: slot_id(),
        service_id: service_id(),
        starts_at: Utc.with_ymd_and_hms(2026, 8, 10, 2, 0, 0).unwrap(),
        ends_at: Utc.with_ymd_and_hms(2026, 8, 10, 2, 30, 0).unwrap(),
        available,
    }
}

fn valid_patient() -> PatientInfo {
    PatientInfo {
        full_name: "Tran Thi Mai".into(),
        phone_number: "0912345678".into(),
        ..PatientInfo::default()
    }
}

// ── Fakes ───────────────────────────────────────────────────────────

struct FakeClinics;

#[async_trait]
impl ClinicApi for FakeClinics {
    async fn clinics(&self) -> Result<Vec<Clinic>, ApiError> {
        Ok(vec![Clinic {
            id: clinic_id(),
            name: "An Binh Clinic".into(),
            address: "12 Le Loi".into(),
            specialty: Some("General".into()),
        }])
    }

    async fn services(&self, _clinic_id: Uuid) -> Result<Vec<Service>, ApiError> {
        Ok(vec![a_service()])
    }

    async fn slots(&self, _service_id: Uuid, _date: NaiveDate) -> Result<Vec<Slot>, ApiError> {
        Ok(vec![a_slot(true)])
    }
}

struct FakeBookings;

#[async_trait]
impl BookingApi for FakeBookings {
    async fn create_booking(&self, request: BookingRequest) -> Result<Appointment, ApiError> {
        Ok(Appointment {
            id: Uuid::from_u128(9),
            clinic_name: "An Binh Clinic".into(),
            service_name: "General checkup".into(),
            starts_at: Utc.with_ymd_and_hms(2026, 8, 10, 2, 0, 0).unwrap(),
            status: AppointmentStatus::Pending,
            patient_name: request.patient.full_name,
        })
    }

    async fn appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        Ok(Vec::new())
    }

    async fn cancel(&self, _id: Uuid) -> Result<Appointment, ApiError> {
        Err(ApiError::Unknown("not used".into()))
    }
}

fn feature() -> BookingFeature {
    BookingFeature::new(Arc::new(FakeClinics), Arc::new(FakeBookings))
}

fn harness_at(step: BookingStep, patient: PatientInfo) -> ReducerHarness<BookingFeature> {
    let state = BookingState {
        step,
        services: vec![a_service()],
        selected_service: Some(service_id()),
        patient,
        ..BookingState::new(clinic_id(), a_date())
    };
    ReducerHarness::new(feature(), state)
}

// ── Step gates ──────────────────────────────────────────────────────

#[test]
fn short_phone_number_blocks_the_patient_info_step() {
    let mut harness = harness_at(
        BookingStep::PatientInfo,
        PatientInfo {
            full_name: "Tran Thi Mai".into(),
            phone_number: "09123".into(),
            ..PatientInfo::default()
        },
    );

    let state = harness.dispatch(BookingAction::NextStep);

    assert_eq!(state.step, BookingStep::PatientInfo);
    assert_eq!(
        state.validate_error.as_deref(),
        Some("phone number must have at least 10 digits")
    );
}

#[test]
fn valid_patient_info_advances_to_the_schedule_step() {
    let mut harness = harness_at(BookingStep::PatientInfo, valid_patient());

    let state = harness.dispatch(BookingAction::NextStep);

    assert_eq!(state.step, BookingStep::SelectSchedule);
    assert_eq!(state.validate_error, None);
}

#[test]
fn next_without_a_service_selection_is_blocked() {
    let state = BookingState::new(clinic_id(), a_date());
    let mut harness = ReducerHarness::new(feature(), state);

    let state = harness.dispatch(BookingAction::NextStep);

    assert_eq!(state.step, BookingStep::SelectService);
    assert!(state.validate_error.is_some());
}

#[test]
fn next_without_a_slot_selection_is_blocked() {
    let mut harness = harness_at(BookingStep::SelectSchedule, valid_patient());

    let state = harness.dispatch(BookingAction::NextStep);

    assert_eq!(state.step, BookingStep::SelectSchedule);
    assert!(state.validate_error.is_some());
}

#[test]
fn editing_a_patient_field_clears_the_validate_error() {
    let mut harness = harness_at(
        BookingStep::PatientInfo,
        PatientInfo {
            full_name: "Tran Thi Mai".into(),
            phone_number: "09123".into(),
            ..PatientInfo::default()
        },
    );
    harness.dispatch(BookingAction::NextStep);
    assert!(harness.state().validate_error.is_some());

    let state = harness.dispatch(BookingAction::PatientPhoneChanged("0912345678".into()));
    assert_eq!(state.validate_error, None);
}

#[test]
fn prev_from_the_first_step_is_a_no_op() {
    let state = BookingState::new(clinic_id(), a_date());
    let mut harness = ReducerHarness::new(feature(), state.clone());

    assert_eq!(*harness.dispatch(BookingAction::PrevStep), state);
}

#[test]
fn unavailable_slots_cannot_be_selected() {
    let mut harness = harness_at(BookingStep::SelectSchedule, valid_patient());
    harness.dispatch(BookingAction::SlotsLoaded(vec![a_slot(false)]));

    let state = harness.dispatch(BookingAction::SelectSlot(slot_id()));
    assert_eq!(state.selected_slot, None);
}

#[test]
fn changing_the_service_discards_stale_slots() {
    let mut harness = harness_at(BookingStep::SelectSchedule, valid_patient());
    harness.dispatch(BookingAction::SlotsLoaded(vec![a_slot(true)]));
    harness.dispatch(BookingAction::SelectSlot(slot_id()));

    let state = harness.dispatch(BookingAction::SelectService(Uuid::from_u128(77)));
    assert!(state.slots.is_empty());
    assert_eq!(state.selected_slot, None);
}

#[test]
fn submit_outside_confirmation_is_ignored() {
    let mut harness = harness_at(BookingStep::SelectSchedule, valid_patient());
    let before = harness.state().clone();

    assert_eq!(*harness.dispatch(BookingAction::Submit), before);
    assert_eq!(harness.take_effect(), None);
}

// ── Full flow ───────────────────────────────────────────────────────

#[tokio::test]
async fn happy_path_walks_all_four_steps_and_books() {
    let store = Store::spawn(feature(), BookingState::new(clinic_id(), a_date()));
    let mut rx = store.watch();

    store.send(BookingAction::Opened);
    rx.wait_for(|s| !s.services.is_empty())
        .await
        .expect("store loop alive");

    store.send(BookingAction::SelectService(service_id()));
    store.send(BookingAction::NextStep); // → PatientInfo
    store.send(BookingAction::PatientNameChanged("Tran Thi Mai".into()));
    store.send(BookingAction::PatientPhoneChanged("0912345678".into()));
    store.send(BookingAction::NextStep); // → SelectSchedule, loads slots

    rx.wait_for(|s| !s.slots.is_empty())
        .await
        .expect("store loop alive");

    store.send(BookingAction::SelectSlot(slot_id()));
    store.send(BookingAction::NextStep); // → Confirmation
    rx.wait_for(|s| s.step == BookingStep::Confirmation)
        .await
        .expect("store loop alive");

    store.send(BookingAction::Submit);
    let effect = store.effects().recv().await;
    assert_eq!(effect, BookingEffect::Confirmed(Uuid::from_u128(9)));

    let settled = rx
        .wait_for(|s| !s.is_submitting)
        .await
        .expect("store loop alive")
        .clone();
    assert_eq!(settled.error, None);
}
