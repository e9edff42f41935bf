// Registration store tests: field validation and the sign-up flow.

use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use apibase::ApiError;
use medmeet::store::{RegisterAction, RegisterEffect, RegisterFeature, RegisterState};
use medmeet::{AuthApi, Registration, User};
use uniflow::{ReducerHarness, Store};

struct FakeAuth;

#[async_trait]
impl AuthApi for FakeAuth {
    async fn login(&self, _username: &str, _password: &str) -> Result<User, ApiError> {
        Err(ApiError::Unknown("not used".into()))
    }

    async fn register(&self, registration: Registration) -> Result<User, ApiError> {
        Ok(User {
            id: Uuid::from_u128(7),
            username: registration.username,
            full_name: registration.full_name,
            email: registration.email,
            phone_number: None,
            date_of_birth: None,
        })
    }
}

fn filled_state() -> RegisterState {
    RegisterState {
        username: "mai.tran".into(),
        password: "s3cret-pw".into(),
        confirm_password: "s3cret-pw".into(),
        full_name: "Tran Thi Mai".into(),
        email: "mai@example.com".into(),
        ..RegisterState::default()
    }
}

#[test]
fn mismatched_passwords_are_rejected() {
    let mut harness = ReducerHarness::new(
        RegisterFeature::new(Arc::new(FakeAuth)),
        RegisterState {
            confirm_password: "something-else".into(),
            ..filled_state()
        },
    );
    let state = harness.dispatch(RegisterAction::Submit);
    assert_eq!(state.error.as_deref(), Some("passwords do not match"));
    assert!(!state.is_submitting);
}

#[test]
fn short_password_is_rejected() {
    let mut harness = ReducerHarness::new(
        RegisterFeature::new(Arc::new(FakeAuth)),
        RegisterState {
            password: "short".into(),
            confirm_password: "short".into(),
            ..filled_state()
        },
    );
    let state = harness.dispatch(RegisterAction::Submit);
    assert!(state.error.as_deref().unwrap().contains("at least 8"));
}

#[tokio::test]
async fn successful_registration_navigates_home() {
    let store = Store::spawn(RegisterFeature::new(Arc::new(FakeAuth)), filled_state());
    store.send(RegisterAction::Submit);

    assert_eq!(store.effects().recv().await, RegisterEffect::NavigateHome);

    let mut rx = store.watch();
    let settled = rx
        .wait_for(|s| !s.is_submitting && s.password.is_empty())
        .await
        .expect("store loop alive")
        .clone();
    assert_eq!(settled.error, None);
}
