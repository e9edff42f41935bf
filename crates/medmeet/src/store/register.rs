//! Registration screen store. Mirrors login, plus password confirmation.

use std::sync::Arc;

use uniflow::{Context, Feature};

use apibase::ApiError;

use crate::model::User;
use crate::repository::{AuthApi, Registration};

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegisterState {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub email: String,
    pub is_submitting: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum RegisterAction {
    UsernameChanged(String),
    PasswordChanged(String),
    ConfirmPasswordChanged(String),
    FullNameChanged(String),
    EmailChanged(String),
    Submit,
    Registered(User),
    Failed(String),
    DismissError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegisterEffect {
    NavigateHome,
}

pub struct RegisterFeature {
    auth: Arc<dyn AuthApi>,
}

impl RegisterFeature {
    pub fn new(auth: Arc<dyn AuthApi>) -> Self {
        Self { auth }
    }

    fn validate(state: &RegisterState) -> Result<Registration, String> {
        if state.username.trim().is_empty() {
            return Err("username is required".into());
        }
        if state.full_name.trim().is_empty() {
            return Err("full name is required".into());
        }
        if state.password.len() < MIN_PASSWORD_LEN {
            return Err(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            ));
        }
        if state.password != state.confirm_password {
            return Err("passwords do not match".into());
        }
        let email = state.email.trim();
        if !email.is_empty() && !email.contains('@') {
            return Err("email address looks invalid".into());
        }
        Ok(Registration {
            username: state.username.trim().to_owned(),
            password: state.password.clone(),
            full_name: state.full_name.trim().to_owned(),
            email: (!email.is_empty()).then(|| email.to_owned()),
        })
    }
}

impl Feature for RegisterFeature {
    type State = RegisterState;
    type Action = RegisterAction;
    type Effect = RegisterEffect;
    type Error = ApiError;

    fn reduce(
        &mut self,
        state: &RegisterState,
        action: RegisterAction,
        ctx: &mut Context<'_, Self>,
    ) -> RegisterState {
        match action {
            RegisterAction::UsernameChanged(username) => RegisterState {
                username,
                error: None,
                ..state.clone()
            },
            RegisterAction::PasswordChanged(password) => RegisterState {
                password,
                error: None,
                ..state.clone()
            },
            RegisterAction::ConfirmPasswordChanged(confirm_password) => RegisterState {
                confirm_password,
                error: None,
                ..state.clone()
            },
            RegisterAction::FullNameChanged(full_name) => RegisterState {
                full_name,
                error: None,
                ..state.clone()
            },
            RegisterAction::EmailChanged(email) => RegisterState {
                email,
                error: None,
                ..state.clone()
            },

            RegisterAction::Submit => {
                if state.is_submitting {
                    return state.clone();
                }
                match Self::validate(state) {
                    Ok(registration) => {
                        let auth = Arc::clone(&self.auth);
                        ctx.run(async move {
                            auth.register(registration)
                                .await
                                .map(RegisterAction::Registered)
                        });
                        RegisterState {
                            is_submitting: true,
                            error: None,
                            ..state.clone()
                        }
                    }
                    Err(message) => RegisterState {
                        error: Some(message),
                        ..state.clone()
                    },
                }
            }

            RegisterAction::Registered(_user) => {
                ctx.effect(RegisterEffect::NavigateHome);
                RegisterState {
                    is_submitting: false,
                    password: String::new(),
                    confirm_password: String::new(),
                    ..state.clone()
                }
            }

            RegisterAction::Failed(message) => RegisterState {
                is_submitting: false,
                error: Some(message),
                ..state.clone()
            },

            RegisterAction::DismissError => RegisterState {
                error: None,
                ..state.clone()
            },
        }
    }

    fn on_error(&self, error: ApiError) -> RegisterAction {
        RegisterAction::Failed(error.to_string())
    }
}
