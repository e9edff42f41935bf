//! Login screen store.
//!
//! Validates credentials locally, runs the login call, and persists the
//! remember-login choice (flag, username, token) through the preference
//! store. A 401 here means wrong credentials, not an expired session, so
//! the error hook rewords it.

use std::sync::Arc;

use uniflow::{Context, Feature};

use apibase::{ApiError, SessionHandle};
use prefstore::PrefStore;

use crate::model::User;
use crate::repository::AuthApi;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoginState {
    pub username: String,
    pub password: String,
    pub remember: bool,
    pub is_submitting: bool,
    pub error: Option<String>,
}

impl LoginState {
    /// Seed the form from persisted preferences.
    pub fn from_prefs(prefs: &PrefStore) -> Self {
        Self {
            username: prefs.last_username().unwrap_or_default().to_owned(),
            remember: prefs.remember_login(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub enum LoginAction {
    UsernameChanged(String),
    PasswordChanged(String),
    RememberChanged(bool),
    Submit,
    LoggedIn(User),
    Failed(String),
    DismissError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginEffect {
    NavigateHome,
}

pub struct LoginFeature {
    auth: Arc<dyn AuthApi>,
    session: SessionHandle,
    prefs: PrefStore,
}

impl LoginFeature {
    pub fn new(auth: Arc<dyn AuthApi>, session: SessionHandle, prefs: PrefStore) -> Self {
        Self {
            auth,
            session,
            prefs,
        }
    }

    fn persist_login(&mut self, state: &LoginState) {
        self.prefs.set_remember_login(state.remember);
        if state.remember {
            self.prefs.set_last_username(Some(state.username.clone()));
            if let Some(token) = self.session.token() {
                self.prefs.set_auth_token(&token);
            }
        } else {
            self.prefs.set_last_username(None);
            self.prefs.clear_auth_token();
        }
        if let Err(e) = self.prefs.save() {
            tracing::warn!("failed to persist login preferences: {e}");
        }
    }
}

impl Feature for LoginFeature {
    type State = LoginState;
    type Action = LoginAction;
    type Effect = LoginEffect;
    type Error = ApiError;

    fn reduce(
        &mut self,
        state: &LoginState,
        action: LoginAction,
        ctx: &mut Context<'_, Self>,
    ) -> LoginState {
        match action {
            LoginAction::UsernameChanged(username) => LoginState {
                username,
                error: None,
                ..state.clone()
            },

            LoginAction::PasswordChanged(password) => LoginState {
                password,
                error: None,
                ..state.clone()
            },

            LoginAction::RememberChanged(remember) => LoginState {
                remember,
                ..state.clone()
            },

            LoginAction::Submit => {
                if state.is_submitting {
                    return state.clone();
                }
                if state.username.trim().is_empty() || state.password.is_empty() {
                    return LoginState {
                        error: Some("enter your username and password".into()),
                        ..state.clone()
                    };
                }

                let auth = Arc::clone(&self.auth);
                let username = state.username.trim().to_owned();
                let password = state.password.clone();
                ctx.run(async move {
                    auth.login(&username, &password)
                        .await
                        .map(LoginAction::LoggedIn)
                });
                LoginState {
                    is_submitting: true,
                    error: None,
                    ..state.clone()
                }
            }

            LoginAction::LoggedIn(_user) => {
                self.persist_login(state);
                ctx.effect(LoginEffect::NavigateHome);
                LoginState {
                    is_submitting: false,
                    password: String::new(),
                    ..state.clone()
                }
            }

            LoginAction::Failed(message) => LoginState {
                is_submitting: false,
                error: Some(message),
                ..state.clone()
            },

            LoginAction::DismissError => LoginState {
                error: None,
                ..state.clone()
            },
        }
    }

    fn on_error(&self, error: ApiError) -> LoginAction {
        // The backend answers 401 to bad credentials on this endpoint.
        let message = if error.is_session_expired() {
            "invalid username or password".to_owned()
        } else {
            error.to_string()
        };
        LoginAction::Failed(message)
    }
}
