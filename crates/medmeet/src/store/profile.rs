//! Profile screen store: view/edit the account, and logout.

use std::sync::Arc;

use chrono::NaiveDate;

use uniflow::{Context, Feature};

use apibase::{ApiError, SessionHandle};
use prefstore::PrefStore;

use crate::model::User;
use crate::model::user::digit_count;
use crate::repository::{ProfileApi, ProfileUpdate};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileState {
    pub user: Option<User>,
    // Editable form fields, seeded from the loaded user.
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub is_loading: bool,
    pub is_saving: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ProfileAction {
    Load,
    Loaded(User),
    FullNameChanged(String),
    EmailChanged(String),
    PhoneChanged(String),
    DobChanged(Option<NaiveDate>),
    Save,
    Saved(User),
    Logout,
    Failed(String),
    DismissError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileEffect {
    SavedToast,
    NavigateLogin,
}

pub struct ProfileFeature {
    profile: Arc<dyn ProfileApi>,
    session: SessionHandle,
    prefs: PrefStore,
}

impl ProfileFeature {
    pub fn new(profile: Arc<dyn ProfileApi>, session: SessionHandle, prefs: PrefStore) -> Self {
        Self {
            profile,
            session,
            prefs,
        }
    }

    fn validate(state: &ProfileState) -> Result<ProfileUpdate, String> {
        if state.full_name.trim().is_empty() {
            return Err("full name is required".into());
        }
        let email = state.email.trim();
        if !email.is_empty() && !email.contains('@') {
            return Err("email address looks invalid".into());
        }
        let phone = state.phone_number.trim();
        if !phone.is_empty() && digit_count(phone) < 10 {
            return Err("phone number must have at least 10 digits".into());
        }
        Ok(ProfileUpdate {
            full_name: state.full_name.trim().to_owned(),
            email: (!email.is_empty()).then(|| email.to_owned()),
            phone_number: (!phone.is_empty()).then(|| phone.to_owned()),
            date_of_birth: state.date_of_birth,
        })
    }
}

impl Feature for ProfileFeature {
    type State = ProfileState;
    type Action = ProfileAction;
    type Effect = ProfileEffect;
    type Error = ApiError;

    fn reduce(
        &mut self,
        state: &ProfileState,
        action: ProfileAction,
        ctx: &mut Context<'_, Self>,
    ) -> ProfileState {
        match action {
            ProfileAction::Load => {
                let profile = Arc::clone(&self.profile);
                ctx.run(async move { profile.profile().await.map(ProfileAction::Loaded) });
                ProfileState {
                    is_loading: true,
                    ..state.clone()
                }
            }

            ProfileAction::Loaded(user) => ProfileState {
                full_name: user.full_name.clone(),
                email: user.email.clone().unwrap_or_default(),
                phone_number: user.phone_number.clone().unwrap_or_default(),
                date_of_birth: user.date_of_birth,
                user: Some(user),
                is_loading: false,
                ..state.clone()
            },

            ProfileAction::FullNameChanged(full_name) => ProfileState {
                full_name,
                error: None,
                ..state.clone()
            },

            ProfileAction::EmailChanged(email) => ProfileState {
                email,
                error: None,
                ..state.clone()
            },

            ProfileAction::PhoneChanged(phone_number) => ProfileState {
                phone_number,
                error: None,
                ..state.clone()
            },

            ProfileAction::DobChanged(date_of_birth) => ProfileState {
                date_of_birth,
                error: None,
                ..state.clone()
            },

            ProfileAction::Save => {
                if state.is_saving {
                    return state.clone();
                }
                match Self::validate(state) {
                    Ok(update) => {
                        let profile = Arc::clone(&self.profile);
                        ctx.run(async move {
                            profile.update_profile(update).await.map(ProfileAction::Saved)
                        });
                        ProfileState {
                            is_saving: true,
                            error: None,
                            ..state.clone()
                        }
                    }
                    Err(message) => ProfileState {
                        error: Some(message),
                        ..state.clone()
                    },
                }
            }

            ProfileAction::Saved(user) => {
                ctx.effect(ProfileEffect::SavedToast);
                ProfileState {
                    user: Some(user),
                    is_saving: false,
                    ..state.clone()
                }
            }

            ProfileAction::Logout => {
                self.session.clear();
                self.prefs.clear_auth_token();
                self.prefs.set_remember_login(false);
                if let Err(e) = self.prefs.save() {
                    tracing::warn!("failed to persist logout: {e}");
                }
                ctx.effect(ProfileEffect::NavigateLogin);
                ProfileState::default()
            }

            ProfileAction::Failed(message) => ProfileState {
                is_loading: false,
                is_saving: false,
                error: Some(message),
                ..state.clone()
            },

            ProfileAction::DismissError => ProfileState {
                error: None,
                ..state.clone()
            },
        }
    }

    fn on_error(&self, error: ApiError) -> ProfileAction {
        ProfileAction::Failed(error.to_string())
    }
}
