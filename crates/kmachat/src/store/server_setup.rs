//! Server setup store: where the demo app is pointed at a backend.
//!
//! Validates the entered URL and persists it (plus a bounded recents list)
//! through the preference store before the app proceeds to the
//! conversation list.

use url::Url;

use uniflow::{Context, Feature};

use apibase::ApiError;
use prefstore::PrefStore;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServerSetupState {
    pub input: String,
    pub recent: Vec<String>,
    pub error: Option<String>,
}

impl ServerSetupState {
    /// Seed the screen from persisted preferences.
    pub fn from_prefs(prefs: &PrefStore) -> Self {
        Self {
            input: prefs.server_url().unwrap_or_default().to_owned(),
            recent: prefs.recent_servers().to_vec(),
            error: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ServerSetupAction {
    InputChanged(String),
    PickRecent(usize),
    Submit,
    Failed(String),
    DismissError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServerSetupEffect {
    /// Validated and saved; the app can move on to the conversation list.
    Continue(Url),
}

pub struct ServerSetupFeature {
    prefs: PrefStore,
}

impl ServerSetupFeature {
    pub fn new(prefs: PrefStore) -> Self {
        Self { prefs }
    }

    fn validate(input: &str) -> Result<Url, String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err("enter a server URL".into());
        }
        let url: Url = trimmed
            .parse()
            .map_err(|_| format!("not a valid URL: {trimmed}"))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err("server URL must be http or https".into());
        }
        Ok(url)
    }
}

impl Feature for ServerSetupFeature {
    type State = ServerSetupState;
    type Action = ServerSetupAction;
    type Effect = ServerSetupEffect;
    type Error = ApiError;

    fn reduce(
        &mut self,
        state: &ServerSetupState,
        action: ServerSetupAction,
        ctx: &mut Context<'_, Self>,
    ) -> ServerSetupState {
        match action {
            ServerSetupAction::InputChanged(input) => ServerSetupState {
                input,
                error: None,
                ..state.clone()
            },

            ServerSetupAction::PickRecent(index) => match state.recent.get(index) {
                Some(url) => ServerSetupState {
                    input: url.clone(),
                    error: None,
                    ..state.clone()
                },
                None => state.clone(),
            },

            ServerSetupAction::Submit => match Self::validate(&state.input) {
                Ok(url) => {
                    self.prefs.set_server_url(url.as_str());
                    self.prefs.set_onboarding_complete(true);
                    if let Err(e) = self.prefs.save() {
                        return ServerSetupState {
                            error: Some(e.to_string()),
                            ..state.clone()
                        };
                    }
                    ctx.effect(ServerSetupEffect::Continue(url));
                    ServerSetupState {
                        recent: self.prefs.recent_servers().to_vec(),
                        error: None,
                        ..state.clone()
                    }
                }
                Err(message) => ServerSetupState {
                    error: Some(message),
                    ..state.clone()
                },
            },

            ServerSetupAction::Failed(message) => ServerSetupState {
                error: Some(message),
                ..state.clone()
            },

            ServerSetupAction::DismissError => ServerSetupState {
                error: None,
                ..state.clone()
            },
        }
    }

    fn on_error(&self, error: ApiError) -> ServerSetupAction {
        ServerSetupAction::Failed(error.to_string())
    }
}
