//! Preference persistence shared by both apps.
//!
//! A TOML file at the platform config dir holds the simple key-value
//! preferences the screens need: last-used server URLs, onboarding and
//! remember-login flags, the language code, the last username. The auth
//! token prefers the OS keyring, with a plaintext field in the file as a
//! fallback for platforms without one.

use std::collections::HashMap;
use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const KEYRING_SERVICE: &str = "kma-apps";
const KEYRING_TOKEN_KEY: &str = "auth-token";

/// Most-recent-first server URL history kept per device.
const MAX_RECENT_SERVERS: usize = 5;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PrefError {
    #[error("failed to serialize preferences: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("preference loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for PrefError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Persisted shape ─────────────────────────────────────────────────

/// The on-disk preference document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Backend the apps talked to last.
    pub server_url: Option<String>,

    /// Previously used server URLs, most recent first.
    #[serde(default)]
    pub recent_servers: Vec<String>,

    #[serde(default)]
    pub onboarding_complete: bool,

    #[serde(default)]
    pub remember_login: bool,

    pub last_username: Option<String>,

    /// Language code, e.g. "en" or "vi".
    pub language: Option<String>,

    /// Plaintext token fallback for platforms without a keyring.
    #[serde(skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,

    /// Untyped string/bool pairs for screens with one-off flags.
    #[serde(flatten)]
    extra: HashMap<String, toml::Value>,
}

// ── Store ───────────────────────────────────────────────────────────

/// Handle to the preference file. Mutations are in-memory until
/// [`save`](Self::save) is called.
pub struct PrefStore {
    path: PathBuf,
    prefs: Preferences,
    use_keyring: bool,
}

/// Resolve the preference file path via XDG / platform conventions.
pub fn prefs_path() -> PathBuf {
    ProjectDirs::from("dev", "fourthbeam", "kma-apps").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("preferences.toml");
            p
        },
        |dirs| dirs.config_dir().join("preferences.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("kma-apps");
    p
}

impl PrefStore {
    /// Open the store at the canonical path. A missing file yields defaults.
    pub fn open() -> Result<Self, PrefError> {
        Self::load(prefs_path(), true)
    }

    /// Open the store at an explicit path, bypassing the keyring. Used by
    /// tests and by dev tooling that must not touch the OS secret service.
    pub fn open_at(path: PathBuf) -> Result<Self, PrefError> {
        Self::load(path, false)
    }

    fn load(path: PathBuf, use_keyring: bool) -> Result<Self, PrefError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Preferences::default()))
            .merge(Toml::file(&path))
            .merge(Env::prefixed("KMA_"));

        let prefs: Preferences = figment.extract()?;
        Ok(Self {
            path,
            prefs,
            use_keyring,
        })
    }

    /// Serialize to TOML and write to the store's path.
    pub fn save(&self) -> Result<(), PrefError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(&self.prefs)?;
        std::fs::write(&self.path, toml_str)?;
        Ok(())
    }

    // ── Typed accessors ──────────────────────────────────────────────

    pub fn server_url(&self) -> Option<&str> {
        self.prefs.server_url.as_deref()
    }

    /// Record `url` as the current server and push it onto the recents
    /// list (deduplicated, bounded, most recent first).
    pub fn set_server_url(&mut self, url: impl Into<String>) {
        let url = url.into();
        self.prefs.recent_servers.retain(|u| *u != url);
        self.prefs.recent_servers.insert(0, url.clone());
        self.prefs.recent_servers.truncate(MAX_RECENT_SERVERS);
        self.prefs.server_url = Some(url);
    }

    pub fn recent_servers(&self) -> &[String] {
        &self.prefs.recent_servers
    }

    pub fn onboarding_complete(&self) -> bool {
        self.prefs.onboarding_complete
    }

    pub fn set_onboarding_complete(&mut self, done: bool) {
        self.prefs.onboarding_complete = done;
    }

    pub fn remember_login(&self) -> bool {
        self.prefs.remember_login
    }

    pub fn set_remember_login(&mut self, remember: bool) {
        self.prefs.remember_login = remember;
    }

    pub fn last_username(&self) -> Option<&str> {
        self.prefs.last_username.as_deref()
    }

    pub fn set_last_username(&mut self, username: Option<String>) {
        self.prefs.last_username = username;
    }

    pub fn language(&self) -> Option<&str> {
        self.prefs.language.as_deref()
    }

    pub fn set_language(&mut self, code: impl Into<String>) {
        self.prefs.language = Some(code.into());
    }

    // ── Auth token (keyring first, file fallback) ────────────────────

    pub fn auth_token(&self) -> Option<SecretString> {
        if self.use_keyring {
            if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_TOKEN_KEY) {
                if let Ok(secret) = entry.get_password() {
                    return Some(SecretString::from(secret));
                }
            }
        }
        self.prefs
            .auth_token
            .as_ref()
            .map(|t| SecretString::from(t.clone()))
    }

    pub fn set_auth_token(&mut self, token: &SecretString) {
        if self.use_keyring {
            if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_TOKEN_KEY) {
                if entry.set_password(token.expose_secret()).is_ok() {
                    self.prefs.auth_token = None;
                    return;
                }
                debug!("keyring unavailable, falling back to file");
            }
        }
        self.prefs.auth_token = Some(token.expose_secret().to_owned());
    }

    pub fn clear_auth_token(&mut self) {
        if self.use_keyring {
            if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_TOKEN_KEY) {
                let _ = entry.delete_credential();
            }
        }
        self.prefs.auth_token = None;
    }

    // ── Untyped get/put ──────────────────────────────────────────────

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.prefs.extra.get(key).and_then(toml::Value::as_str)
    }

    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.prefs
            .extra
            .insert(key.into(), toml::Value::String(value.into()));
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.prefs.extra.get(key).and_then(toml::Value::as_bool)
    }

    pub fn put_bool(&mut self, key: impl Into<String>, value: bool) {
        self.prefs
            .extra
            .insert(key.into(), toml::Value::Boolean(value));
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, PrefStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("preferences.toml");
        let store = PrefStore::open_at(path).expect("open");
        (dir, store)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let (_dir, store) = temp_store();
        assert_eq!(store.server_url(), None);
        assert!(!store.onboarding_complete());
        assert!(store.recent_servers().is_empty());
    }

    #[test]
    fn typed_fields_roundtrip_through_disk() {
        let (_dir, mut store) = temp_store();
        store.set_server_url("https://demo.kma.example");
        store.set_onboarding_complete(true);
        store.set_remember_login(true);
        store.set_last_username(Some("linh".into()));
        store.set_language("vi");
        store.save().expect("save");

        let reloaded = PrefStore::open_at(store.path.clone()).expect("reload");
        assert_eq!(reloaded.server_url(), Some("https://demo.kma.example"));
        assert!(reloaded.onboarding_complete());
        assert!(reloaded.remember_login());
        assert_eq!(reloaded.last_username(), Some("linh"));
        assert_eq!(reloaded.language(), Some("vi"));
    }

    #[test]
    fn recents_dedupe_and_stay_bounded() {
        let (_dir, mut store) = temp_store();
        for n in 0..8 {
            store.set_server_url(format!("https://s{n}.example"));
        }
        store.set_server_url("https://s6.example");

        let recents = store.recent_servers();
        assert_eq!(recents.len(), MAX_RECENT_SERVERS);
        assert_eq!(recents[0], "https://s6.example");
        assert_eq!(recents[1], "https://s7.example");
    }

    #[test]
    fn untyped_pairs_roundtrip() {
        let (_dir, mut store) = temp_store();
        store.put_string("theme", "dark");
        store.put_bool("tips_seen", true);
        store.save().expect("save");

        let reloaded = PrefStore::open_at(store.path.clone()).expect("reload");
        assert_eq!(reloaded.get_string("theme"), Some("dark"));
        assert_eq!(reloaded.get_bool("tips_seen"), Some(true));
        assert_eq!(reloaded.get_bool("theme"), None);
    }

    #[test]
    fn token_falls_back_to_file_without_keyring() {
        let (_dir, mut store) = temp_store();
        store.set_auth_token(&SecretString::from("tok-123"));
        store.save().expect("save");

        let reloaded = PrefStore::open_at(store.path.clone()).expect("reload");
        let token = reloaded.auth_token().expect("token");
        assert_eq!(token.expose_secret(), "tok-123");

        let mut reloaded = reloaded;
        reloaded.clear_auth_token();
        assert!(reloaded.auth_token().is_none());
    }
}
