use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::sync::{LazyLock, PoisonError, RwLock};

/// Session key the in-progress form (or its cache id) is stored under.
pub const FORM_KEY: &str = "multi_model_wizard_form";

///
/// CONFIG
/// process-wide, read by the session layer only
///

static CONFIG: LazyLock<RwLock<Config>> = LazyLock::new(|| RwLock::new(Config::default()));

/// Snapshot of the current configuration.
#[must_use]
pub fn configuration() -> Config {
    CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Mutate the process-wide configuration in place.
pub fn configure(f: impl FnOnce(&mut Config)) {
    let mut config = CONFIG.write().unwrap_or_else(PoisonError::into_inner);
    f(&mut config);

    tracing::debug!(
        location = %config.store.location,
        form_key = %config.form_key,
        "configuration updated"
    );
}

///
/// StoreLocation
/// Where form data lives between wizard steps.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreLocation {
    /// The whole payload travels in the session cookie.
    #[default]
    Cookies,
    /// The cookie holds a form id; the payload lives in a server-side cache.
    Cache,
}

///
/// StoreConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub location: StoreLocation,
}

///
/// Config
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub form_key: String,
}

impl Config {
    #[must_use]
    pub const fn location(&self) -> StoreLocation {
        self.store.location
    }

    #[must_use]
    pub const fn store_in_cache(&self) -> bool {
        matches!(self.store.location, StoreLocation::Cache)
    }

    #[must_use]
    pub const fn store_in_cookies(&self) -> bool {
        !self.store_in_cache()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            form_key: FORM_KEY.to_string(),
        }
    }
}
