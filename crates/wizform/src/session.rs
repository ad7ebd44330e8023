//! Carries the in-progress form between wizard steps.

use crate::{
    Error,
    config::{Config, configuration},
};
use std::collections::BTreeMap;
use tracing::{debug, trace};
use ulid::Ulid;
use wizform_core::{
    form::{Form, FormKind},
    value::FieldMap,
};

///
/// SessionStore
/// String payloads by key; a cookie jar or a server-side cache.
///

pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String);

    fn delete(&mut self, key: &str);
}

///
/// MemoryStore
///

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn delete(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

///
/// WizardSession
///
/// Cookie location keeps the JSON payload under the form key. Cache
/// location keeps a generated form id under the form key and the payload
/// in the cache under `"{form_key}:{form_id}"`.
///

#[derive(Debug)]
pub struct WizardSession<C: SessionStore, X: SessionStore = C> {
    config: Config,
    cookies: C,
    cache: X,
}

impl<C: SessionStore, X: SessionStore> WizardSession<C, X> {
    /// Session using the process-wide configuration.
    pub fn new(cookies: C, cache: X) -> Self {
        Self::with_config(configuration(), cookies, cache)
    }

    pub const fn with_config(config: Config, cookies: C, cache: X) -> Self {
        Self {
            config,
            cookies,
            cache,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn cookies(&self) -> &C {
        &self.cookies
    }

    #[must_use]
    pub const fn cache(&self) -> &X {
        &self.cache
    }

    /// Id naming this wizard's cache entry, created on first use.
    pub fn form_id(&mut self) -> String {
        let key = self.config.form_key.as_str();
        if let Some(id) = self.cookies.get(key).filter(|id| !id.is_empty()) {
            return id;
        }

        let id = Ulid::new().to_string();
        self.cookies.set(key, id.clone());
        debug!(form_id = %id, "wizard form id issued");

        id
    }

    fn cache_key(&mut self) -> String {
        let id = self.form_id();

        format!("{}:{id}", self.config.form_key)
    }

    /// Stored form attributes; empty when nothing readable is stored.
    pub fn session_params(&mut self) -> FieldMap {
        let payload = if self.config.store_in_cache() {
            let key = self.cache_key();
            self.cache.get(&key)
        } else {
            self.cookies.get(&self.config.form_key)
        };

        let Some(payload) = payload else {
            return FieldMap::new();
        };

        serde_json::from_str(&payload).unwrap_or_else(|err| {
            trace!(error = %err, "stored form payload unreadable");
            FieldMap::new()
        })
    }

    /// Store every attribute of `form`.
    pub fn set_session_params<K: FormKind>(&mut self, form: &Form<K>) -> Result<(), Error> {
        let payload = serde_json::to_string(&form.attributes())?;

        if self.config.store_in_cache() {
            let key = self.cache_key();
            self.cache.set(&key, payload);
        } else {
            self.cookies.set(&self.config.form_key, payload);
        }

        Ok(())
    }

    pub fn clear_session_params(&mut self) {
        if self.config.store_in_cache() {
            let key = self.cache_key();
            self.cache.delete(&key);
        }
        self.cookies.delete(&self.config.form_key);
    }
}
