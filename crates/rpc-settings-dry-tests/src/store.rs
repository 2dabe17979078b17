// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory preference store fakes for testing without a host.

use rpc_settings_core::{
    ChangeCallback, PreferenceChangeEvent, PreferenceStore, ProjectId, ScopeResolver,
    SubscriptionId, PLUGIN_ID,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

/// A value held by [`InMemoryPreferenceStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceValue {
    /// Stored through [`InMemoryPreferenceStore::set_bool`].
    Bool(bool),
    /// Stored through [`InMemoryPreferenceStore::set_string`].
    Str(String),
}

impl PreferenceValue {
    /// String form, as a host would persist it.
    pub fn as_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Str(s) => s.clone(),
        }
    }

    /// Boolean form: strings are `true` only when they read "true", ignoring case.
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Str(s) => s.eq_ignore_ascii_case("true"),
        }
    }
}

/// In-memory implementation of [`PreferenceStore`] for testing.
///
/// Mutations notify subscribers synchronously, on the mutating thread, once
/// per key whose string form actually changed. Clones share state.
///
/// # Example
///
/// ```
/// use rpc_settings_core::{ProjectPreferences, UserPreferences};
/// use rpc_settings_dry_tests::InMemoryPreferenceStore;
/// use std::sync::Arc;
///
/// let store = InMemoryPreferenceStore::new();
/// let prefs = ProjectPreferences::from_store(Arc::new(store.clone()));
///
/// store.set_bool("showFileName", false);
/// assert!(!prefs.shows_file_name());
/// ```
#[derive(Clone, Default)]
pub struct InMemoryPreferenceStore {
    inner: Arc<Mutex<InMemoryPreferenceStoreInner>>,
}

#[derive(Default)]
struct InMemoryPreferenceStoreInner {
    values: BTreeMap<String, PreferenceValue>,
    subscribers: Vec<(SubscriptionId, ChangeCallback)>,
    next_subscription: u64,
    read_count: usize,
}

impl InMemoryPreferenceStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `values`, without notifying anyone.
    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, PreferenceValue)>,
        K: Into<String>,
    {
        let store = Self::new();
        store.lock().values = values.into_iter().map(|(k, v)| (k.into(), v)).collect();
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryPreferenceStoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a boolean under `key`.
    pub fn set_bool(&self, key: &str, value: bool) {
        self.put(key, Some(PreferenceValue::Bool(value)));
    }

    /// Store a string under `key`.
    pub fn set_string(&self, key: &str, value: impl Into<String>) {
        self.put(key, Some(PreferenceValue::Str(value.into())));
    }

    /// Remove `key`.
    pub fn remove(&self, key: &str) {
        self.put(key, None);
    }

    /// Remove every key, notifying once per removed key.
    pub fn clear(&self) {
        let keys: Vec<String> = self.lock().values.keys().cloned().collect();
        for key in keys {
            self.remove(&key);
        }
    }

    /// The raw value under `key`.
    pub fn get(&self, key: &str) -> Option<PreferenceValue> {
        self.lock().values.get(key).cloned()
    }

    /// Check if a key exists in the store.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().values.contains_key(key)
    }

    /// Number of `get_boolean`/`get_string` calls so far.
    pub fn read_count(&self) -> usize {
        self.lock().read_count
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn put(&self, key: &str, value: Option<PreferenceValue>) {
        let (event, callbacks) = {
            let mut inner = self.lock();
            let old = match &value {
                Some(v) => inner.values.insert(key.to_owned(), v.clone()),
                None => inner.values.remove(key),
            };
            let old_value = old.as_ref().map(PreferenceValue::as_string);
            let new_value = value.as_ref().map(PreferenceValue::as_string);
            if old_value == new_value {
                return;
            }
            let callbacks: Vec<ChangeCallback> =
                inner.subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect();
            (PreferenceChangeEvent::new(key, old_value, new_value), callbacks)
        };
        for callback in callbacks {
            callback(&event);
        }
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get_boolean(&self, key: &str, default: bool) -> bool {
        let mut inner = self.lock();
        inner.read_count += 1;
        inner.values.get(key).map_or(default, PreferenceValue::as_bool)
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        let mut inner = self.lock();
        inner.read_count += 1;
        inner
            .values
            .get(key)
            .map_or_else(|| default.to_owned(), PreferenceValue::as_string)
    }

    fn subscribe(&self, callback: ChangeCallback) -> SubscriptionId {
        let mut inner = self.lock();
        inner.next_subscription += 1;
        let id = SubscriptionId::new(inner.next_subscription);
        inner.subscribers.push((id, callback));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.lock().subscribers.retain(|(sub, _)| *sub != id);
    }
}

/// In-memory [`ScopeResolver`] keyed by (project name, plug-in id).
#[derive(Clone, Default)]
pub struct InMemoryScopeResolver {
    scopes: HashMap<(String, String), InMemoryPreferenceStore>,
}

impl InMemoryScopeResolver {
    /// Create a resolver that resolves nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `store` for `plugin_id` in the project named `project`.
    pub fn insert(&mut self, project: &str, plugin_id: &str, store: InMemoryPreferenceStore) {
        self.scopes
            .insert((project.to_owned(), plugin_id.to_owned()), store);
    }

    /// Register `store` for [`PLUGIN_ID`] in the project named `project`.
    pub fn with_project(mut self, project: &str, store: InMemoryPreferenceStore) -> Self {
        self.insert(project, PLUGIN_ID, store);
        self
    }
}

impl ScopeResolver for InMemoryScopeResolver {
    fn resolve(&self, project: &ProjectId, plugin_id: &str) -> Option<Arc<dyn PreferenceStore>> {
        self.scopes
            .get(&(project.name().to_owned(), plugin_id.to_owned()))
            .map(|store| Arc::new(store.clone()) as Arc<dyn PreferenceStore>)
    }
}
