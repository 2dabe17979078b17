// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `PreferenceStore` backed by a single `.prefs` properties file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rpc_settings_core::{ChangeCallback, PreferenceChangeEvent, PreferenceStore, SubscriptionId};
use tracing::{debug, warn};

use crate::properties::parse_properties;
use crate::FsError;

/// Preference store reading one properties file.
///
/// The file is read on [`open`](Self::open) and again on every
/// [`reload`](Self::reload); a missing file reads as an empty store. The store
/// never writes the file.
pub struct PropertiesStore {
    path: PathBuf,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    values: BTreeMap<String, String>,
    subscribers: Vec<(SubscriptionId, ChangeCallback)>,
    next_subscription: u64,
}

impl PropertiesStore {
    /// Load the store from `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, FsError> {
        let path = path.into();
        let values = read_values(&path)?;
        debug!(path = %path.display(), keys = values.len(), "opened preference file");
        Ok(Self {
            path,
            state: Mutex::new(State {
                values,
                ..State::default()
            }),
        })
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().values.get(key).cloned()
    }

    /// Re-read the file and notify subscribers once per changed key, in key
    /// order. Returns the number of keys that changed.
    ///
    /// On error the previous content is kept and nobody is notified.
    pub fn reload(&self) -> Result<usize, FsError> {
        let fresh = read_values(&self.path).inspect_err(|err| {
            warn!(path = %self.path.display(), %err, "failed to reload preference file");
        })?;
        let (events, callbacks) = {
            let mut state = self.lock();
            let events = diff(&state.values, &fresh);
            state.values = fresh;
            let callbacks: Vec<ChangeCallback> =
                state.subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect();
            (events, callbacks)
        };
        debug!(path = %self.path.display(), changed = events.len(), "reloaded preference file");
        for event in &events {
            for callback in &callbacks {
                callback(event);
            }
        }
        Ok(events.len())
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreferenceStore for PropertiesStore {
    fn get_boolean(&self, key: &str, default: bool) -> bool {
        self.lock()
            .values
            .get(key)
            .map_or(default, |v| v.eq_ignore_ascii_case("true"))
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_owned())
    }

    fn subscribe(&self, callback: ChangeCallback) -> SubscriptionId {
        let mut state = self.lock();
        state.next_subscription += 1;
        let id = SubscriptionId::new(state.next_subscription);
        state.subscribers.push((id, callback));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.lock().subscribers.retain(|(sub, _)| *sub != id);
    }
}

fn read_values(path: &Path) -> Result<BTreeMap<String, String>, FsError> {
    match fs::read_to_string(path) {
        Ok(text) => parse_properties(&text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(err) => Err(FsError::Io(err)),
    }
}

/// Events turning `old` into `new`, ordered by key.
fn diff(old: &BTreeMap<String, String>, new: &BTreeMap<String, String>) -> Vec<PreferenceChangeEvent> {
    let mut keys: Vec<&String> = old.keys().chain(new.keys()).collect();
    keys.sort();
    keys.dedup();
    keys.into_iter()
        .filter_map(|key| {
            let (before, after) = (old.get(key), new.get(key));
            (before != after)
                .then(|| PreferenceChangeEvent::new(key.as_str(), before.cloned(), after.cloned()))
        })
        .collect()
}
