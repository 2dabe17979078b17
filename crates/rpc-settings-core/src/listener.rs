// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Setting change listeners and the ordered registry forwarding store events.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

use crate::setting::Setting;
use crate::store::PreferenceChangeEvent;

/// A change forwarded to [`SettingChangeListener`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingChange {
    /// The known setting the changed key maps to, if any.
    pub setting: Option<Setting>,
    /// The raw store event.
    pub event: PreferenceChangeEvent,
}

impl From<PreferenceChangeEvent> for SettingChange {
    fn from(event: PreferenceChangeEvent) -> Self {
        Self {
            setting: Setting::from_property(&event.key),
            event,
        }
    }
}

/// Callback notified whenever a setting of the observed scope changes.
///
/// Any `Fn(&SettingChange) + Send + Sync` closure is a listener.
pub trait SettingChangeListener: Send + Sync {
    /// Called once per underlying key change.
    fn setting_changed(&self, change: &SettingChange);
}

impl<F> SettingChangeListener for F
where
    F: Fn(&SettingChange) + Send + Sync,
{
    fn setting_changed(&self, change: &SettingChange) {
        self(change);
    }
}

/// Insertion-ordered listener list shared between a reader and its store
/// subscription.
#[derive(Clone, Default)]
pub(crate) struct ListenerRegistry {
    inner: Arc<Mutex<Vec<Arc<dyn SettingChangeListener>>>>,
}

impl ListenerRegistry {
    pub(crate) fn add(&self, listener: Arc<dyn SettingChangeListener>) {
        let mut listeners = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        listeners.push(listener);
        trace!(listeners = listeners.len(), "setting change listener added");
    }

    /// Removes the first registration of `listener`. Returns whether one was found.
    pub(crate) fn remove(&self, listener: &Arc<dyn SettingChangeListener>) -> bool {
        let mut listeners = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(index) = listeners.iter().position(|l| Arc::ptr_eq(l, listener)) else {
            return false;
        };
        listeners.remove(index);
        trace!(listeners = listeners.len(), "setting change listener removed");
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Delivers `event` to a snapshot of the listeners, in registration order.
    ///
    /// The lock is released before any listener runs, so listeners may
    /// register or remove listeners; such changes apply to the next event.
    pub(crate) fn dispatch(&self, event: &PreferenceChangeEvent) {
        let snapshot = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let change = SettingChange::from(event.clone());
        for listener in &snapshot {
            listener.setting_changed(&change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn event(key: &str) -> PreferenceChangeEvent {
        PreferenceChangeEvent::new(key, None, Some("true".into()))
    }

    #[test]
    fn change_maps_known_keys_to_settings() {
        let change = SettingChange::from(event("showFileName"));
        assert_eq!(change.setting, Some(Setting::ShowFileName));
        let change = SettingChange::from(event("somethingElse"));
        assert_eq!(change.setting, None);
    }

    #[test]
    fn remove_only_drops_first_registration() {
        let registry = ListenerRegistry::default();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let listener: Arc<dyn SettingChangeListener> = Arc::new(move |_: &SettingChange| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        registry.add(Arc::clone(&listener));
        registry.add(Arc::clone(&listener));

        assert!(registry.remove(&listener));
        registry.dispatch(&event("showFileName"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        assert!(registry.remove(&listener));
        assert!(!registry.remove(&listener));
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn listener_may_register_during_dispatch() {
        let registry = ListenerRegistry::default();
        let inner = registry.clone();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        registry.add(Arc::new(move |_: &SettingChange| {
            let counter = Arc::clone(&counter);
            inner.add(Arc::new(move |_: &SettingChange| {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }));

        registry.dispatch(&event("showFileName"));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(registry.len(), 2);

        registry.dispatch(&event("showFileName"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
