// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Listener double recording every change it is notified of.

use rpc_settings_core::{SettingChange, SettingChangeListener};
use std::sync::{Arc, Mutex, PoisonError};

/// Shared log of listener tags, in notification order.
pub type Journal = Arc<Mutex<Vec<String>>>;

/// [`SettingChangeListener`] that keeps every [`SettingChange`] it receives.
///
/// A tagged listener also appends its tag to a [`Journal`] shared with other
/// listeners, which lets tests assert the relative order of notifications.
#[derive(Default)]
pub struct RecordingListener {
    received: Mutex<Vec<SettingChange>>,
    tag: Option<(String, Journal)>,
}

impl RecordingListener {
    /// Create an untagged listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a listener appending `tag` to `journal` on each notification.
    pub fn tagged(tag: impl Into<String>, journal: &Journal) -> Self {
        Self {
            received: Mutex::default(),
            tag: Some((tag.into(), Arc::clone(journal))),
        }
    }

    /// Every change received so far.
    pub fn changes(&self) -> Vec<SettingChange> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of notifications received so far.
    pub fn count(&self) -> usize {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl SettingChangeListener for RecordingListener {
    fn setting_changed(&self, change: &SettingChange) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(change.clone());
        if let Some((tag, journal)) = &self.tag {
            journal
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(tag.clone());
        }
    }
}
