// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Store binding shared by the project and instance readers.
//!
//! Both readers expose the same keys with the same defaults; they only differ
//! in whether a project may be renamed. [`BoundScope`] carries that difference
//! and every other [`UserPreferences`] accessor is written once, here.

use std::sync::Arc;

use tracing::debug;

use crate::listener::{ListenerRegistry, SettingChangeListener};
use crate::preferences::UserPreferences;
use crate::setting::{ElapsedTimeReset, Setting};
use crate::store::{PreferenceChangeEvent, PreferenceStore, SubscriptionId};

/// A store plus the listener registry its change notifications feed.
///
/// Subscribes once on creation and unsubscribes on drop.
pub struct ScopedReader {
    store: Arc<dyn PreferenceStore>,
    listeners: ListenerRegistry,
    subscription: SubscriptionId,
}

impl ScopedReader {
    pub(crate) fn bind(store: Arc<dyn PreferenceStore>) -> Self {
        let listeners = ListenerRegistry::default();
        let forward = listeners.clone();
        let subscription = store.subscribe(Arc::new(move |event: &PreferenceChangeEvent| {
            debug!(key = %event.key, listeners = forward.len(), "forwarding preference change");
            forward.dispatch(event);
        }));
        debug!(subscription = subscription.get(), "subscribed to preference store");
        Self {
            store,
            listeners,
            subscription,
        }
    }

    pub(crate) fn flag(&self, setting: Setting, default: bool) -> bool {
        self.store.get_boolean(setting.property(), default)
    }

    /// Stored value unless it is blank; the value itself is returned untrimmed.
    ///
    /// Blank means made only of spaces and control characters (`<= U+0020`),
    /// so U+00A0 or U+3000 alone still count as content.
    pub(crate) fn non_blank(&self, setting: Setting) -> Option<String> {
        let value = self.store.get_string(setting.property(), "");
        if value.trim_matches(|c: char| c <= ' ').is_empty() {
            return None;
        }
        Some(value)
    }

    /// Wording is present as soon as custom wording is enabled, even when empty.
    pub(crate) fn wording(&self, setting: Setting) -> Option<String> {
        if self.flag(Setting::UseCustomWording, false) {
            return Some(self.store.get_string(setting.property(), ""));
        }
        None
    }

    fn raw_reset_policy(&self) -> String {
        self.store.get_string(
            Setting::ResetElapsedTime.property(),
            ElapsedTimeReset::default().property(),
        )
    }

    pub(crate) fn resets_elapsed_time(&self, policy: ElapsedTimeReset) -> bool {
        self.raw_reset_policy() == policy.property()
    }

    pub(crate) fn elapsed_time_reset(&self) -> Option<ElapsedTimeReset> {
        ElapsedTimeReset::from_property(&self.raw_reset_policy())
    }

    pub(crate) fn add_listener(&self, listener: Arc<dyn SettingChangeListener>) {
        self.listeners.add(listener);
    }

    pub(crate) fn remove_listener(&self, listener: &Arc<dyn SettingChangeListener>) -> bool {
        self.listeners.remove(listener)
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// A reader bound to one scope through a [`ScopedReader`].
///
/// Lives in a private module, so it cannot be implemented outside the crate.
pub trait BoundScope: Send + Sync {
    /// The binding every accessor reads through.
    fn scoped(&self) -> &ScopedReader;

    /// Project name override offered by this scope.
    fn project_rename(&self) -> Option<String>;
}

impl<T: BoundScope> UserPreferences for T {
    fn shows_file_name(&self) -> bool {
        self.scoped().flag(Setting::ShowFileName, true)
    }

    fn shows_project_name(&self) -> bool {
        self.scoped().flag(Setting::ShowProjectName, true)
    }

    fn shows_elapsed_time(&self) -> bool {
        self.scoped().flag(Setting::ShowElapsedTime, true)
    }

    fn shows_language_icon(&self) -> bool {
        self.scoped().flag(Setting::ShowLanguageIcon, true)
    }

    fn shows_rich_presence(&self) -> bool {
        self.scoped().flag(Setting::ShowRichPresence, true)
    }

    fn resets_elapsed_time_on_startup(&self) -> bool {
        self.scoped().resets_elapsed_time(ElapsedTimeReset::OnStartup)
    }

    fn resets_elapsed_time_on_new_project(&self) -> bool {
        self.scoped().resets_elapsed_time(ElapsedTimeReset::OnNewProject)
    }

    fn resets_elapsed_time_on_new_file(&self) -> bool {
        self.scoped().resets_elapsed_time(ElapsedTimeReset::OnNewFile)
    }

    fn project_name(&self) -> Option<String> {
        self.project_rename()
    }

    fn uses_custom_discord_application(&self) -> bool {
        self.scoped().flag(Setting::UseCustomApplication, false)
    }

    fn discord_application_id(&self) -> Option<String> {
        self.scoped().non_blank(Setting::CustomApplicationId)
    }

    fn uses_custom_wording(&self) -> bool {
        self.scoped().flag(Setting::UseCustomWording, false)
    }

    fn custom_details_wording(&self) -> Option<String> {
        self.scoped().wording(Setting::CustomDetailsWording)
    }

    fn custom_state_wording(&self) -> Option<String> {
        self.scoped().wording(Setting::CustomStateWording)
    }

    fn add_setting_change_listener(&self, listener: Arc<dyn SettingChangeListener>) {
        self.scoped().add_listener(listener);
    }

    fn remove_setting_change_listener(&self, listener: &Arc<dyn SettingChangeListener>) -> bool {
        self.scoped().remove_listener(listener)
    }
}

impl Drop for ScopedReader {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
        debug!(subscription = self.subscription.get(), "unsubscribed from preference store");
    }
}
