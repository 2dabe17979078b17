// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Preference store port and scope resolution for Rich Presence settings.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

/// Callback invoked by a store whenever one of its keys changes.
pub type ChangeCallback = Arc<dyn Fn(&PreferenceChangeEvent) + Send + Sync>;

/// Storage port for one scoped key/value preference node.
///
/// Implementations are owned by the host; readers only query them and never
/// write. Values are either booleans or strings, and every read supplies the
/// default returned when the key is absent.
pub trait PreferenceStore: Send + Sync {
    /// Read `key` as a boolean, or `default` when the key is absent.
    fn get_boolean(&self, key: &str, default: bool) -> bool;
    /// Read `key` as a string, or `default` when the key is absent.
    fn get_string(&self, key: &str, default: &str) -> String;
    /// Register `callback` for change notifications on this store.
    fn subscribe(&self, callback: ChangeCallback) -> SubscriptionId;
    /// Cancel a subscription. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Host facility resolving the preference store of a (project, plug-in) scope.
pub trait ScopeResolver {
    /// Returns the store for `plugin_id` inside `project`, or `None` when the
    /// host cannot produce one.
    fn resolve(&self, project: &ProjectId, plugin_id: &str) -> Option<Arc<dyn PreferenceStore>>;
}

/// Handle identifying a store subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Wrap a raw id chosen by the store.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Raw change notification emitted by a store.
///
/// `None` stands for "absent": a key that was just added has no old value and
/// a key that was just removed has no new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceChangeEvent {
    /// Property name of the key that changed.
    pub key: String,
    /// Value before the change.
    pub old_value: Option<String>,
    /// Value after the change.
    pub new_value: Option<String>,
}

impl PreferenceChangeEvent {
    /// Build an event for `key`.
    pub fn new(
        key: impl Into<String>,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        Self {
            key: key.into(),
            old_value,
            new_value,
        }
    }
}

/// Identity of a project whose settings are being read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId {
    name: String,
    location: Option<PathBuf>,
}

impl ProjectId {
    /// A project known only by name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
        }
    }

    /// Attach the project's root directory on disk.
    pub fn with_location(mut self, location: impl Into<PathBuf>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Project name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Project root directory, if known.
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Error type for preference reader construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreferencesError {
    /// The host could not produce a store for the requested scope.
    #[error("cannot find preferences for plug-in {plugin_id} in project {project}")]
    ScopeNotFound {
        /// Plug-in identity that was requested.
        plugin_id: String,
        /// Display name of the project.
        project: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_id_displays_its_name() {
        let project = ProjectId::new("demo").with_location("/tmp/demo");
        assert_eq!(project.to_string(), "demo");
        assert_eq!(project.location(), Some(Path::new("/tmp/demo")));
    }

    #[test]
    fn scope_not_found_names_plugin_and_project() {
        let err = PreferencesError::ScopeNotFound {
            plugin_id: "my.plugin".into(),
            project: "demo".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot find preferences for plug-in my.plugin in project demo"
        );
    }
}
