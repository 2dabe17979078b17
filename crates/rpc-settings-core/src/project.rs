// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rich Presence settings of a single project.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::scoped::{BoundScope, ScopedReader};
use crate::setting::{ElapsedTimeReset, Setting, PLUGIN_ID};
use crate::store::{PreferenceStore, PreferencesError, ProjectId, ScopeResolver};

/// Typed, defaulted view over the preference store of one project.
///
/// Reads go straight to the store, so the values always reflect its current
/// content. Listeners registered here are notified of every key change in the
/// store, in registration order, until the reader is dropped.
pub struct ProjectPreferences {
    project: Option<ProjectId>,
    reader: ScopedReader,
}

impl ProjectPreferences {
    /// Reader for the settings of [`PLUGIN_ID`] in `project`.
    ///
    /// Fails with [`PreferencesError::ScopeNotFound`] when `resolver` has no
    /// store for that scope.
    pub fn new(resolver: &dyn ScopeResolver, project: &ProjectId) -> Result<Self, PreferencesError> {
        Self::with_plugin_id(resolver, project, PLUGIN_ID)
    }

    /// Reader for the settings of `plugin_id` in `project`.
    pub fn with_plugin_id(
        resolver: &dyn ScopeResolver,
        project: &ProjectId,
        plugin_id: &str,
    ) -> Result<Self, PreferencesError> {
        let Some(store) = resolver.resolve(project, plugin_id) else {
            warn!(%project, plugin_id, "no preference store for project scope");
            return Err(PreferencesError::ScopeNotFound {
                plugin_id: plugin_id.to_owned(),
                project: project.to_string(),
            });
        };
        Ok(Self {
            project: Some(project.clone()),
            reader: ScopedReader::bind(store),
        })
    }

    /// Reader over an already resolved store.
    pub fn from_store(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            project: None,
            reader: ScopedReader::bind(store),
        }
    }

    /// The project this reader was resolved for, if any.
    pub fn project(&self) -> Option<&ProjectId> {
        self.project.as_ref()
    }

    /// Whether the project uses its own settings rather than the user-wide ones.
    pub fn use_project_settings(&self) -> bool {
        self.reader.flag(Setting::UseProjectSettings, false)
    }

    /// Decoded reset policy; `None` when the stored value is not a known sentinel.
    pub fn elapsed_time_reset(&self) -> Option<ElapsedTimeReset> {
        self.reader.elapsed_time_reset()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.reader.listener_count()
    }
}

impl BoundScope for ProjectPreferences {
    fn scoped(&self) -> &ScopedReader {
        &self.reader
    }

    fn project_rename(&self) -> Option<String> {
        self.reader.non_blank(Setting::ProjectName)
    }
}

impl fmt::Debug for ProjectPreferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectPreferences")
            .field("project", &self.project)
            .field("listeners", &self.reader.listener_count())
            .finish_non_exhaustive()
    }
}
