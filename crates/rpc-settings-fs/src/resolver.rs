// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Project and instance scope resolution over the filesystem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use directories::ProjectDirs;
use rpc_settings_core::{PreferenceStore, ProjectId, ScopeResolver};
use tracing::{debug, warn};

use crate::store::PropertiesStore;
use crate::FsError;

/// Directory, relative to a project root, holding project-scoped preferences.
pub const SETTINGS_DIR: &str = ".settings";

/// Resolves `<project>/.settings/<plugin id>.prefs` stores.
///
/// Stores are cached per file, so every reader of a scope shares one store
/// and one [`PropertiesStore::reload`] reaches all of them. The cache holds
/// weak references: once the last reader of a scope is gone its store is
/// dropped, and the next resolution reads the file afresh.
#[derive(Default)]
pub struct FsScopeResolver {
    opened: Mutex<HashMap<PathBuf, Weak<PropertiesStore>>>,
}

impl FsScopeResolver {
    /// Create a resolver with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The store file of `plugin_id` in `project`, when the project has a
    /// location on disk.
    pub fn project_file(project: &ProjectId, plugin_id: &str) -> Option<PathBuf> {
        project
            .location()
            .map(|root| root.join(SETTINGS_DIR).join(format!("{plugin_id}.prefs")))
    }

    /// The shared store of `plugin_id` in `project`, opening it on first use.
    pub fn project_store(
        &self,
        project: &ProjectId,
        plugin_id: &str,
    ) -> Option<Arc<PropertiesStore>> {
        if !project.location().is_some_and(Path::is_dir) {
            debug!(%project, "project has no directory on disk");
            return None;
        }
        let path = Self::project_file(project, plugin_id)?;
        let mut opened = self.opened.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(store) = opened.get(&path).and_then(Weak::upgrade) {
            return Some(store);
        }
        opened.retain(|_, store| store.strong_count() > 0);
        match PropertiesStore::open(&path) {
            Ok(store) => {
                let store = Arc::new(store);
                opened.insert(path, Arc::downgrade(&store));
                Some(store)
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "cannot open project preferences");
                None
            }
        }
    }

    /// The user-wide store file of `plugin_id` inside `config_dir`.
    pub fn instance_file(config_dir: &Path, plugin_id: &str) -> PathBuf {
        config_dir.join(format!("{plugin_id}.prefs"))
    }

    /// User-wide store of `plugin_id`, under the platform config directory
    /// (e.g., `~/.config/discord-rich-presence/<plugin id>.prefs`).
    pub fn instance_store(plugin_id: &str) -> Result<PropertiesStore, FsError> {
        let dirs = ProjectDirs::from("fr", "kazejiyu", "discord-rich-presence")
            .ok_or(FsError::NoConfigDir)?;
        PropertiesStore::open(Self::instance_file(dirs.config_dir(), plugin_id))
    }
}

impl ScopeResolver for FsScopeResolver {
    fn resolve(&self, project: &ProjectId, plugin_id: &str) -> Option<Arc<dyn PreferenceStore>> {
        self.project_store(project, plugin_id)
            .map(|store| store as Arc<dyn PreferenceStore>)
    }
}
