// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! User-wide Rich Presence settings, used by projects that do not override them.

use std::fmt;
use std::sync::Arc;

use crate::scoped::{BoundScope, ScopedReader};
use crate::setting::ElapsedTimeReset;
use crate::store::PreferenceStore;

/// Typed view over the instance-scope store.
///
/// Same keys and defaults as [`crate::ProjectPreferences`], except that a
/// user-wide scope never renames a project.
pub struct InstancePreferences {
    reader: ScopedReader,
}

impl InstancePreferences {
    /// Reader over the instance-scope `store`.
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            reader: ScopedReader::bind(store),
        }
    }

    /// Decoded reset policy; `None` when the stored value is not a known sentinel.
    pub fn elapsed_time_reset(&self) -> Option<ElapsedTimeReset> {
        self.reader.elapsed_time_reset()
    }
}

impl BoundScope for InstancePreferences {
    fn scoped(&self) -> &ScopedReader {
        &self.reader
    }

    fn project_rename(&self) -> Option<String> {
        None
    }
}

impl fmt::Debug for InstancePreferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstancePreferences")
            .field("listeners", &self.reader.listener_count())
            .finish_non_exhaustive()
    }
}
