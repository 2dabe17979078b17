// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed preference stores for Rich Presence settings.
//!
//! Project settings live in `<project>/.settings/<plugin id>.prefs`, the
//! properties files Eclipse writes for project-scoped preferences; user-wide
//! settings live in the platform config directory.
#![forbid(unsafe_code)]

mod properties;
mod resolver;
mod store;

pub use properties::parse_properties;
pub use resolver::{FsScopeResolver, SETTINGS_DIR};
pub use store::PropertiesStore;

use thiserror::Error;

/// Error type for the filesystem adapter.
#[derive(Debug, Error)]
pub enum FsError {
    /// I/O error while reading a preference file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed properties content.
    #[error("line {line}: {reason}")]
    Parse {
        /// 1-based line where the malformed entry starts.
        line: usize,
        /// What is wrong with it.
        reason: String,
    },
    /// The platform exposes no user config directory.
    #[error("could not resolve config dir")]
    NoConfigDir,
}
