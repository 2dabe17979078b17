// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed Rich Presence settings over a host-provided preference store.
//!
//! The host owns persistence and exposes one key/value store per
//! (project, plug-in) scope through the [`store::PreferenceStore`] port.
//! [`project::ProjectPreferences`] turns such a store into typed, defaulted
//! getters and forwards change notifications to registered listeners.
#![forbid(unsafe_code)]

pub mod instance;
pub mod listener;
pub mod preferences;
pub mod project;
mod scoped;
pub mod setting;
pub mod store;

pub use instance::InstancePreferences;
pub use listener::{SettingChange, SettingChangeListener};
pub use preferences::{effective_preferences, PreferencesSnapshot, UserPreferences};
pub use project::ProjectPreferences;
pub use setting::{ElapsedTimeReset, Setting, PLUGIN_ID};
pub use store::{
    ChangeCallback, PreferenceChangeEvent, PreferenceStore, PreferencesError, ProjectId,
    ScopeResolver, SubscriptionId,
};
