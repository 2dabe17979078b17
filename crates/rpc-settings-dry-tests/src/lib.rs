// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles for the Rich Presence settings crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`store`] - In-memory preference store and scope resolver fakes
//! - [`listener`] - Listener that records what it receives

pub mod listener;
pub mod store;

pub use listener::{Journal, RecordingListener};
pub use store::{InMemoryPreferenceStore, InMemoryScopeResolver, PreferenceValue};
