// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! What the Rich Presence integration needs to know about the user's choices,
//! independently of the scope (project or instance) they come from.

use std::sync::Arc;

use serde::Serialize;

use crate::listener::SettingChangeListener;
use crate::project::ProjectPreferences;
use crate::setting::ElapsedTimeReset;

/// Read-only view of Rich Presence settings for one scope.
pub trait UserPreferences: Send + Sync {
    /// Show the name of the edited file.
    fn shows_file_name(&self) -> bool;
    /// Show the name of the project.
    fn shows_project_name(&self) -> bool;
    /// Show the elapsed time.
    fn shows_elapsed_time(&self) -> bool;
    /// Show the icon of the edited file's language.
    fn shows_language_icon(&self) -> bool;
    /// Show anything at all in Discord.
    fn shows_rich_presence(&self) -> bool;

    /// Reset the elapsed time only when the IDE starts.
    fn resets_elapsed_time_on_startup(&self) -> bool;
    /// Reset the elapsed time when another project gets the focus.
    fn resets_elapsed_time_on_new_project(&self) -> bool;
    /// Reset the elapsed time when another file gets the focus.
    fn resets_elapsed_time_on_new_file(&self) -> bool;

    /// Name to display instead of the project's own.
    fn project_name(&self) -> Option<String>;

    /// Whether a custom Discord application is used.
    fn uses_custom_discord_application(&self) -> bool;
    /// Id of the custom Discord application.
    fn discord_application_id(&self) -> Option<String>;

    /// Whether custom wording replaces the default one.
    fn uses_custom_wording(&self) -> bool;
    /// Custom "details" line, present whenever custom wording is enabled.
    fn custom_details_wording(&self) -> Option<String>;
    /// Custom "state" line, present whenever custom wording is enabled.
    fn custom_state_wording(&self) -> Option<String>;

    /// Be notified of every change in this scope.
    fn add_setting_change_listener(&self, listener: Arc<dyn SettingChangeListener>);
    /// Stop notifying `listener`. Returns `false` if it was not registered.
    fn remove_setting_change_listener(&self, listener: &Arc<dyn SettingChangeListener>) -> bool;

    /// Capture every setting at once.
    fn snapshot(&self) -> PreferencesSnapshot {
        let elapsed_time_reset = if self.resets_elapsed_time_on_startup() {
            Some(ElapsedTimeReset::OnStartup)
        } else if self.resets_elapsed_time_on_new_project() {
            Some(ElapsedTimeReset::OnNewProject)
        } else if self.resets_elapsed_time_on_new_file() {
            Some(ElapsedTimeReset::OnNewFile)
        } else {
            None
        };
        PreferencesSnapshot {
            shows_file_name: self.shows_file_name(),
            shows_project_name: self.shows_project_name(),
            shows_elapsed_time: self.shows_elapsed_time(),
            shows_language_icon: self.shows_language_icon(),
            shows_rich_presence: self.shows_rich_presence(),
            elapsed_time_reset,
            project_name: self.project_name(),
            uses_custom_discord_application: self.uses_custom_discord_application(),
            discord_application_id: self.discord_application_id(),
            uses_custom_wording: self.uses_custom_wording(),
            custom_details_wording: self.custom_details_wording(),
            custom_state_wording: self.custom_state_wording(),
        }
    }
}

/// Point-in-time copy of a [`UserPreferences`] view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferencesSnapshot {
    /// See [`UserPreferences::shows_file_name`].
    pub shows_file_name: bool,
    /// See [`UserPreferences::shows_project_name`].
    pub shows_project_name: bool,
    /// See [`UserPreferences::shows_elapsed_time`].
    pub shows_elapsed_time: bool,
    /// See [`UserPreferences::shows_language_icon`].
    pub shows_language_icon: bool,
    /// See [`UserPreferences::shows_rich_presence`].
    pub shows_rich_presence: bool,
    /// Active reset policy; `None` when the stored value is unrecognised.
    pub elapsed_time_reset: Option<ElapsedTimeReset>,
    /// See [`UserPreferences::project_name`].
    pub project_name: Option<String>,
    /// See [`UserPreferences::uses_custom_discord_application`].
    pub uses_custom_discord_application: bool,
    /// See [`UserPreferences::discord_application_id`].
    pub discord_application_id: Option<String>,
    /// See [`UserPreferences::uses_custom_wording`].
    pub uses_custom_wording: bool,
    /// See [`UserPreferences::custom_details_wording`].
    pub custom_details_wording: Option<String>,
    /// See [`UserPreferences::custom_state_wording`].
    pub custom_state_wording: Option<String>,
}

/// The preferences that apply to `project`: its own when it opted into
/// project settings, `instance` otherwise.
pub fn effective_preferences<'a>(
    project: &'a ProjectPreferences,
    instance: &'a dyn UserPreferences,
) -> &'a dyn UserPreferences {
    if project.use_project_settings() {
        return project;
    }
    instance
}
