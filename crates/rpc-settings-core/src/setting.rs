// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Catalogue of the preference keys read by the Rich Presence integration.

use serde::{Deserialize, Serialize};

/// Plug-in identity namespacing the settings inside a project scope.
pub const PLUGIN_ID: &str = "fr.kazejiyu.discord.rpc.integration";

/// A preference key consumed by the settings readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    /// Whether the project overrides the user-wide settings.
    UseProjectSettings,
    /// Show the name of the edited file.
    ShowFileName,
    /// Show the name of the project.
    ShowProjectName,
    /// Show the elapsed time.
    ShowElapsedTime,
    /// Show the icon of the edited file's language.
    ShowLanguageIcon,
    /// Show anything at all in Discord.
    ShowRichPresence,
    /// When the elapsed time is reset; holds an [`ElapsedTimeReset`] sentinel.
    ResetElapsedTime,
    /// Name displayed instead of the project's own.
    ProjectName,
    /// Whether a custom Discord application is used.
    UseCustomApplication,
    /// Id of the custom Discord application.
    CustomApplicationId,
    /// Whether the custom wording below replaces the default one.
    UseCustomWording,
    /// Custom "details" line.
    CustomDetailsWording,
    /// Custom "state" line.
    CustomStateWording,
}

impl Setting {
    /// Every setting, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::UseProjectSettings,
        Self::ShowFileName,
        Self::ShowProjectName,
        Self::ShowElapsedTime,
        Self::ShowLanguageIcon,
        Self::ShowRichPresence,
        Self::ResetElapsedTime,
        Self::ProjectName,
        Self::UseCustomApplication,
        Self::CustomApplicationId,
        Self::UseCustomWording,
        Self::CustomDetailsWording,
        Self::CustomStateWording,
    ];

    /// Property name of the key in the store.
    pub const fn property(self) -> &'static str {
        match self {
            Self::UseProjectSettings => "useProjectSettings",
            Self::ShowFileName => "showFileName",
            Self::ShowProjectName => "showProjectName",
            Self::ShowElapsedTime => "showElapsedTime",
            Self::ShowLanguageIcon => "showLanguageIcon",
            Self::ShowRichPresence => "showRichPresence",
            Self::ResetElapsedTime => "resetElapsedTime",
            Self::ProjectName => "projectName",
            Self::UseCustomApplication => "useCustomApplication",
            Self::CustomApplicationId => "customApplicationId",
            Self::UseCustomWording => "useCustomWording",
            Self::CustomDetailsWording => "customDetailsWording",
            Self::CustomStateWording => "customStateWording",
        }
    }

    /// Look a setting up by property name.
    pub fn from_property(property: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.property() == property)
    }
}

/// Policy deciding when the elapsed time shown in Discord starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElapsedTimeReset {
    /// Only when the IDE starts.
    OnStartup,
    /// Whenever a file of another project gets the focus.
    #[default]
    OnNewProject,
    /// Whenever another file gets the focus.
    OnNewFile,
}

impl ElapsedTimeReset {
    /// Sentinel stored under [`Setting::ResetElapsedTime`].
    pub const fn property(self) -> &'static str {
        match self {
            Self::OnStartup => "resetElapsedTimeOnStartup",
            Self::OnNewProject => "resetElapsedTimeOnNewProject",
            Self::OnNewFile => "resetElapsedTimeOnNewFile",
        }
    }

    /// Decode a stored sentinel. Matching is exact.
    pub fn from_property(property: &str) -> Option<Self> {
        [Self::OnStartup, Self::OnNewProject, Self::OnNewFile]
            .into_iter()
            .find(|p| p.property() == property)
    }
}
