// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Accessor defaults, presence rules and the reset policy of `ProjectPreferences`.

use std::sync::Arc;

use rpc_settings_core::{
    ElapsedTimeReset, PreferencesError, ProjectId, ProjectPreferences, Setting, UserPreferences,
    PLUGIN_ID,
};
use rpc_settings_dry_tests::{InMemoryPreferenceStore, InMemoryScopeResolver};

fn reader(store: &InMemoryPreferenceStore) -> ProjectPreferences {
    ProjectPreferences::from_store(Arc::new(store.clone()))
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn resolves_store_of_the_plugin_scope() {
    let store = InMemoryPreferenceStore::new();
    store.set_bool(Setting::ShowFileName.property(), false);
    let resolver = InMemoryScopeResolver::new().with_project("demo", store);
    let project = ProjectId::new("demo");

    let prefs = ProjectPreferences::new(&resolver, &project).unwrap();

    assert!(!prefs.shows_file_name());
    assert_eq!(prefs.project(), Some(&project));
}

#[test]
fn unresolvable_scope_is_an_error() {
    let resolver = InMemoryScopeResolver::new();
    let err = ProjectPreferences::new(&resolver, &ProjectId::new("ghost")).unwrap_err();
    assert_eq!(
        err,
        PreferencesError::ScopeNotFound {
            plugin_id: PLUGIN_ID.to_owned(),
            project: "ghost".to_owned(),
        }
    );
}

#[test]
fn plugin_id_is_part_of_the_scope() {
    let resolver = InMemoryScopeResolver::new().with_project("demo", InMemoryPreferenceStore::new());
    let project = ProjectId::new("demo");
    assert!(ProjectPreferences::with_plugin_id(&resolver, &project, "another.plugin").is_err());
    assert!(ProjectPreferences::with_plugin_id(&resolver, &project, PLUGIN_ID).is_ok());
}

// =============================================================================
// Boolean flags
// =============================================================================

#[test]
fn empty_store_scenario() {
    let prefs = reader(&InMemoryPreferenceStore::new());
    assert!(prefs.shows_file_name());
    assert!(!prefs.use_project_settings());
    assert_eq!(prefs.project_name(), None);
    assert!(prefs.resets_elapsed_time_on_new_project());
}

#[test]
fn absent_flags_use_documented_defaults() {
    let prefs = reader(&InMemoryPreferenceStore::new());
    assert!(!prefs.use_project_settings());
    assert!(prefs.shows_file_name());
    assert!(prefs.shows_project_name());
    assert!(prefs.shows_elapsed_time());
    assert!(prefs.shows_language_icon());
    assert!(prefs.shows_rich_presence());
    assert!(!prefs.uses_custom_discord_application());
    assert!(!prefs.uses_custom_wording());
}

#[test]
fn present_flags_return_stored_values() {
    let store = InMemoryPreferenceStore::new();
    let prefs = reader(&store);
    let flags: [(Setting, fn(&ProjectPreferences) -> bool); 8] = [
        (Setting::UseProjectSettings, ProjectPreferences::use_project_settings),
        (Setting::ShowFileName, |p| p.shows_file_name()),
        (Setting::ShowProjectName, |p| p.shows_project_name()),
        (Setting::ShowElapsedTime, |p| p.shows_elapsed_time()),
        (Setting::ShowLanguageIcon, |p| p.shows_language_icon()),
        (Setting::ShowRichPresence, |p| p.shows_rich_presence()),
        (Setting::UseCustomApplication, |p| p.uses_custom_discord_application()),
        (Setting::UseCustomWording, |p| p.uses_custom_wording()),
    ];
    for (setting, read) in flags {
        for value in [true, false] {
            store.set_bool(setting.property(), value);
            assert_eq!(read(&prefs), value, "{setting:?} = {value}");
        }
    }
}

// =============================================================================
// Presence accessors
// =============================================================================

#[test]
fn blank_project_name_is_absent() {
    let store = InMemoryPreferenceStore::new();
    let prefs = reader(&store);
    for blank in ["", "   ", "\t\n"] {
        store.set_string(Setting::ProjectName.property(), blank);
        assert_eq!(prefs.project_name(), None, "{blank:?}");
    }
}

#[test]
fn project_name_is_returned_untrimmed() {
    let store = InMemoryPreferenceStore::new();
    store.set_string(Setting::ProjectName.property(), "  Echo ");
    assert_eq!(reader(&store).project_name().as_deref(), Some("  Echo "));
}

#[test]
fn only_spaces_and_control_characters_count_as_blank() {
    let store = InMemoryPreferenceStore::new();
    let prefs = reader(&store);
    for blank in ["\u{1}", "\u{1f}", " \u{0}\r "] {
        store.set_string(Setting::ProjectName.property(), blank);
        store.set_string(Setting::CustomApplicationId.property(), blank);
        assert_eq!(prefs.project_name(), None, "{blank:?}");
        assert_eq!(prefs.discord_application_id(), None, "{blank:?}");
    }
    for content in ["\u{3000}", "\u{a0}", " \u{2003} "] {
        store.set_string(Setting::ProjectName.property(), content);
        store.set_string(Setting::CustomApplicationId.property(), content);
        assert_eq!(prefs.project_name().as_deref(), Some(content), "{content:?}");
        assert_eq!(prefs.discord_application_id().as_deref(), Some(content), "{content:?}");
    }
}

#[test]
fn application_id_follows_the_presence_rule() {
    let store = InMemoryPreferenceStore::new();
    let prefs = reader(&store);
    assert_eq!(prefs.discord_application_id(), None);
    store.set_string(Setting::CustomApplicationId.property(), "  ");
    assert_eq!(prefs.discord_application_id(), None);
    store.set_string(Setting::CustomApplicationId.property(), "413038514616139786");
    assert_eq!(
        prefs.discord_application_id().as_deref(),
        Some("413038514616139786")
    );
}

// =============================================================================
// Conditional wording
// =============================================================================

#[test]
fn wording_is_absent_unless_enabled() {
    let store = InMemoryPreferenceStore::new();
    store.set_string(Setting::CustomDetailsWording.property(), "Writing {file}");
    store.set_string(Setting::CustomStateWording.property(), "In {project}");
    let prefs = reader(&store);

    assert_eq!(prefs.custom_details_wording(), None);
    assert_eq!(prefs.custom_state_wording(), None);

    store.set_bool(Setting::UseCustomWording.property(), false);
    assert_eq!(prefs.custom_details_wording(), None);
}

#[test]
fn enabled_wording_is_present_even_when_empty() {
    let store = InMemoryPreferenceStore::new();
    store.set_bool(Setting::UseCustomWording.property(), true);
    let prefs = reader(&store);

    assert_eq!(prefs.custom_details_wording().as_deref(), Some(""));
    assert_eq!(prefs.custom_state_wording().as_deref(), Some(""));

    store.set_string(Setting::CustomStateWording.property(), "   ");
    assert_eq!(prefs.custom_state_wording().as_deref(), Some("   "));
    store.set_string(Setting::CustomDetailsWording.property(), "Writing {file}");
    assert_eq!(prefs.custom_details_wording().as_deref(), Some("Writing {file}"));
}

// =============================================================================
// Reset policy
// =============================================================================

#[test]
fn absent_reset_policy_means_new_project() {
    let prefs = reader(&InMemoryPreferenceStore::new());
    assert!(!prefs.resets_elapsed_time_on_startup());
    assert!(prefs.resets_elapsed_time_on_new_project());
    assert!(!prefs.resets_elapsed_time_on_new_file());
    assert_eq!(prefs.elapsed_time_reset(), Some(ElapsedTimeReset::OnNewProject));
}

#[test]
fn each_sentinel_selects_exactly_one_policy() {
    let store = InMemoryPreferenceStore::new();
    let prefs = reader(&store);
    for policy in [
        ElapsedTimeReset::OnStartup,
        ElapsedTimeReset::OnNewProject,
        ElapsedTimeReset::OnNewFile,
    ] {
        store.set_string(Setting::ResetElapsedTime.property(), policy.property());
        let flags = [
            prefs.resets_elapsed_time_on_startup(),
            prefs.resets_elapsed_time_on_new_project(),
            prefs.resets_elapsed_time_on_new_file(),
        ];
        assert_eq!(flags.iter().filter(|f| **f).count(), 1, "{policy:?}");
        assert_eq!(prefs.elapsed_time_reset(), Some(policy));
    }
}

#[test]
fn unknown_reset_policy_matches_nothing() {
    let store = InMemoryPreferenceStore::new();
    store.set_string(Setting::ResetElapsedTime.property(), "resetElapsedTimeNever");
    let prefs = reader(&store);
    assert!(!prefs.resets_elapsed_time_on_startup());
    assert!(!prefs.resets_elapsed_time_on_new_project());
    assert!(!prefs.resets_elapsed_time_on_new_file());
    assert_eq!(prefs.elapsed_time_reset(), None);
}

// =============================================================================
// Reads
// =============================================================================

#[test]
fn reads_reflect_the_current_store_content() {
    let store = InMemoryPreferenceStore::new();
    let prefs = reader(&store);
    store.set_string(Setting::ProjectName.property(), "Before");
    assert_eq!(prefs.project_name().as_deref(), Some("Before"));
    store.remove(Setting::ProjectName.property());
    assert_eq!(prefs.project_name(), None);
}

#[test]
fn snapshot_serializes_every_setting() {
    let store = InMemoryPreferenceStore::new();
    store.set_bool(Setting::UseCustomWording.property(), true);
    store.set_string(Setting::ResetElapsedTime.property(), "resetElapsedTimeOnNewFile");
    let snapshot = reader(&store).snapshot();

    assert_eq!(snapshot.elapsed_time_reset, Some(ElapsedTimeReset::OnNewFile));
    assert_eq!(snapshot.custom_details_wording.as_deref(), Some(""));

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["elapsed_time_reset"], "on_new_file");
    assert_eq!(json["project_name"], serde_json::Value::Null);
    assert_eq!(json["shows_file_name"], true);
}
