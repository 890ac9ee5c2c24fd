//! Integration tests for fpv-core.
//!
//! These tests drive the public API end to end: built-in providers, custom
//! policies loaded from JSON, and stateless incremental calls that pass a
//! serialized snapshot between them.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use fpv_core::Category;
use fpv_core::Engine;
use fpv_core::PathError;
use fpv_core::PathOptions;
use fpv_core::Policy;
use fpv_core::PolicyConfig;
use fpv_core::Provider;
use fpv_core::Snapshot;
use fpv_core::Subtype;
use fpv_core::add_parts;
use fpv_core::build_path;
use fpv_core::clean_path;
use fpv_core::remove_part;
use fpv_core::rules::Mode;
use fpv_core::validate_path;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn categories(issues: &[fpv_core::Issue]) -> Vec<Category> {
    issues.iter().map(|i| i.category.clone()).collect()
}

#[test]
fn test_windows_validate_then_clean() {
    let policy = Provider::Windows.policy().unwrap();
    let path = "C:\\Users\\CON\\notes?.txt";

    let report = validate_path(path, &policy, &PathOptions::file()).unwrap();
    assert_eq!(
        categories(&report.issues),
        vec![Category::RestrictedName, Category::InvalidChar]
    );
    assert_eq!(report.issues[0].index(), Some(2));
    assert_eq!(report.issues[1].index(), Some(3));
    assert_eq!(report.issues[1].details.invalid_chars, vec!['?']);

    let cleaned = clean_path(path, &policy, &PathOptions::file(), true).unwrap();
    assert_eq!(cleaned.cleaned_path, "C:\\Users\\notes.txt");
    assert_eq!(cleaned.is_valid(), Some(true));
    assert_eq!(cleaned.actions_applied[0].subtype, Subtype::Remove);
}

#[test]
fn test_macos_hidden_folder_and_reserved_file() {
    let policy = Provider::MacOs.policy().unwrap();
    let mut engine = Engine::new(".config/.DS_Store", &policy, &PathOptions::file());

    let issues = engine.validate().unwrap();
    assert_eq!(
        categories(&issues),
        vec![Category::LeadingPeriod, Category::RestrictedName]
    );

    let report = engine.clean(true).unwrap();
    assert_eq!(report.cleaned_path, "/config");
    assert!(report.issues.is_empty());
}

#[test]
fn test_egnyte_patterns_and_suffixes() {
    let policy = Provider::Egnyte.policy().unwrap();

    let report = validate_path("Shared/~$report.docx", &policy, &PathOptions::file()).unwrap();
    assert_eq!(categories(&report.issues), vec![Category::RestrictedPattern]);

    let report = validate_path("Shared/draft.tmp", &policy, &PathOptions::file()).unwrap();
    assert_eq!(categories(&report.issues), vec![Category::RestrictedSuffix]);
}

#[test]
fn test_onedrive_root_requires_absolute_layout() {
    let policy = Provider::OneDrive.policy().unwrap();
    let absolute = PathOptions::default().with_relative(false);

    let report = validate_path("root/Docs", &policy, &absolute).unwrap();
    assert!(report.is_valid());

    let report = validate_path("drive/Docs", &policy, &absolute).unwrap();
    assert_eq!(categories(&report.issues), vec![Category::RootFormat]);

    // Relative paths have no root to check.
    let report = validate_path("drive/Docs", &policy, &PathOptions::default()).unwrap();
    assert!(report.is_valid());
}

#[test]
fn test_custom_policy_from_json() {
    let config = PolicyConfig::from_json(
        r##"{
            "name": "archive",
            "max_component_length": 8,
            "invalid_characters": "#",
            "restricted_prefixes": ["tmp_"]
        }"##,
    )
    .unwrap();
    let policy = Policy::from_config(config).unwrap();
    assert_eq!(policy.name(), "archive");
    assert_eq!(policy.separator(), "/");

    let mut engine = Engine::new("tmp_a/bad#/averyverylongname", &policy, &PathOptions::default());
    let issues = engine.validate().unwrap();
    assert_eq!(
        categories(&issues),
        vec![
            Category::RestrictedPrefix,
            Category::InvalidChar,
            Category::ComponentLength
        ]
    );
    assert_eq!(issues[2].details.current_length, Some(17));

    let report = engine.clean(true).unwrap();
    assert_eq!(report.cleaned_path, "/a/bad/averyver");
    assert!(report.issues.is_empty());
}

#[test]
fn test_invalid_policy_rejected() {
    let config = PolicyConfig {
        restricted_patterns: strings(&["("]),
        ..PolicyConfig::default()
    };
    let err = Policy::from_config(config).unwrap_err();
    assert!(matches!(err, PathError::InvalidPolicy { .. }));

    let config = PolicyConfig {
        separator: String::new(),
        ..PolicyConfig::default()
    };
    assert!(Policy::from_config(config).is_err());
}

#[test]
fn test_stateless_round_trip_through_json() {
    let policy = Provider::Box.policy().unwrap();
    let options = PathOptions::default();

    let validated = validate_path("projects/q1", &policy, &options).unwrap();
    assert!(validated.is_valid());
    let wire = validated.snapshot.to_json().unwrap();

    let base = Snapshot::from_json(&wire).unwrap();
    let added = add_parts(&base, &strings(&["outlook.pst"]), true, true, &policy, &options).unwrap();
    assert_eq!(added.updated_path, "/projects/q1/outlook.pst");
    assert_eq!(categories(&added.new_issues), vec![Category::RestrictedName]);
    assert_eq!(added.new_issues[0].index(), Some(2));

    let wire = added.snapshot.to_json_pretty().unwrap();
    let base = Snapshot::from_json(&wire).unwrap();
    let removed = remove_part(&base, 2, &policy, &options).unwrap();
    assert_eq!(removed.removed_part, "outlook.pst");
    assert_eq!(removed.updated_path, "/projects/q1");
    assert!(removed.remaining_issues.is_empty());
    assert_eq!(removed.parts, strings(&["projects", "q1"]));
}

#[test]
fn test_stateless_remove_first_keeps_later_issues() {
    let policy = Provider::Windows.policy().unwrap();
    let options = PathOptions::default().with_separator("/").with_relative(true);

    let validated = validate_path("a/b?/c", &policy, &options).unwrap();
    assert_eq!(validated.issues[0].index(), Some(1));

    let removed = remove_part(&validated.snapshot, 0, &policy, &options).unwrap();
    assert_eq!(removed.updated_path, "/b?/c");
    assert_eq!(categories(&removed.remaining_issues), vec![Category::InvalidChar]);
    assert_eq!(removed.remaining_issues[0].index(), Some(0));

    let added = add_parts(&removed.snapshot, &strings(&["d"]), false, true, &policy, &options).unwrap();
    assert!(added.new_issues.is_empty());
    assert_eq!(categories(&added.all_issues), vec![Category::InvalidChar]);
    assert_eq!(added.all_issues[0].index(), Some(0));
}

#[test]
fn test_add_after_file_is_structural_error() {
    let policy = Provider::Linux.policy().unwrap();
    let base = validate_path("a/b.txt", &policy, &PathOptions::file())
        .unwrap()
        .snapshot;

    let err = add_parts(&base, &strings(&["c"]), false, true, &policy, &PathOptions::default())
        .unwrap_err();
    assert!(matches!(err, PathError::AlreadyTerminated { .. }));
    assert!(err.is_structural());
}

#[test]
fn test_build_path_records_each_step() {
    let policy = Provider::Dropbox.policy().unwrap();
    let report = build_path(
        "Team",
        &strings(&["plan\u{1F600}", ".lock"]),
        false,
        &policy,
        &PathOptions::default(),
    )
    .unwrap();

    assert_eq!(report.final_path, "/Team/plan\u{1F600}/.lock");
    assert_eq!(categories(&report.steps[0].issues), vec![Category::WideChar]);
    assert_eq!(categories(&report.steps[1].issues), vec![Category::RestrictedName]);
    assert_eq!(report.all_issues.len(), 2);
    assert_eq!(report.parts.len(), 3);
}

#[test]
fn test_long_path_truncated_to_limit() {
    let policy = Provider::Box.policy().unwrap();
    let mut path = String::from("a");
    for _ in 0..30 {
        path.push_str("/abcdefghij");
    }
    path.push_str("/f.txt");

    let report = validate_path(&path, &policy, &PathOptions::file()).unwrap();
    assert_eq!(categories(&report.issues), vec![Category::PathLength]);
    assert_eq!(report.issues[0].details.current_length, Some(338));
    assert_eq!(report.issues[0].details.max_length, Some(255));

    let cleaned = clean_path(&path, &policy, &PathOptions::file(), true).unwrap();
    assert!(cleaned.cleaned_path.chars().count() <= 255);
    assert!(cleaned.cleaned_path.starts_with("/a/"));
    assert!(cleaned.cleaned_path.ends_with("/f.txt"));
    assert_eq!(cleaned.is_valid(), Some(true));
}

#[test]
fn test_strict_validation_error_carries_issues() {
    let policy = Provider::ShareFile.policy().unwrap();
    let mut engine = Engine::new("a;b/c", &policy, &PathOptions::default());

    let err = engine.validate_strict().unwrap_err();
    assert_eq!(err.to_string(), "path is invalid: 1 issue(s) found");
    assert_eq!(err.issues().unwrap()[0].category, Category::InvalidChar);
}

#[test]
fn test_incremental_edits_match_fresh_validation() {
    let policy = Provider::SharePoint.policy().unwrap();
    let options = PathOptions::default();

    let mut engine = Engine::new("sites/team", &policy, &options);
    engine.validate().unwrap();
    engine.add_part("bad#name", false, Some(Mode::Validate)).unwrap();
    engine.add_part("ok", false, Some(Mode::Validate)).unwrap();
    engine.remove_part(1, Some(Mode::Validate)).unwrap();

    let fresh = validate_path(&engine.full_path(), &policy, &options).unwrap();
    assert_eq!(engine.issues(), fresh.issues.as_slice());
}
