//! Query and merge integration tests
//!
//! These tests build small component trees on disk and verify the merge
//! session's filtering, conflict detection, and locale tracking.

use searchlabels::{
    ComponentCatalog, ComponentEntry, Config, FileFinder, LabelError, MergeSession, QueryFilter,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write_labels(dir: &Path, name: &str, contents: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), contents).unwrap();
}

fn catalog_config(components: &[(&str, &Path)]) -> Config {
    Config {
        components: components
            .iter()
            .map(|(name, root)| ComponentEntry {
                name: name.to_string(),
                classpath: vec![root.to_path_buf()],
                jars: vec![],
            })
            .collect(),
        exclude: vec![],
    }
}

fn session_for(config: &Config) -> MergeSession {
    let catalog = ComponentCatalog::from_config(config);
    let index = FileFinder::new(config).build_index(&catalog).unwrap();
    MergeSession::new(Arc::new(index))
}

// ============================================================================
// Guard Tests
// ============================================================================

#[test]
fn test_unparameterized_query_scans_nothing() {
    let temp = TempDir::new().unwrap();
    write_labels(
        temp.path(),
        "CommonLabels.xml",
        r#"<resource><property key="K1"><value xml:lang="en-US">Hello</value></property></resource>"#,
    );

    let config = catalog_config(&[("common", temp.path())]);
    let mut session = session_for(&config);

    session.query(&QueryFilter::default()).unwrap();

    assert!(session.labels().is_empty());
    assert!(session.locales_found().is_empty());
    assert_eq!(session.duplicated_locale_count(), 0);
}

// ============================================================================
// Filtering Tests
// ============================================================================

#[test]
fn test_component_filter_selects_only_owned_files() {
    let temp = TempDir::new().unwrap();
    let dir_a = temp.path().join("a");
    let dir_b = temp.path().join("b");
    write_labels(
        &dir_a,
        "common.xml",
        r#"<resource><property key="K1"><value xml:lang="en-US">Hello</value></property></resource>"#,
    );
    write_labels(
        &dir_b,
        "other.xml",
        r#"<resource><property key="K1"><value xml:lang="en-US">Hello</value></property></resource>"#,
    );

    let config = catalog_config(&[("A", &dir_a), ("B", &dir_b)]);
    let mut session = session_for(&config);

    session
        .query(&QueryFilter {
            component: Some("A".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(session.labels().len(), 1);
    let (label_key, entry) = session.labels().iter().next().unwrap();
    assert_eq!(label_key.key(), "K1");
    assert_eq!(label_key.file_name(), "common.xml");
    assert_eq!(entry.value("en-US").unwrap().value, "Hello");

    let locales: Vec<String> = session.locales_found().into_iter().collect();
    assert_eq!(locales, vec!["en-US".to_string()]);
    assert_eq!(session.duplicated_locale_count(), 0);
}

#[test]
fn test_file_name_filter_selects_one_file() {
    let temp = TempDir::new().unwrap();
    write_labels(
        temp.path(),
        "first.xml",
        r#"<resource><property key="K1"><value xml:lang="en-US">One</value></property></resource>"#,
    );
    write_labels(
        temp.path(),
        "second.xml",
        r#"<resource><property key="K2"><value xml:lang="en-US">Two</value></property></resource>"#,
    );

    let config = catalog_config(&[("common", temp.path())]);
    let mut session = session_for(&config);

    session
        .query(&QueryFilter {
            file_name: Some("second.xml".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(session.labels().len(), 1);
    assert_eq!(session.label_keys().next().unwrap().key(), "K2");
}

#[test]
fn test_key_filter_does_not_narrow_parsed_files() {
    let temp = TempDir::new().unwrap();
    write_labels(
        temp.path(),
        "first.xml",
        r#"<resource>
            <property key="K1"><value xml:lang="en-US">One</value></property>
            <property key="K2"><value xml:lang="fr-FR">Deux</value></property>
        </resource>"#,
    );
    write_labels(
        temp.path(),
        "second.xml",
        r#"<resource><property key="K3"><value xml:lang="de-DE">Drei</value></property></resource>"#,
    );

    let config = catalog_config(&[("common", temp.path())]);
    let mut session = session_for(&config);

    // The key bounds the query; it does not pre-filter files
    session
        .query(&QueryFilter {
            key: Some("K1".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(session.labels().len(), 3);
    let locales: Vec<String> = session.locales_found().into_iter().collect();
    assert_eq!(
        locales,
        vec!["de-DE".to_string(), "en-US".to_string(), "fr-FR".to_string()]
    );
}

// ============================================================================
// Merge and Conflict Tests
// ============================================================================

#[test]
fn test_duplicate_locale_keeps_first_value_and_records_conflict() {
    let temp = TempDir::new().unwrap();
    write_labels(
        temp.path(),
        "f.xml",
        r#"<resource>
            <property key="K"><value xml:lang="en-US">A</value></property>
            <property key="K"><value xml:lang="en-US">B</value></property>
        </resource>"#,
    );

    let config = catalog_config(&[("common", temp.path())]);
    let mut session = session_for(&config);
    session
        .query(&QueryFilter {
            file_name: Some("f.xml".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(session.labels().len(), 1);
    let (label_key, entry) = session.labels().iter().next().unwrap();
    assert_eq!(label_key.to_string(), "K#f.xml");
    assert_eq!(entry.value("en-US").unwrap().value, "A");

    assert_eq!(session.duplicated_locale_count(), 1);
    assert_eq!(session.duplicated_locale_labels()[0].key(), "K");
}

#[test]
fn test_identical_repeat_is_not_a_conflict() {
    let temp = TempDir::new().unwrap();
    write_labels(
        temp.path(),
        "f.xml",
        r#"<resource>
            <property key="K"><value xml:lang="en-US">A</value></property>
            <property key="K"><value xml:lang="en-US">A</value></property>
        </resource>"#,
    );

    let config = catalog_config(&[("common", temp.path())]);
    let mut session = session_for(&config);
    session
        .query(&QueryFilter {
            file_name: Some("f.xml".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(session.duplicated_locale_count(), 0);
}

#[test]
fn test_conflict_recorded_once_per_conflicting_write() {
    let temp = TempDir::new().unwrap();
    write_labels(
        temp.path(),
        "f.xml",
        r#"<resource>
            <property key="K"><value xml:lang="en-US">A</value></property>
            <property key="K"><value xml:lang="en-US">B</value></property>
            <property key="K"><value xml:lang="en-US">C</value></property>
        </resource>"#,
    );

    let config = catalog_config(&[("common", temp.path())]);
    let mut session = session_for(&config);
    session
        .query(&QueryFilter {
            file_name: Some("f.xml".to_string()),
            ..Default::default()
        })
        .unwrap();

    // The same label appears once per conflicting write
    assert_eq!(session.duplicated_locale_count(), 2);
    assert_eq!(session.duplicated_locale_labels().len(), 2);
}

#[test]
fn test_same_key_in_different_files_does_not_merge() {
    let temp = TempDir::new().unwrap();
    write_labels(
        temp.path(),
        "first.xml",
        r#"<resource><property key="K"><value xml:lang="en-US">One</value></property></resource>"#,
    );
    write_labels(
        temp.path(),
        "second.xml",
        r#"<resource><property key="K"><value xml:lang="en-US">Two</value></property></resource>"#,
    );

    let config = catalog_config(&[("common", temp.path())]);
    let mut session = session_for(&config);
    session
        .query(&QueryFilter {
            component: Some("common".to_string()),
            ..Default::default()
        })
        .unwrap();

    // (key, file) is the merge identity, so no conflict across files
    assert_eq!(session.labels().len(), 2);
    assert_eq!(session.duplicated_locale_count(), 0);
}

#[test]
fn test_observed_locales_are_deduplicated_across_files() {
    let temp = TempDir::new().unwrap();
    write_labels(
        temp.path(),
        "first.xml",
        r#"<resource>
            <property key="K1">
                <value xml:lang="en-US">One</value>
                <value xml:lang="fr-FR">Un</value>
            </property>
        </resource>"#,
    );
    write_labels(
        temp.path(),
        "second.xml",
        r#"<resource>
            <property key="K2">
                <value xml:lang="en-US">Two</value>
                <value xml:lang="it-IT">Due</value>
            </property>
        </resource>"#,
    );

    let config = catalog_config(&[("common", temp.path())]);
    let mut session = session_for(&config);
    session
        .query(&QueryFilter {
            component: Some("common".to_string()),
            ..Default::default()
        })
        .unwrap();

    let locales: Vec<String> = session.locales_found().into_iter().collect();
    assert_eq!(
        locales,
        vec!["en-US".to_string(), "fr-FR".to_string(), "it-IT".to_string()]
    );
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_underscore_locale_aborts_the_query() {
    let temp = TempDir::new().unwrap();
    write_labels(
        temp.path(),
        "f.xml",
        r#"<resource><property key="K"><value xml:lang="en_US">A</value></property></resource>"#,
    );

    let config = catalog_config(&[("common", temp.path())]);
    let mut session = session_for(&config);
    let result = session.query(&QueryFilter {
        file_name: Some("f.xml".to_string()),
        ..Default::default()
    });

    match result {
        Err(LabelError::UnderscoreLocale { file, key, locale }) => {
            assert_eq!(file, "f.xml");
            assert_eq!(key, "K");
            assert_eq!(locale, "en_US");
        }
        other => panic!("expected UnderscoreLocale, got {:?}", other),
    }
}

#[test]
fn test_malformed_file_aborts_the_query() {
    let temp = TempDir::new().unwrap();
    write_labels(
        temp.path(),
        "broken.xml",
        r#"<resource><property key="K"><value xml:lang="en-US">A</value>"#,
    );

    let config = catalog_config(&[("common", temp.path())]);
    let mut session = session_for(&config);
    let result = session.query(&QueryFilter {
        file_name: Some("broken.xml".to_string()),
        ..Default::default()
    });

    match result {
        Err(LabelError::MalformedXml { file, .. }) => assert_eq!(file, "broken.xml"),
        other => panic!("expected MalformedXml, got {:?}", other),
    }
}

// ============================================================================
// Unused-Label Filter Tests
// ============================================================================

#[test]
fn test_only_unused_suppresses_exception_list_keys() {
    let temp = TempDir::new().unwrap();
    write_labels(
        temp.path(),
        "f.xml",
        r#"<resource>
            <property key="week.monday"><value xml:lang="en-US">Monday</value></property>
            <property key="CommonOk"><value xml:lang="en-US">OK</value></property>
        </resource>"#,
    );

    let config = catalog_config(&[("common", temp.path())]);
    let mut session = session_for(&config);
    session
        .query(&QueryFilter {
            file_name: Some("f.xml".to_string()),
            only_unused: true,
            ..Default::default()
        })
        .unwrap();

    assert_eq!(session.labels().len(), 1);
    assert_eq!(session.label_keys().next().unwrap().key(), "CommonOk");
}

// ============================================================================
// Accessor Tests
// ============================================================================

#[test]
fn test_session_exposes_catalog_and_files() {
    let temp = TempDir::new().unwrap();
    write_labels(
        temp.path(),
        "f.xml",
        r#"<resource><property key="K"><value xml:lang="en-US">A</value></property></resource>"#,
    );

    let config = catalog_config(&[("common", temp.path())]);
    let session = session_for(&config);

    assert!(session.component_names().contains("common"));
    let file = session.label_file("f.xml").unwrap();
    assert_eq!(file.component, "common");
    assert_eq!(session.file_index().len(), 1);
}
