//! Content loader error-message and whole-guide loading tests.

use assert_fs::prelude::*;
use cityguide_core::{
    loader::{self, CITY_FILE},
    CollectionKind, LoadError,
};
use predicates::prelude::*;
use rstest::rstest;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write_guide(dir: &assert_fs::TempDir) {
    dir.child(CITY_FILE)
        .write_str(
            "city:\n  name: Bratislava\n  tagline: Petita capital\nmap:\n  center: [48.1486, 17.1077]\n  zoom: 14\n",
        )
        .unwrap();
    for kind in CollectionKind::all() {
        let name = kind.as_str();
        dir.child(kind.file_name())
            .write_str(&format!(
                "{name}:\n  - id: {name}-1\n    name: First {name}\n    category: one\n    coordinates: [48.1, 17.1]\n    hours: \"9-17\"\n  - id: {name}-2\n    name: Second {name}\n    category: two\n    coordinates: [48.2, 17.2]\n"
            ))
            .unwrap();
    }
    dir.child("food_typical.yaml")
        .write_str("typical_food:\n  - name: Bryndzové halušky\n")
        .unwrap();
    dir.child("phrases.yaml")
        .write_str("phrases:\n  - original: Ďakujem\n    translation: Gràcies\n")
        .unwrap();
    dir.child("history.yaml")
        .write_str("history:\n  intro: Una ciutat de frontera.\n")
        .unwrap();
    dir.child("agenda.yaml").write_str("agenda: []\n").unwrap();
    dir.child("schedule.yaml")
        .write_str("schedule:\n  - day: Dijous\n    items: []\n")
        .unwrap();
}

// ---------------------------------------------------------------------------
// 1. Whole guide
// ---------------------------------------------------------------------------

#[test]
fn load_full_guide_preserves_order_and_extra_fields() {
    let dir = assert_fs::TempDir::new().unwrap();
    write_guide(&dir);

    let content = loader::load_content_at(dir.path()).expect("load");
    assert_eq!(content.city["name"], "Bratislava");
    assert_eq!(content.map.zoom, 14);

    let kinds: Vec<_> = content.collections.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, CollectionKind::all());

    let parks = content.collection(CollectionKind::Parks);
    let ids: Vec<_> = parks.records.iter().map(|r| r.get("id").unwrap().clone()).collect();
    assert_eq!(ids, vec!["parks-1", "parks-2"]);
    assert_eq!(parks.records[0].get("hours").unwrap(), "9-17");

    assert_eq!(content.phrases[0]["original"], "Ďakujem");
    assert_eq!(content.schedule[0]["day"], "Dijous");
}

// ---------------------------------------------------------------------------
// 2. Load error messages
// ---------------------------------------------------------------------------

#[rstest]
#[case::city("city.yaml")]
#[case::places("places.yaml")]
#[case::clubs("clubs.yaml")]
#[case::food("food_typical.yaml")]
#[case::schedule("schedule.yaml")]
fn missing_source_returns_not_found(#[case] file: &str) {
    let dir = assert_fs::TempDir::new().unwrap();
    write_guide(&dir);
    std::fs::remove_file(dir.path().join(file)).unwrap();

    let err = loader::load_content_at(dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }), "got: {err}");
    assert!(predicate::str::contains(file).eval(&err.to_string()));
}

#[test]
fn corrupt_yaml_returns_parse_error_with_path() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("bars.yaml")
        .write_str("bars: [unclosed\n  - broken: : :")
        .unwrap();

    let err = loader::load_collection(dir.path(), CollectionKind::Bars).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }), "got: {err}");
    let msg = err.to_string();
    assert!(msg.contains("bars.yaml"), "must contain file path, got: {msg}");
}

#[test]
fn wrong_top_level_key_returns_missing_key() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("cafes.yaml").write_str("coffee: []\n").unwrap();

    let err = loader::load_collection(dir.path(), CollectionKind::Cafes).unwrap_err();
    assert!(matches!(err, LoadError::MissingKey { ref key, .. } if key == "cafes"), "got: {err}");
    assert!(err.to_string().contains("`cafes`"));
}

#[rstest]
#[case::mapping_instead_of_list("museums:\n  id: not-a-list\n")]
#[case::scalar_records("museums:\n  - just a string\n")]
fn collection_with_wrong_shape_returns_shape_error(#[case] yaml: &str) {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("museums.yaml").write_str(yaml).unwrap();

    let err = loader::load_collection(dir.path(), CollectionKind::Museums).unwrap_err();
    assert!(matches!(err, LoadError::Shape { .. }), "got: {err}");
}

#[test]
fn map_settings_without_zoom_is_a_shape_error() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(CITY_FILE)
        .write_str("city:\n  name: X\nmap:\n  center: [1.0, 2.0]\n")
        .unwrap();

    let err = loader::load_city(dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::Shape { ref key, .. } if key == "map"), "got: {err}");
}

#[test]
fn loading_does_not_touch_the_content_directory() {
    let dir = assert_fs::TempDir::new().unwrap();
    write_guide(&dir);
    let before = std::fs::read_dir(dir.path()).unwrap().count();
    loader::load_content_at(dir.path()).expect("load");
    let after = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(before, after);
    dir.child("places.yaml").assert(predicate::str::contains("places-1"));
}
