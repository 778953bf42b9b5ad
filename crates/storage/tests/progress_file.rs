use std::fs;

use serde_json::{Value, json};
use storage::{DataPaths, ProgressStore, VerbPerformance};
use verbs_core::catalog;
use verbs_core::model::{SessionRecord, VerbKey};
use verbs_core::time::fixed_clock;

fn populated_store() -> ProgressStore {
    let at = fixed_clock().local_stamp();
    let mut store = ProgressStore::default();
    let go = catalog::find_by_infinitive(catalog::verbs(), "go").unwrap();
    let burn = catalog::find_by_infinitive(catalog::verbs(), "burn").unwrap();
    store.update_per_verb(go, 3, 4.25, at);
    store.update_per_verb(burn, 1, 9.5, at);
    store.record_session(SessionRecord::new(at, 2, 6, 3, 13.75));
    store
        .meta
        .insert("created_by".to_owned(), Value::from("tests"));
    store
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths::under(dir.path());
    let store = populated_store();

    store.save(paths.progress_file()).unwrap();
    let loaded = ProgressStore::load(paths.progress_file());

    assert_eq!(loaded, store);
}

#[test]
fn garbage_file_loads_as_default_shaped_store() {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths::under(dir.path());
    fs::create_dir_all(paths.log_dir()).unwrap();
    fs::write(paths.progress_file(), "\u{0}\u{1} definitely not json").unwrap();

    let loaded = ProgressStore::load(paths.progress_file());

    assert_eq!(loaded, ProgressStore::default());
    assert!(loaded.meta.is_empty());
    assert!(loaded.sessions.is_empty());
    assert!(loaded.verbs.is_empty());
}

#[test]
fn missing_top_level_keys_are_filled_in() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");
    fs::write(&path, r#"{"meta": {"version": 1}}"#).unwrap();

    let loaded = ProgressStore::load(&path);
    assert_eq!(loaded.meta.get("version"), Some(&json!(1)));
    assert!(loaded.sessions.is_empty());

    loaded.save(&path).unwrap();
    let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw.get("sessions").is_some_and(Value::is_array));
    assert!(raw.get("verbs").is_some_and(Value::is_object));
}

#[test]
fn reads_files_in_the_established_format_and_keeps_stale_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");
    let existing = json!({
        "meta": {},
        "sessions": [{
            "timestamp": "2025-01-31T18:04:05",
            "base_sample_size": 20,
            "total_questions": 66,
            "total_correct": 60,
            "accuracy_percent": 90.91,
            "total_time_s": 312.5,
            "total_time_mmss": "05:12"
        }],
        "verbs": {
            "gehen; fahren||go": {
                "german": "gehen; fahren",
                "infinitive": "go",
                "times_asked": 2,
                "total_fields": 6,
                "total_correct_fields": 5,
                "total_time_s": 10.0,
                "last_seen": "2025-01-31T18:01:00"
            },
            "schweben||hover": {
                "german": "schweben",
                "infinitive": "hover",
                "times_asked": 1,
                "total_fields": 3,
                "total_correct_fields": 3,
                "total_time_s": 2.0,
                "last_seen": null
            }
        }
    });
    fs::write(&path, serde_json::to_string_pretty(&existing).unwrap()).unwrap();

    let loaded = ProgressStore::load(&path);
    assert_eq!(loaded.sessions.len(), 1);
    assert_eq!(loaded.sessions[0].total_time_mmss, "05:12");

    let go = catalog::find_by_infinitive(catalog::verbs(), "go").unwrap();
    assert_eq!(loaded.wrong_count(go), 1);
    assert!(loaded.verbs.contains_key(&VerbKey::new("schweben", "hover")));

    loaded.save(&path).unwrap();
    let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["sessions"][0]["timestamp"], json!("2025-01-31T18:04:05"));
    assert_eq!(raw["verbs"]["gehen; fahren||go"]["last_seen"], json!("2025-01-31T18:01:00"));
    assert!(raw["verbs"].get("schweben||hover").is_some());
}
