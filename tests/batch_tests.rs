use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use taps_tools::batch::{self, BatchOptions, Operation};
use taps_tools::ToolError;

fn write_json(dir: &Path, name: &str, value: &Value) {
    fs::write(dir.join(name), serde_json::to_string(value).unwrap()).unwrap();
}

fn read_json(dir: &Path, name: &str) -> Value {
    serde_json::from_str(&fs::read_to_string(dir.join(name)).unwrap()).unwrap()
}

fn animation_with_text() -> Value {
    json!({
        "v": "5.9.0",
        "fonts": {"list": [{"fName": "Cairo"}]},
        "chars": [{"ch": "ع"}],
        "layers": [
            {"ty": 4, "nm": "Wave", "shapes": [{"ty": "st", "c": {"a": 0, "k": [0.1, 0.5, 0.9]}}]},
            {"ty": 5, "nm": "Label"}
        ]
    })
}

#[test]
fn clean_rewrites_matching_files_only() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "lottie-hero.json", &animation_with_text());
    write_json(dir.path(), "other.json", &animation_with_text());

    let report = batch::run(dir.path(), Operation::Clean, &BatchOptions::default()).unwrap();

    assert_eq!(report.outcomes.len(), 1);
    assert!(!report.has_failures());
    assert_eq!(report.outcomes[0].message(Operation::Clean), "Cleaned lottie-hero.json");

    let cleaned = read_json(dir.path(), "lottie-hero.json");
    assert!(cleaned.get("fonts").is_none());
    assert!(cleaned.get("chars").is_none());
    assert_eq!(cleaned["layers"].as_array().unwrap().len(), 1);
    assert_eq!(cleaned["layers"][0]["nm"], json!("Wave"));

    // Non-matching files are left alone
    assert_eq!(read_json(dir.path(), "other.json"), animation_with_text());
}

#[test]
fn clean_writes_compact_json() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("lottie-a.json"),
        "{\n  \"v\": \"5.9.0\",\n  \"layers\": [ {\"ty\": 5}, {\"ty\": 4} ]\n}",
    )
    .unwrap();

    batch::run(dir.path(), Operation::Clean, &BatchOptions::default()).unwrap();

    let text = fs::read_to_string(dir.path().join("lottie-a.json")).unwrap();
    assert_eq!(text, r#"{"v":"5.9.0","layers":[{"ty":4}]}"#);
}

#[test]
fn whiten_recolors_and_keeps_structure() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "lottie-logo.json", &animation_with_text());

    let report = batch::run(dir.path(), Operation::Whiten, &BatchOptions::default()).unwrap();

    assert_eq!(
        report.outcomes[0].message(Operation::Whiten),
        "Modernized lottie-logo.json (Whited-out)"
    );
    let whitened = read_json(dir.path(), "lottie-logo.json");
    assert_eq!(whitened["layers"][0]["shapes"][0]["c"]["k"], json!([1, 1, 1, 1]));
    // Recoloring never removes anything
    assert_eq!(whitened["layers"].as_array().unwrap().len(), 2);
    assert!(whitened.get("fonts").is_some());
}

#[test]
fn malformed_file_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("lottie-a-broken.json"), "{not json").unwrap();
    write_json(dir.path(), "lottie-b.json", &animation_with_text());

    let report = batch::run(dir.path(), Operation::Clean, &BatchOptions::default()).unwrap();

    assert_eq!(report.outcomes.len(), 2);
    assert!(report.has_failures());

    let failed: Vec<_> = report.failed().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].file_name, "lottie-a-broken.json");
    assert!(matches!(failed[0].result, Err(ToolError::Parse { .. })));
    assert!(failed[0]
        .message(Operation::Clean)
        .starts_with("Error processing lottie-a-broken.json"));

    assert_eq!(report.succeeded().count(), 1);
    assert!(read_json(dir.path(), "lottie-b.json").get("fonts").is_none());
    // The broken file is left as it was
    assert_eq!(
        fs::read_to_string(dir.path().join("lottie-a-broken.json")).unwrap(),
        "{not json"
    );
}

#[test]
fn text_layer_root_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "lottie-text.json", &json!({"ty": 5, "nm": "Only text"}));

    let report = batch::run(dir.path(), Operation::Clean, &BatchOptions::default()).unwrap();

    assert!(matches!(
        report.outcomes[0].result,
        Err(ToolError::TextLayerRoot { .. })
    ));
}

#[test]
fn missing_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = batch::run(&missing, Operation::Whiten, &BatchOptions::default()).unwrap_err();

    assert!(matches!(err, ToolError::DirectoryUnreadable { .. }));
}

#[test]
fn dry_run_leaves_files_untouched() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "lottie-hero.json", &animation_with_text());
    let before = fs::read_to_string(dir.path().join("lottie-hero.json")).unwrap();

    let options = BatchOptions {
        dry_run: true,
        ..BatchOptions::default()
    };
    let report = batch::run(dir.path(), Operation::Clean, &options).unwrap();

    assert!(!report.has_failures());
    assert_eq!(fs::read_to_string(dir.path().join("lottie-hero.json")).unwrap(), before);
}

#[test]
fn files_processed_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["lottie-c.json", "lottie-a.json", "lottie-b.json"] {
        write_json(dir.path(), name, &json!({"layers": []}));
    }
    fs::create_dir(dir.path().join("lottie-dir.json")).unwrap();

    let report = batch::run(dir.path(), Operation::Whiten, &BatchOptions::default()).unwrap();

    let names: Vec<_> = report.outcomes.iter().map(|o| o.file_name.as_str()).collect();
    assert_eq!(names, ["lottie-a.json", "lottie-b.json", "lottie-c.json"]);
}

#[test]
fn pretty_output_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "lottie-hero.json", &animation_with_text());

    let options = BatchOptions {
        pretty: true,
        ..BatchOptions::default()
    };
    batch::run(dir.path(), Operation::Whiten, &options).unwrap();

    let text = fs::read_to_string(dir.path().join("lottie-hero.json")).unwrap();
    assert!(text.contains('\n'));
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["v"], json!("5.9.0"));
}
