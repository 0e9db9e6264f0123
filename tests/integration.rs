use predicates::prelude::*;
use serde_json::Value;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_docname")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn names(records: &Value) -> Vec<Option<String>> {
    records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.get("name").and_then(Value::as_str).map(str::to_string))
        .collect()
}

fn some(name: &str) -> Option<String> {
    Some(name.to_string())
}

// -- stdin mode --

#[test]
fn stdin_mode_names_comments() {
    let input = std::fs::read_to_string(fixture_path("comments.json")).unwrap();

    let assert = cmd().write_stdin(input).assert().success();
    let output: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(
        names(&output),
        [some("explicit"), some("tick"), some("add"), some("Point"), None]
    );
}

#[test]
fn stdin_mode_keeps_other_fields() {
    let input = std::fs::read_to_string(fixture_path("comments.json")).unwrap();

    let assert = cmd().write_stdin(input).assert().success();
    let output: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    let math = &output[2];
    assert_eq!(math["description"], "Assigned to a property.");
    assert_eq!(math["context"]["file"], "lib/math.js");
    assert_eq!(math["context"]["ast"]["type"], "ExpressionStatement");
    assert_eq!(output[3]["typedef"]["type"]["name"], "Object");
}

#[test]
fn stdin_mode_module_exports() {
    let input = r#"{"context":{"ast":{"type":"MemberExpression","object":{"type":"Identifier","name":"module"},"property":{"type":"Identifier","name":"exports"}}}}"#;

    let assert = cmd().args(["-f", "ndjson"]).write_stdin(input).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let record: Value = serde_json::from_str(output.trim()).unwrap();
    assert_eq!(record["name"], "exports");
}

#[test]
fn stdin_mode_line_delimited() {
    let input = std::fs::read_to_string(fixture_path("stream.ndjson")).unwrap();

    let assert = cmd().args(["-f", "ndjson"]).write_stdin(input).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines: Vec<Value> = output
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["name"], "first");
    assert_eq!(lines[1]["name"], "onDone");
    assert_eq!(lines[2]["name"], "Widget");
}

#[test]
fn stdin_mode_empty_input() {
    cmd()
        .write_stdin("")
        .assert()
        .success()
        .stdout("[]\n");
}

// -- errors --

#[test]
fn missing_context_fails() {
    let input = std::fs::read_to_string(fixture_path("missing-context.json")).unwrap();

    cmd()
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed input"))
        .stderr(predicate::str::contains("comment #1"));
}

#[test]
fn keep_going_passes_broken_record_through() {
    let input = std::fs::read_to_string(fixture_path("missing-context.json")).unwrap();

    let assert = cmd()
        .arg("--keep-going")
        .write_stdin(input)
        .assert()
        .success()
        .stderr(predicate::str::contains("leaving comment unnamed"));
    let output: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(names(&output), [None, some("fine")]);
    assert_eq!(output[0]["description"], "No context at all.");
}

#[test]
fn depth_limit_is_reported() {
    let input = r#"{"context":{"ast":{"type":"ExpressionStatement","expression":{"type":"ExpressionStatement","expression":{"type":"Identifier","name":"deep"}}}}}"#;

    cmd()
        .args(["--max-depth", "1"])
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("traversal limit exceeded"));
}

#[test]
fn invalid_json_fails() {
    cmd()
        .write_stdin("{\"name\":")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid comment record"));
}

#[test]
fn invalid_format_fails() {
    cmd()
        .args(["-f", "xml"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

// -- file mode --

#[test]
fn file_mode_creates_output() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("comments.json"))
        .assert()
        .success();

    let output = std::fs::read_to_string(dir.path().join("comments.json")).unwrap();
    let output: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(names(&output)[2], some("add"));
}

#[test]
fn file_mode_multiple_files_with_format() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-f", "ndjson"])
        .arg(fixture_path("comments.json"))
        .arg(fixture_path("stream.ndjson"))
        .assert()
        .success();

    assert!(dir.path().join("comments.ndjson").exists());
    let stream = std::fs::read_to_string(dir.path().join("stream.ndjson")).unwrap();
    assert_eq!(stream.lines().count(), 3);
}

#[test]
fn file_mode_requires_output() {
    cmd()
        .arg(fixture_path("comments.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output is required"));
}

#[test]
fn file_mode_skips_unparseable_file() {
    let dir = TempDir::new().unwrap();
    let mut broken = NamedTempFile::with_suffix(".json").unwrap();
    broken.write_all(b"[{\"name\": ").unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(broken.path().to_str().unwrap())
        .arg(fixture_path("comments.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping"));

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn file_mode_directory_input() {
    let input_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    std::fs::write(
        input_dir.path().join("a.jsonl"),
        "{\"context\":{\"ast\":{\"type\":\"Identifier\",\"name\":\"a\"}}}\n",
    )
    .unwrap();
    std::fs::write(input_dir.path().join("notes.txt"), "not records").unwrap();

    cmd()
        .args(["-o", out_dir.path().to_str().unwrap()])
        .arg(input_dir.path().to_str().unwrap())
        .assert()
        .success();

    let output = std::fs::read_to_string(out_dir.path().join("a.json")).unwrap();
    let output: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(names(&output), [some("a")]);
}

#[test]
fn file_mode_refuses_colliding_outputs() {
    let input_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    std::fs::write(input_dir.path().join("a.json"), "[]").unwrap();
    std::fs::write(input_dir.path().join("a.ndjson"), "").unwrap();

    cmd()
        .args(["-o", out_dir.path().to_str().unwrap()])
        .arg(input_dir.path().to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("would both write"));

    assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);
}

// -- pass-through fidelity --

#[test]
fn named_record_is_written_back_verbatim() {
    let input = "{\"description\":\"d\",\"name\":\"foo\",\"context\":{\"file\":\"a.js\",\"ast\":{\"type\":\"Identifier\",\"name\":\"bar\"}}}\n";

    cmd()
        .args(["-f", "ndjson"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(input);
}

#[test]
fn unnamed_record_keeps_empty_name() {
    let input = "{\"name\":\"\",\"context\":{\"ast\":{\"type\":\"EmptyStatement\"}}}\n";

    cmd()
        .args(["-f", "ndjson"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(input);
}

#[test]
fn inferred_name_fills_existing_key_in_place() {
    let input = "{\"name\":\"\",\"description\":\"d\",\"context\":{\"ast\":{\"type\":\"Identifier\",\"name\":\"add\"}}}\n";
    let expected = "{\"name\":\"add\",\"description\":\"d\",\"context\":{\"ast\":{\"type\":\"Identifier\",\"name\":\"add\"}}}\n";

    cmd()
        .args(["-f", "ndjson"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(expected);
}

// -- deep syntax trees --

fn nested_record(levels: usize) -> String {
    let mut ast = r#"{"type":"Identifier","name":"deep"}"#.to_string();
    for _ in 0..levels {
        ast = format!(r#"{{"type":"ExpressionStatement","expression":{}}}"#, ast);
    }
    format!(r#"{{"context":{{"ast":{}}}}}"#, ast)
}

#[test]
fn ast_deeper_than_128_json_levels_is_named() {
    let assert = cmd()
        .args(["-f", "ndjson"])
        .write_stdin(nested_record(150))
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let mut de = serde_json::Deserializer::from_str(output.trim());
    de.disable_recursion_limit();
    let record: Value = serde::Deserialize::deserialize(&mut de).unwrap();
    assert_eq!(record["name"], "deep");
}

#[test]
fn file_mode_reports_overly_deep_input() {
    let out_dir = TempDir::new().unwrap();
    let mut input = NamedTempFile::with_suffix(".ndjson").unwrap();
    input.write_all(nested_record(60).as_bytes()).unwrap();

    cmd()
        .args(["-o", out_dir.path().to_str().unwrap()])
        .args(["--max-depth", "20"])
        .arg(input.path().to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("traversal limit exceeded"));
}
