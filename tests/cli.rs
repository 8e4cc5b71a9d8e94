use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use insta::assert_snapshot;
use predicates::prelude::*;
use serde_json::Value;

const STUDENT_SCHEMA: &str = r#"{
  "type": "object",
  "required": ["name", "grade"],
  "properties": {
    "name": {"type": "string"},
    "grade": {"type": "integer", "minimum": 1, "maximum": 12}
  }
}"#;

fn schemacheck(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("schemacheck").unwrap();
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("SCHEMACHECK_ROOT")
        .env_remove("SCHEMACHECK_SCHEMAS_DIR")
        .env_remove("SCHEMACHECK_DATA_DIR")
        .env_remove("SCHEMACHECK_BACKEND")
        .env_remove("SCHEMACHECK_MAX_DEPTH")
        .env_remove("SCHEMACHECK_LOG");
    cmd
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    dir.child("schemas/student.schema.json")
        .write_str(STUDENT_SCHEMA)
        .unwrap();
    dir.child("schemas/course.schema.json")
        .write_str(r#"{"type": "object", "required": ["code"]}"#)
        .unwrap();
    dir.child("schemas/teacher.schema.json")
        .write_str(r#"{"type": "object"}"#)
        .unwrap();
    dir.child("data/sample/course.json")
        .write_str(r#"[{"code": "MATH-1"}]"#)
        .unwrap();
    dir
}

#[test]
fn check_passes_with_valid_data() {
    let dir = project();
    dir.child("data/sample/student.json")
        .write_str(r#"[{"name": "Ada", "grade": 5}, {"name": "Bo", "grade": 12}]"#)
        .unwrap();

    schemacheck(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("[PASS] student (2 records)"))
        .stdout(predicate::str::contains("[SKIP] No sample data for teacher"))
        .stdout(predicate::str::contains("2 files validated, 0 total error(s)"));
}

#[test]
fn check_reports_failures_with_verbose_errors() {
    let dir = project();
    dir.child("data/sample/student.json")
        .write_str(r#"[{"name": "Ada", "grade": 13}]"#)
        .unwrap();

    let output = schemacheck(&dir)
        .args(["check", "-v"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    assert_snapshot!(stdout.trim(), @r"
    === Schema Validation ===

    Using built-in structural validator

    [PASS] course (1 records)
    [FAIL] student - 1 error(s)
      [ERR] student[0].grade: 13 > maximum 12
    [SKIP] No sample data for teacher

    2 files validated, 1 total error(s)
    ");
}

#[test]
fn check_hides_individual_errors_without_verbose() {
    let dir = project();
    dir.child("data/sample/student.json")
        .write_str(r#"{"grade": 3}"#)
        .unwrap();

    schemacheck(&dir)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[FAIL] student - 1 error(s)"))
        .stdout(predicate::str::contains("[ERR]").not());
}

#[test]
fn check_json_output() {
    let dir = project();
    dir.child("data/sample/student.json")
        .write_str(r#"[{"name": 7, "grade": 3}]"#)
        .unwrap();

    let output = schemacheck(&dir)
        .args(["--format", "json"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let report: Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(report["total_errors"], 1);
    let student = &report["files"][1];
    assert_eq!(student["entity"], "student");
    assert_eq!(student["status"], "failed");
    assert_eq!(student["errors"][0]["path"], "student[0].name");
    assert_eq!(student["errors"][0]["kind"], "type_mismatch");
    assert_eq!(
        student["errors"][0]["message"],
        "expected type string, got integer"
    );
}

#[test]
fn check_reports_parse_errors_and_continues() {
    let dir = project();
    dir.child("data/sample/student.json")
        .write_str("[{\"name\": \"Ada\",, }]")
        .unwrap();

    schemacheck(&dir)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[ERROR] student"))
        .stdout(predicate::str::contains("[PASS] course (1 records)"))
        .stderr(predicate::str::contains("student.json"));
}

#[test]
fn check_missing_directory_is_usage_error() {
    let dir = TempDir::new().unwrap();

    schemacheck(&dir)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Schemas directory not found"));
}

#[test]
fn check_reads_config_file_and_flags() {
    let dir = TempDir::new().unwrap();
    dir.child("spec/student.schema.json")
        .write_str(STUDENT_SCHEMA)
        .unwrap();
    dir.child("fixtures/student.yml")
        .write_str("- name: Ada\n  grade: 0\n")
        .unwrap();
    dir.child("schemacheck.yml")
        .write_str("schemas_dir: spec\ndata_dir: fixtures\n")
        .unwrap();

    schemacheck(&dir)
        .args(["check", "-v"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("student[0].grade: 0 < minimum 1"));

    schemacheck(&dir)
        .args(["--backend", "jsonschema"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Using jsonschema engine"));
}

#[test]
fn check_resolves_config_against_root() {
    let dir = TempDir::new().unwrap();
    dir.child("proj/spec/student.schema.json")
        .write_str(STUDENT_SCHEMA)
        .unwrap();
    dir.child("proj/fixtures/student.json")
        .write_str(r#"[{"name": "Ada", "grade": 2}]"#)
        .unwrap();
    dir.child("proj/ci.yml")
        .write_str("schemas_dir: spec\ndata_dir: fixtures\n")
        .unwrap();

    schemacheck(&dir)
        .args(["-C", "proj", "--config", "ci.yml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[PASS] student (1 records)"));
}

#[test]
fn check_rejects_unknown_config_keys() {
    let dir = project();
    dir.child("schemacheck.yml")
        .write_str("schema_dir: typo\n")
        .unwrap();

    schemacheck(&dir)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn validate_single_document() {
    let dir = project();
    dir.child("ok.json")
        .write_str(r#"{"name": "Ada", "grade": 4}"#)
        .unwrap();
    dir.child("bad.json")
        .write_str(r#"{"grade": true}"#)
        .unwrap();

    schemacheck(&dir)
        .args(["validate", "ok.json", "--schema", "schemas/student.schema.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok.json: valid"));

    schemacheck(&dir)
        .args(["validate", "bad.json", "-s", "schemas/student.schema.json"])
        .args(["--path", "student"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "student: missing required property 'name'",
        ))
        .stdout(predicate::str::contains(
            "student.grade: expected type integer, got boolean",
        ));
}

#[test]
fn validate_depth_limit_flag() {
    let dir = project();
    dir.child("deep.json").write_str("[[[[1]]]]").unwrap();
    dir.child("deep.schema.json")
        .write_str(r#"{"items": {"items": {"items": {"items": {"type": "integer"}}}}}"#)
        .unwrap();

    schemacheck(&dir)
        .args(["validate", "deep.json", "-s", "deep.schema.json"])
        .args(["--max-depth", "2", "--format", "json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("depth_exceeded"))
        .stdout(predicate::str::contains("$[0][0][0]"));

    schemacheck(&dir)
        .args(["validate", "deep.json", "-s", "deep.schema.json"])
        .assert()
        .success();
}
