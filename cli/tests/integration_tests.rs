use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

const GOOD: &str = "\
// Type definitions for Foo 1.2
// Project: https://foo.dev
// Definitions by: Jane <https://github.com/jane>
// Definitions: https://github.com/DefinitelyTyped/DefinitelyTyped
// TypeScript Version: 3.1
";

const LEGACY: &str = "\
// Type definitions for bar v2.0
// Project: https://bar.dev
// Definitions by: Bob <http://bob.example>
// Definitions: https://github.com/DefinitelyTyped/DefinitelyTyped
";

fn dts_header(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dts-header"))
        .args(args)
        .output()
        .expect("failed to run dts-header")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_package(root: &Path, name: &str, text: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("index.d.ts"), text).unwrap();
}

#[test]
fn parse_file_prints_header_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("index.d.ts");
    fs::write(&input, GOOD).unwrap();

    let out = dts_header(&["parse-file", "--input", input.to_str().unwrap(), "--strict"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["library_name"], "Foo");
    assert_eq!(json["library_major_version"], 1);
    assert_eq!(json["typescript_version"], "3.1");
    assert_eq!(json["contributors"][0]["github_username"], "jane");
}

#[test]
fn parse_file_strict_failure_exits_with_rendered_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("index.d.ts");
    fs::write(&input, LEGACY).unwrap();

    let out = dts_header(&["parse-file", "--input", input.to_str().unwrap(), "--strict"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty());
    assert!(
        stderr(&out).contains("error: At 1:25 : Expected foo MAJOR.MINOR ('v' not allowed)"),
        "stderr: {}",
        stderr(&out)
    );

    let lenient = dts_header(&["parse-file", "--input", input.to_str().unwrap()]);
    assert!(lenient.status.success());
}

#[test]
fn parse_file_missing_input_fails() {
    let out = dts_header(&["parse-file", "--input", "/no/such/file.d.ts"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Failed to read '/no/such/file.d.ts'"));
}

#[test]
fn parse_stdin_yaml() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_dts-header"))
        .args(["parse-stdin", "--format", "yaml"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run dts-header");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(GOOD.as_bytes())
        .unwrap();
    let out = child.wait_with_output().unwrap();

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("library_name: Foo"));
    assert!(text.contains("non_npm: false"));
}

#[test]
fn check_exits_2_when_a_header_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_package(dir.path(), "foo", GOOD);
    write_package(dir.path(), "bar", LEGACY);

    let out = dts_header(&["check", dir.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(2));

    let table = stdout(&out);
    let lines: Vec<_> = table.lines().collect();
    assert!(lines[0].starts_with("bar"));
    assert!(lines[0].contains("FAIL"));
    assert!(lines[1].starts_with("foo"));
    assert!(lines[1].contains("OK"));
    assert!(table.contains("2 checked, 1 passed, 1 failed (strict mode)"));
    assert!(stderr(&out).contains("1 of 2 header(s) failed."));
}

#[test]
fn check_lenient_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    write_package(dir.path(), "foo", GOOD);
    write_package(dir.path(), "bar", LEGACY);

    let out = dts_header(&["check", dir.path().to_str().unwrap(), "--lenient", "--jobs", "2"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("2 checked, 2 passed, 0 failed (lenient mode)"));
}

#[test]
fn check_reads_config_from_root() {
    let dir = tempfile::tempdir().unwrap();
    write_package(dir.path(), "foo", GOOD);
    write_package(dir.path(), "bar", LEGACY);
    fs::write(dir.path().join(".dts-header.yml"), "exclude: [bar]\n").unwrap();

    let out = dts_header(&["check", dir.path().to_str().unwrap(), "--format", "json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["mode"], "strict");
    assert_eq!(json["outcomes"].as_array().unwrap().len(), 1);
    assert_eq!(json["outcomes"][0]["package"], "foo");
    assert_eq!(json["outcomes"][0]["status"], "valid");
}

#[test]
fn check_rejects_invalid_config_and_empty_roots() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("lint.yml");
    fs::write(&config, "jobs: 0\n").unwrap();
    write_package(dir.path(), "foo", GOOD);

    let out = dts_header(&[
        "check",
        dir.path().to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("invalid config: jobs must be at least 1"));

    let empty = tempfile::tempdir().unwrap();
    let out = dts_header(&["check", empty.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("no header files found under"));
}

#[test]
fn versions_queries() {
    let out = dts_header(&["versions", "supported"]);
    assert!(out.status.success());
    let supported: Vec<String> = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(supported.first().map(String::as_str), Some("2.8"));
    assert_eq!(supported.last().map(String::as_str), Some("3.9"));

    let out = dts_header(&["versions", "previous", "3.0"]);
    assert_eq!(stdout(&out).trim(), "\"2.9\"");

    let out = dts_header(&["versions", "range", "--min", "3.8"]);
    let range: Vec<String> = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(range, ["3.8", "3.9"]);

    let out = dts_header(&["versions", "range", "--min", "0.0"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let range: Vec<String> = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(range.len(), 12);
    assert_eq!(range.first().map(String::as_str), Some("2.8"));

    let out = dts_header(&["versions", "range", "--min", "9.9"]);
    assert!(out.status.success());
    let range: Vec<String> = serde_json::from_str(&stdout(&out)).unwrap();
    assert!(range.is_empty());

    let out = dts_header(&["versions", "tags", "3.9"]);
    let tags: Vec<String> = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(tags, ["ts3.9", "latest"]);

    let out = dts_header(&["versions", "redirectable", "3.0"]);
    assert_eq!(stdout(&out).trim(), "false");
}

#[test]
fn versions_rejects_unknown_version_without_panicking() {
    let out = dts_header(&["versions", "previous", "2.0"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("error: TypeScript 2.0 is not a supported version"));

    let out = dts_header(&["versions", "redirectable", "7.7"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!stderr(&out).contains("panicked"));
}

#[test]
fn types_versions_fragment() {
    let out = dts_header(&["types-versions", "3.1", "3.6"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json[">=3.1.0-0"]["*"][0], "ts3.1/*");
    assert_eq!(json[">=3.6.0-0"]["*"][0], "ts3.6/*");
}
