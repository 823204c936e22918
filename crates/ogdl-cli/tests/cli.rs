use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DOC: &str = r#"{"a": {"b": 1}, "list": ["p", "q"], "c": "x y"}"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("doc.json"), DOC).unwrap();
        Self { dir }
    }

    fn doc(&self) -> PathBuf {
        self.dir.path().join("doc.json")
    }

    fn ogdl(&self) -> Command {
        let mut cmd = Command::cargo_bin("ogdl").unwrap();
        cmd.env("OGDL_CONFIG", self.dir.path().join("config.toml"))
            .env_remove("RUST_LOG");
        cmd
    }
}

#[test]
fn test_show() {
    let ws = Workspace::new();
    ws.ogdl()
        .arg("show")
        .arg(ws.doc())
        .assert()
        .success()
        .stdout("a\n  b\n    1\nlist\n  p\n  q\nc\n \"x y\"\n");
}

#[test]
fn test_show_root() {
    let ws = Workspace::new();
    ws.ogdl()
        .args(["show", "--root"])
        .arg(ws.doc())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("_\n  a\n"));
}

#[test]
fn test_get_scalar() {
    let ws = Workspace::new();
    ws.ogdl()
        .arg("get")
        .arg(ws.doc())
        .arg(r#"["!p", "a", "b"]"#)
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_get_index_and_container() {
    let ws = Workspace::new();
    ws.ogdl()
        .arg("get")
        .arg(ws.doc())
        .arg(r#"["!p", "list", ["!i", "1"]]"#)
        .assert()
        .success()
        .stdout("q\n");

    ws.ogdl()
        .arg("get")
        .arg(ws.doc())
        .arg(r#"["!p", "list"]"#)
        .assert()
        .success()
        .stdout("p\nq\n");
}

#[test]
fn test_get_missing_prints_nothing() {
    let ws = Workspace::new();
    ws.ogdl()
        .arg("get")
        .arg(ws.doc())
        .arg(r#"["!p", "zzz"]"#)
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn test_get_malformed_index() {
    let ws = Workspace::new();
    ws.ogdl()
        .arg("get")
        .arg(ws.doc())
        .arg(r#"["!p", "list", ["!i"]]"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Empty index"));

    ws.ogdl()
        .arg("--legacy-errors")
        .arg("get")
        .arg(ws.doc())
        .arg(r#"["!p", "list", ["!i"]]"#)
        .assert()
        .success()
        .stdout("empty []\n");
}

#[test]
fn test_get_from_stdin_as_json() {
    let ws = Workspace::new();
    ws.ogdl()
        .args(["-f", "json", "get", "-", r#"["!p", "a", "b"]"#])
        .write_stdin(DOC)
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_set() {
    let ws = Workspace::new();
    ws.ogdl()
        .arg("set")
        .arg(ws.doc())
        .arg(r#"["!p", "a", "b"]"#)
        .arg("5")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("a\n  b\n    5\n"));
}

#[test]
fn test_set_unwritable() {
    let ws = Workspace::new();
    ws.ogdl()
        .arg("set")
        .arg(ws.doc())
        .arg(r#"["!p", "list", ["!s"]]"#)
        .arg("5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be written"));
}

#[test]
fn test_eval_arithmetic() {
    let ws = Workspace::new();
    ws.ogdl()
        .arg("eval")
        .arg(ws.doc())
        .arg(r#"["!e", ["+", ["!p", "a", "b"], "2"]]"#)
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn test_eval_assignment_updates_context() {
    let ws = Workspace::new();
    ws.ogdl()
        .args(["eval", "--print-context"])
        .arg(ws.doc())
        .arg(r#"["!e", ["=", ["!p", "n"], "7"]]"#)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("7\n"))
        .stdout(predicate::str::ends_with("n\n  7\n"));
}

#[test]
fn test_eval_rejects_bad_tree() {
    let ws = Workspace::new();
    ws.ogdl()
        .arg("eval")
        .arg(ws.doc())
        .arg("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid tree"));
}

#[test]
fn test_config_roundtrip() {
    let ws = Workspace::new();
    ws.ogdl()
        .args(["config", "set", "format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"format\s+= json\s+#").unwrap());

    ws.ogdl()
        .args(["config", "get", "format"])
        .assert()
        .success()
        .stdout("json\n");

    ws.ogdl()
        .arg("get")
        .arg(ws.doc())
        .arg(r#"["!p", "list"]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"children\""));
}

#[test]
fn test_config_unset_and_list() {
    let ws = Workspace::new();
    ws.ogdl()
        .args(["config", "set", "include_root", "true"])
        .assert()
        .success();

    ws.ogdl()
        .args(["config", "unset", "include_root"])
        .assert()
        .success();

    ws.ogdl()
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"include_root\s+= false\s+\(default\)").unwrap());
}

#[test]
fn test_config_path_before_init() {
    let ws = Workspace::new();
    ws.ogdl()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not created)"));
}

#[test]
fn test_config_rejects_unknown_key() {
    let ws = Workspace::new();
    ws.ogdl()
        .args(["config", "set", "color", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_completions() {
    Command::cargo_bin("ogdl")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ogdl"));
}
