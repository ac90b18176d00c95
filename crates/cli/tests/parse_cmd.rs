//! CLI tests for `chatcmd parse`.

use std::fs;
use std::process::Command;

use assert_cmd::cargo;

fn chatcmd() -> Command {
    Command::new(cargo::cargo_bin!("chatcmd"))
}

fn parse_json(args: &[&str]) -> (bool, serde_json::Value) {
    let output = chatcmd()
        .arg("parse")
        .args(args)
        .args(["--output", "json"])
        .output()
        .expect("run parse command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json = serde_json::from_str(&stdout).expect("valid json");
    (output.status.success(), json)
}

#[test]
fn resolves_multi_word_command_with_embedded_table() {
    let (ok, json) = parse_json(&["permissions grant 123 admin"]);
    assert!(ok);
    assert_eq!(json["ok"], true);
    assert_eq!(json["command"], "permissions grant");
    assert_eq!(json["args"][0]["name"], "name");
    assert_eq!(json["args"][0]["value"], "123");
    assert_eq!(json["args"][1]["value"], "admin");
}

#[test]
fn reports_typed_and_default_arguments() {
    let (ok, json) = parse_json(&["issue close vyxal 42"]);
    assert!(ok);
    assert_eq!(json["args"][1]["type"], "int");
    assert_eq!(json["args"][1]["value"], 42);
    assert_eq!(json["args"][2]["value"], "");
}

#[test]
fn parse_error_exits_nonzero_with_envelope() {
    let (ok, json) = parse_json(&["maul"]);
    assert!(!ok);
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"]["code"], "CMD1201");
    assert_eq!(json["error"]["message"], "Expected a value for target");
}

#[test]
fn unknown_subcommand_lists_suggestions() {
    let (ok, json) = parse_json(&["groups frobnicate"]);
    assert!(!ok);
    assert_eq!(
        json["error"]["message"],
        "Unknown command. Perhaps you forgot some quotes? Valid subcommands of groups are: \
         groups list, groups members"
    );
    assert_eq!(json["error"]["span"]["start"], 0);
}

#[test]
fn prefix_strips_introducer() {
    let (ok, json) = parse_json(&["!!/coffee lyxal", "--prefix", "!!/"]);
    assert!(ok);
    assert_eq!(json["command"], "coffee");
    assert_eq!(json["args"][0]["value"], "lyxal");

    let (ok, json) = parse_json(&["just chatting", "--prefix", "!!/"]);
    assert!(!ok);
    assert_eq!(json["ignored"], true);
}

#[test]
fn custom_table_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("table.jsonc");
    fs::write(
        &path,
        r#"{
            // a one-command table
            "commands": [
                { "name": "roll", "params": [{ "name": "sides", "type": "int", "default": 6 }] },
            ]
        }"#,
    )
    .expect("write table");
    let path = path.to_string_lossy().to_string();

    let (ok, json) = parse_json(&["roll", "--table", &path]);
    assert!(ok);
    assert_eq!(json["args"][0]["value"], 6);

    let (ok, json) = parse_json(&["roll d20", "--table", &path]);
    assert!(!ok);
    assert_eq!(json["error"]["message"], "Expected int for sides but got string");
}

#[test]
fn missing_table_file_fails() {
    let output = chatcmd()
        .args(["parse", "hug", "--table", "no-such-table.json", "--output", "json"])
        .output()
        .expect("run parse command");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read table file"), "stderr: {stderr}");
}

#[test]
fn pretty_error_goes_to_stderr() {
    let output = chatcmd()
        .args(["parse", "status grumpy", "--output", "pretty"])
        .output()
        .expect("run parse command");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("CMD1203"), "stderr: {stderr}");
    assert!(stderr.contains("Invalid value for mood!"), "stderr: {stderr}");
}

#[test]
fn pretty_success_lists_arguments() {
    let output = chatcmd()
        .args(["parse", "status sleepy", "--output", "pretty"])
        .output()
        .expect("run parse command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("status\n"), "stdout: {stdout}");
    assert!(stdout.contains("mood: enum = sleepy"), "stdout: {stdout}");
}
