#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::{Command, Output};

const CHIME_DOC: &str = r#"{
    "name": "name",
    "type": "Chime",
    "header": "Sample Header",
    "footer": "Sample Footer",
    "features": ["Feature1", "Feature2", "Feature3"],
    "destination": {
        "slack": null,
        "chime": {"url": "https://domain.com/sample_url#1234567890"},
        "webhook": null
    }
}"#;

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "notifwire-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn notifwire(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_notifwire"))
        .args(["--log-level", "error"])
        .args(args)
        .output()
        .expect("notifwire should run")
}

fn encode_hex(doc: &str) -> String {
    let output = notifwire(&["encode", "--json", doc, "--hex"]);
    assert!(
        output.status.success(),
        "encode failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout)
        .expect("hex output should be utf-8")
        .trim()
        .to_string()
}

#[test]
fn encode_then_decode_reproduces_document() {
    let hex = encode_hex(CHIME_DOC);

    let output = notifwire(&["--format", "json", "decode", "--hex", &hex]);
    assert!(output.status.success());

    let decoded: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("decode output should be json");
    let expected: serde_json::Value = serde_json::from_str(CHIME_DOC).unwrap();
    assert_eq!(decoded, expected);
}

#[test]
fn encode_to_file_and_decode_from_file() {
    let dir = unique_temp_dir("file");
    let input = dir.join("channel.json");
    let binary = dir.join("channel.bin");
    std::fs::write(&input, CHIME_DOC).expect("input should be writable");

    let output = notifwire(&[
        "encode",
        "--file",
        input.to_str().unwrap(),
        "--output",
        binary.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let output = notifwire(&[
        "--format",
        "pretty",
        "decode",
        "--file",
        binary.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("type=Chime"));
    assert!(text.contains("features=Feature1,Feature2,Feature3"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn encode_rejects_type_mismatch_unless_skipped() {
    let doc = CHIME_DOC.replace("\"type\": \"Chime\"", "\"type\": \"Slack\"");

    let output = notifwire(&["encode", "--json", &doc, "--hex"]);
    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("destination mismatch"));

    let output = notifwire(&["encode", "--json", &doc, "--hex", "--no-validate"]);
    assert!(output.status.success());
}

#[test]
fn decode_truncated_input_fails() {
    let hex = encode_hex(CHIME_DOC);
    let truncated = &hex[..hex.len() - 4];

    let output = notifwire(&["decode", "--hex", truncated]);
    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("truncated input"));
}

#[test]
fn validate_reports_mismatch_as_json() {
    let doc = CHIME_DOC.replace("\"type\": \"Chime\"", "\"type\": \"Slack\"");
    let output = notifwire(&["--format", "json", "validate", "--json", &doc]);
    assert_eq!(output.status.code(), Some(60));

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("report should be json");
    assert_eq!(report["valid"], serde_json::json!(false));
    assert_eq!(report["type"], serde_json::json!("Slack"));
}

#[test]
fn validate_accepts_consistent_document() {
    let output = notifwire(&["--format", "json", "validate", "--strict", "--json", CHIME_DOC]);
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("report should be json");
    assert_eq!(report["valid"], serde_json::json!(true));
}

#[test]
fn version_prints_package_version() {
    let output = notifwire(&["version"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        format!("notifwire {}", env!("CARGO_PKG_VERSION"))
    );
}
