//! Integration tests for CLI commands.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

const AVATAR_RECEIPT: &str = r#"{
  "action": "generate_avatar",
  "timestamp": "2024-03-15T10:00:00Z",
  "cost": 0.05
}"#;
const AVATAR_DIGEST: &str = "4375a50aa2a6b39c312a4936e539f87aa87ad396a60df3169f0342b073ed565f";

fn write_file(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().to_string()
}

fn run_cli(args: &[&str]) -> (Option<i32>, String, String) {
    run_cli_with_stdin(args, None)
}

fn run_cli_with_stdin(args: &[&str], stdin: Option<&str>) -> (Option<i32>, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_gatehash"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("GATEHASH_MAX_DEPTH")
        .env_remove("GATEHASH_MAX_SIZE")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI");

    {
        let mut pipe = child.stdin.take().unwrap();
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).unwrap();
        }
    }

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (output.status.code(), stdout, stderr)
}

#[test]
fn test_canonicalize_command() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "receipt.json", r#"{"b":2,"a":[1,{"d":4,"c":3}]}"#);

    let (code, stdout, _) = run_cli(&["canonicalize", &path]);
    assert_eq!(code, Some(0));
    assert_eq!(stdout, "{\"a\":[1,{\"c\":3,\"d\":4}],\"b\":2}\n");
}

#[test]
fn test_canonicalize_from_stdin() {
    let (code, stdout, _) = run_cli_with_stdin(&["canonicalize"], Some(AVATAR_RECEIPT));
    assert_eq!(code, Some(0));
    assert_eq!(
        stdout.trim_end(),
        r#"{"action":"generate_avatar","cost":0.05,"timestamp":"2024-03-15T10:00:00Z"}"#
    );
}

#[test]
fn test_digest_command() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "receipt.json", AVATAR_RECEIPT);

    let (code, stdout, _) = run_cli(&["digest", &path]);
    assert_eq!(code, Some(0));
    assert_eq!(stdout.trim(), AVATAR_DIGEST);

    let (code, stdout, _) = run_cli(&["digest", &path, "--json"]);
    assert_eq!(code, Some(0));
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["digest"], AVATAR_DIGEST);
    assert_eq!(parsed["profile"], "gatehash-canonical-v1");
}

#[test]
fn test_verify_command_verified() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "receipt.json", AVATAR_RECEIPT);

    let (code, stdout, _) = run_cli(&["verify", &path, "--expected", AVATAR_DIGEST, "--strict"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("VERIFIED"));
    assert!(stdout.contains(AVATAR_DIGEST));
}

#[test]
fn test_verify_command_failed() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "receipt.json", AVATAR_RECEIPT);
    let tampered = AVATAR_DIGEST.replacen('4', "5", 1);

    let (code, stdout, _) = run_cli(&["verify", &path, "--expected", &tampered, "--json"]);
    assert_eq!(code, Some(2));
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["status"], "failed");
    assert_eq!(parsed["digest"], AVATAR_DIGEST);
}

#[test]
fn test_verify_command_unverified() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "receipt.json", AVATAR_RECEIPT);

    let (code, stdout, _) = run_cli(&["verify", &path]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("UNVERIFIED"));
    assert!(stdout.contains(AVATAR_DIGEST));

    let (code, _, _) = run_cli(&["verify", &path, "--strict"]);
    assert_eq!(code, Some(2));
}

#[test]
fn test_verify_command_malformed() {
    let (code, stdout, _) =
        run_cli_with_stdin(&["verify", "--json", "-e", AVATAR_DIGEST], Some(r#"{"cost":0.05,}"#));
    assert_eq!(code, Some(2));
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["status"], "malformed");
    assert!(parsed.get("digest").is_none());
}

#[test]
fn test_canonicalize_and_digest_reject_malformed_receipt() {
    for command in ["canonicalize", "digest"] {
        let (code, stdout, stderr) = run_cli_with_stdin(&[command], Some(r#"{"a":1,"a":2}"#));
        assert_eq!(code, Some(2), "{command}");
        assert!(stdout.is_empty());
        assert!(stderr.contains("Malformed: duplicate key \"a\""), "{stderr}");
    }
}

#[test]
fn test_canonicalize_rounds_halfway_numbers_to_even() {
    let (code, stdout, _) =
        run_cli_with_stdin(&["canonicalize"], Some(r#"{"cost":1658206780088562.25}"#));
    assert_eq!(code, Some(0));
    assert_eq!(stdout, "{\"cost\":1658206780088562.2}\n");
}

#[test]
fn test_max_depth_flag() {
    let (code, stdout, _) =
        run_cli_with_stdin(&["verify", "--max-depth", "1", "--json"], Some("[[1]]"));
    assert_eq!(code, Some(2));
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["status"], "malformed");
    assert_eq!(parsed["error"], "nesting depth exceeds maximum 1");
}

#[test]
fn test_missing_input_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.json");
    assert!(!Path::new(&missing).exists());

    let (code, stdout, stderr) = run_cli(&["verify", &missing.to_string_lossy()]);
    assert_eq!(code, Some(1));
    assert!(stdout.is_empty());
    assert!(stderr.contains("Error"));
}

#[test]
fn test_verify_batch_command() {
    let temp_dir = TempDir::new().unwrap();
    let receipts = write_file(
        &temp_dir,
        "receipts.ndjson",
        &format!(
            "{}\n{}\n{}\n",
            r#"{"action":"generate_avatar","timestamp":"2024-03-15T10:00:00Z","cost":0.05}"#,
            r#"{"a":1,"b":2}"#,
            r#"{"cost":0.05,}"#,
        ),
    );
    let digests = write_file(
        &temp_dir,
        "digests.txt",
        &format!(
            "{}\n{}\n",
            AVATAR_DIGEST.to_uppercase(),
            "43258cff783fe7036d8a43033f830adfc60ec037382473548ac742b888292777"
        ),
    );

    let (code, stdout, _) = run_cli(&["verify-batch", &receipts, "--digests", &digests]);
    assert_eq!(code, Some(2));
    assert!(stdout.contains("LINE"));
    assert!(stdout.contains("3 receipts: 2 verified, 0 unverified, 0 failed, 1 malformed"));

    let (code, stdout, _) = run_cli(&[
        "verify-batch",
        &receipts,
        "--digests",
        &digests,
        "--json",
        "--max-receipts",
        "2",
    ]);
    assert_eq!(code, Some(0));
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row["status"] == "verified"));
    assert_eq!(rows[1]["line"], 2);
}
