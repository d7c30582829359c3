#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::{Command, Output};

fn widcfg(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_widcfg"))
        .args(["--log-level", "error", "--format", "json"])
        .args(args)
        .env_remove("WIDCFG_SEED_FILE")
        .env_remove("RUST_LOG")
        .output()
        .expect("widcfg should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn unique_temp_file(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "widcfg-{tag}-{}-{}.json",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ))
}

fn slot<'a>(decoded: &'a serde_json::Value, name: &str) -> &'a serde_json::Value {
    decoded["table"]
        .as_array()
        .expect("table should be an array")
        .iter()
        .find(|s| s["name"] == name)
        .unwrap_or_else(|| panic!("{name} should be tracked"))
}

#[test]
fn encode_outputs_hex_frame() {
    let out = stdout_json(&widcfg(&["encode", "STATUS=3", "--header", "R:7"]));
    assert_eq!(out["frame"], "520700000500010003");
    assert_eq!(out["records"], 1);
    assert_eq!(out["len"], 9);
}

#[test]
fn encode_then_decode_roundtrips() {
    let encoded = stdout_json(&widcfg(&[
        "encode",
        "--header",
        "R:4",
        "RSSI=200",
        "FAILED_COUNT=0x12345678",
        "FIRMWARE_VERSION=fw-1.2",
        "ANTENNA_SELECTION=0a0b0c",
    ]));
    let hex = encoded["frame"].as_str().expect("frame should be a string");

    let decoded = stdout_json(&widcfg(&["decode", hex]));
    assert_eq!(decoded["message_type"], "response");
    assert_eq!(decoded["response"]["kind"], "cfg");
    assert_eq!(decoded["response"]["seq_no"], 4);
    assert_eq!(decoded["summary"]["applied"], 4);
    assert_eq!(decoded["summary"]["ignored"], 0);

    assert_eq!(slot(&decoded, "RSSI")["value"], "200");
    assert_eq!(slot(&decoded, "FAILED_COUNT")["value"], "305419896");
    assert_eq!(slot(&decoded, "FIRMWARE_VERSION")["value"], "fw-1.2");
    assert_eq!(slot(&decoded, "ANTENNA_SELECTION")["value"], "0a0b0c");
}

#[test]
fn decode_reports_checksum_abort() {
    // STATUS=1, then a bin record with a bad checksum, then RSSI=9.
    let decoded = stdout_json(&widcfg(&[
        "decode",
        "52010000 0500010001 2140020001 02 ff 1f00010009",
    ]));
    assert_eq!(decoded["summary"]["applied"], 1);
    assert!(decoded["summary"]["aborted"]
        .as_str()
        .expect("abort reason")
        .contains("checksum"));
    assert_eq!(slot(&decoded, "STATUS")["value"], "1");
    assert_eq!(slot(&decoded, "RSSI")["value"], "0");
}

#[test]
fn decode_info_frame_emits_event() {
    let decoded = stdout_json(&widcfg(&["decode", "4902000005000101"]));
    assert_eq!(decoded["response"]["kind"], "status");
    assert_eq!(decoded["response"]["seq_no"], 2);
    assert_eq!(decoded["event"]["kind"], "general_async_info");
    assert_eq!(decoded["event"]["len"], 8);
    assert_eq!(slot(&decoded, "STATUS")["value"], "1");
}

#[test]
fn decode_short_frame_fails() {
    let out = widcfg(&["decode", "5201"]);
    assert_eq!(out.status.code(), Some(60));
}

#[test]
fn query_outputs_ids() {
    let out = stdout_json(&widcfg(&["query", "STATUS", "0x3001"]));
    assert_eq!(out["frame"], "05000130");
    assert_eq!(out["records"], 2);
}

#[test]
fn max_frame_size_above_limit_is_usage_error() {
    let out = widcfg(&["encode", "STATUS=1", "--max-frame-size", "18446744073709551615"]);
    assert_eq!(out.status.code(), Some(64));

    let out = widcfg(&["query", "STATUS", "--max-frame-size", "5000"]);
    assert_eq!(out.status.code(), Some(64));
}

#[test]
fn encode_stops_at_frame_limit() {
    let records: Vec<String> = (0..300).map(|_| "STATUS=1".to_string()).collect();
    let mut args = vec!["encode"];
    args.extend(records.iter().map(String::as_str));
    let out = widcfg(&args);
    assert_eq!(out.status.code(), Some(60));
}

#[test]
fn encode_rejects_kind_out_of_range() {
    let out = widcfg(&["encode", "STATUS=300"]);
    assert_eq!(out.status.code(), Some(64));
}

#[test]
fn table_follows_seed_file() {
    let path = unique_temp_file("seed");
    std::fs::write(
        &path,
        r#"{"seed":[{"wid":5},{"wid":12288,"capacity":32}]}"#,
    )
    .expect("seed file should be writable");

    let out = Command::new(env!("CARGO_BIN_EXE_widcfg"))
        .args(["--log-level", "error", "--format", "json", "table"])
        .env("WIDCFG_SEED_FILE", &path)
        .output()
        .expect("widcfg should run");
    let _ = std::fs::remove_file(&path);

    let slots = stdout_json(&out);
    let names: Vec<&str> = slots
        .as_array()
        .expect("table should be an array")
        .iter()
        .filter_map(|s| s["name"].as_str())
        .collect();
    assert_eq!(names, vec!["STATUS", "SSID"]);
}

#[test]
fn doctor_rejects_duplicate_seed() {
    let path = unique_temp_file("dup");
    std::fs::write(&path, r#"{"seed":[{"wid":5},{"wid":5}]}"#)
        .expect("seed file should be writable");

    let out = widcfg(&["doctor", "--seed", path.to_str().expect("utf-8 temp path")]);
    let _ = std::fs::remove_file(&path);

    assert_eq!(out.status.code(), Some(30));
    let report: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("doctor output should be JSON");
    assert_eq!(report["overall"], "fail");
}

#[test]
fn wids_filter_by_kind() {
    let out = stdout_json(&widcfg(&["wids", "--kind", "bin"]));
    let kinds: Vec<&str> = out
        .as_array()
        .expect("wids should be an array")
        .iter()
        .filter_map(|w| w["kind"].as_str())
        .collect();
    assert!(!kinds.is_empty());
    assert!(kinds.iter().all(|k| *k == "bin"));
}

#[test]
fn wids_rejects_unknown_kind() {
    let out = widcfg(&["wids", "--kind", "float"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("hword"));
}

#[test]
fn rust_log_overrides_log_level() {
    let out = Command::new(env!("CARGO_BIN_EXE_widcfg"))
        .args(["--log-level", "error", "--format", "json", "encode", "STATUS=1"])
        .env_remove("WIDCFG_SEED_FILE")
        .env("RUST_LOG", "widcfg=debug")
        .output()
        .expect("widcfg should run");
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("record encoded"), "stderr: {stderr}");
}

#[test]
fn envinfo_reports_seed_and_frame_limits() {
    let out = stdout_json(&widcfg(&["envinfo"]));
    assert_eq!(out["seed"]["source"], "built-in");
    assert!(out["seed"]["entries"].as_u64().unwrap_or(0) > 0);
    assert_eq!(out["frame"]["max_frame_size"], 1468);
    assert_eq!(out["frame"]["max_slot_capacity"], 1458);
    assert!(out.get("dependencies").is_none());
}
