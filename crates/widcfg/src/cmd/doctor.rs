use std::path::Path;

use serde::Serialize;
use widcfg_frame::{CfgFrameWriter, FrameConfig, Wid, WidValue, HEADER_SIZE, MAX_CFG_FRAME_SIZE};
use widcfg_table::{ConfigTable, TableConfig, MAX_SLOT_CAPACITY};

use crate::cmd::DoctorArgs;
use crate::exit::{CliResult, HEALTH_CHECK_FAILED, SUCCESS};
use crate::output::OutputFormat;

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
    Info,
    Skip,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    detail: String,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DoctorOutput {
    checks: Vec<CheckResult>,
    overall: &'static str,
}

pub fn run(_args: DoctorArgs, format: OutputFormat, seed: Option<&Path>) -> CliResult<i32> {
    let mut checks = vec![frame_limits_check(), default_seed_check()];
    checks.extend(seed_file_checks(seed));
    checks.push(capacity_fit_check());

    let has_fail = checks.iter().any(|c| matches!(c.status, CheckStatus::Fail));
    let output = DoctorOutput {
        checks,
        overall: if has_fail { "fail" } else { "pass" },
    };

    print_doctor(&output, format);

    if has_fail {
        Ok(HEALTH_CHECK_FAILED)
    } else {
        Ok(SUCCESS)
    }
}

fn print_doctor(output: &DoctorOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => crate::output::print_json(output),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("widcfg doctor\n");
            for c in &output.checks {
                println!(
                    "  [{:>4}] {:<22} {}",
                    status_text(c.status),
                    c.name,
                    c.detail
                );
            }
            if output.overall == "pass" {
                println!("\n  Result: all checks passed");
            } else {
                println!("\n  Result: one or more checks failed");
            }
        }
        OutputFormat::Raw => println!("{}", output.overall),
    }
}

fn status_text(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Info => "INFO",
        CheckStatus::Skip => "SKIP",
    }
}

fn frame_limits_check() -> CheckResult {
    CheckResult::new(
        "frame_limits",
        CheckStatus::Info,
        format!(
            "max frame {MAX_CFG_FRAME_SIZE} bytes, header {HEADER_SIZE} bytes, max slot capacity {MAX_SLOT_CAPACITY} bytes"
        ),
    )
}

fn table_check(name: &str, config: TableConfig) -> CheckResult {
    let entries = config.seed.len();
    match ConfigTable::with_config(config) {
        Ok(table) => {
            let detail = format!("{entries} entries, {} slots", table.len());
            table.deinit();
            CheckResult::new(name, CheckStatus::Pass, detail)
        }
        Err(err) => CheckResult::new(name, CheckStatus::Fail, err.to_string()),
    }
}

fn default_seed_check() -> CheckResult {
    table_check("default_seed", TableConfig::default())
}

fn seed_file_checks(seed: Option<&Path>) -> Vec<CheckResult> {
    let Some(path) = seed else {
        return vec![CheckResult::new(
            "seed_file",
            CheckStatus::Skip,
            "no --seed or WIDCFG_SEED_FILE set",
        )];
    };

    match TableConfig::from_file(path) {
        Ok(config) => vec![
            CheckResult::new(
                "seed_file",
                CheckStatus::Pass,
                format!("{} parsed", path.display()),
            ),
            table_check("seed_table", config),
        ],
        Err(err) => vec![CheckResult::new(
            "seed_file",
            CheckStatus::Fail,
            format!("{}: {err}", path.display()),
        )],
    }
}

/// The largest string and binary values must each fit one frame.
fn capacity_fit_check() -> CheckResult {
    let mut writer = CfgFrameWriter::with_config(FrameConfig {
        max_frame_size: MAX_CFG_FRAME_SIZE - HEADER_SIZE,
    });
    let content = vec![0u8; MAX_SLOT_CAPACITY];
    for (wid, value) in [
        (Wid::SSID, WidValue::str(content.clone())),
        (Wid::ANTENNA_SELECTION, WidValue::bin(content)),
    ] {
        writer.clear();
        match writer.set(wid, &value) {
            Ok(n) if n > 0 => {}
            Ok(_) => {
                return CheckResult::new(
                    "capacity_fit",
                    CheckStatus::Fail,
                    format!(
                        "{} value of {MAX_SLOT_CAPACITY} bytes does not fit a frame",
                        value.kind()
                    ),
                )
            }
            Err(err) => return CheckResult::new("capacity_fit", CheckStatus::Fail, err.to_string()),
        }
    }
    CheckResult::new(
        "capacity_fit",
        CheckStatus::Pass,
        format!("{MAX_SLOT_CAPACITY}-byte str and bin values fit one frame"),
    )
}
