use std::path::Path;

use serde::Serialize;
use tracing::info;
use widcfg_dispatch::{dispatch, AsyncEvent, Dispatch, EventSink, MessageType, ResponseKind};

use crate::cmd::{load_table, DecodeArgs};
use crate::exit::{dispatch_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{new_table, print_json, slot_outputs, slots_table, OutputFormat, SlotOutput};
use crate::parse::from_hex;

/// Logs each asynchronous event as it is delivered.
struct LogSink;

impl EventSink for LogSink {
    fn on_general_async_info(&mut self, frame: &[u8]) {
        info!(len = frame.len(), "general async info event");
    }

    fn on_network_info(&mut self, frame: &[u8]) {
        info!(len = frame.len(), "network info event");
    }

    fn on_scan_complete(&mut self, frame: &[u8]) {
        info!(len = frame.len(), "scan complete event");
    }
}

#[derive(Debug, Serialize)]
struct ResponseOutput {
    kind: &'static str,
    seq_no: u8,
}

#[derive(Debug, Serialize)]
struct SummaryOutput {
    applied: usize,
    ignored: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    aborted: Option<String>,
}

#[derive(Debug, Serialize)]
struct EventOutput {
    kind: &'static str,
    len: usize,
}

#[derive(Debug, Serialize)]
struct DecodeOutput {
    message_type: String,
    response: ResponseOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<SummaryOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<EventOutput>,
    table: Vec<SlotOutput>,
}

pub fn run(args: DecodeArgs, format: OutputFormat, seed: Option<&Path>) -> CliResult<i32> {
    let frame = read_frame(&args)?;
    let mut table = load_table(seed)?;

    let result = dispatch(&mut table, &frame).map_err(|err| dispatch_error("decode failed", err))?;
    result.deliver(&mut LogSink);

    let output = DecodeOutput {
        table: slot_outputs(&table),
        ..describe(&result)
    };
    print_decode(&output, format);
    table.deinit();
    Ok(SUCCESS)
}

fn read_frame(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(path) = &args.file {
        return std::fs::read(path).map_err(|err| {
            CliError::new(
                crate::exit::FAILURE,
                format!("failed reading {}: {err}", path.display()),
            )
        });
    }
    match &args.frame {
        Some(hex) => from_hex(hex),
        None => Err(CliError::new(USAGE, "provide a HEX frame or --file")),
    }
}

fn message_type_name(message_type: MessageType) -> String {
    match message_type {
        MessageType::Response => "response".to_string(),
        MessageType::Info => "info".to_string(),
        MessageType::NetworkInfo => "network_info".to_string(),
        MessageType::ScanComplete => "scan_complete".to_string(),
        MessageType::Unknown(tag) => format!("unknown(0x{tag:02X})"),
    }
}

fn response_kind_name(kind: ResponseKind) -> &'static str {
    match kind {
        ResponseKind::Unset => "unset",
        ResponseKind::Cfg => "cfg",
        ResponseKind::Status => "status",
    }
}

fn event_output(event: &AsyncEvent<'_>) -> EventOutput {
    let kind = match event {
        AsyncEvent::GeneralAsyncInfo(_) => "general_async_info",
        AsyncEvent::NetworkInfo(_) => "network_info",
        AsyncEvent::ScanComplete(_) => "scan_complete",
    };
    EventOutput {
        kind,
        len: event.frame().len(),
    }
}

fn describe(result: &Dispatch<'_>) -> DecodeOutput {
    DecodeOutput {
        message_type: message_type_name(result.message_type),
        response: ResponseOutput {
            kind: response_kind_name(result.response.kind),
            seq_no: result.response.seq_no,
        },
        summary: result.summary.as_ref().map(|s| SummaryOutput {
            applied: s.applied,
            ignored: s.ignored,
            aborted: s.aborted.as_ref().map(ToString::to_string),
        }),
        event: result.event.as_ref().map(event_output),
        table: Vec::new(),
    }
}

fn print_decode(output: &DecodeOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(output),
        OutputFormat::Table | OutputFormat::Pretty => {
            let mut table = new_table(vec!["MESSAGE", "RESPONSE", "SEQ", "APPLIED", "IGNORED", "EVENT"]);
            table.add_row(vec![
                output.message_type.clone(),
                output.response.kind.to_string(),
                output.response.seq_no.to_string(),
                output
                    .summary
                    .as_ref()
                    .map(|s| s.applied.to_string())
                    .unwrap_or_default(),
                output
                    .summary
                    .as_ref()
                    .map(|s| s.ignored.to_string())
                    .unwrap_or_default(),
                output
                    .event
                    .as_ref()
                    .map(|e| e.kind.to_string())
                    .unwrap_or_default(),
            ]);
            println!("{table}");
            if let Some(reason) = output.summary.as_ref().and_then(|s| s.aborted.as_ref()) {
                println!("decoding aborted: {reason}");
            }
            println!("{}", slots_table(&output.table));
        }
        OutputFormat::Raw => {
            println!(
                "{} {}",
                output.response.kind, output.response.seq_no
            );
        }
    }
}
