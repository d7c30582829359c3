use serde::Serialize;
use tracing::debug;
use widcfg_frame::{CfgFrameWriter, FrameConfig, FrameHeader, HEADER_SIZE, MAX_CFG_FRAME_SIZE};

use crate::cmd::EncodeArgs;
use crate::exit::{frame_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{new_table, print_json, print_raw, OutputFormat};
use crate::parse::{parse_assignment, parse_header, to_hex};

#[derive(Debug, Serialize)]
pub(crate) struct EncodedFrame {
    pub(crate) frame: String,
    pub(crate) len: usize,
    pub(crate) records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) header: Option<String>,
}

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let header = args.header.as_deref().map(parse_header).transpose()?;
    let mut writer = frame_writer(header.is_some(), args.max_frame_size)?;

    for input in &args.records {
        let (wid, value) = parse_assignment(input)?;
        let written = writer
            .set(wid, &value)
            .map_err(|err| frame_error("encode failed", err))?;
        if written == 0 {
            return Err(CliError::new(
                DATA_INVALID,
                format!(
                    "record {wid} does not fit ({} of {} bytes used)",
                    writer.len(),
                    writer.capacity()
                ),
            ));
        }
        debug!(%wid, written, "record encoded");
    }

    print_encoded(&finish(header, writer), format);
    Ok(SUCCESS)
}

/// Writer sized so that header plus records stay within the frame limit.
pub(crate) fn frame_writer(with_header: bool, max_frame_size: Option<usize>) -> CliResult<CfgFrameWriter> {
    let limit = max_frame_size.unwrap_or(MAX_CFG_FRAME_SIZE);
    if limit > MAX_CFG_FRAME_SIZE {
        return Err(CliError::new(
            USAGE,
            format!("--max-frame-size must not exceed {MAX_CFG_FRAME_SIZE} bytes"),
        ));
    }
    let reserved = if with_header { HEADER_SIZE } else { 0 };
    if limit <= reserved {
        return Err(CliError::new(
            USAGE,
            format!("--max-frame-size must exceed {reserved} bytes"),
        ));
    }
    Ok(CfgFrameWriter::with_config(FrameConfig {
        max_frame_size: limit - reserved,
    }))
}

pub(crate) fn finish(header: Option<FrameHeader>, writer: CfgFrameWriter) -> (Vec<u8>, EncodedFrame) {
    let records = writer.record_count();
    let mut bytes = Vec::with_capacity(HEADER_SIZE + writer.len());
    if let Some(header) = header {
        bytes.extend_from_slice(&header.to_bytes());
    }
    bytes.extend_from_slice(writer.as_bytes());

    let encoded = EncodedFrame {
        frame: to_hex(&bytes),
        len: bytes.len(),
        records,
        header: header.map(|h| format!("{}:{}", char::from(h.msg_type), h.seq_no)),
    };
    (bytes, encoded)
}

pub(crate) fn print_encoded((bytes, encoded): &(Vec<u8>, EncodedFrame), format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(encoded),
        OutputFormat::Table => {
            let mut table = new_table(vec!["HEADER", "RECORDS", "LEN", "FRAME"]);
            table.add_row(vec![
                encoded.header.clone().unwrap_or_else(|| "-".to_string()),
                encoded.records.to_string(),
                encoded.len.to_string(),
                encoded.frame.clone(),
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{}", encoded.frame),
        OutputFormat::Raw => print_raw(bytes),
    }
}
