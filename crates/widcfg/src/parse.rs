use widcfg_frame::{wid_by_name, FrameHeader, Wid, WidKind, WidValue};

use crate::exit::{CliError, CliResult, DATA_INVALID, USAGE};

/// Lowercase hex, no separators.
pub fn to_hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse hex text. Whitespace, `:` separators and a leading `0x` are ignored.
pub fn from_hex(input: &str) -> CliResult<Vec<u8>> {
    let trimmed = input.trim();
    let digits: String = trimmed
        .strip_prefix("0x")
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    if digits.len() % 2 != 0 {
        return Err(CliError::new(
            DATA_INVALID,
            format!("hex input has odd length ({} digits)", digits.len()),
        ));
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            let pair = digits.get(i..i + 2).unwrap_or_default();
            u8::from_str_radix(pair, 16)
                .map_err(|_| CliError::new(DATA_INVALID, format!("invalid hex byte: {pair}")))
        })
        .collect()
}

fn parse_number(input: &str) -> Option<u64> {
    match input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => input.parse().ok(),
    }
}

/// Parse a WID given by name (`STATUS`) or number (`0x0005`, `5`).
pub fn parse_wid(input: &str) -> CliResult<Wid> {
    if let Some(wid) = wid_by_name(input) {
        return Ok(wid);
    }
    parse_number(input)
        .and_then(|n| u16::try_from(n).ok())
        .map(Wid)
        .ok_or_else(|| CliError::new(USAGE, format!("unknown WID: {input}")))
}

/// Parse a value for `wid` from command-line text.
///
/// Fixed-width kinds take a decimal or `0x` number. Strings are taken
/// literally unless prefixed with `hex:`. Binary values are hex.
pub fn parse_value(wid: Wid, input: &str) -> CliResult<WidValue> {
    let kind = wid
        .kind()
        .ok_or_else(|| CliError::new(USAGE, format!("{wid} has no known value kind")))?;

    let number = || {
        parse_number(input)
            .ok_or_else(|| CliError::new(USAGE, format!("invalid number for {wid}: {input}")))
    };
    let out_of_range =
        || CliError::new(USAGE, format!("value {input} out of range for {kind} {wid}"));

    Ok(match kind {
        WidKind::Byte => WidValue::Byte(u8::try_from(number()?).map_err(|_| out_of_range())?),
        WidKind::HalfWord => {
            WidValue::HalfWord(u16::try_from(number()?).map_err(|_| out_of_range())?)
        }
        WidKind::Word => WidValue::Word(u32::try_from(number()?).map_err(|_| out_of_range())?),
        WidKind::Str => match input.strip_prefix("hex:") {
            Some(hex) => WidValue::str(from_hex(hex)?),
            None => WidValue::str(input.as_bytes().to_vec()),
        },
        WidKind::Bin => WidValue::bin(from_hex(input)?),
    })
}

/// Parse a `WID=VALUE` assignment.
pub fn parse_assignment(input: &str) -> CliResult<(Wid, WidValue)> {
    let (wid, value) = input
        .split_once('=')
        .ok_or_else(|| CliError::new(USAGE, format!("expected WID=VALUE, got: {input}")))?;
    let wid = parse_wid(wid.trim())?;
    Ok((wid, parse_value(wid, value)?))
}

/// Parse a `TYPE:SEQ` header, e.g. `W:3`. TYPE is a single ASCII character.
pub fn parse_header(input: &str) -> CliResult<FrameHeader> {
    let err = || CliError::new(USAGE, format!("expected TYPE:SEQ header, got: {input}"));
    let (msg_type, seq_no) = input.split_once(':').ok_or_else(err)?;
    let msg_type = match msg_type.as_bytes() {
        [tag] => *tag,
        _ => return Err(err()),
    };
    let seq_no = parse_number(seq_no)
        .and_then(|n| u8::try_from(n).ok())
        .ok_or_else(err)?;
    Ok(FrameHeader::new(msg_type, seq_no))
}
