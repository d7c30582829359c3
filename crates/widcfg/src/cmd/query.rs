use widcfg_frame::QUERY_RECORD_SIZE;

use crate::cmd::encode::{finish, frame_writer, print_encoded};
use crate::cmd::QueryArgs;
use crate::exit::{CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::OutputFormat;
use crate::parse::{parse_header, parse_wid};

pub fn run(args: QueryArgs, format: OutputFormat) -> CliResult<i32> {
    let header = args.header.as_deref().map(parse_header).transpose()?;
    let mut writer = frame_writer(header.is_some(), args.max_frame_size)?;

    for input in &args.wids {
        let wid = parse_wid(input)?;
        if writer.query(wid) != QUERY_RECORD_SIZE {
            return Err(CliError::new(
                DATA_INVALID,
                format!(
                    "query for {wid} does not fit ({} of {} bytes used)",
                    writer.len(),
                    writer.capacity()
                ),
            ));
        }
    }

    print_encoded(&finish(header, writer), format);
    Ok(SUCCESS)
}
