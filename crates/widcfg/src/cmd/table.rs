use std::path::Path;

use crate::cmd::{load_config, TableArgs};
use crate::exit::{table_error, CliResult, SUCCESS};
use crate::output::{print_json, slot_outputs, slots_table, OutputFormat};

pub fn run(args: TableArgs, format: OutputFormat, seed: Option<&Path>) -> CliResult<i32> {
    let config = load_config(seed)?;

    if args.seed_config {
        let json = config
            .to_json_pretty()
            .map_err(|err| table_error("seed config", err))?;
        println!("{json}");
        return Ok(SUCCESS);
    }

    let table = widcfg_table::ConfigTable::with_config(config)
        .map_err(|err| table_error("table init failed", err))?;
    let slots = slot_outputs(&table);

    match format {
        OutputFormat::Json => print_json(&slots),
        OutputFormat::Table => println!("{}", slots_table(&slots)),
        OutputFormat::Pretty => {
            for slot in &slots {
                println!("{} {:<20} {:<5} {}", slot.wid, slot.name, slot.kind, slot.value);
            }
        }
        OutputFormat::Raw => {
            for slot in &slots {
                println!("{}", slot.wid);
            }
        }
    }
    Ok(SUCCESS)
}
