use serde::Serialize;
use widcfg_frame::{WidKind, KNOWN_WIDS};

use crate::cmd::WidsArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{new_table, print_json, wid_hex, OutputFormat};

#[derive(Debug, Serialize)]
struct WidOutput {
    wid: String,
    name: &'static str,
    kind: &'static str,
}

pub fn run(args: WidsArgs, format: OutputFormat) -> CliResult<i32> {
    let filter = args.kind.map(WidKind::from);

    let wids: Vec<WidOutput> = KNOWN_WIDS
        .iter()
        .filter(|(wid, _)| filter.is_none() || wid.kind() == filter)
        .map(|(wid, name)| WidOutput {
            wid: wid_hex(*wid),
            name: *name,
            kind: wid.kind().map(WidKind::as_str).unwrap_or("?"),
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&wids),
        OutputFormat::Table => {
            let mut table = new_table(vec!["WID", "NAME", "KIND"]);
            for w in &wids {
                table.add_row(vec![w.wid.clone(), w.name.to_string(), w.kind.to_string()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for w in &wids {
                println!("{} {:<20} {}", w.wid, w.name, w.kind);
            }
        }
    }
    Ok(SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    use crate::cmd::KindArg;

    #[test]
    fn kind_arg_maps_to_wid_kind() {
        assert_eq!(WidKind::from(KindArg::Hword), WidKind::HalfWord);
        assert_eq!(WidKind::from(KindArg::Bin), WidKind::Bin);
    }

    #[test]
    fn kind_arg_names_match_kind_names() {
        for kind in KindArg::value_variants() {
            let name = kind.to_possible_value().expect("no skipped variants");
            assert_eq!(name.get_name(), WidKind::from(*kind).as_str());
        }
    }
}
