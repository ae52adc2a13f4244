//! Column listing for the compiled-in report mapping.
//!
//! Renders each report column with its source export columns as an ASCII
//! table, or dumps the mapping as JSON or YAML for documentation.

use anyhow::{Context, Result};
use itertools::Itertools;
use log::info;

use crate::{
    cli::{ColumnsArgs, ColumnsFormat},
    mapping::{MULTI_VALUE_SEPARATOR, MappingTable},
    table,
};

pub fn execute(args: &ColumnsArgs, mapping: &MappingTable) -> Result<()> {
    match args.format {
        ColumnsFormat::Table => {
            let (headers, rows) = listing(mapping);
            table::print_table(&headers, &rows);
        }
        ColumnsFormat::Json => {
            let rendered =
                serde_json::to_string_pretty(mapping).context("Serializing mapping as JSON")?;
            println!("{rendered}");
        }
        ColumnsFormat::Yaml => {
            let rendered =
                serde_yaml::to_string(mapping).context("Serializing mapping as YAML")?;
            print!("{rendered}");
        }
    }
    info!("Listed {} report column(s)", mapping.len());
    Ok(())
}

pub fn listing(mapping: &MappingTable) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = vec![
        "#".to_string(),
        "output".to_string(),
        "kind".to_string(),
        "sources".to_string(),
    ];
    let rows = mapping
        .entries()
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            vec![
                (idx + 1).to_string(),
                entry.output.to_string(),
                entry.source.kind().to_string(),
                entry.source.columns().iter().join(MULTI_VALUE_SEPARATOR),
            ]
        })
        .collect();
    (headers, rows)
}
