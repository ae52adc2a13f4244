pub mod cli;
pub mod columns;
pub mod engine;
pub mod filter;
pub mod io_utils;
pub mod mapping;
pub mod process;
pub mod resolve;
pub mod rows;
pub mod table;
pub mod text;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug};

use crate::{
    cli::{Cli, Commands},
    mapping::MappingTable,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("report_mapper", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let mapping = MappingTable::central_england().context("Validating report column mapping")?;
    debug!("Loaded report mapping with {} column(s)", mapping.len());
    match cli.command {
        Commands::Map(args) => process::execute(&args, &mapping),
        Commands::Columns(args) => columns::execute(&args, &mapping),
    }
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
