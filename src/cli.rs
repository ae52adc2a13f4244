use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub const DEFAULT_OUTPUT: &str = "Central England Data.csv";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Map mystery-shopping audit exports to the Central England report layout",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Filter an audit export and write the client report CSV
    Map(MapArgs),
    /// List the report columns and the export columns they are built from
    Columns(ColumnsArgs),
}

#[derive(Debug, Args)]
pub struct MapArgs {
    /// Audit export to read (`-` for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Report file to write (`-` for stdout)
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
    /// CSV delimiter character for reading input (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Delimiter to use for output (defaults to comma)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Additional raw value to treat as a missing answer (repeatable)
    #[arg(long = "null-marker", action = clap::ArgAction::Append)]
    pub null_markers: Vec<String>,
    /// Treat pandas' default NA spellings (None, N/A, NA, NULL, nan, ...) as missing
    /// answers, as the pandas-based mapper did; by default they are kept as text
    #[arg(long = "pandas-nulls")]
    pub pandas_nulls: bool,
    /// Render the first rows as a table on stdout instead of writing the report
    #[arg(long)]
    pub preview: bool,
    /// Number of rows to show with --preview
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
}

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    /// Output format for the column listing
    #[arg(long, default_value = "table")]
    pub format: ColumnsFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum ColumnsFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
