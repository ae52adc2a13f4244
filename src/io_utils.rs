//! I/O utilities for reading audit exports and writing reports.
//!
//! All file I/O in report-mapper flows through this module. It provides:
//!
//! - **Delimiter resolution**: extension-based auto-detection (`.csv` → comma,
//!   `.tsv` → tab) with manual override support.
//! - **Decoding**: input decoding via `encoding_rs`, defaulting to UTF-8, with a
//!   leading byte-order mark removed from the header row.
//! - **Report output**: UTF-8 prefixed with a byte-order mark so spreadsheet
//!   tools display non-ASCII answers correctly.
//! - **stdin/stdout**: the `-` path convention routes through standard streams.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use csv::QuoteStyle;
use encoding_rs::{Encoding, UTF_8};

use crate::{
    engine::ReportTable,
    rows::{NullMarkers, Table},
};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn resolve_output_delimiter(path: Option<&Path>, provided: Option<u8>, fallback: u8) -> u8 {
    if let Some(delim) = provided {
        return delim;
    }
    if let Some(path) = path {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => return DEFAULT_TSV_DELIMITER,
            Some(ext) if ext.eq_ignore_ascii_case("csv") => return DEFAULT_CSV_DELIMITER,
            _ => {}
        }
    }
    fallback
}

pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn open_csv_reader_from_path(
    path: &Path,
    delimiter: u8,
) -> Result<csv::Reader<Box<dyn Read>>> {
    let reader: Box<dyn Read> = if is_dash(path) {
        Box::new(std::io::stdin().lock())
    } else {
        Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Opening input file {path:?}"))?,
        ))
    };
    Ok(open_csv_reader(reader, delimiter))
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

/// Decodes the header record, dropping a UTF-8 byte-order mark from the first name.
pub fn reader_headers<R>(
    reader: &mut csv::Reader<R>,
    encoding: &'static Encoding,
) -> Result<Vec<String>>
where
    R: Read,
{
    let headers = reader.byte_headers().context("Reading header row")?;
    headers
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let field = match field.strip_prefix(UTF8_BOM) {
                Some(rest) if idx == 0 => rest,
                _ => field,
            };
            decode_bytes(field, encoding)
        })
        .collect()
}

/// Loads a whole export into memory. Short records are padded with nulls;
/// records longer than the header, or not valid CSV, fail the read.
pub fn read_table<R>(
    reader: &mut csv::Reader<R>,
    encoding: &'static Encoding,
    nulls: &NullMarkers,
) -> Result<Table>
where
    R: Read,
{
    let headers = reader_headers(reader, encoding)?;
    let headers = if headers.len() == 1 && headers[0].is_empty() {
        Vec::new()
    } else {
        headers
    };
    let mut table = Table::from_headers(&headers)?;
    for (idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Reading data record {}", idx + 1))?;
        let line = record.position().map_or(idx as u64 + 2, |pos| pos.line());
        let decoded = decode_record(&record, encoding)
            .with_context(|| format!("Decoding line {line}"))?;
        table.push_record(line, decoded, nulls)?;
    }
    Ok(table)
}

pub fn read_table_from_path(
    path: &Path,
    delimiter: u8,
    encoding: &'static Encoding,
    nulls: &NullMarkers,
) -> Result<Table> {
    let mut reader = open_csv_reader_from_path(path, delimiter)?;
    read_table(&mut reader, encoding, nulls).with_context(|| format!("Parsing {path:?}"))
}

/// Opens a report writer and emits the UTF-8 byte-order mark before any CSV text.
pub fn open_report_writer(
    path: Option<&Path>,
    delimiter: u8,
) -> Result<csv::Writer<Box<dyn Write>>> {
    let mut base: Box<dyn Write> = match path {
        Some(p) if !is_dash(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Creating output file {p:?}"))?,
        )),
        _ => Box::new(std::io::stdout()),
    };
    base.write_all(UTF8_BOM)
        .context("Writing byte-order mark")?;
    Ok(report_writer(base, delimiter))
}

pub fn report_writer<W: Write>(writer: W, delimiter: u8) -> csv::Writer<W> {
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .double_quote(true)
        .terminator(csv::Terminator::Any(b'\n'));
    builder.from_writer(writer)
}

pub fn write_report<W: Write>(writer: &mut csv::Writer<W>, report: &ReportTable) -> Result<()> {
    writer
        .write_record(&report.headers)
        .context("Writing output headers")?;
    for (idx, row) in report.rows.iter().enumerate() {
        writer
            .write_record(row)
            .with_context(|| format!("Writing output row {}", idx + 2))?;
    }
    writer.flush().context("Flushing output writer")?;
    Ok(())
}

/// Renders a report as BOM-prefixed UTF-8 CSV bytes.
pub fn report_to_bytes(report: &ReportTable, delimiter: u8) -> Result<Vec<u8>> {
    let mut buffer = UTF8_BOM.to_vec();
    {
        let mut writer = report_writer(&mut buffer, delimiter);
        write_report(&mut writer, report)?;
    }
    Ok(buffer)
}
