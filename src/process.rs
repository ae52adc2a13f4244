use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::{
    cli::MapArgs,
    engine::{self, TransformSummary},
    filter::RowFilter,
    io_utils,
    mapping::MappingTable,
    rows::NullMarkers,
    table,
};

pub fn execute(args: &MapArgs, mapping: &MappingTable) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let input_encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let output_delimiter = io_utils::resolve_output_delimiter(
        Some(args.output.as_path()),
        args.output_delimiter,
        io_utils::DEFAULT_CSV_DELIMITER,
    );
    let destination = if io_utils::is_dash(&args.output) {
        "stdout".to_string()
    } else {
        args.output.display().to_string()
    };
    info!(
        "Mapping '{}' -> {} (delimiter '{}', output '{}')",
        args.input.display(),
        if args.preview { "preview" } else { destination.as_str() },
        crate::printable_delimiter(delimiter),
        crate::printable_delimiter(output_delimiter)
    );

    let nulls = null_markers(args);
    let input = io_utils::read_table_from_path(&args.input, delimiter, input_encoding, &nulls)?;
    let (report, summary) = engine::transform(input, mapping, &RowFilter::default());
    log_summary(&summary);

    if args.preview {
        let shown = report.rows.iter().take(args.rows).cloned().collect::<Vec<_>>();
        table::print_table(&report.headers, &shown);
        info!(
            "Displayed {} of {} report row(s)",
            shown.len(),
            report.len()
        );
        return Ok(());
    }

    let mut writer = io_utils::open_report_writer(Some(args.output.as_path()), output_delimiter)?;
    io_utils::write_report(&mut writer, &report)
        .with_context(|| format!("Writing report to {destination}"))?;
    info!("Report generated successfully! Rows: {}", report.len());
    info!("Wrote {} column(s) to {}", report.headers.len(), destination);
    Ok(())
}

fn null_markers(args: &MapArgs) -> NullMarkers {
    let base = if args.pandas_nulls {
        NullMarkers::pandas()
    } else {
        NullMarkers::empty_only()
    };
    base.with_markers(args.null_markers.iter().cloned())
}

fn log_summary(summary: &TransformSummary) {
    debug!(
        "Excluded {} row(s): {} rapid delivery, {} abort",
        summary.filter.excluded(),
        summary.filter.rapid_delivery,
        summary.filter.aborted
    );
    if !summary.missing_sources.is_empty() {
        debug!(
            "{} mapped export column(s) not present in input: {:?}",
            summary.missing_sources.len(),
            summary.missing_sources
        );
    }
    if summary.input_rows > 0 && summary.output_rows == 0 {
        warn!(
            "All {} input row(s) were excluded; report contains headers only",
            summary.input_rows
        );
    }
}
