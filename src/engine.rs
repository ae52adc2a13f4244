//! Filter-then-project transform from an audit export to the report layout.
//!
//! [`transform`] drops excluded rows with a [`RowFilter`] and resolves every
//! [`MappingTable`] entry against each retained row. Output columns always
//! follow the mapping order, whatever order the export uses, and output rows
//! keep the export's relative order. The transform is pure: the same input
//! always yields the same report.

use serde::Serialize;

use crate::{
    filter::{FilterReport, RowFilter},
    mapping::MappingTable,
    resolve::resolve_value,
    rows::Table,
};

/// Report rows as plain strings, one cell per mapping entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell for `header` in row `idx`.
    pub fn cell(&self, idx: usize, header: &str) -> Option<&str> {
        let column = self.headers.iter().position(|h| h == header)?;
        self.rows.get(idx)?.get(column).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransformSummary {
    pub input_rows: usize,
    pub output_rows: usize,
    pub output_columns: usize,
    pub filter: FilterReport,
    /// Export columns the mapping references that the input header lacks.
    pub missing_sources: Vec<String>,
}

pub fn transform(
    table: Table,
    mapping: &MappingTable,
    filter: &RowFilter,
) -> (ReportTable, TransformSummary) {
    let input_rows = table.len();
    let missing_sources = mapping
        .source_columns()
        .into_iter()
        .filter(|column| !table.has_column(column))
        .map(str::to_string)
        .collect();

    let (retained, filter_report) = filter.apply(table);
    let rows = retained
        .rows()
        .iter()
        .map(|row| {
            mapping
                .entries()
                .iter()
                .map(|entry| resolve_value(row, &entry.source))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let summary = TransformSummary {
        input_rows,
        output_rows: rows.len(),
        output_columns: mapping.len(),
        filter: filter_report,
        missing_sources,
    };
    let report = ReportTable {
        headers: mapping.headers(),
        rows,
    };
    (report, summary)
}
