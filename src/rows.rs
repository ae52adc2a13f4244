//! In-memory representation of an audit export.
//!
//! A [`Table`] keeps the export's header order and a list of [`Row`] values.
//! Each row maps a column name to an optional string: `None` is a null cell,
//! which is distinct from a present-but-empty string. [`NullMarkers`] decides
//! which raw text is read as null when records are loaded from CSV.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::text::disambiguated_header;

/// NA markers pandas recognises by default when reading CSV text.
pub const PANDAS_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Input has no header row")]
    MissingHeader,
    #[error("Line {line} has {found} field(s) but the header defines {expected}")]
    FieldCount {
        line: u64,
        found: usize,
        expected: usize,
    },
}

/// Raw cell values that are read as null. An empty field is always null.
#[derive(Debug, Clone, Default)]
pub struct NullMarkers {
    markers: HashSet<String>,
}

impl NullMarkers {
    pub fn empty_only() -> Self {
        Self::default()
    }

    pub fn pandas() -> Self {
        Self::default().with_markers(PANDAS_NA_VALUES.iter().copied())
    }

    pub fn with_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers.extend(markers.into_iter().map(Into::into));
        self
    }

    pub fn is_null(&self, raw: &str) -> bool {
        raw.is_empty() || self.markers.contains(raw)
    }

    pub fn cell(&self, raw: String) -> Option<String> {
        if self.is_null(&raw) { None } else { Some(raw) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    values: HashMap<String, Option<String>>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(column, value)| (column.into(), value.map(Into::into)))
            .collect();
        Self { values }
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Option<String>) {
        self.values.insert(column.into(), value);
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Value of `column`, or `None` when the column is absent or the cell is null.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).and_then(|value| value.as_deref())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Builds an empty table from a raw header record. A repeated name gets
    /// the next free `.N` suffix the way pandas `read_csv` assigns them, so
    /// `Q, Q, Q.1` becomes `Q, Q.1, Q.1.1`.
    pub fn from_headers(headers: &[String]) -> Result<Self, TableError> {
        if headers.is_empty() {
            return Err(TableError::MissingHeader);
        }
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut columns = Vec::with_capacity(headers.len());
        for header in headers {
            let mut name = header.clone();
            let mut count = counts.get(&name).copied().unwrap_or(0);
            while count > 0 {
                counts.insert(name.clone(), count + 1);
                name = disambiguated_header(&name, count);
                count = counts.get(&name).copied().unwrap_or(0);
            }
            counts.insert(name.clone(), count + 1);
            columns.push(name);
        }
        Ok(Self::new(columns))
    }

    /// Appends one raw record read from `line`. Missing trailing fields are
    /// null; surplus fields are an error.
    pub fn push_record(
        &mut self,
        line: u64,
        fields: Vec<String>,
        nulls: &NullMarkers,
    ) -> Result<(), TableError> {
        if fields.len() > self.columns.len() {
            return Err(TableError::FieldCount {
                line,
                found: fields.len(),
                expected: self.columns.len(),
            });
        }
        let mut cells = fields.into_iter().map(|raw| nulls.cell(raw));
        let values = self
            .columns
            .iter()
            .map(|column| (column.clone(), cells.next().flatten()))
            .collect();
        self.rows.push(Row { values });
        Ok(())
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.columns, self.rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
