use itertools::Itertools;

use crate::{
    mapping::{MULTI_VALUE_SEPARATOR, SourceSpec},
    rows::Row,
    text::trim,
};

/// Resolves one report cell. Missing columns and null cells are normal and
/// resolve to the empty string; this never fails.
pub fn resolve_value(row: &Row, source: &SourceSpec) -> String {
    match source {
        SourceSpec::None => String::new(),
        SourceSpec::SingleColumn(column) => row
            .get(column)
            .map(|value| trim(value).to_string())
            .unwrap_or_default(),
        SourceSpec::MultiColumn(columns) => columns
            .iter()
            .filter_map(|column| row.get(column))
            .map(trim)
            .filter(|value| !value.is_empty())
            .join(MULTI_VALUE_SEPARATOR),
    }
}
