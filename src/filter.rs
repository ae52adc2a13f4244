//! Row exclusion rules applied before mapping.
//!
//! Two rules drop audits that never appear in the client report:
//!
//! - the item column reads `rapid delivery`
//! - the result column reads `abort`
//!
//! Both comparisons are exact after trimming and lowercasing, so
//! `"Rapid Delivery "` is excluded while `"rapid delivery plus"` is kept.
//! Absent columns and null cells compare as the empty string and never match.

use std::fmt;

use serde::Serialize;

use crate::{
    mapping::{ITEM_COLUMN, RESULT_COLUMN},
    rows::{Row, Table},
    text::normalized_eq,
};

const RAPID_DELIVERY: &str = "rapid delivery";
const ABORT: &str = "abort";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Exclusion {
    RapidDelivery,
    Aborted,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::RapidDelivery => write!(f, "rapid delivery"),
            Exclusion::Aborted => write!(f, "abort"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    pub retained: usize,
    pub rapid_delivery: usize,
    pub aborted: usize,
}

impl FilterReport {
    pub fn excluded(&self) -> usize {
        self.rapid_delivery + self.aborted
    }

    fn record(&mut self, exclusion: Option<Exclusion>) {
        match exclusion {
            None => self.retained += 1,
            Some(Exclusion::RapidDelivery) => self.rapid_delivery += 1,
            Some(Exclusion::Aborted) => self.aborted += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    pub item_column: String,
    pub result_column: String,
}

impl Default for RowFilter {
    fn default() -> Self {
        Self::new(ITEM_COLUMN, RESULT_COLUMN)
    }
}

impl RowFilter {
    pub fn new(item_column: impl Into<String>, result_column: impl Into<String>) -> Self {
        Self {
            item_column: item_column.into(),
            result_column: result_column.into(),
        }
    }

    /// Reason `row` is dropped, if any. The item rule is checked first.
    pub fn exclusion(&self, row: &Row) -> Option<Exclusion> {
        let item = row.get(&self.item_column).unwrap_or("");
        if normalized_eq(item, RAPID_DELIVERY) {
            return Some(Exclusion::RapidDelivery);
        }
        let result = row.get(&self.result_column).unwrap_or("");
        if normalized_eq(result, ABORT) {
            return Some(Exclusion::Aborted);
        }
        None
    }

    pub fn retains(&self, row: &Row) -> bool {
        self.exclusion(row).is_none()
    }

    /// Keeps retained rows in their original order.
    pub fn apply(&self, table: Table) -> (Table, FilterReport) {
        let (columns, rows) = table.into_parts();
        let mut report = FilterReport::default();
        let retained = rows
            .into_iter()
            .filter(|row| {
                let exclusion = self.exclusion(row);
                report.record(exclusion);
                exclusion.is_none()
            })
            .collect();
        (Table::with_rows(columns, retained), report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(item: Option<&str>, result: Option<&str>) -> Row {
        Row::from_pairs([(ITEM_COLUMN, item), (RESULT_COLUMN, result)])
    }

    #[test]
    fn rapid_delivery_matches_any_case_and_padding() {
        let filter = RowFilter::default();
        assert_eq!(
            filter.exclusion(&row(Some("  Rapid Delivery "), Some("Pass"))),
            Some(Exclusion::RapidDelivery)
        );
        assert_eq!(
            filter.exclusion(&row(Some("RAPID DELIVERY"), None)),
            Some(Exclusion::RapidDelivery)
        );
    }

    #[test]
    fn abort_matches_result_column() {
        let filter = RowFilter::default();
        assert_eq!(
            filter.exclusion(&row(Some("Standard"), Some("ABORT"))),
            Some(Exclusion::Aborted)
        );
    }

    #[test]
    fn near_misses_are_kept() {
        let filter = RowFilter::default();
        assert!(filter.retains(&row(Some("rapid delivery plus"), Some("Pass"))));
        assert!(filter.retains(&row(Some("Standard"), Some("Aborted"))));
        assert!(filter.retains(&row(Some("rapid  delivery"), None)));
    }

    #[test]
    fn missing_filter_columns_keep_the_row() {
        let filter = RowFilter::default();
        assert!(filter.retains(&Row::new()));
        assert!(filter.retains(&row(None, None)));
    }

    #[test]
    fn custom_columns_are_honoured() {
        let filter = RowFilter::new("item", "outcome");
        let row = Row::from_pairs([("item", Some("Rapid Delivery")), ("outcome", Some("pass"))]);
        assert_eq!(filter.exclusion(&row), Some(Exclusion::RapidDelivery));
        assert!(RowFilter::default().retains(&row));
    }

    #[test]
    fn apply_counts_each_reason_and_keeps_order() {
        let columns = vec![ITEM_COLUMN.to_string(), RESULT_COLUMN.to_string()];
        let table = Table::with_rows(
            columns.clone(),
            vec![
                row(Some("Standard"), Some("Pass")),
                row(Some("Rapid Delivery"), Some("Abort")),
                row(Some("Standard"), Some("abort")),
                row(Some("Premium"), Some("Fail")),
            ],
        );
        let (filtered, report) = RowFilter::default().apply(table);
        assert_eq!(filtered.columns(), columns.as_slice());
        assert_eq!(
            filtered.rows(),
            &[
                row(Some("Standard"), Some("Pass")),
                row(Some("Premium"), Some("Fail")),
            ]
        );
        assert_eq!(
            report,
            FilterReport {
                retained: 2,
                rapid_delivery: 1,
                aborted: 1,
            }
        );
        assert_eq!(report.excluded(), 2);
    }
}
