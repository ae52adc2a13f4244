//! Output column mapping for the Central England client report.
//!
//! A [`MappingTable`] is an ordered list of [`MappingEntry`] values. Each entry
//! names one report column and the [`SourceSpec`] describing where its value
//! comes from in the audit export:
//!
//! - [`SourceSpec::None`]: the column is always blank.
//! - [`SourceSpec::SingleColumn`]: the trimmed value of one export column.
//! - [`SourceSpec::MultiColumn`]: the non-empty trimmed values of several
//!   export columns joined with [`MULTI_VALUE_SEPARATOR`].
//!
//! The report layout is compiled in ([`CENTRAL_ENGLAND`]). Downstream consumers
//! paste the output over an existing workbook, so names and order are a
//! contract and must not change.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

/// Separator placed between values gathered by a [`SourceSpec::MultiColumn`] entry.
pub const MULTI_VALUE_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "sources", rename_all = "snake_case")]
pub enum SourceSpec {
    None,
    SingleColumn(&'static str),
    MultiColumn(&'static [&'static str]),
}

impl SourceSpec {
    /// Export columns referenced by this source, in resolution order.
    pub fn columns(&self) -> &[&'static str] {
        match self {
            SourceSpec::None => &[],
            SourceSpec::SingleColumn(name) => std::slice::from_ref(name),
            SourceSpec::MultiColumn(names) => *names,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SourceSpec::None => "none",
            SourceSpec::SingleColumn(_) => "single",
            SourceSpec::MultiColumn(_) => "multi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    pub output: &'static str,
    pub source: SourceSpec,
}

impl MappingEntry {
    pub const fn new(output: &'static str, source: SourceSpec) -> Self {
        Self { output, source }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("Output column '{name}' is defined at positions {first} and {second}")]
    DuplicateOutput {
        name: String,
        first: usize,
        second: usize,
    },
    #[error("Output column at position {position} has an empty name")]
    EmptyOutputName { position: usize },
}

/// Ordered, validated set of report columns.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct MappingTable {
    entries: Vec<MappingEntry>,
}

impl MappingTable {
    /// Builds a table, rejecting blank or repeated output names. Positions in
    /// errors are 1-based.
    pub fn new(entries: Vec<MappingEntry>) -> Result<Self, MappingError> {
        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            let position = idx + 1;
            if entry.output.trim().is_empty() {
                return Err(MappingError::EmptyOutputName { position });
            }
            if let Some(first) = seen.insert(entry.output, position) {
                return Err(MappingError::DuplicateOutput {
                    name: entry.output.to_string(),
                    first,
                    second: position,
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn central_england() -> Result<Self, MappingError> {
        Self::new(CENTRAL_ENGLAND.to_vec())
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn headers(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.output.to_string())
            .collect()
    }

    /// Every export column referenced by the table, first occurrence order, without repeats.
    pub fn source_columns(&self) -> Vec<&'static str> {
        let mut columns: Vec<&'static str> = Vec::new();
        for name in self.entries.iter().flat_map(|entry| entry.source.columns()) {
            if !columns.contains(name) {
                columns.push(*name);
            }
        }
        columns
    }
}

const fn entry(output: &'static str, source: SourceSpec) -> MappingEntry {
    MappingEntry::new(output, source)
}

const fn single(name: &'static str) -> SourceSpec {
    SourceSpec::SingleColumn(name)
}

const fn multi(names: &'static [&'static str]) -> SourceSpec {
    SourceSpec::MultiColumn(names)
}

const BLANK: SourceSpec = SourceSpec::None;

/// Export column checked for the "rapid delivery" exclusion.
pub const ITEM_COLUMN: &str = "item_to_order";
/// Export column checked for the "abort" exclusion.
pub const RESULT_COLUMN: &str = "primary_result";

pub const CENTRAL_ENGLAND: &[MappingEntry] = &[
    entry("Order", single("order_internal_id")),
    entry("Client", single("client_name")),
    entry("Visit", single("internal_id")),
    entry("Site", single("site_internal_id")),
    entry("Order Deadline", single("end_date")),
    entry("Responsibility", single("responsibility")),
    entry("Premises Name", single("site_name")),
    entry("Address1", single("site_address_1")),
    entry("Address2", single("site_address_2")),
    entry("Address3", single("site_address_3")),
    entry("City", BLANK),
    entry("Post Code", single("site_post_code")),
    entry("Submitted Date", single("submitted_date")),
    entry("Approved Date", single("approval_date")),
    entry("Item to order", single(ITEM_COLUMN)),
    entry("Actual Visit Date", single("date_of_visit")),
    entry("Actual Visit Time", single("time_of_visit")),
    entry("AM / PM", BLANK),
    entry("Pass-Fail", single(RESULT_COLUMN)),
    entry("Pass-Fail2", single("secondary_result")),
    entry(
        "Abort Reason",
        single("Please detail why you were unable to conduct this audit:"),
    ),
    entry("Extra Site 1", single("site_code")),
    entry("Extra Site 2", BLANK),
    entry("Extra Site 3", BLANK),
    entry("Extra Site 4", BLANK),
    entry("Extra Site 5", BLANK),
    entry("VISITORSEX", BLANK),
    entry(
        "What type of alcohol did you purchase?",
        multi(&[
            "What type of E-cigarette product did you purchase/attempt to purchase?",
            "What type of alcohol did you try to purchase?",
        ]),
    ),
    entry(
        "Please give details of the alcohol purchased (brand and size):",
        multi(&[
            "Please give details of the e-cig product that you purchased:",
            "Please give details of the cigarettes that you purchased:",
            "Please give details of the alcohol that you purchased:",
        ]),
    ),
    entry(
        "Did you make the purchase on its own or as part of a larger shop?",
        single("Did you make the purchase on its own or as part of a larger shop?"),
    ),
    entry("Did the operator ask your age?", BLANK),
    entry(
        "Did the operator ask for your ID during the transaction?",
        single("Did the staff member who served you ask for ID?"),
    ),
    entry(
        "Did the operator make eye contact with you during the transaction?",
        single("Did the staff member who served you make eye contact with you during the transaction?"),
    ),
    entry(
        "If eye contact was made, when was it FIRST made?",
        single("When was eye contact first made?"),
    ),
    // The export header carries two trailing spaces.
    entry(
        "In your opinion, did the operator make an assessment of your age?",
        single("Did the staff member who served you look at you long enough to assess your age?  "),
    ),
    entry(
        "Was the operator wearing a name badge?",
        single("Was the staff member who served you wearing a name badge?"),
    ),
    entry(
        "If they were, please state their name:",
        single("What was the name of the staff member who served you?"),
    ),
    entry(
        "Please accurately describe the operator that served you (include hair colour and style, build, height and any distinguishing features):",
        single("Please accurately describe the staff member who served you:"),
    ),
    entry(
        "Was there any \"Challenge 25\" signage visible in the till area?",
        single("Was there any generic 'Challenge 25' material visible from the till?"),
    ),
    entry(
        "Was the operator wearing a \"Challenge 25\" Badge?",
        single("Was the staff member wearing a 'Challenge 25' badge?"),
    ),
    entry("OTHER VISIT DETAILS", BLANK),
    entry(
        "How many staff members were serving?",
        multi(&[
            "How many staff members were working on the tills?",
            "How staff members were working on the tills?",
        ]),
    ),
    entry(
        "Please comment on the overall service you received (include queue length and unattended tills):",
        single("Please comment on the overall service you received:"),
    ),
    entry(
        "From the receipt, please enter the store name:",
        single("From the top of the receipt, please enter the store name:"),
    ),
    entry(
        "Please enter the receipt number (#000000):",
        single("Please enter the receipt number (#000000) from the receipt:"),
    ),
    entry(
        "Please enter the C number (C:000000):",
        single("Please enter the C number (C:000000) from the receipt:"),
    ),
    entry(
        "Please enter the T number (T:00):",
        single("Please enter the T number (T:00) from the receipt:"),
    ),
    entry(
        "Please describe the location and positions of the store (i.e. names of the stores on either side):",
        BLANK,
    ),
    entry(
        "Please use this space to explain anything unusual about your visit or to clarify any detail of your report:",
        single("Please use this space to explain anything unusual about your visit or to clarify any detail of your report:"),
    ),
    entry(
        "Please confirm below whether or not you were asked for ID:",
        multi(&[
            "Please confirm below whether or not you were asked for ID:",
            "Please confirm whether or not you were asked for ID, and if so, at what point during the transaction ID was requested:",
        ]),
    ),
];
