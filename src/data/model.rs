use std::fmt;

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Column – the KOSIS export columns the dashboard reads
// ---------------------------------------------------------------------------

/// A required column of the survey table, named as in the KOSIS export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Period,
    ItemId,
    ItemName,
    SexCode,
    SexName,
    AgeCode,
    AgeName,
    Value,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Period,
        Column::ItemId,
        Column::ItemName,
        Column::SexCode,
        Column::SexName,
        Column::AgeCode,
        Column::AgeName,
        Column::Value,
    ];

    /// Header text of the column in the source file.
    pub fn header(self) -> &'static str {
        match self {
            Column::Period => "PRD_DE",
            Column::ItemId => "ITM_ID",
            Column::ItemName => "ITM_NM",
            Column::SexCode => "C1",
            Column::SexName => "C1_NM",
            Column::AgeCode => "C2",
            Column::AgeName => "C2_NM",
            Column::Value => "DT",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// SchemaError – why a table could not be loaded
// ---------------------------------------------------------------------------

/// Structural problems with an input table. Any of these aborts startup.
///
/// `row` counts from 1. For CSV it is the file line, so the header is line 1
/// and the first record line 2; for JSON and Parquet it is the record number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(Column),

    #[error("row {row}: malformed period code '{value}' (expected YYYYMM)")]
    MalformedPeriod { row: usize, value: String },

    #[error("row {row}: column '{column}' holds '{value}', expected an integer code")]
    MalformedCode {
        row: usize,
        column: Column,
        value: String,
    },

    #[error("row {row}: column '{column}' holds '{value}', expected a number")]
    MalformedValue {
        row: usize,
        column: Column,
        value: String,
    },

    #[error("row {row}: column '{column}' is empty")]
    EmptyCell { row: usize, column: Column },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Period – a YYYYMM code
// ---------------------------------------------------------------------------

/// A validated six-digit `YYYYMM` period code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Period {
    code: String,
    month: u8,
}

impl Period {
    /// Parse a `YYYYMM` code. Returns `None` unless the input is exactly six
    /// ASCII digits with a month between 01 and 12.
    pub fn parse(code: &str) -> Option<Self> {
        if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let month: u8 = code[4..].parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Period {
            code: code.to_string(),
            month,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// The first four characters of the code.
    pub fn year(&self) -> &str {
        &self.code[..4]
    }

    /// Calendar month, 1–12.
    pub fn month(&self) -> u8 {
        self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of the survey table
// ---------------------------------------------------------------------------

/// One published figure: an item for a sex/age breakdown in one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub period: Period,
    pub item_id: String,
    pub item_name: String,
    pub sex_code: i64,
    pub sex_name: String,
    pub age_code: i64,
    pub age_name: String,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// ObservationTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded survey table. Immutable once built; rows keep file order.
#[derive(Debug, Clone, Default)]
pub struct ObservationTable {
    rows: Vec<Observation>,
}

impl ObservationTable {
    pub fn from_rows(rows: Vec<Observation>) -> Self {
        ObservationTable { rows }
    }

    /// All rows in source order.
    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest and latest year present, if any.
    pub fn year_span(&self) -> Option<(&str, &str)> {
        let first = self.rows.first()?.period.year();
        Some(self.rows.iter().fold((first, first), |(lo, hi), row| {
            let year = row.period.year();
            (lo.min(year), hi.max(year))
        }))
    }
}
