use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{Observation, ObservationTable};

// ---------------------------------------------------------------------------
// Selection – what the user picked in the four selectors
// ---------------------------------------------------------------------------

/// The full selector state handed to the series builder on every change.
///
/// Codes are not checked against the table: an unknown item, sex or age code
/// simply matches no rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub item_id: String,
    pub sex_code: i64,
    pub age_code: i64,
    /// Requested years, in display order. Must not be empty.
    pub years: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("at least one year must be selected")]
    NoYears,
}

impl Selection {
    /// Check the "at least one year" contract of the year selector.
    pub fn validate(&self) -> Result<(), SelectionError> {
        if self.years.is_empty() {
            return Err(SelectionError::NoYears);
        }
        Ok(())
    }

    /// Row predicate for one of the requested years.
    pub fn filter_for_year<'a>(&'a self, year: &'a str) -> RowFilter<'a> {
        RowFilter {
            item_id: &self.item_id,
            sex_code: self.sex_code,
            age_code: self.age_code,
            year,
        }
    }
}

// ---------------------------------------------------------------------------
// RowFilter – equality predicate over one (item, sex, age, year) combination
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFilter<'a> {
    pub item_id: &'a str,
    pub sex_code: i64,
    pub age_code: i64,
    pub year: &'a str,
}

impl RowFilter<'_> {
    pub fn matches(&self, row: &Observation) -> bool {
        row.item_id == self.item_id
            && row.sex_code == self.sex_code
            && row.age_code == self.age_code
            && row.period.year() == self.year
    }
}

/// Return indices of rows that pass the filter, in table order.
pub fn filtered_indices(table: &ObservationTable, filter: &RowFilter<'_>) -> Vec<usize> {
    table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| filter.matches(row))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::obs;

    fn selection(item: &str, years: &[&str]) -> Selection {
        Selection {
            item_id: item.to_string(),
            sex_code: 0,
            age_code: 0,
            years: years.iter().map(|y| y.to_string()).collect(),
        }
    }

    #[test]
    fn every_dimension_must_match() {
        let table = ObservationTable::from_rows(vec![
            obs("202001", "T10", 0, 0, 1.0),
            obs("202001", "T20", 0, 0, 2.0),
            obs("202001", "T10", 1, 0, 3.0),
            obs("202001", "T10", 0, 15, 4.0),
            obs("201901", "T10", 0, 0, 5.0),
            obs("202002", "T10", 0, 0, 6.0),
        ]);
        let sel = selection("T10", &["2020"]);
        assert_eq!(filtered_indices(&table, &sel.filter_for_year("2020")), vec![0, 5]);
        assert_eq!(filtered_indices(&table, &sel.filter_for_year("2019")), vec![4]);
    }

    #[test]
    fn unknown_codes_match_nothing() {
        let table = ObservationTable::from_rows(vec![obs("202001", "T10", 0, 0, 1.0)]);
        let sel = selection("NOPE", &["2020"]);
        assert!(filtered_indices(&table, &sel.filter_for_year("2020")).is_empty());
    }

    #[test]
    fn empty_year_list_is_rejected() {
        assert_eq!(selection("T10", &[]).validate(), Err(SelectionError::NoYears));
        assert_eq!(selection("T10", &["2020"]).validate(), Ok(()));
    }

    #[test]
    fn selection_json_shape() {
        let sel: Selection = serde_json::from_str(
            r#"{"item_id":"T10","sex_code":1,"age_code":15,"years":["2020","2019"]}"#,
        )
        .unwrap();
        assert_eq!(sel.sex_code, 1);
        assert_eq!(sel.years, vec!["2020", "2019"]);
    }
}
