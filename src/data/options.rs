use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::filter::Selection;
use super::model::{Observation, ObservationTable};

/// Item code of the headline series (population aged 15 and over).
pub const DEFAULT_ITEM_ID: &str = "T10";
/// "Total" code of the sex breakdown.
pub const DEFAULT_SEX_CODE: i64 = 0;
/// "Total" code of the age breakdown.
pub const DEFAULT_AGE_CODE: i64 = 0;

// ---------------------------------------------------------------------------
// Option lists for the four selectors
// ---------------------------------------------------------------------------

/// One selectable entry: what the user sees and the code behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry<T> {
    pub label: String,
    pub value: T,
}

/// Distinct values per dimension, ready to populate selectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionOptions {
    pub items: Vec<OptionEntry<String>>,
    pub sexes: Vec<OptionEntry<i64>>,
    pub ages: Vec<OptionEntry<i64>>,
    /// Most recent year first.
    pub years: Vec<OptionEntry<String>>,
}

/// Collect the distinct codes of one column in first-occurrence order,
/// labelled by the name on the row where each code first appears.
fn distinct_entries<T, K, L>(rows: &[Observation], key: K, label: L) -> Vec<OptionEntry<T>>
where
    T: Eq + Hash + Clone,
    K: Fn(&Observation) -> T,
    L: Fn(&Observation) -> String,
{
    let mut seen: HashSet<T> = HashSet::new();
    let mut entries = Vec::new();
    for row in rows {
        let value = key(row);
        if seen.insert(value.clone()) {
            entries.push(OptionEntry {
                label: label(row),
                value,
            });
        }
    }
    entries
}

/// Derive the selector options from the loaded table.
pub fn derive_options(table: &ObservationTable) -> DimensionOptions {
    let rows = table.rows();

    let items = distinct_entries(rows, |r| r.item_id.clone(), |r| r.item_name.clone());
    let sexes = distinct_entries(rows, |r| r.sex_code, |r| r.sex_name.clone());
    let ages = distinct_entries(rows, |r| r.age_code, |r| r.age_name.clone());

    let mut years = distinct_entries(
        rows,
        |r| r.period.year().to_string(),
        |r| r.period.year().to_string(),
    );
    years.reverse();

    DimensionOptions {
        items,
        sexes,
        ages,
        years,
    }
}

impl DimensionOptions {
    /// Initial selector state: the "total" codes and the most recent year.
    pub fn default_selection(&self) -> Selection {
        Selection {
            item_id: DEFAULT_ITEM_ID.to_string(),
            sex_code: DEFAULT_SEX_CODE,
            age_code: DEFAULT_AGE_CODE,
            years: self.years.first().map(|e| e.value.clone()).into_iter().collect(),
        }
    }

    /// Position of a year in the year list (0 = most recent).
    pub fn year_position(&self, year: &str) -> Option<usize> {
        self.years.iter().position(|e| e.value == year)
    }

    pub fn item_label(&self, item_id: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|e| e.value == item_id)
            .map(|e| e.label.as_str())
    }
}

/// The default selection against an empty option list: totals, no years.
impl Default for Selection {
    fn default() -> Self {
        DimensionOptions::default().default_selection()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::obs;

    fn sample_table() -> ObservationTable {
        let mut rows = vec![
            obs("201901", "T10", 0, 0, 1.0),
            obs("201901", "T20", 1, 15, 2.0),
            obs("202001", "T10", 2, 20, 3.0),
            obs("202001", "T20", 0, 0, 4.0),
            obs("202101", "T10", 1, 15, 5.0),
        ];
        rows[1].item_name = "경제활동인구 (천명)".to_string();
        ObservationTable::from_rows(rows)
    }

    fn values<T: Clone>(entries: &[OptionEntry<T>]) -> Vec<T> {
        entries.iter().map(|e| e.value.clone()).collect()
    }

    #[test]
    fn dimensions_keep_first_occurrence_order() {
        let opts = derive_options(&sample_table());
        assert_eq!(values(&opts.items), vec!["T10", "T20"]);
        assert_eq!(values(&opts.sexes), vec![0, 1, 2]);
        assert_eq!(values(&opts.ages), vec![0, 15, 20]);
        assert_eq!(opts.items[1].label, "경제활동인구 (천명)");
        assert_eq!(opts.sexes[2].label, "sex 2");
    }

    #[test]
    fn years_are_most_recent_first() {
        let opts = derive_options(&sample_table());
        assert_eq!(values(&opts.years), vec!["2021", "2020", "2019"]);
        assert!(opts.years.iter().all(|e| e.label == e.value));
    }

    #[test]
    fn every_option_code_occurs_in_the_table() {
        let table = sample_table();
        let opts = derive_options(&table);
        let rows = table.rows();
        assert!(opts.items.iter().all(|e| rows.iter().any(|r| r.item_id == e.value)));
        assert!(opts.sexes.iter().all(|e| rows.iter().any(|r| r.sex_code == e.value)));
        assert!(opts.ages.iter().all(|e| rows.iter().any(|r| r.age_code == e.value)));
        assert!(opts.years.iter().all(|e| rows.iter().any(|r| r.period.year() == e.value)));
    }

    #[test]
    fn empty_table_gives_empty_lists() {
        let opts = derive_options(&ObservationTable::default());
        assert_eq!(opts, DimensionOptions::default());
        assert!(opts.default_selection().years.is_empty());
    }

    #[test]
    fn default_selection_uses_totals_and_latest_year() {
        let sel = derive_options(&sample_table()).default_selection();
        assert_eq!(sel.item_id, "T10");
        assert_eq!(sel.sex_code, 0);
        assert_eq!(sel.age_code, 0);
        assert_eq!(sel.years, vec!["2021"]);
    }

    #[test]
    fn year_lookup() {
        let opts = derive_options(&sample_table());
        assert_eq!(opts.year_position("2019"), Some(2));
        assert_eq!(opts.year_position("1999"), None);
        assert_eq!(opts.item_label("T10"), Some("T10 name"));
        assert_eq!(opts.item_label("T99"), None);
    }
}
