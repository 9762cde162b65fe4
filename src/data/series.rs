use serde::Serialize;

use super::filter::{filtered_indices, Selection};
use super::model::ObservationTable;

// ---------------------------------------------------------------------------
// Month axis shared by every chart
// ---------------------------------------------------------------------------

/// Fixed x-axis: one tick per calendar month, padded by half a month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthAxis {
    pub range: [f64; 2],
    pub tick_values: [u8; 12],
    pub tick_labels: [&'static str; 12],
}

pub const MONTH_AXIS: MonthAxis = MonthAxis {
    range: [0.5, 12.5],
    tick_values: [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
    tick_labels: [
        "1월", "2월", "3월", "4월", "5월", "6월", "7월", "8월", "9월", "10월", "11월", "12월",
    ],
};

impl MonthAxis {
    /// Tick label at an axis position, if the position is a month tick.
    pub fn label_for(&self, position: f64) -> Option<&'static str> {
        self.tick_values
            .iter()
            .position(|&m| f64::from(m) == position)
            .map(|i| self.tick_labels[i])
    }
}

// ---------------------------------------------------------------------------
// Series – one line per requested year
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthPoint {
    pub month: u8,
    pub value: f64,
}

/// One plotted line. Points keep table row order; they are not re-sorted
/// by month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// The year string; doubles as the legend entry.
    pub name: String,
    pub points: Vec<MonthPoint>,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub series: Vec<Series>,
    pub x_axis: MonthAxis,
}

/// Build one series per requested year, in the order the years were given.
///
/// A year with no matching rows still produces a series, with no points.
pub fn build_series(table: &ObservationTable, selection: &Selection) -> Vec<Series> {
    let rows = table.rows();
    selection
        .years
        .iter()
        .map(|year| {
            let filter = selection.filter_for_year(year);
            let points = filtered_indices(table, &filter)
                .into_iter()
                .map(|i| MonthPoint {
                    month: rows[i].period.month(),
                    value: rows[i].value,
                })
                .collect();
            Series {
                name: year.clone(),
                points,
            }
        })
        .collect()
}

pub fn build_chart(table: &ObservationTable, selection: &Selection) -> Chart {
    Chart {
        series: build_series(table, selection),
        x_axis: MONTH_AXIS,
    }
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

    fn months(series: &Series) -> Vec<u8> {
        series.points.iter().map(|p| p.month).collect()
    }

    #[test]
    fn two_months_of_one_year() {
        let table = ObservationTable::from_rows(vec![
            obs("202001", "T10", 0, 0, 63.1),
            obs("202002", "T10", 0, 0, 62.8),
        ]);
        let series = build_series(&table, &selection("T10", &["2020"]));
        assert_eq!(
            series,
            vec![Series {
                name: "2020".into(),
                points: vec![
                    MonthPoint { month: 1, value: 63.1 },
                    MonthPoint { month: 2, value: 62.8 },
                ],
            }]
        );
    }

    #[test]
    fn one_series_per_year_in_request_order() {
        let table = ObservationTable::from_rows(vec![
            obs("201901", "T10", 0, 0, 1.0),
            obs("202001", "T10", 0, 0, 2.0),
            obs("201902", "T10", 0, 0, 3.0),
        ]);
        let series = build_series(&table, &selection("T10", &["2020", "2019", "2018"]));
        let names: Vec<_> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["2020", "2019", "2018"]);
        assert_eq!(months(&series[0]), vec![1]);
        assert_eq!(months(&series[1]), vec![1, 2]);
        assert!(series[2].points.is_empty());
    }

    #[test]
    fn unmatched_selection_keeps_an_empty_series() {
        let table = ObservationTable::from_rows(vec![obs("202001", "T10", 0, 0, 1.0)]);
        let series = build_series(&table, &selection("NOPE", &["2020"]));
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "2020");
        assert!(series[0].points.is_empty());
    }

    #[test]
    fn points_follow_table_order() {
        let table = ObservationTable::from_rows(vec![
            obs("202003", "T10", 0, 0, 3.0),
            obs("202001", "T10", 0, 0, 1.0),
            obs("202002", "T10", 0, 0, 2.0),
        ]);
        let series = build_series(&table, &selection("T10", &["2020"]));
        assert_eq!(months(&series[0]), vec![3, 1, 2]);
    }

    #[test]
    fn repeated_calls_agree() {
        let table = ObservationTable::from_rows(vec![
            obs("202001", "T10", 0, 0, 1.0),
            obs("201901", "T10", 0, 0, 2.0),
        ]);
        let sel = selection("T10", &["2019", "2020"]);
        assert_eq!(build_chart(&table, &sel), build_chart(&table, &sel));
    }

    #[test]
    fn axis_is_fixed() {
        let empty = build_chart(&ObservationTable::default(), &selection("T10", &["2020"]));
        assert_eq!(empty.x_axis.range, [0.5, 12.5]);
        let ticks: Vec<u8> = (1..=12).collect();
        assert_eq!(empty.x_axis.tick_values.to_vec(), ticks);
        assert_eq!(MONTH_AXIS.label_for(1.0), Some("1월"));
        assert_eq!(MONTH_AXIS.label_for(12.0), Some("12월"));
        assert_eq!(MONTH_AXIS.label_for(0.5), None);
    }
}
