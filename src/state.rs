use std::path::Path;
use std::sync::Arc;

use crate::color::YearColors;
use crate::data::filter::Selection;
use crate::data::loader;
use crate::data::model::ObservationTable;
use crate::data::options::{derive_options, DimensionOptions};
use crate::data::series::{build_chart, Chart};
use crate::ui::text;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
#[derive(Default)]
pub struct DashboardState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Arc<ObservationTable>>,

    /// Selector lists derived from the dataset.
    pub options: DimensionOptions,

    /// Current selector values.
    pub selection: Selection,

    /// Chart for the current selection (rebuilt on every change).
    pub chart: Option<Chart>,

    /// One colour per year option.
    pub colors: YearColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl DashboardState {
    /// Ingest a newly loaded dataset: derive options, reset the selection
    /// and draw the default chart.
    pub fn set_dataset(&mut self, dataset: Arc<ObservationTable>) {
        self.options = derive_options(&dataset);
        self.selection = self.options.default_selection();
        self.colors = YearColors::new(&self.options.years);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.rechart();
    }

    /// Load a file and ingest it; on failure keep the current dataset and
    /// surface the error.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(table) => self.set_dataset(Arc::new(table)),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(text::load_error(&e));
            }
        }
    }

    /// Recompute the chart after a selector change.
    pub fn rechart(&mut self) {
        if let Some(ds) = &self.dataset {
            log::debug!(
                "{} {} {} {:?}",
                self.selection.item_id,
                self.selection.sex_code,
                self.selection.age_code,
                self.selection.years
            );
            self.chart = Some(build_chart(ds, &self.selection));
        }
    }

    pub fn set_item(&mut self, item_id: String) {
        self.selection.item_id = item_id;
        self.rechart();
    }

    pub fn set_sex(&mut self, sex_code: i64) {
        self.selection.sex_code = sex_code;
        self.rechart();
    }

    pub fn set_age(&mut self, age_code: i64) {
        self.selection.age_code = age_code;
        self.rechart();
    }

    pub fn is_year_selected(&self, year: &str) -> bool {
        self.selection.years.iter().any(|y| y == year)
    }

    /// Toggle a year. Newly selected years go to the end of the list.
    /// Returns `false` (and changes nothing) when asked to drop the last
    /// selected year.
    pub fn toggle_year(&mut self, year: &str) -> bool {
        if self.is_year_selected(year) {
            if self.selection.years.len() == 1 {
                return false;
            }
            self.selection.years.retain(|y| y != year);
        } else {
            self.selection.years.push(year.to_string());
        }
        self.rechart();
        true
    }
}
