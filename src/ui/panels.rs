use std::fmt::Display;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::options::OptionEntry;
use super::text;
use crate::state::DashboardState;

// ---------------------------------------------------------------------------
// Left side panel – selectors
// ---------------------------------------------------------------------------

/// Label of the entry holding `value`, or the raw code when it is not listed.
fn label_for<T: PartialEq + Display>(entries: &[OptionEntry<T>], value: &T) -> String {
    entries
        .iter()
        .find(|e| e.value == *value)
        .map(|e| e.label.clone())
        .unwrap_or_else(|| value.to_string())
}

/// Single-choice dropdown over one dimension. Returns the new value when the
/// user picked a different entry.
fn single_select<T: Clone + PartialEq + Display>(
    ui: &mut Ui,
    id: &str,
    entries: &[OptionEntry<T>],
    current: &T,
) -> Option<T> {
    let mut picked = current.clone();
    egui::ComboBox::from_id_salt(id)
        .selected_text(label_for(entries, current))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for entry in entries {
                ui.selectable_value(&mut picked, entry.value.clone(), &entry.label);
            }
        });
    (picked != *current).then_some(picked)
}

/// Render the left selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState) {
    ui.heading(text::HEADING);
    ui.label(text::SUBHEADING);
    ui.separator();

    if state.dataset.is_none() {
        ui.label(text::NO_DATASET);
        return;
    }

    // Clone the option lists so we can mutate state inside the loop.
    let options = state.options.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong(text::ITEM);
            if let Some(item) = single_select(ui, "item", &options.items, &state.selection.item_id)
            {
                state.set_item(item);
            }
            ui.add_space(4.0);

            ui.strong(text::SEX);
            if let Some(sex) = single_select(ui, "sex", &options.sexes, &state.selection.sex_code) {
                state.set_sex(sex);
            }
            ui.add_space(4.0);

            ui.strong(text::AGE);
            if let Some(age) = single_select(ui, "age", &options.ages, &state.selection.age_code) {
                state.set_age(age);
            }
            ui.separator();

            let n_selected = state.selection.years.len();
            ui.strong(text::year_caption(n_selected, options.years.len()));
            for entry in &options.years {
                let mut checked = state.is_year_selected(&entry.value);
                let label = RichText::new(&entry.label).color(state.colors.color_for(&entry.value));
                if ui.checkbox(&mut checked, label).changed() && !state.toggle_year(&entry.value) {
                    state.status_message = Some(text::LAST_YEAR_REQUIRED.into());
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button(text::FILE_MENU, |ui: &mut Ui| {
            if ui.button(text::OPEN).clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let points: usize = state
                .chart
                .as_ref()
                .map(|c| c.series.iter().map(|s| s.points.len()).sum())
                .unwrap_or(0);
            ui.label(text::load_summary(ds.len(), points));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut DashboardState) {
    let file = rfd::FileDialog::new()
        .set_title(text::OPEN_DIALOG_TITLE)
        .add_filter(text::SUPPORTED_FILES, &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
