use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::loader::DataSource;
use crate::data::model::Field;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter dropdowns
// ---------------------------------------------------------------------------

/// Render the left filter panel: one single-select dropdown per field.
///
/// The option lists come from the full dataset and only change on a reload;
/// the "All" entry clears that field back to "no constraint". Widgets are
/// disabled while a load is in flight.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone the option lists so we can mutate state inside the loop.
    let options: Vec<(Field, Vec<String>)> = Field::ALL
        .iter()
        .map(|&field| (field, dataset.options(field).to_vec()))
        .collect();

    ui.add_enabled_ui(!state.loading, |ui: &mut Ui| {
        for (field, values) in &options {
            ui.strong(field.label());

            let current = state.selection.get(*field).map(str::to_string);
            egui::ComboBox::from_id_salt(field.label())
                .selected_text(current.clone().unwrap_or_else(|| "All".to_string()))
                .show_ui(ui, |ui: &mut Ui| {
                    if ui.selectable_label(current.is_none(), "All").clicked() {
                        state.set_filter(*field, None);
                    }
                    for value in values {
                        let is_selected = current.as_deref() == Some(value.as_str());
                        if ui.selectable_label(is_selected, value).clicked() {
                            state.set_filter(*field, Some(value.clone()));
                        }
                    }
                });
            ui.add_space(8.0);
        }

        ui.separator();
        if ui.button("Clear filters").clicked() {
            state.clear_filters();
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state, ui.ctx().clone());
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label("URL:");
        let edit = ui.add(
            egui::TextEdit::singleline(&mut state.url_input)
                .hint_text("https://example.com/prices.csv")
                .desired_width(260.0),
        );
        let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let fetch = ui
            .add_enabled(!state.loading, egui::Button::new("Fetch"))
            .clicked();
        if (fetch || submitted) && !state.url_input.trim().is_empty() {
            let url = state.url_input.trim().to_string();
            state.begin_load(DataSource::Url(url), ui.ctx().clone());
        }

        ui.separator();

        if state.loading {
            ui.spinner();
            ui.label("Loading…");
        } else if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, ctx: egui::Context) {
    let file = rfd::FileDialog::new()
        .set_title("Open stock price CSV")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.begin_load(DataSource::Path(path), ctx);
    }
}
