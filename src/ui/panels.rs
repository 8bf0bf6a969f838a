use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::{FilterCriteria, Selection};
use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – navigation and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel: page navigation, then the filters of the page.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();
    for tab in Tab::ALL {
        ui.radio_value(&mut state.tab, tab, tab.label());
    }
    ui.add_space(8.0);

    match state.tab {
        Tab::Skills => skills_filters(ui, state),
        Tab::Salary => salary_filters(ui, state),
        Tab::Career | Tab::Profile | Tab::About => {}
    }
}

fn skills_filters(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let title_options = Selection::options(&dataset.titles);
    let category_options = Selection::options(&dataset.categories);

    let mut criteria = state.skills_criteria.clone();
    selection_combo(ui, "Select Job Title", "title", &mut criteria.title, &title_options);
    selection_combo(
        ui,
        "Select Category",
        "category",
        &mut criteria.category,
        &category_options,
    );
    if ui.small_button("Reset").clicked() {
        criteria = FilterCriteria::default();
    }

    state.set_skills_criteria(criteria);
}

fn salary_filters(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let titles = dataset.titles.clone();

    let mut picked: Option<String> = None;
    let current = state.salary_title.clone().unwrap_or_default();
    ui.strong("Select Job Title");
    egui::ComboBox::from_id_salt("salary_title")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for title in &titles {
                if ui.selectable_label(current == *title, title).clicked() {
                    picked = Some(title.clone());
                }
            }
        });

    if let Some(title) = picked {
        state.set_salary_title(title);
    }
}

fn selection_combo(
    ui: &mut Ui,
    label: &str,
    id: &str,
    current: &mut Selection,
    options: &[Selection],
) {
    ui.strong(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in options {
                ui.selectable_value(current, opt.clone(), opt.to_string());
            }
        });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} postings, {} titles, {} categories",
                ds.len(),
                ds.titles.len(),
                ds.categories.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

/// Page title above the central panel.
pub fn banner(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("IT Skills and Salary Trends in India")
                .size(30.0)
                .strong()
                .color(crate::color::ACCENT),
        );
    });
    ui.separator();
}

/// Credit line at the bottom of the window.
pub fn footer(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("Designed by Mohd Khizar")
                .size(12.0)
                .color(Color32::GRAY),
        );
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open job postings")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
