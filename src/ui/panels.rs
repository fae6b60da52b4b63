use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::error::Severity;
use crate::data::model::{ColumnChoice, MonthKey, ALL_COLUMNS_LABEL};
use crate::state::AppState;
use crate::view::{Notice, Page, PageBody};

// ---------------------------------------------------------------------------
// Left side panel – navigation and chart pickers
// ---------------------------------------------------------------------------

/// Render the sidebar: page radio group, then month / column pickers while
/// the plots page is open.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigate");
    ui.separator();

    let mut page = state.page;
    for p in Page::ALL {
        ui.radio_value(&mut page, p, p.label());
    }
    state.set_page(page);

    let PageBody::Plots(plot) = &state.view.body else {
        return;
    };

    // Clone what we need so we can mutate state after the widgets.
    let months = plot.months.clone();
    let columns = plot.numeric_columns.clone();
    let current_month = plot.selection.month;
    let current_column = plot.selection.column.clone();

    let mut picked_month: Option<MonthKey> = None;
    let mut picked_column: Option<ColumnChoice> = None;

    ui.add_space(8.0);
    ui.separator();

    ui.strong("Month");
    let month_text = current_month.map(|m| m.to_string()).unwrap_or_default();
    egui::ComboBox::from_id_salt("month_picker")
        .selected_text(month_text)
        .show_ui(ui, |ui: &mut Ui| {
            for month in &months {
                if ui
                    .selectable_label(current_month == Some(*month), month.to_string())
                    .clicked()
                {
                    picked_month = Some(*month);
                }
            }
        });

    ui.add_space(4.0);
    ui.strong("Column");
    egui::ComboBox::from_id_salt("column_picker")
        .selected_text(current_column.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current_column == ColumnChoice::All, ALL_COLUMNS_LABEL)
                .clicked()
            {
                picked_column = Some(ColumnChoice::All);
            }
            for col in &columns {
                let choice = ColumnChoice::Column(col.clone());
                if ui.selectable_label(current_column == choice, col).clicked() {
                    picked_column = Some(choice);
                }
            }
        });

    if let Some(month) = picked_month {
        state.set_month(month);
    }
    if let Some(column) = picked_column {
        state.set_column(column);
    }
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
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.config.data_path.display().to_string());

        if let Some(status) = &state.dataset_status {
            ui.separator();
            ui.label(status);
        }
    });
}

/// Show each notice as a coloured line.
pub fn notices(ui: &mut Ui, notices: &[Notice]) {
    for notice in notices {
        let color = match notice.severity {
            Severity::Warning => Color32::YELLOW,
            Severity::Error => Color32::RED,
        };
        ui.label(RichText::new(&notice.message).color(color));
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open weather data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(path);
    }
}
