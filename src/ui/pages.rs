use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::summary::SUMMARY_HEADERS;
use crate::view::TableView;

// ---------------------------------------------------------------------------
// Static pages
// ---------------------------------------------------------------------------

pub fn home(ui: &mut Ui, data_path: &str) {
    ui.heading("Welcome to the Weather Data Mini-App");
    ui.add_space(4.0);
    ui.label(
        "Use the sidebar to navigate. The table page shows the first rows and a \
         summary of every column. The plots page draws the measurements for one \
         month, either a single column or all of them together. Data is cached \
         after the first read; use File → Reload after editing the CSV.",
    );
    ui.add_space(8.0);
    ui.label(format!("CSV path expected: {data_path}"));
}

pub fn about(ui: &mut Ui) {
    ui.heading("About this mini-app");
    ui.add_space(4.0);
    ui.label(
        "Four pages: home, a table with summary statistics, interactive line \
         charts filtered by month and column, and these notes. The CSV is read \
         once per path and kept in memory for the session.",
    );
}

// ---------------------------------------------------------------------------
// Table & summary page
// ---------------------------------------------------------------------------

pub fn table_summary(ui: &mut Ui, table: &TableView) {
    ui.heading("First rows");
    let head_rows: Vec<Vec<String>> = table
        .head
        .rows
        .iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    ui.push_id("head_table", |ui: &mut Ui| {
        grid(ui, &table.head.column_names, &head_rows);
    });

    ui.add_space(12.0);
    ui.heading("Describe");
    let headers: Vec<String> = SUMMARY_HEADERS.iter().map(|h| h.to_string()).collect();
    let summary_rows: Vec<Vec<String>> = table.summary.iter().map(|s| s.cells()).collect();
    ui.push_id("describe_table", |ui: &mut Ui| {
        grid(ui, &headers, &summary_rows);
    });
}

fn grid(ui: &mut Ui, headers: &[String], rows: &[Vec<String>]) {
    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(false)
            .columns(Column::auto().at_least(60.0), headers.len())
            .header(20.0, |mut header| {
                for name in headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for row in rows {
                    body.row(18.0, |mut table_row| {
                        for cell in row {
                            table_row.col(|ui: &mut Ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    });
}
