use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{pages, panels, plot};
use crate::view::PageBody;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WeatherDashApp {
    pub state: AppState,
}

impl WeatherDashApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for WeatherDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation + pickers ----
        egui::SidePanel::left("nav_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: current page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let view = &self.state.view;
            panels::notices(ui, &view.notices);

            match &view.body {
                PageBody::Home { data_path } => pages::home(ui, data_path),
                PageBody::About => pages::about(ui),
                PageBody::Table(table) => {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        pages::table_summary(ui, table);
                    });
                }
                PageBody::Plots(p) => plot::weather_plot(ui, p),
                PageBody::Unavailable => {}
            }
        });
    }
}
