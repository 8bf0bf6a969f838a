use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{pages, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct JobTrendsApp {
    pub state: AppState,
}

impl JobTrendsApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for JobTrendsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: credits ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui);
        });

        // ---- Left side panel: navigation + filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: current page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::banner(ui);
            match self.state.tab {
                Tab::Skills => plot::skills_page(ui, &self.state),
                Tab::Salary => plot::salary_page(ui, &self.state),
                Tab::Career => pages::career_page(ui, &mut self.state),
                Tab::Profile => pages::profile_page(ui),
                Tab::About => pages::about_page(ui),
            }
        });
    }
}
