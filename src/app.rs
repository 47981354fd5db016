use eframe::egui;

use crate::data::loader::DataSource;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyTickerApp {
    pub state: AppState,
}

impl RustyTickerApp {
    /// Create the app, optionally kicking off an initial load.
    pub fn new(ctx: &egui::Context, initial: Option<DataSource>) -> Self {
        let mut state = AppState::default();
        if let Some(source) = initial {
            if let DataSource::Url(url) = &source {
                state.url_input = url.clone();
            }
            state.begin_load(source, ctx.clone());
        }
        Self { state }
    }
}

impl eframe::App for RustyTickerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Collect a finished background load before drawing anything.
        self.state.poll_load();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::price_chart(ui, &self.state);
        });
    }
}
