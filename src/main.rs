mod app;
mod color;
mod data;
mod state;
mod ui;

use app::RustyTickerApp;
use data::loader::DataSource;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional CLI argument: a URL or a local CSV path to load at startup.
    let initial = std::env::args().nth(1).map(|arg| {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            DataSource::Url(arg)
        } else {
            DataSource::Path(arg.into())
        }
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Ticker – Stock Price Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(RustyTickerApp::new(&cc.egui_ctx, initial)))),
    )
}
