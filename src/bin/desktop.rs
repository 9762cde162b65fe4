use clap::Parser;
use eframe::egui;

use kosis_dashboard::app::DashboardApp;
use kosis_dashboard::config::{init_logging, DesktopArgs};
use kosis_dashboard::state::DashboardState;
use kosis_dashboard::ui::{fonts, text};

fn main() -> eframe::Result {
    let args = DesktopArgs::parse();
    init_logging(args.debug);

    let mut state = DashboardState::default();
    if let Some(path) = &args.data {
        state.load_path(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        text::WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            fonts::install_hangul_font(&cc.egui_ctx, args.font.as_deref());
            Ok(Box::new(DashboardApp::new(state)))
        }),
    )
}
