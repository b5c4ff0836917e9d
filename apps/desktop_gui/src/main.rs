use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::{commands::BackendCommand, runtime};
use client_core::{CatalogController, ClientSettings, HttpBookCollection};
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;
use ui::CatalogApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = ClientSettings::from_env();
    tracing::info!(api_base_url = %settings.api_base_url, "starting catalog desktop client");
    let controller = Arc::new(CatalogController::new(HttpBookCollection::from_settings(
        &settings,
    )));

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("My Library")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([520.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "My Library",
        options,
        Box::new(move |cc| {
            runtime::launch(controller.clone(), cmd_rx, ui_tx, cc.egui_ctx.clone());
            let mut app = CatalogApp::new(controller, cmd_tx, ui_rx);
            app.request_initial_refresh();
            Ok(Box::new(app))
        }),
    )
}
