//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{CatalogController, HttpBookCollection};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use tokio::sync::broadcast::error::RecvError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub type Catalog = CatalogController<HttpBookCollection>;

/// Runs the backend worker on its own thread with a multi-threaded tokio runtime.
///
/// Each command becomes its own task, so requests overlap exactly as the user fires them.
pub fn launch(
    controller: Arc<Catalog>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    repaint: egui::Context,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                notify(
                    &ui_tx,
                    &repaint,
                    UiEvent::WorkerFailed(format!("backend worker startup failure: {err}")),
                );
                return;
            }
        };

        runtime.block_on(async move {
            let mut events = controller.subscribe_events();
            let events_tx = ui_tx.clone();
            let events_repaint = repaint.clone();
            tokio::spawn(async move {
                loop {
                    match events.recv().await {
                        Ok(event) => {
                            notify(&events_tx, &events_repaint, UiEvent::Catalog(event));
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::debug!(skipped, "ui event forwarder lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            });

            notify(&ui_tx, &repaint, UiEvent::WorkerReady);

            while let Ok(cmd) = cmd_rx.recv() {
                let controller = controller.clone();
                let ui_tx = ui_tx.clone();
                let repaint = repaint.clone();
                tokio::spawn(async move {
                    let name = cmd.name();
                    match cmd {
                        BackendCommand::Refresh => controller.refresh().await,
                        BackendCommand::SubmitNew => controller.submit_new().await,
                        BackendCommand::SubmitEdit { id } => controller.submit_edit(&id).await,
                        BackendCommand::SubmitDelete { id } => {
                            controller.submit_delete(&id).await
                        }
                    }
                    notify(&ui_tx, &repaint, UiEvent::CommandFinished(name));
                });
            }

            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}

fn notify(ui_tx: &Sender<UiEvent>, repaint: &egui::Context, event: UiEvent) {
    let _ = ui_tx.try_send(event);
    repaint.request_repaint();
}
