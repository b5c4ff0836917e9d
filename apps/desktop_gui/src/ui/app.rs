use std::{sync::Arc, time::Duration};

use client_core::{BookDraft, CatalogState, EditingBook, RowMode};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::Book;

use crate::backend_bridge::{commands::BackendCommand, runtime::Catalog};
use crate::controller::events::{status_for_event, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

const CARD_WIDTH: f32 = 240.0;
const IDLE_REPAINT: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Author,
    Genre,
    Year,
}

impl Field {
    const ALL: [Field; 4] = [Field::Title, Field::Author, Field::Genre, Field::Year];

    fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Author => "Author",
            Field::Genre => "Genre",
            Field::Year => "Year",
        }
    }

    fn slot(self, draft: &mut BookDraft) -> &mut String {
        match self {
            Field::Title => &mut draft.title,
            Field::Author => &mut draft.author,
            Field::Genre => &mut draft.genre,
            Field::Year => &mut draft.year,
        }
    }
}

pub struct CatalogApp {
    controller: Arc<Catalog>,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
    in_flight: usize,
}

impl CatalogApp {
    pub fn new(
        controller: Arc<Catalog>,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        let status = format!("Connecting to {}", controller.service().base_url());
        Self {
            controller,
            cmd_tx,
            ui_rx,
            status,
            in_flight: 0,
        }
    }

    pub fn request_initial_refresh(&mut self) {
        self.send(BackendCommand::Refresh);
    }

    fn send(&mut self, cmd: BackendCommand) {
        if dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.in_flight += 1;
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            if let UiEvent::CommandFinished(_) = event {
                self.in_flight = self.in_flight.saturating_sub(1);
            }
            if let Some(status) = status_for_event(&event) {
                self.status = status;
            }
        }
    }

    fn show_add_card(&mut self, ui: &mut egui::Ui, draft: &BookDraft) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.heading("Add a Book");
            ui.add_space(4.0);

            let mut local = draft.clone();
            for field in Field::ALL {
                let slot = field.slot(&mut local);
                let response = ui.add(
                    egui::TextEdit::singleline(slot)
                        .hint_text(field.label())
                        .desired_width(f32::INFINITY),
                );
                if response.changed() {
                    let value = slot.clone();
                    self.controller
                        .edit_draft(|draft| *field.slot(draft) = value);
                }
            }

            ui.add_space(4.0);
            if ui.button("Add Book").clicked() {
                self.send(BackendCommand::SubmitNew);
            }
        });
    }

    fn show_books(&mut self, ui: &mut egui::Ui, state: &CatalogState) {
        ui.heading("Books");
        ui.add_space(4.0);

        if state.is_empty() {
            ui.label("No books yet 😅");
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for book in &state.books {
                    match (state.row_mode(&book.id), &state.editing) {
                        (RowMode::Editing, Some(editing)) => self.show_editing_card(ui, editing),
                        _ => self.show_book_card(ui, book),
                    }
                }
            });
        });
    }

    fn show_book_card(&mut self, ui: &mut egui::Ui, book: &Book) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical(|ui| {
                ui.strong(&book.title);
                ui.label(format!("Author: {}", book.author));
                ui.label(format!("Genre: {}", book.genre));
                ui.label(format!("Year: {}", book.year));
                ui.horizontal(|ui| {
                    if ui.button("Edit").clicked() {
                        self.controller.begin_edit(book);
                    }
                    if ui.button("Delete").clicked() {
                        self.send(BackendCommand::SubmitDelete {
                            id: book.id.clone(),
                        });
                    }
                });
            });
        });
    }

    fn show_editing_card(&mut self, ui: &mut egui::Ui, editing: &EditingBook) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical(|ui| {
                let mut local = editing.fields.clone();
                for field in Field::ALL {
                    let slot = field.slot(&mut local);
                    let response = ui.add(
                        egui::TextEdit::singleline(slot)
                            .hint_text(field.label())
                            .desired_width(f32::INFINITY),
                    );
                    if response.changed() {
                        let value = slot.clone();
                        let id = editing.id.clone();
                        self.controller.edit_editing(|current| {
                            if current.id == id {
                                *field.slot(&mut current.fields) = value;
                            }
                        });
                    }
                }
                ui.horizontal(|ui| {
                    if ui.button("Update").clicked() {
                        self.send(BackendCommand::SubmitEdit {
                            id: editing.id.clone(),
                        });
                    }
                    if ui.button("Cancel").clicked() {
                        self.controller.cancel_edit();
                    }
                });
            });
        });
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        let state = self.controller.snapshot();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.in_flight > 0 {
                    ui.spinner();
                }
                ui.label(&self.status);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| ui.heading("My Library"));
            ui.add_space(8.0);
            self.show_add_card(ui, &state.draft);
            ui.add_space(12.0);
            self.show_books(ui, &state);
        });

        if self.in_flight > 0 {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(IDLE_REPAINT);
        }
    }
}
