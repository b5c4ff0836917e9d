//! Backend commands queued from UI to backend worker.

use shared::domain::BookId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Refresh,
    SubmitNew,
    SubmitEdit { id: BookId },
    SubmitDelete { id: BookId },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Refresh => "refresh",
            BackendCommand::SubmitNew => "submit_new",
            BackendCommand::SubmitEdit { .. } => "submit_edit",
            BackendCommand::SubmitDelete { .. } => "submit_delete",
        }
    }
}
