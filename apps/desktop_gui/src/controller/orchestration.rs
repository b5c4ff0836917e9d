//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend worker stopped; restart the app".to_string();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::domain::BookId;

    #[test]
    fn queued_command_reaches_worker_and_keeps_status() {
        let (tx, rx) = bounded(1);
        let mut status = "ready".to_string();

        let queued = dispatch_backend_command(
            &tx,
            BackendCommand::SubmitDelete {
                id: BookId::new("1"),
            },
            &mut status,
        );

        assert!(queued);
        assert_eq!(status, "ready");
        assert_eq!(
            rx.try_recv().expect("command"),
            BackendCommand::SubmitDelete {
                id: BookId::new("1")
            }
        );
    }

    #[test]
    fn full_queue_reports_retry() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        assert!(dispatch_backend_command(&tx, BackendCommand::Refresh, &mut status));
        assert!(!dispatch_backend_command(&tx, BackendCommand::Refresh, &mut status));
        assert!(status.contains("full"));
    }

    #[test]
    fn disconnected_worker_is_reported() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();
        assert!(!dispatch_backend_command(&tx, BackendCommand::SubmitNew, &mut status));
        assert!(status.contains("stopped"));
    }
}
