//! Events flowing from the backend worker back to the UI.

use client_core::CatalogEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    WorkerReady,
    WorkerFailed(String),
    Catalog(CatalogEvent),
    CommandFinished(&'static str),
}

/// Status-bar text for an event, if it changes what the status bar shows.
///
/// Request failures never reach the UI; they only go to the log.
pub fn status_for_event(event: &UiEvent) -> Option<String> {
    match event {
        UiEvent::WorkerReady => Some("Connected".to_string()),
        UiEvent::WorkerFailed(message) => Some(message.clone()),
        UiEvent::Catalog(CatalogEvent::ListReplaced { count }) => Some(match count {
            1 => "1 book".to_string(),
            n => format!("{n} books"),
        }),
        UiEvent::Catalog(_) | UiEvent::CommandFinished(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_counts_are_pluralized() {
        assert_eq!(
            status_for_event(&UiEvent::Catalog(CatalogEvent::ListReplaced { count: 1 })),
            Some("1 book".to_string())
        );
        assert_eq!(
            status_for_event(&UiEvent::Catalog(CatalogEvent::ListReplaced { count: 0 })),
            Some("0 books".to_string())
        );
    }

    #[test]
    fn command_completion_leaves_status_alone() {
        assert_eq!(status_for_event(&UiEvent::CommandFinished("refresh")), None);
        assert_eq!(
            status_for_event(&UiEvent::Catalog(CatalogEvent::DraftCleared)),
            None
        );
    }
}
