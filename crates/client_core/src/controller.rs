use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use shared::domain::{Book, BookId};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::{
    draft::{BookDraft, EditingBook},
    state::{CatalogState, RowMode},
    BookCollectionService,
};

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    ListReplaced { count: usize },
    DraftCleared,
    EditingChanged,
}

/// Mirrors the remote collection into local state and issues the four mutations.
///
/// Methods take `&self` so one controller can be shared across tasks. The state
/// lock is never held across an `.await`: overlapping operations race freely and
/// the list ends up as whatever the last completed refresh returned.
///
/// Network failures are logged and otherwise swallowed; local state is left as is.
pub struct CatalogController<S> {
    service: S,
    state: RwLock<CatalogState>,
    events: broadcast::Sender<CatalogEvent>,
}

impl<S: BookCollectionService> CatalogController<S> {
    pub fn new(service: S) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            service,
            state: RwLock::new(CatalogState::default()),
            events,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> CatalogState {
        self.read_state().clone()
    }

    pub fn books(&self) -> Vec<Book> {
        self.read_state().books.clone()
    }

    pub fn draft(&self) -> BookDraft {
        self.read_state().draft.clone()
    }

    pub fn editing(&self) -> Option<EditingBook> {
        self.read_state().editing.clone()
    }

    pub fn row_mode(&self, id: &BookId) -> RowMode {
        self.read_state().row_mode(id)
    }

    /// Mutates the new-entry draft in place, e.g. from a text input.
    pub fn edit_draft<R>(&self, f: impl FnOnce(&mut BookDraft) -> R) -> R {
        f(&mut self.write_state().draft)
    }

    /// Mutates the record being edited. Returns `None` when no row is in edit mode.
    pub fn edit_editing<R>(&self, f: impl FnOnce(&mut EditingBook) -> R) -> Option<R> {
        self.write_state().editing.as_mut().map(f)
    }

    pub async fn refresh(&self) {
        match self.service.list_books().await {
            Ok(books) => {
                let count = books.len();
                self.write_state().replace_books(books);
                debug!(count, "book list refreshed");
                self.emit(CatalogEvent::ListReplaced { count });
            }
            Err(err) => {
                let error = format!("{err:#}");
                error!(%error, "failed to fetch books");
            }
        }
    }

    /// Creates a book from the draft, then clears the draft and refreshes.
    ///
    /// A draft whose year does not parse is not sent; it stays in place for correction.
    pub async fn submit_new(&self) {
        let fields = {
            let state = self.read_state();
            state.draft.to_fields()
        };
        let fields = match fields {
            Ok(fields) => fields,
            Err(err) => {
                warn!(error = %err, "new book not submitted");
                return;
            }
        };

        match self.service.create_book(&fields).await {
            Ok(()) => info!(title = %fields.title, "book added"),
            Err(err) => {
                let error = format!("{err:#}");
                error!(%error, title = %fields.title, "failed to add book");
            }
        }

        self.write_state().reset_draft();
        self.emit(CatalogEvent::DraftCleared);
        self.refresh().await;
    }

    /// Puts `book` in edit mode, evicting any other row that was being edited.
    pub fn begin_edit(&self, book: &Book) {
        let previous = {
            let mut state = self.write_state();
            let previous = state.editing.as_ref().map(|e| e.id.clone());
            state.begin_edit(book);
            previous
        };
        if let Some(previous) = previous.filter(|p| *p != book.id) {
            debug!(book_id = %book.id, evicted = %previous, "edit target replaced");
        }
        self.emit(CatalogEvent::EditingChanged);
    }

    pub fn cancel_edit(&self) {
        self.write_state().clear_editing();
        self.emit(CatalogEvent::EditingChanged);
    }

    /// Sends the editing copy as the new content of `id`, then leaves edit mode and refreshes.
    pub async fn submit_edit(&self, id: &BookId) {
        let fields = {
            let state = self.read_state();
            state.editing.as_ref().map(EditingBook::to_fields)
        };
        let fields = match fields {
            Some(Ok(fields)) => fields,
            Some(Err(err)) => {
                warn!(book_id = %id, error = %err, "edited book not submitted");
                return;
            }
            None => {
                warn!(book_id = %id, "no book is being edited");
                return;
            }
        };

        match self.service.update_book(id, &fields).await {
            Ok(()) => info!(book_id = %id, "book updated"),
            Err(err) => {
                let error = format!("{err:#}");
                error!(%error, book_id = %id, "failed to update book");
            }
        }

        self.write_state().clear_editing();
        self.emit(CatalogEvent::EditingChanged);
        self.refresh().await;
    }

    pub async fn submit_delete(&self, id: &BookId) {
        match self.service.delete_book(id).await {
            Ok(()) => info!(book_id = %id, "book deleted"),
            Err(err) => {
                let error = format!("{err:#}");
                error!(%error, book_id = %id, "failed to delete book");
            }
        }

        self.refresh().await;
    }

    fn emit(&self, event: CatalogEvent) {
        let _ = self.events.send(event);
    }

    fn read_state(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
