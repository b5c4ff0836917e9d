use shared::domain::{Book, BookId};

use crate::draft::{BookDraft, EditingBook};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    Viewing,
    Editing,
}

/// Local view of the catalog: last fetched list plus the two transient field sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    pub books: Vec<Book>,
    pub draft: BookDraft,
    pub editing: Option<EditingBook>,
}

impl CatalogState {
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Replaces any previous edit target.
    pub fn begin_edit(&mut self, book: &Book) {
        self.editing = Some(EditingBook::from(book));
    }

    pub fn clear_editing(&mut self) {
        self.editing = None;
    }

    pub fn reset_draft(&mut self) {
        self.draft = BookDraft::default();
    }

    pub fn replace_books(&mut self, books: Vec<Book>) {
        self.books = books;
    }

    pub fn row_mode(&self, id: &BookId) -> RowMode {
        match &self.editing {
            Some(editing) if editing.id == *id => RowMode::Editing,
            _ => RowMode::Viewing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::BookFields;

    fn book(id: &str, title: &str) -> Book {
        BookFields::new(title, "X", "G", 2000).with_id(BookId::new(id))
    }

    #[test]
    fn only_one_row_is_editing() {
        let mut state = CatalogState {
            books: vec![book("1", "A"), book("2", "B")],
            ..CatalogState::default()
        };

        state.begin_edit(&state.books[0].clone());
        state.begin_edit(&state.books[1].clone());

        assert_eq!(state.row_mode(&BookId::new("1")), RowMode::Viewing);
        assert_eq!(state.row_mode(&BookId::new("2")), RowMode::Editing);
    }

    #[test]
    fn clearing_editing_returns_row_to_viewing() {
        let mut state = CatalogState::default();
        state.begin_edit(&book("1", "A"));
        state.clear_editing();
        assert_eq!(state.row_mode(&BookId::new("1")), RowMode::Viewing);
    }

    #[test]
    fn editing_survives_list_replacement() {
        let mut state = CatalogState::default();
        state.begin_edit(&book("1", "A"));
        state.replace_books(Vec::new());
        assert!(state.is_empty());
        assert_eq!(state.row_mode(&BookId::new("1")), RowMode::Editing);
    }
}
