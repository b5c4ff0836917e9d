//! Editable field sets: the new-entry draft and the row being edited.
//!
//! Both keep the year as the raw text the user typed; it is only turned into
//! an integer by [`parse_year`] when the record is submitted.

use shared::domain::{Book, BookFields, BookId};

use crate::error::CatalogError;

/// Accepts an optionally signed base-10 integer, ignoring surrounding whitespace.
pub fn parse_year(raw: &str) -> Result<i32, CatalogError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| CatalogError::InvalidYear {
            input: raw.to_string(),
        })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: String,
}

impl BookDraft {
    pub fn to_fields(&self) -> Result<BookFields, CatalogError> {
        Ok(BookFields {
            title: self.title.clone(),
            author: self.author.clone(),
            genre: self.genre.clone(),
            year: parse_year(&self.year)?,
        })
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            year: book.year.to_string(),
        }
    }
}

/// Copy of an existing record while it is in edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingBook {
    pub id: BookId,
    pub fields: BookDraft,
}

impl EditingBook {
    pub fn to_fields(&self) -> Result<BookFields, CatalogError> {
        self.fields.to_fields()
    }
}

impl From<&Book> for EditingBook {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            fields: BookDraft::from(book),
        }
    }
}
