use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, server-assigned book identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub String);

impl BookId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

pub const DEFAULT_GENRE: &str = "Unknown";

fn default_genre() -> String {
    DEFAULT_GENRE.to_string()
}

/// One catalog entry as returned by the collection service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id", alias = "id")]
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: i32,
}

impl Book {
    pub fn fields(&self) -> BookFields {
        BookFields {
            title: self.title.clone(),
            author: self.author.clone(),
            genre: self.genre.clone(),
            year: self.year,
        }
    }
}

/// Request body for create and update: a book without its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    #[serde(default = "default_genre")]
    pub genre: String,
    pub year: i32,
}

impl BookFields {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            year,
        }
    }

    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            genre: self.genre,
            year: self.year,
        }
    }
}
