use serde::{Deserialize, Serialize};

use crate::domain::BookId;

pub const BOOKS_ROUTE: &str = "/api/books";

pub fn book_route(id: &BookId) -> String {
    format!("{BOOKS_ROUTE}/{id}")
}

/// Optional case-insensitive substring filters for `GET /api/books`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl BookQuery {
    /// Drops empty filters so `?title=` behaves like no filter at all.
    pub fn normalized(self) -> Self {
        let keep = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            title: keep(self.title),
            author: keep(self.author),
            genre: keep(self.genre),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBookResponse {
    pub id: BookId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
