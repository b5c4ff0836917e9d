use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{Book, BookFields, BookId},
    protocol::BOOKS_ROUTE,
};
use tracing::debug;
use url::Url;

pub mod config;
mod controller;
pub mod draft;
pub mod error;
pub mod state;

pub use config::ClientSettings;
pub use controller::{CatalogController, CatalogEvent};
pub use draft::{parse_year, BookDraft, EditingBook};
pub use error::CatalogError;
pub use state::{CatalogState, RowMode};

/// The remote book collection. Every method maps to one HTTP request.
#[async_trait]
pub trait BookCollectionService: Send + Sync {
    async fn list_books(&self) -> Result<Vec<Book>>;
    async fn create_book(&self, fields: &BookFields) -> Result<()>;
    async fn update_book(&self, id: &BookId, fields: &BookFields) -> Result<()>;
    async fn delete_book(&self, id: &BookId) -> Result<()>;
}

#[async_trait]
impl<T: BookCollectionService + ?Sized> BookCollectionService for Arc<T> {
    async fn list_books(&self) -> Result<Vec<Book>> {
        (**self).list_books().await
    }

    async fn create_book(&self, fields: &BookFields) -> Result<()> {
        (**self).create_book(fields).await
    }

    async fn update_book(&self, id: &BookId, fields: &BookFields) -> Result<()> {
        (**self).update_book(id, fields).await
    }

    async fn delete_book(&self, id: &BookId) -> Result<()> {
        (**self).delete_book(id).await
    }
}

/// [`BookCollectionService`] over HTTP/JSON. Response bodies of mutations are not read.
#[derive(Clone)]
pub struct HttpBookCollection {
    http: Client,
    base_url: Url,
}

impl HttpBookCollection {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(settings.api_base_url.clone())
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/books[/{id}]`, keeping any path prefix of the base url.
    fn endpoint(&self, id: Option<&BookId>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| anyhow!("API base url {} cannot carry a path", self.base_url))?;
            segments.pop_if_empty();
            segments.extend(BOOKS_ROUTE.split('/').filter(|s| !s.is_empty()));
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl BookCollectionService for HttpBookCollection {
    async fn list_books(&self) -> Result<Vec<Book>> {
        let url = self.endpoint(None)?;
        debug!(%url, "GET books");
        let books = self
            .http
            .get(url)
            .send()
            .await
            .context("book list request failed")?
            .error_for_status()?
            .json::<Vec<Book>>()
            .await
            .context("malformed book list response")?;
        Ok(books)
    }

    async fn create_book(&self, fields: &BookFields) -> Result<()> {
        let url = self.endpoint(None)?;
        debug!(%url, title = %fields.title, "POST book");
        self.http
            .post(url)
            .json(fields)
            .send()
            .await
            .context("create book request failed")?
            .error_for_status()?;
        Ok(())
    }

    async fn update_book(&self, id: &BookId, fields: &BookFields) -> Result<()> {
        let url = self.endpoint(Some(id))?;
        debug!(%url, "PUT book");
        self.http
            .put(url)
            .json(fields)
            .send()
            .await
            .with_context(|| format!("update request for book {id} failed"))?
            .error_for_status()?;
        Ok(())
    }

    async fn delete_book(&self, id: &BookId) -> Result<()> {
        let url = self.endpoint(Some(id))?;
        debug!(%url, "DELETE book");
        self.http
            .delete(url)
            .send()
            .await
            .with_context(|| format!("delete request for book {id} failed"))?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod controller_tests;
