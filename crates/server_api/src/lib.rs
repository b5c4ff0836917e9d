use shared::{
    domain::{Book, BookFields, BookId},
    error::{ApiError, ErrorCode},
    protocol::{BookQuery, CreatedBookResponse, MessageResponse},
};
use storage::Storage;
use tracing::{info, warn};

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
}

/// Books inserted into an empty catalog at startup.
pub fn default_catalog() -> Vec<BookFields> {
    vec![
        BookFields::new("1984", "George Orwell", "Dystopian", 1949),
        BookFields::new("The Hobbit", "J.R.R. Tolkien", "Fantasy", 1937),
        BookFields::new("Pride and Prejudice", "Jane Austen", "Romance", 1813),
    ]
}

pub async fn seed_catalog(ctx: &ApiContext) -> Result<usize, ApiError> {
    ctx.storage
        .seed_if_empty(&default_catalog())
        .await
        .map_err(internal)
}

pub async fn list_books(ctx: &ApiContext, query: BookQuery) -> Result<Vec<Book>, ApiError> {
    ctx.storage
        .list_books(&query.normalized())
        .await
        .map_err(internal)
}

pub async fn create_book(
    ctx: &ApiContext,
    fields: BookFields,
) -> Result<CreatedBookResponse, ApiError> {
    let id = ctx.storage.insert_book(&fields).await.map_err(internal)?;
    info!(book_id = %id, title = %fields.title, "book created");
    Ok(CreatedBookResponse { id })
}

pub async fn update_book(
    ctx: &ApiContext,
    id: &BookId,
    fields: BookFields,
) -> Result<MessageResponse, ApiError> {
    let matched = ctx
        .storage
        .update_book(id, &fields)
        .await
        .map_err(internal)?;
    if !matched {
        warn!(book_id = %id, "update for unknown book");
        return Err(ApiError::not_found("Book not found"));
    }
    info!(book_id = %id, "book updated");
    Ok(MessageResponse::new("Book updated"))
}

pub async fn delete_book(ctx: &ApiContext, id: &BookId) -> Result<MessageResponse, ApiError> {
    let deleted = ctx.storage.delete_book(id).await.map_err(internal)?;
    if !deleted {
        warn!(book_id = %id, "delete for unknown book");
        return Err(ApiError::not_found("Book not found"));
    }
    info!(book_id = %id, "book deleted");
    Ok(MessageResponse::new("Book deleted"))
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::new(ErrorCode::Internal, format!("{err:#}"))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
