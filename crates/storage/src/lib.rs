use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::info;
use uuid::Uuid;

use shared::{
    domain::{Book, BookFields, BookId},
    protocol::BookQuery,
};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn count_books(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await
            .context("failed to count books")?;
        Ok(count)
    }

    /// Lists books in insertion order, applying case-insensitive substring filters.
    pub async fn list_books(&self, query: &BookQuery) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author, genre, year
            FROM books
            WHERE (?1 IS NULL OR instr(lower(title), lower(?1)) > 0)
              AND (?2 IS NULL OR instr(lower(author), lower(?2)) > 0)
              AND (?3 IS NULL OR instr(lower(genre), lower(?3)) > 0)
            ORDER BY rowid
            "#,
        )
        .bind(query.title.as_deref())
        .bind(query.author.as_deref())
        .bind(query.genre.as_deref())
        .fetch_all(&self.pool)
        .await
        .context("failed to list books")?;

        rows.iter().map(book_from_row).collect()
    }

    pub async fn get_book(&self, id: &BookId) -> Result<Option<Book>> {
        let row = sqlx::query("SELECT id, title, author, genre, year FROM books WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to load book {id}"))?;

        row.as_ref().map(book_from_row).transpose()
    }

    pub async fn insert_book(&self, fields: &BookFields) -> Result<BookId> {
        let id = BookId::new(Uuid::new_v4().simple().to_string());
        sqlx::query("INSERT INTO books (id, title, author, genre, year) VALUES (?, ?, ?, ?, ?)")
            .bind(id.as_str())
            .bind(&fields.title)
            .bind(&fields.author)
            .bind(&fields.genre)
            .bind(fields.year)
            .execute(&self.pool)
            .await
            .context("failed to insert book")?;
        Ok(id)
    }

    /// Returns `false` when no book carries `id`.
    pub async fn update_book(&self, id: &BookId, fields: &BookFields) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE books SET title = ?, author = ?, genre = ?, year = ? WHERE id = ?",
        )
        .bind(&fields.title)
        .bind(&fields.author)
        .bind(&fields.genre)
        .bind(fields.year)
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to update book {id}"))?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns `false` when no book carries `id`.
    pub async fn delete_book(&self, id: &BookId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete book {id}"))?;
        Ok(result.rows_affected() > 0)
    }

    /// Inserts `books` only when the collection is empty. Returns how many were inserted.
    pub async fn seed_if_empty(&self, books: &[BookFields]) -> Result<usize> {
        if self.count_books().await? > 0 {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        for fields in books {
            let id = Uuid::new_v4().simple().to_string();
            sqlx::query(
                "INSERT INTO books (id, title, author, genre, year) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(id)
            .bind(&fields.title)
            .bind(&fields.author)
            .bind(&fields.genre)
            .bind(fields.year)
            .execute(&mut *tx)
            .await
            .context("failed to insert seed book")?;
        }
        tx.commit().await.context("failed to commit seed books")?;

        info!(count = books.len(), "seeded initial books");
        Ok(books.len())
    }
}

fn book_from_row(row: &SqliteRow) -> Result<Book> {
    Ok(Book {
        id: BookId::new(row.try_get::<String, _>("id")?),
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        genre: row.try_get("genre")?,
        year: row.try_get("year")?,
    })
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
