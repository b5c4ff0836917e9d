use super::*;

fn sample(title: &str, author: &str, genre: &str, year: i32) -> BookFields {
    BookFields::new(title, author, genre, year)
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("books.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );
}

#[tokio::test]
async fn lists_books_in_insertion_order() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let first = storage
        .insert_book(&sample("Zed", "A", "G", 2001))
        .await
        .expect("first");
    let second = storage
        .insert_book(&sample("Alpha", "B", "G", 2002))
        .await
        .expect("second");

    let books = storage.list_books(&BookQuery::default()).await.expect("list");
    let ids: Vec<_> = books.iter().map(|b| b.id.clone()).collect();
    assert_eq!(ids, vec![first, second]);
    assert_eq!(books[0].title, "Zed");
    assert_eq!(books[1].year, 2002);
}

#[tokio::test]
async fn filters_are_case_insensitive_substrings() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .insert_book(&sample("1984", "George Orwell", "Dystopian", 1949))
        .await
        .expect("insert");
    storage
        .insert_book(&sample("Animal Farm", "George Orwell", "Satire", 1945))
        .await
        .expect("insert");
    storage
        .insert_book(&sample("The Hobbit", "J.R.R. Tolkien", "Fantasy", 1937))
        .await
        .expect("insert");

    let by_author = storage
        .list_books(&BookQuery {
            author: Some("orwell".to_string()),
            ..BookQuery::default()
        })
        .await
        .expect("list");
    assert_eq!(by_author.len(), 2);

    let combined = storage
        .list_books(&BookQuery {
            author: Some("ORWELL".to_string()),
            genre: Some("sat".to_string()),
            ..BookQuery::default()
        })
        .await
        .expect("list");
    assert_eq!(combined.len(), 1);
    assert_eq!(combined[0].title, "Animal Farm");
}

#[tokio::test]
async fn update_and_delete_report_missing_ids() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let missing = BookId::new("does-not-exist");

    let updated = storage
        .update_book(&missing, &sample("A", "B", "C", 1))
        .await
        .expect("update");
    assert!(!updated);

    let deleted = storage.delete_book(&missing).await.expect("delete");
    assert!(!deleted);
}

#[tokio::test]
async fn update_replaces_all_fields() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let id = storage
        .insert_book(&sample("A", "X", "G", 2000))
        .await
        .expect("insert");

    let updated = storage
        .update_book(&id, &sample("B", "Y", "H", 2001))
        .await
        .expect("update");
    assert!(updated);

    let book = storage.get_book(&id).await.expect("get").expect("present");
    assert_eq!(book, sample("B", "Y", "H", 2001).with_id(id));
}

#[tokio::test]
async fn delete_removes_book() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let id = storage
        .insert_book(&sample("A", "X", "G", 2000))
        .await
        .expect("insert");

    assert!(storage.delete_book(&id).await.expect("delete"));
    assert!(storage.get_book(&id).await.expect("get").is_none());
    assert_eq!(storage.count_books().await.expect("count"), 0);
}

#[tokio::test]
async fn seed_only_runs_on_empty_collection() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let seed = vec![sample("A", "X", "G", 1), sample("B", "Y", "H", 2)];

    assert_eq!(storage.seed_if_empty(&seed).await.expect("seed"), 2);
    assert_eq!(storage.seed_if_empty(&seed).await.expect("reseed"), 0);
    assert_eq!(storage.count_books().await.expect("count"), 2);
}

#[tokio::test]
async fn books_survive_reopening_file_database() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("books.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let id = {
        let storage = Storage::new(&database_url).await.expect("db");
        let id = storage
            .insert_book(&sample("Dune", "Frank Herbert", "Sci-Fi", 1965))
            .await
            .expect("insert");
        storage.pool().close().await;
        id
    };

    let reopened = Storage::new(&database_url).await.expect("reopen");
    let book = reopened.get_book(&id).await.expect("get").expect("present");
    assert_eq!(book.title, "Dune");
}
