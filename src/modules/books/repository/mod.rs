//! Data access for book records.

use async_trait::async_trait;

use super::models::{Book, NewBook};

pub use memory::InMemoryBookRepository;
pub use sqlite::SqliteBookRepository;

mod memory;
pub(crate) mod sqlite;

#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    #[error("database failure: {0}")]
    Database(#[from] sqlx::Error),
}

/// CRUD access to the book store.
///
/// Implementations perform no validation; "not found" is reported as `None`
/// or as a silent no-op, never as an error.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Persist a new book; the store assigns its identifier.
    async fn insert(&self, book: NewBook) -> Result<Book, RepositoryError>;

    async fn find_by_id(&self, book_code: i64) -> Result<Option<Book>, RepositoryError>;

    /// Every stored book, in the store's natural order.
    async fn find_all(&self) -> Result<Vec<Book>, RepositoryError>;

    /// Write `book` under its identifier, overwriting any existing row.
    async fn save(&self, book: Book) -> Result<Book, RepositoryError>;

    /// Remove the book if present.
    async fn delete_by_id(&self, book_code: i64) -> Result<(), RepositoryError>;
}
