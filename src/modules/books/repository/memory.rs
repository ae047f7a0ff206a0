use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookRepository, RepositoryError};
use crate::modules::books::models::{Book, NewBook};

#[derive(Default)]
struct MemoryState {
    rows: BTreeMap<i64, Book>,
    // Highest code ever issued or saved; codes are never handed out twice.
    last_code: i64,
}

/// Process-local store, lost on restart.
#[derive(Default)]
pub struct InMemoryBookRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn insert(&self, book: NewBook) -> Result<Book, RepositoryError> {
        let mut state = self.state.write().await;
        state.last_code += 1;
        let stored = Book::from_parts(state.last_code, book);
        state.rows.insert(stored.book_code(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, book_code: i64) -> Result<Option<Book>, RepositoryError> {
        Ok(self.state.read().await.rows.get(&book_code).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Book>, RepositoryError> {
        Ok(self.state.read().await.rows.values().cloned().collect())
    }

    async fn save(&self, book: Book) -> Result<Book, RepositoryError> {
        let mut state = self.state.write().await;
        state.last_code = state.last_code.max(book.book_code());
        state.rows.insert(book.book_code(), book.clone());
        Ok(book)
    }

    async fn delete_by_id(&self, book_code: i64) -> Result<(), RepositoryError> {
        self.state.write().await.rows.remove(&book_code);
        Ok(())
    }
}
