use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{BookRepository, RepositoryError};
use crate::modules::books::models::{Book, NewBook};

/// Schema for the `book` table. `AUTOINCREMENT` keeps deleted codes retired.
pub(crate) const CREATE_BOOK_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS book (
        book_code INTEGER PRIMARY KEY AUTOINCREMENT,
        book_name TEXT NOT NULL,
        publisher TEXT NOT NULL,
        isbn      TEXT NOT NULL
    );
"#;

pub struct SqliteBookRepository {
    pool: SqlitePool,
}

impl SqliteBookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn insert(&self, book: NewBook) -> Result<Book, RepositoryError> {
        let stored = sqlx::query_as::<_, Book>(
            // language=sqlite
            r#"
            INSERT INTO book (book_name, publisher, isbn)
            VALUES (?, ?, ?)
            RETURNING book_code, book_name, publisher, isbn
            "#,
        )
        .bind(&book.book_name)
        .bind(&book.publisher)
        .bind(&book.isbn)
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }

    async fn find_by_id(&self, book_code: i64) -> Result<Option<Book>, RepositoryError> {
        let row = sqlx::query_as::<_, Book>(
            // language=sqlite
            r#"
            SELECT book_code, book_name, publisher, isbn
            FROM book
            WHERE book_code = ?
            "#,
        )
        .bind(book_code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_all(&self) -> Result<Vec<Book>, RepositoryError> {
        let rows = sqlx::query_as::<_, Book>(
            // language=sqlite
            r#"
            SELECT book_code, book_name, publisher, isbn
            FROM book
            ORDER BY book_code
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn save(&self, book: Book) -> Result<Book, RepositoryError> {
        let stored = sqlx::query_as::<_, Book>(
            // language=sqlite
            r#"
            INSERT INTO book (book_code, book_name, publisher, isbn)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (book_code) DO UPDATE
            SET book_name = excluded.book_name,
                publisher = excluded.publisher,
                isbn      = excluded.isbn
            RETURNING book_code, book_name, publisher, isbn
            "#,
        )
        .bind(book.book_code())
        .bind(book.book_name())
        .bind(book.publisher())
        .bind(book.isbn())
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }

    async fn delete_by_id(&self, book_code: i64) -> Result<(), RepositoryError> {
        sqlx::query(
            // language=sqlite
            r#"
            DELETE FROM book
            WHERE book_code = ?
            "#,
        )
        .bind(book_code)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
