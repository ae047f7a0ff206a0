use std::sync::Arc;

use bookshelf_http::error::AppError;

use super::models::{BookDto, NewBook};
use super::repository::{BookRepository, RepositoryError};

pub const MISSING_FIELDS_MESSAGE: &str = "all fields must be provided";
pub const MISSING_NAME_MESSAGE: &str = "book name is required";
pub const BOOK_NOT_FOUND_MESSAGE: &str = "book not found";

#[derive(thiserror::Error, Debug)]
pub enum BookError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<BookError> for AppError {
    fn from(error: BookError) -> Self {
        match error {
            BookError::Validation(message) => AppError::validation(message),
            BookError::NotFound(message) => AppError::not_found(message),
            BookError::Repository(source) => AppError::Internal(anyhow::Error::new(source)),
        }
    }
}

/// Business rules for the book catalog.
pub struct BookService {
    repository: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    /// Register a new book. Every field must be non-empty; `book_code` is ignored.
    pub async fn add_book(&self, dto: BookDto) -> Result<BookDto, BookError> {
        if dto.book_name.is_empty() || dto.publisher.is_empty() || dto.isbn.is_empty() {
            return Err(BookError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }

        let stored = self.repository.insert(NewBook::from(dto)).await?;
        tracing::info!(book_code = stored.book_code(), "book added");

        Ok(BookDto::from(stored))
    }

    pub async fn get_books(&self) -> Result<Vec<BookDto>, BookError> {
        let books = self.repository.find_all().await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    pub async fn get_book(&self, book_code: i64) -> Result<BookDto, BookError> {
        self.repository
            .find_by_id(book_code)
            .await?
            .map(BookDto::from)
            .ok_or_else(|| BookError::NotFound(BOOK_NOT_FOUND_MESSAGE.to_string()))
    }

    /// Overwrite name, publisher and ISBN of an existing book.
    ///
    /// Only the name is checked for presence; publisher and ISBN are written
    /// as given, empty or not.
    pub async fn update_book(&self, dto: BookDto) -> Result<BookDto, BookError> {
        if dto.book_name.is_empty() {
            return Err(BookError::Validation(MISSING_NAME_MESSAGE.to_string()));
        }

        let current = self
            .repository
            .find_by_id(dto.book_code)
            .await?
            .ok_or_else(|| BookError::NotFound(BOOK_NOT_FOUND_MESSAGE.to_string()))?;

        let updated = current.replace_details(NewBook::from(dto));
        let stored = self.repository.save(updated).await?;
        tracing::info!(book_code = stored.book_code(), "book updated");

        Ok(BookDto::from(stored))
    }

    /// Delete without an existence check; unknown codes are ignored.
    pub async fn delete_book(&self, book_code: i64) -> Result<(), BookError> {
        self.repository.delete_by_id(book_code).await?;
        tracing::info!(book_code, "book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::models::Book;
    use crate::modules::books::repository::InMemoryBookRepository;
    use async_trait::async_trait;

    fn service() -> BookService {
        BookService::new(Arc::new(InMemoryBookRepository::new()))
    }

    fn dto(book_code: i64, name: &str, publisher: &str, isbn: &str) -> BookDto {
        BookDto {
            book_code,
            book_name: name.to_string(),
            publisher: publisher.to_string(),
            isbn: isbn.to_string(),
        }
    }

    fn dune() -> BookDto {
        dto(0, "Dune", "Ace", "9780441013593")
    }

    #[tokio::test]
    async fn add_then_get_returns_same_fields() -> Result<(), BookError> {
        let service = service();

        let added = service.add_book(dune()).await?;
        let found = service.get_book(added.book_code).await?;

        assert_eq!(found, dto(added.book_code, "Dune", "Ace", "9780441013593"));
        Ok(())
    }

    #[tokio::test]
    async fn add_ignores_supplied_code() -> Result<(), BookError> {
        let service = service();

        let added = service
            .add_book(dto(500, "Dune", "Ace", "9780441013593"))
            .await?;

        assert_eq!(added.book_code, 1);
        assert!(matches!(
            service.get_book(500).await,
            Err(BookError::NotFound(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn add_rejects_any_empty_field_without_writing() -> Result<(), BookError> {
        let service = service();

        for incomplete in [
            dto(0, "", "Ace", "9780441013593"),
            dto(0, "Dune", "", "9780441013593"),
            dto(0, "Dune", "Ace", ""),
        ] {
            match service.add_book(incomplete).await {
                Err(BookError::Validation(message)) => {
                    assert_eq!(message, MISSING_FIELDS_MESSAGE)
                }
                other => panic!("expected validation error, got {:?}", other),
            }
        }

        assert!(service.get_books().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_book_is_not_found() {
        match service().get_book(404).await {
            Err(BookError::NotFound(message)) => assert_eq!(message, BOOK_NOT_FOUND_MESSAGE),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn update_with_empty_name_leaves_record_alone() -> Result<(), BookError> {
        let service = service();
        let added = service.add_book(dune()).await?;

        let result = service
            .update_book(dto(added.book_code, "", "Chilton", "0801950775"))
            .await;
        assert!(matches!(result, Err(BookError::Validation(ref m)) if m == MISSING_NAME_MESSAGE));

        assert_eq!(service.get_book(added.book_code).await?, added);
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_book_is_not_found() {
        let result = service()
            .update_book(dto(9, "Dune", "Ace", "9780441013593"))
            .await;
        assert!(matches!(result, Err(BookError::NotFound(_))));
    }

    // Update only re-checks the name, so publisher and ISBN may be blanked.
    #[tokio::test]
    async fn update_overwrites_publisher_and_isbn_even_when_empty() -> Result<(), BookError> {
        let service = service();
        let added = service.add_book(dune()).await?;

        service
            .update_book(dto(added.book_code, "Dune", "", ""))
            .await?;

        let found = service.get_book(added.book_code).await?;
        assert_eq!(found, dto(added.book_code, "Dune", "", ""));
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_and_tolerates_repeats() -> Result<(), BookError> {
        let service = service();
        let added = service.add_book(dune()).await?;

        service.delete_book(added.book_code).await?;
        assert!(matches!(
            service.get_book(added.book_code).await,
            Err(BookError::NotFound(_))
        ));

        service.delete_book(added.book_code).await?;
        Ok(())
    }

    #[tokio::test]
    async fn listing_counts_adds_minus_deletes() -> Result<(), BookError> {
        let service = service();
        let mut codes = Vec::new();
        for name in ["Dune", "Dune Messiah", "Children of Dune", "God Emperor of Dune"] {
            codes.push(service.add_book(dto(0, name, "Ace", "isbn")).await?.book_code);
        }
        service.delete_book(codes[1]).await?;
        service.delete_book(codes[3]).await?;

        let mut names: Vec<String> = service
            .get_books()
            .await?
            .into_iter()
            .map(|book| book.book_name)
            .collect();
        names.sort();

        assert_eq!(names, vec!["Children of Dune", "Dune"]);
        Ok(())
    }

    #[tokio::test]
    async fn dune_lifecycle() -> Result<(), BookError> {
        let service = service();

        let added = service.add_book(dune()).await?;
        assert_eq!(added.book_code, 1);
        assert_eq!(service.get_book(1).await?, dto(1, "Dune", "Ace", "9780441013593"));

        service
            .update_book(dto(1, "Dune (40th Anniversary)", "Ace", "9780441013593"))
            .await?;
        let updated = service.get_book(1).await?;
        assert_eq!(updated.book_name, "Dune (40th Anniversary)");
        assert_eq!(updated.book_code, 1);

        service.delete_book(1).await?;
        assert!(matches!(service.get_book(1).await, Err(BookError::NotFound(_))));
        Ok(())
    }

    struct BrokenRepository;

    #[async_trait]
    impl BookRepository for BrokenRepository {
        async fn insert(&self, _book: NewBook) -> Result<Book, RepositoryError> {
            Err(sqlx::Error::PoolClosed.into())
        }

        async fn find_by_id(&self, _book_code: i64) -> Result<Option<Book>, RepositoryError> {
            Err(sqlx::Error::PoolClosed.into())
        }

        async fn find_all(&self) -> Result<Vec<Book>, RepositoryError> {
            Err(sqlx::Error::PoolClosed.into())
        }

        async fn save(&self, _book: Book) -> Result<Book, RepositoryError> {
            Err(sqlx::Error::PoolClosed.into())
        }

        async fn delete_by_id(&self, _book_code: i64) -> Result<(), RepositoryError> {
            Err(sqlx::Error::PoolClosed.into())
        }
    }

    #[tokio::test]
    async fn store_failures_surface_as_internal_errors() {
        let service = BookService::new(Arc::new(BrokenRepository));

        let error = service.get_books().await.unwrap_err();
        assert!(matches!(error, BookError::Repository(_)));
        assert!(matches!(AppError::from(error), AppError::Internal(_)));
    }

    #[tokio::test]
    async fn validation_runs_before_store_access() {
        let service = BookService::new(Arc::new(BrokenRepository));

        let error = service.add_book(dto(0, "", "", "")).await.unwrap_err();
        assert!(matches!(error, BookError::Validation(_)));
    }
}
