use serde::{Deserialize, Serialize};

/// Transfer object moving book data across the request/response boundary.
///
/// Field names follow the form encoding (`bookCode`, `bookName`, ...). Missing
/// fields bind to their defaults so presence checks stay in the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookDto {
    /// Store-assigned identifier; ignored on create
    pub book_code: i64,
    /// Title of the book
    pub book_name: String,
    /// Publisher of the book
    pub publisher: String,
    /// International Standard Book Number
    pub isbn: String,
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            book_code: book.book_code,
            book_name: book.book_name,
            publisher: book.publisher,
            isbn: book.isbn,
        }
    }
}

/// Form body of `POST /book/bookDelete`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBookForm {
    pub book_code: i64,
}

/// A book row as held by the store.
///
/// Only repositories construct this type, so every `Book` carries an
/// identifier the store actually issued.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Book {
    book_code: i64,
    book_name: String,
    publisher: String,
    isbn: String,
}

impl Book {
    pub(crate) fn from_parts(book_code: i64, details: NewBook) -> Self {
        Self {
            book_code,
            book_name: details.book_name,
            publisher: details.publisher,
            isbn: details.isbn,
        }
    }

    pub fn book_code(&self) -> i64 {
        self.book_code
    }

    pub fn book_name(&self) -> &str {
        &self.book_name
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Replace every mutable field, keeping the identifier.
    pub fn replace_details(self, details: NewBook) -> Self {
        Self::from_parts(self.book_code, details)
    }
}

/// A book that has not been persisted yet and therefore has no identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub book_name: String,
    pub publisher: String,
    pub isbn: String,
}

impl From<BookDto> for NewBook {
    fn from(dto: BookDto) -> Self {
        Self {
            book_name: dto.book_name,
            publisher: dto.publisher,
            isbn: dto.isbn,
        }
    }
}
