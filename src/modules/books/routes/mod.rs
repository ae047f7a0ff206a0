//! HTTP routes of the book catalog, mounted under `/book`.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use bookshelf_http::error::AppError;

use super::models::{BookDto, DeleteBookForm};
use super::service::BookService;
use super::views;

pub const BOOK_LIST_PATH: &str = "/book/bookList";

pub fn router(service: Arc<BookService>) -> Router {
    Router::new()
        .route("/bookAdd", get(book_add_form).post(book_add))
        .route("/bookList", get(book_list))
        .route("/bookRead/{book_code}", get(book_read))
        .route("/bookUpdate/{book_code}", get(book_update_form))
        .route("/bookUpdate", post(book_update))
        .route("/bookDelete", post(book_delete))
        .with_state(service)
}

/// `302 Found` back to the list page.
fn redirect_to_list() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, BOOK_LIST_PATH)]).into_response()
}

async fn book_add_form() -> Html<String> {
    views::add_form()
}

async fn book_add(
    State(service): State<Arc<BookService>>,
    form: Result<Form<BookDto>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(dto) = form?;
    service.add_book(dto).await?;
    Ok(redirect_to_list())
}

async fn book_list(State(service): State<Arc<BookService>>) -> Result<Html<String>, AppError> {
    let books = service.get_books().await?;
    Ok(views::list(&books))
}

async fn book_read(
    State(service): State<Arc<BookService>>,
    book_code: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, AppError> {
    let Path(book_code) = book_code?;
    let book = service.get_book(book_code).await?;
    Ok(views::read(&book))
}

async fn book_update_form(
    State(service): State<Arc<BookService>>,
    book_code: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, AppError> {
    let Path(book_code) = book_code?;
    let book = service.get_book(book_code).await?;
    Ok(views::update_form(&book))
}

async fn book_update(
    State(service): State<Arc<BookService>>,
    form: Result<Form<BookDto>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(dto) = form?;
    service.update_book(dto).await?;
    Ok(redirect_to_list())
}

async fn book_delete(
    State(service): State<Arc<BookService>>,
    form: Result<Form<DeleteBookForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(DeleteBookForm { book_code }) = form?;
    service.delete_book(book_code).await?;
    Ok(redirect_to_list())
}
