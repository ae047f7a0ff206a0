//! Pages of the book catalog.

use axum::response::Html;
use bookshelf_http::view::{escape, page};

use super::models::BookDto;

const NAV: &str = r#"<nav><a href="/book/bookList">Book list</a> | <a href="/book/bookAdd">Add a book</a></nav>"#;

fn book_fields(book: Option<&BookDto>) -> String {
    let (name, publisher, isbn) = match book {
        Some(book) => (
            escape(&book.book_name),
            escape(&book.publisher),
            escape(&book.isbn),
        ),
        None => Default::default(),
    };
    format!(
        r#"<p><label>Title <input type="text" name="bookName" value="{name}"></label></p>
<p><label>Publisher <input type="text" name="publisher" value="{publisher}"></label></p>
<p><label>ISBN <input type="text" name="isbn" value="{isbn}"></label></p>"#,
    )
}

pub fn add_form() -> Html<String> {
    let body = format!(
        r#"{NAV}
<form method="post" action="/book/bookAdd">
{fields}
<p><button type="submit">Add</button></p>
</form>"#,
        fields = book_fields(None),
    );
    page("Add a book", &body)
}

pub fn list(books: &[BookDto]) -> Html<String> {
    let rows: String = books
        .iter()
        .map(|book| {
            format!(
                r#"<tr><td>{code}</td><td><a href="/book/bookRead/{code}">{name}</a></td><td>{publisher}</td><td>{isbn}</td></tr>
"#,
                code = book.book_code,
                name = escape(&book.book_name),
                publisher = escape(&book.publisher),
                isbn = escape(&book.isbn),
            )
        })
        .collect();

    let table = if books.is_empty() {
        "<p>No books yet.</p>".to_string()
    } else {
        format!(
            r#"<table>
<thead><tr><th>Code</th><th>Title</th><th>Publisher</th><th>ISBN</th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#
        )
    };

    page("Book list", &format!("{NAV}\n{table}"))
}

pub fn read(book: &BookDto) -> Html<String> {
    let body = format!(
        r#"{NAV}
<dl>
<dt>Code</dt><dd>{code}</dd>
<dt>Title</dt><dd>{name}</dd>
<dt>Publisher</dt><dd>{publisher}</dd>
<dt>ISBN</dt><dd>{isbn}</dd>
</dl>
<p><a href="/book/bookUpdate/{code}">Edit</a></p>
<form method="post" action="/book/bookDelete">
<input type="hidden" name="bookCode" value="{code}">
<button type="submit">Delete</button>
</form>"#,
        code = book.book_code,
        name = escape(&book.book_name),
        publisher = escape(&book.publisher),
        isbn = escape(&book.isbn),
    );
    page("Book", &body)
}

pub fn update_form(book: &BookDto) -> Html<String> {
    let body = format!(
        r#"{NAV}
<form method="post" action="/book/bookUpdate">
<input type="hidden" name="bookCode" value="{code}">
{fields}
<p><button type="submit">Save</button></p>
</form>"#,
        code = book.book_code,
        fields = book_fields(Some(book)),
    );
    page("Edit book", &body)
}
