//! Server-side HTML rendering shared by every module.

use axum::response::Html;

/// Escape text for safe inclusion in HTML element content and attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Wrap a rendered body in the common document layout.
///
/// `title` is escaped here; `body` must already be markup.
pub fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        body = body,
    ))
}

/// The shared `error` view.
pub fn error_page(message: &str, trace_id: &str, timestamp: &str) -> Html<String> {
    let body = format!(
        r#"<p class="error-message">{message}</p>
<p class="error-trace"><small>trace id {trace_id} at {timestamp}</small></p>
<p><a href="javascript:history.back()">Go back</a></p>"#,
        message = escape(message),
        trace_id = escape(trace_id),
        timestamp = escape(timestamp),
    );
    page("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_replaces_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape("Dune 9780441013593"), "Dune 9780441013593");
    }

    #[test]
    fn page_escapes_title_only() {
        let Html(doc) = page("<Books>", "<p>body</p>");
        assert!(doc.contains("<title>&lt;Books&gt;</title>"));
        assert!(doc.contains("<p>body</p>"));
    }

    #[test]
    fn error_page_shows_escaped_message() {
        let Html(doc) = error_page("<boom>", "abc", "now");
        assert!(doc.contains("&lt;boom&gt;"));
        assert!(doc.contains("trace id abc"));
    }
}
