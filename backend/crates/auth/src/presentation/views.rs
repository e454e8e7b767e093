//! HTML Views
//!
//! Small server-rendered pages. Every dynamic value goes through
//! [`escape_html`] before it is interpolated.

use axum::response::Html;

use crate::domain::verifier::RejectReason;

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <link rel=\"icon\" href=\"/favicon.ico\">\n<title>{title}</title>\n</head>\n\
         <body>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
    ))
}

/// GET /
pub fn index_page(app_name: &str) -> Html<String> {
    layout(
        app_name,
        &format!(
            "<h1>{}</h1>\n<p>Sign in with your external identity.</p>\n\
             <p><a href=\"/auth\">Authenticate</a></p>",
            escape_html(app_name)
        ),
    )
}

/// Cookie held a valid session token
pub fn authenticated_page(name: &str, token: &str) -> Html<String> {
    layout(
        "Authenticated",
        &format!(
            "<h1>Hello, {name}</h1>\n<p>You are signed in. Your session token:</p>\n\
             <pre><code>{token}</code></pre>\n<p><a href=\"/logout\">Log out</a></p>",
            name = escape_html(name),
            token = escape_html(token),
        ),
    )
}

/// A fresh session was just issued
pub fn verified_page(name: &str) -> Html<String> {
    layout(
        "Verified",
        &format!(
            "<h1>Welcome, {}</h1>\n<p>Your identity was verified.</p>\n\
             <p><a href=\"/auth\">Continue</a></p>",
            escape_html(name)
        ),
    )
}

/// The one-time code was not accepted
pub fn verification_failed_page(reason: RejectReason) -> Html<String> {
    let detail = match reason {
        RejectReason::InvalidCode => "The verification code was not accepted.",
        RejectReason::MalformedResponse => "The identity service gave an unexpected answer.",
    };
    layout(
        "Verification failed",
        &format!(
            "<h1>Verification failed</h1>\n<p>{detail}</p>\n\
             <p><a href=\"/auth\">Try again</a></p>"
        ),
    )
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
