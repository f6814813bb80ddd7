//! Request echo.
//!
//! Formats the request line and headers into a plain-text body:
//!
//! ```text
//! GET http://localhost:8080/echo?x=1 HTTP/1.1
//! accept: */*
//! host: localhost:8080
//! ```
//!
//! Headers are sorted by name; repeated headers keep their received order.
//! hyper stores header names lower-cased, so that is the casing shown and sorted.

use axum::http::{header::HOST, HeaderMap, Method, Uri, Version};

/// Render the echo body for a request.
pub fn format_echo(method: &Method, uri: &Uri, version: Version, headers: &HeaderMap) -> String {
    let mut lines = Vec::with_capacity(headers.len() + 1);
    lines.push(format!("{} {} {}", method, absolute_url(uri, headers), format_version(version)));

    let mut pairs: Vec<(&str, String)> = headers
        .iter()
        .map(|(name, value)| (name.as_str(), String::from_utf8_lossy(value.as_bytes()).into_owned()))
        .collect();
    // stable sort keeps repeated values in received order
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    lines.extend(pairs.into_iter().map(|(name, value)| format!("{}: {}", name, value)));
    lines.join("\n")
}

/// Rebuild the absolute URL from the Host header when the target is origin-form.
fn absolute_url(uri: &Uri, headers: &HeaderMap) -> String {
    if uri.scheme().is_some() {
        return uri.to_string();
    }

    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    match headers.get(HOST).and_then(|host| host.to_str().ok()) {
        Some(host) => format!("http://{}{}", host, target),
        None => target.to_string(),
    }
}

fn format_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2.0",
        Version::HTTP_3 => "HTTP/3.0",
        _ => "HTTP/?",
    }
}
