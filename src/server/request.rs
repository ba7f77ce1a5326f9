use may_minihttp::Request;
use std::collections::HashMap;
use std::io::Read;
use tracing::debug;

/// Parsed HTTP request data used by the dispatcher and passed to callbacks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedRequest {
    /// HTTP method exactly as it appeared on the request line.
    pub method: String,
    /// Request path with the query string stripped.
    pub path: String,
    /// Raw query string (everything after `?`, may be empty).
    pub raw_query: String,
    /// HTTP headers (lowercase names).
    pub headers: HashMap<String, String>,
    /// Raw request body, when one was sent.
    pub body: Option<String>,
}

impl ParsedRequest {
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(String::as_str)
    }

    /// Whether the body should be treated as an urlencoded form.
    #[must_use]
    pub fn is_form(&self) -> bool {
        self.content_type()
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
    }
}

/// Extract method, path, query string, headers and body from a raw
/// `may_minihttp` request.
pub fn parse_request(req: Request) -> ParsedRequest {
    let method = req.method().to_string();
    let raw_path = req.path().to_string();
    let (path, raw_query) = split_path_and_query(&raw_path);

    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let body = {
        let mut body_str = String::new();
        match req.body().read_to_string(&mut body_str) {
            Ok(size) if size > 0 => Some(body_str),
            _ => None,
        }
    };

    debug!(
        method = %method,
        path = %path,
        query_len = raw_query.len(),
        header_count = headers.len(),
        body_bytes = body.as_ref().map_or(0, |b| b.len()),
        "HTTP request parsed"
    );

    ParsedRequest {
        method,
        path: path.to_string(),
        raw_query: raw_query.to_string(),
        headers,
        body,
    }
}

fn split_path_and_query(raw_path: &str) -> (&str, &str) {
    match raw_path.find('?') {
        Some(pos) => (&raw_path[..pos], &raw_path[pos + 1..]),
        None => (raw_path, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path_and_query() {
        assert_eq!(split_path_and_query("/p?x=1&y=2"), ("/p", "x=1&y=2"));
        assert_eq!(split_path_and_query("/p"), ("/p", ""));
        assert_eq!(split_path_and_query("/p?"), ("/p", ""));
    }

    #[test]
    fn test_is_form() {
        let mut req = ParsedRequest::default();
        assert!(!req.is_form());
        req.headers.insert(
            "content-type".to_string(),
            "application/x-www-form-urlencoded; charset=utf-8".to_string(),
        );
        assert!(req.is_form());
    }
}
