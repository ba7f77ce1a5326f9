use may_minihttp::Response;
use serde_json::{json, Value};

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Buffered response handed to the dispatcher and to callbacks.
///
/// Callbacks write status, headers and body here; the service flushes the
/// final state to the wire exactly once per request. Defaults to an empty
/// 200 so a chain that writes nothing still produces a valid response.
#[derive(Debug, Clone)]
pub struct ResponseWriter {
    status: u16,
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseWriter {
    #[must_use]
    pub fn new() -> Self {
        ResponseWriter {
            status: 200,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn status(&mut self, status: u16) -> &mut Self {
        self.status = status;
        self
    }

    pub fn header(&mut self, name: &str, value: &str) -> &mut Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Set a JSON body together with the status code.
    pub fn json(&mut self, status: u16, body: Value) {
        self.status = status;
        self.body = Some(body);
    }

    /// Set a plain-text body together with the status code.
    pub fn text(&mut self, status: u16, body: impl Into<String>) {
        self.status = status;
        self.body = Some(Value::String(body.into()));
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status
    }

    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Write the buffered state out to the wire response.
    ///
    /// String bodies go out as `text/plain`, everything else as
    /// `application/json`, unless a callback already set a content type.
    pub(crate) fn flush(self, res: &mut Response) {
        res.status_code(self.status as usize, status_reason(self.status));
        let mut has_content_type = false;
        for (name, value) in &self.headers {
            if name.eq_ignore_ascii_case("content-type") {
                has_content_type = true;
            }
            let header = format!("{}: {}", name, value).into_boxed_str();
            res.header(Box::leak(header));
        }
        match self.body {
            Some(Value::String(s)) => {
                if !has_content_type {
                    res.header("Content-Type: text/plain");
                }
                res.body_vec(s.into_bytes());
            }
            Some(other) => {
                if !has_content_type {
                    res.header("Content-Type: application/json");
                }
                res.body_vec(serde_json::to_vec(&other).unwrap_or_default());
            }
            None => {}
        }
    }
}

/// Write a `{ "error": message }` body with the given status code.
pub fn write_json_error(w: &mut ResponseWriter, status: u16, message: &str) {
    w.json(status, json!({ "error": message }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(405), "Method Not Allowed");
    }

    #[test]
    fn test_defaults_to_empty_200() {
        let w = ResponseWriter::new();
        assert_eq!(w.status_code(), 200);
        assert!(w.body().is_none());
    }

    #[test]
    fn test_write_json_error() {
        let mut w = ResponseWriter::new();
        write_json_error(&mut w, 400, "boom");
        assert_eq!(w.status_code(), 400);
        assert_eq!(w.body(), Some(&json!({ "error": "boom" })));
    }
}
