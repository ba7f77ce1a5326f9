//! # Server Module
//!
//! The HTTP binding: parses raw `may_minihttp` requests into
//! [`ParsedRequest`], resolves the handler by mount path, runs the
//! dispatcher against a buffered [`ResponseWriter`], and flushes the result
//! to the wire. Unmatched paths get a JSON 404.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_request, ParsedRequest};
pub use response::{write_json_error, ResponseWriter};
pub use service::AppService;
