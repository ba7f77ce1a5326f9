use super::request::parse_request;
use super::response::{write_json_error, ResponseWriter};
use crate::dispatcher::dispatch;
use crate::router::RouteTable;
use may_minihttp::{HttpService, Request, Response};
use std::io;
use std::sync::Arc;
use tracing::warn;

/// The `may_minihttp` service bound to the listener.
///
/// Holds the immutable route table behind a plain `Arc`; every request
/// coroutine shares it read-only, so no locking is involved on the dispatch
/// path.
#[derive(Clone)]
pub struct AppService {
    pub table: Arc<RouteTable>,
}

impl AppService {
    #[must_use]
    pub fn new(table: Arc<RouteTable>) -> Self {
        AppService { table }
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let parsed = parse_request(req);
        let mut writer = ResponseWriter::new();
        match self.table.find(&parsed.path) {
            Some(handler) => dispatch(handler, &parsed, &mut writer),
            None => {
                warn!(method = %parsed.method, path = %parsed.path, "no route matched");
                write_json_error(&mut writer, 404, "not found");
            }
        }
        writer.flush(res);
        Ok(())
    }
}
