use crate::dispatcher::{Callback, CallbackMap, CallbackResult, ParamMap};
use crate::server::{ParsedRequest, ResponseWriter};
use serde_json::json;
use std::sync::Arc;

/// Built-in callback that echoes the request back as JSON. Handy for demos
/// and for smoke-testing a routes file before real callbacks exist.
pub fn echo(params: &ParamMap, w: &mut ResponseWriter, req: &ParsedRequest) -> CallbackResult {
    w.json(
        200,
        json!({
            "method": req.method,
            "path": req.path,
            "params": params,
        }),
    );
    Ok(true)
}

/// The callback table the bundled binary resolves route callbacks against.
#[must_use]
pub fn builtin_callbacks() -> CallbackMap {
    let mut callbacks = CallbackMap::new();
    callbacks.insert("echo".to_string(), Arc::new(echo) as Callback);
    callbacks
}
