use crate::router::Handler;
use crate::routes::{HttpMethod, ParameterSource, Route};
use crate::server::{write_json_error, ParsedRequest, ResponseWriter};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Maximum number of extracted parameters before heap allocation.
/// Routes rarely declare more; SmallVec keeps the hot path on the stack.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated storage for parameters extracted from one source.
pub type ParamVec = SmallVec<[(String, String); MAX_INLINE_PARAMS]>;

/// The merged, validated parameter map callbacks observe.
pub type ParamMap = HashMap<String, String>;

/// What a callback returns: `Ok(true)` continues the chain, `Ok(false)`
/// stops it intentionally (the callback has fully handled the response),
/// `Err(_)` stops it with the error logged and swallowed — the callback owns
/// writing its own error response.
pub type CallbackResult = anyhow::Result<bool>;

/// A resolved callback: merged parameters, response writer, request handle.
pub type Callback =
    Arc<dyn Fn(&ParamMap, &mut ResponseWriter, &ParsedRequest) -> CallbackResult + Send + Sync>;

/// Injected name → callback resolution table used at route-table build.
pub type CallbackMap = HashMap<String, Callback>;

/// Request-time rejection: terminal, request-scoped, never propagated.
enum Reject {
    BadRequest(String),
    MethodNotAllowed,
    Internal(String),
}

impl Reject {
    fn write(self, w: &mut ResponseWriter) {
        match self {
            Reject::BadRequest(message) => {
                warn!(%message, "request rejected");
                write_json_error(w, 400, &message);
            }
            Reject::MethodNotAllowed => {
                warn!("method not supported");
                write_json_error(w, 405, "method not supported");
            }
            Reject::Internal(message) => {
                error!(%message, "dispatch invariant violated");
                write_json_error(w, 500, "internal server error");
            }
        }
    }
}

/// Run one request through a handler: method check, parameter extraction
/// from path/query/form, precedence merge, validation, callback chain.
///
/// Single pass, first failing step wins; every failure is written to `w` as
/// a terminal 4xx/5xx response.
pub fn dispatch(handler: &Handler, req: &ParsedRequest, w: &mut ResponseWriter) {
    match prepare(handler, req) {
        Ok(params) => run_chain(handler, &params, w, req),
        Err(reject) => reject.write(w),
    }
}

/// Steps 1–6: everything that must succeed before the chain runs.
fn prepare(handler: &Handler, req: &ParsedRequest) -> Result<ParamMap, Reject> {
    check_method(&handler.route, &req.method)?;
    let url_params = extract_dynamic(handler, &req.path)?;
    debug!(url_params = ?url_params, "dynamic parameters bound");
    let query_params = extract_query(&handler.route, &req.raw_query)?;
    debug!(query_params = ?query_params, "query parameters extracted");
    let form_params = extract_form(&handler.route, req)?;
    debug!(form_params = ?form_params, "form parameters extracted");
    let merged = merge_params(form_params, url_params, query_params);
    validate(&handler.route, &merged)?;
    Ok(merged)
}

fn check_method(route: &Route, raw_method: &str) -> Result<(), Reject> {
    let normalized = raw_method.to_ascii_lowercase();
    match HttpMethod::parse(&normalized) {
        Ok(method) if route.allows(method) => Ok(()),
        _ => Err(Reject::MethodNotAllowed),
    }
}

/// Pair the request path's trailing segments with the handler's dynamic
/// parameter names.
///
/// Fewer segments than declared names binds a prefix subset; the missing
/// trailing names are simply absent. The offset itself exceeding the segment
/// count is a 400. Every bound name must be declared URL-eligible; a bound
/// name with no declared parameter at all is an internal defect (500) since
/// compilation should never produce it.
fn extract_dynamic(handler: &Handler, path: &str) -> Result<ParamVec, Reject> {
    let mut bound = ParamVec::new();
    if handler.dynamic_params.is_empty() {
        return Ok(bound);
    }
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if handler.dynamic_offset > segments.len() {
        return Err(Reject::BadRequest(format!(
            "dynamic path index out of bounds for path '{}'",
            path
        )));
    }
    for (name, value) in handler
        .dynamic_params
        .iter()
        .zip(segments[handler.dynamic_offset..].iter())
    {
        match handler.route.parameters.get(name) {
            None => {
                return Err(Reject::Internal(format!(
                    "no parameter declared for dynamic segment '{}'",
                    name
                )))
            }
            Some(param) if !param.sources.contains(ParameterSource::Url) => {
                return Err(Reject::BadRequest(format!(
                    "parameter '{}' not allowed in URL",
                    name
                )))
            }
            Some(_) => bound.push((name.clone(), (*value).to_string())),
        }
    }
    Ok(bound)
}

fn extract_query(route: &Route, raw_query: &str) -> Result<ParamVec, Reject> {
    let mut out = ParamVec::new();
    if raw_query.is_empty() {
        return Ok(out);
    }
    for (key, value) in url::form_urlencoded::parse(raw_query.as_bytes()) {
        if out.iter().any(|(k, _)| *k == key) {
            return Err(Reject::BadRequest(
                "only single valued query parameters supported".to_string(),
            ));
        }
        match route.parameters.get(key.as_ref()) {
            None => {
                return Err(Reject::BadRequest(format!(
                    "'{}' is not a parameter of this route",
                    key
                )))
            }
            Some(param) if !param.sources.contains(ParameterSource::Query) => {
                return Err(Reject::BadRequest(format!(
                    "parameter '{}' not allowed in query",
                    key
                )))
            }
            Some(_) => out.push((key.into_owned(), value.into_owned())),
        }
    }
    Ok(out)
}

fn extract_form(route: &Route, req: &ParsedRequest) -> Result<ParamVec, Reject> {
    let mut out = ParamVec::new();
    if !req.is_form() {
        return Ok(out);
    }
    let Some(body) = req.body.as_deref() else {
        return Ok(out);
    };
    for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
        if out.iter().any(|(k, _)| *k == key) {
            return Err(Reject::BadRequest(
                "only single valued form parameters supported".to_string(),
            ));
        }
        match route.parameters.get(key.as_ref()) {
            None => {
                return Err(Reject::BadRequest(format!(
                    "'{}' is not a parameter of this route",
                    key
                )))
            }
            Some(param) if !param.sources.contains(ParameterSource::Form) => {
                return Err(Reject::BadRequest(format!(
                    "parameter '{}' not allowed in form",
                    key
                )))
            }
            Some(_) => out.push((key.into_owned(), value.into_owned())),
        }
    }
    Ok(out)
}

/// Merge the three extraction results into one map, lowest precedence first:
/// form values, overwritten by URL values, overwritten by query values.
fn merge_params(form: ParamVec, url: ParamVec, query: ParamVec) -> ParamMap {
    let mut merged = ParamMap::with_capacity(form.len() + url.len() + query.len());
    for (k, v) in form {
        merged.insert(k, v);
    }
    for (k, v) in url {
        merged.insert(k, v);
    }
    for (k, v) in query {
        merged.insert(k, v);
    }
    merged
}

/// Check every declared parameter against the merged map.
fn validate(route: &Route, values: &ParamMap) -> Result<(), Reject> {
    for (name, param) in &route.parameters {
        match values.get(name) {
            None => {
                if param.required {
                    return Err(Reject::BadRequest(format!(
                        "required parameter '{}' missing",
                        name
                    )));
                }
            }
            Some(value) => {
                if !param.is_valid(value) {
                    return Err(Reject::BadRequest(format!(
                        "parameter '{}' is not valid, value: '{}'",
                        name, value
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Step 7: invoke the callbacks in declared order. All callbacks observe the
/// identical merged map; no remapping happens between them.
fn run_chain(handler: &Handler, params: &ParamMap, w: &mut ResponseWriter, req: &ParsedRequest) {
    for (name, callback) in &handler.callbacks {
        debug!(callback = %name, "invoking callback");
        match callback(params, w, req) {
            Ok(true) => {}
            Ok(false) => {
                debug!(callback = %name, "callback completed the response");
                return;
            }
            Err(err) => {
                // The callback owns its error response; nothing more to write.
                error!(callback = %name, error = %err, "callback returned error");
                return;
            }
        }
    }
}
