use crate::error::ConfigError;
use crate::routes::load::{ParamDoc, RouteDoc};
use crate::routes::types::{HttpMethod, ParameterType, Route, RouteParameter, SourceSet};
use regex::Regex;
use std::collections::HashMap;

/// Compile one parameter declaration, resolving unset fields to their
/// documented defaults: type `string`, required, source `query`.
pub fn compile_parameter(doc: &ParamDoc) -> Result<RouteParameter, ConfigError> {
    let ty = match &doc.ty {
        Some(token) => ParameterType::parse(token)?,
        None => ParameterType::String,
    };
    let pattern = match &doc.regex {
        Some(raw) => Some(Regex::new(raw).map_err(|source| ConfigError::InvalidPattern {
            pattern: raw.clone(),
            source,
        })?),
        None => None,
    };
    let sources = match &doc.source {
        Some(list) => SourceSet::parse(list)?,
        None => SourceSet::QUERY,
    };
    Ok(RouteParameter {
        ty,
        pattern,
        required: doc.required.unwrap_or(true),
        sources,
    })
}

/// Compile one route descriptor into an immutable [`Route`].
///
/// Declared parameter order is irrelevant since parameters are keyed by name;
/// callback order is preserved. A missing method list defaults to `[get]`.
pub fn compile_route(doc: &RouteDoc) -> Result<Route, ConfigError> {
    if doc.callbacks.is_empty() {
        return Err(ConfigError::NoCallbacks);
    }
    let methods = if doc.methods.is_empty() {
        vec![HttpMethod::Get]
    } else {
        doc.methods
            .iter()
            .map(|m| HttpMethod::parse(m))
            .collect::<Result<Vec<_>, _>>()?
    };
    let mut parameters = HashMap::with_capacity(doc.params.len());
    for (name, param) in &doc.params {
        // A null parameter body (`bar:`) compiles with all defaults.
        let compiled = match param {
            Some(decl) => compile_parameter(decl)?,
            None => compile_parameter(&ParamDoc::default())?,
        };
        parameters.insert(name.clone(), compiled);
    }
    Ok(Route {
        methods,
        parameters,
        callbacks: doc.callbacks.clone(),
    })
}
