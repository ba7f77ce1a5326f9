use crate::dispatcher::{Callback, CallbackMap};
use crate::error::ConfigError;
use crate::routes::{analyze, compile_route, PathPattern, Route, RouteDoc};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// The runtime-bound unit for one mount path: a compiled route, its resolved
/// callbacks in declared order, and the trailing dynamic-segment layout.
///
/// Constructed once at startup and immutable thereafter; owned exclusively
/// by the [`RouteTable`].
pub struct Handler {
    pub route: Route,
    /// Resolved callbacks, paired with their declared names for logging.
    pub callbacks: Vec<(String, Callback)>,
    /// Ordered names from the trailing dynamic run, e.g. `["baz", "biff"]`
    /// for `/foo/bar/{baz}/{biff}`.
    pub dynamic_params: Vec<String>,
    /// Index of the first dynamic component within the slash-trimmed
    /// request-path segments.
    pub dynamic_offset: usize,
}

impl Handler {
    fn new(
        route: Route,
        pattern: &PathPattern,
        callbacks: &CallbackMap,
    ) -> Result<Self, ConfigError> {
        let mut resolved = Vec::with_capacity(route.callbacks.len());
        for name in &route.callbacks {
            let callback = match callbacks.get(name) {
                Some(cb) => Arc::clone(cb),
                None => return Err(ConfigError::UnknownCallback(name.clone())),
            };
            resolved.push((name.clone(), callback));
        }
        Ok(Handler {
            route,
            callbacks: resolved,
            dynamic_params: pattern.dynamic_params.clone(),
            dynamic_offset: pattern.dynamic_offset,
        })
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("route", &self.route)
            .field(
                "callbacks",
                &self.callbacks.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .field("dynamic_params", &self.dynamic_params)
            .field("dynamic_offset", &self.dynamic_offset)
            .finish()
    }
}

/// Immutable mapping from mount path to [`Handler`].
///
/// Built once, single-threaded, at startup; shared read-only across all
/// request coroutines afterwards, so lookups need no locking.
pub struct RouteTable {
    handlers: HashMap<String, Handler>,
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.handlers.iter()).finish()
    }
}

impl RouteTable {
    /// Compile every declared path into a handler and register it under its
    /// mount path.
    ///
    /// Fails on the first malformed path, route compilation error, missing
    /// callback, or when two distinct declared paths collapse to the same
    /// mount path — one dispatcher per listener registration is a hard
    /// constraint. The table is never published partially built.
    pub fn build(
        docs: &HashMap<String, RouteDoc>,
        callbacks: &CallbackMap,
    ) -> Result<Self, ConfigError> {
        let mut handlers: HashMap<String, Handler> = HashMap::with_capacity(docs.len());
        for (path, doc) in docs {
            let pattern = analyze(path)?;
            let route = compile_route(doc)?;
            let handler = Handler::new(route, &pattern, callbacks)?;
            let mount = pattern.mount_path();
            debug!(path = %path, mount = %mount, "route compiled");
            if handlers.contains_key(&mount) {
                return Err(ConfigError::DuplicateMountPath(mount));
            }
            handlers.insert(mount, handler);
        }

        let mut summary: Vec<String> = handlers
            .iter()
            .map(|(mount, h)| {
                format!(
                    "{} -> [{}]",
                    mount,
                    h.route.callbacks.join(", ")
                )
            })
            .collect();
        summary.sort();
        info!(
            routes_count = handlers.len(),
            routes_summary = ?summary,
            "Routing table loaded"
        );

        Ok(RouteTable { handlers })
    }

    /// Load a YAML route source file and build the table from it.
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        callbacks: &CallbackMap,
    ) -> Result<Self, ConfigError> {
        let docs = crate::routes::load_routes_file(path)?;
        Self::build(&docs, callbacks)
    }

    /// Resolve the handler for a request path.
    ///
    /// Exact mount match first; otherwise the longest trailing-slash mount
    /// that prefixes the path wins, which is what coarse per-mount listener
    /// registration would do. `/foo` resolves to mount `/foo/` so a request
    /// missing its trailing dynamic segments still reaches its handler.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Handler> {
        if let Some(handler) = self.handlers.get(path) {
            return Some(handler);
        }
        let normalized: Cow<'_, str> = if path.ends_with('/') {
            Cow::Borrowed(path)
        } else {
            Cow::Owned(format!("{}/", path))
        };
        self.handlers
            .iter()
            .filter(|(mount, _)| mount.ends_with('/') && normalized.starts_with(mount.as_str()))
            .max_by_key(|(mount, _)| mount.len())
            .map(|(_, handler)| handler)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// All registered mount paths, sorted.
    #[must_use]
    pub fn mount_paths(&self) -> Vec<&str> {
        let mut mounts: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        mounts.sort_unstable();
        mounts
    }
}
