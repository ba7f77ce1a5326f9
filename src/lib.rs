//! # Switchboard
//!
//! **Switchboard** is a declarative request-routing layer for Rust, driven
//! by a YAML route source and powered by the `may` coroutine runtime.
//!
//! ## Overview
//!
//! Route definitions — paths, accepted methods, named parameters with
//! type/validation rules, and ordered callback chains — are compiled once at
//! startup into an immutable routing table keyed by *mount path* (the
//! static, dynamic-free prefix each handler registers under). At request
//! time the table resolves the handler, extracts parameters from URL path
//! segments, the query string and POST form bodies, merges them with
//! precedence form < URL < query, validates them, and runs the callback
//! chain until a callback completes the response or fails.
//!
//! ## Architecture
//!
//! - **[`routes`]** - declarative source loading, path analysis, route and
//!   parameter compilation
//! - **[`router`]** - the immutable mount-path → handler table
//! - **[`dispatcher`]** - the per-request dispatch state machine and the
//!   callback contract
//! - **[`server`]** - HTTP binding built on `may_minihttp`
//! - **[`error`]** - configuration-time error taxonomy
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use switchboard::echo::builtin_callbacks;
//! use switchboard::router::RouteTable;
//! use switchboard::server::{AppService, HttpServer};
//!
//! let table = RouteTable::from_file("config/routes.yaml", &builtin_callbacks())
//!     .expect("route table builds");
//! let handle = HttpServer(AppService::new(Arc::new(table)))
//!     .start("0.0.0.0:8080")
//!     .expect("server starts");
//! handle.join().expect("server runs");
//! ```
//!
//! ## Route Source
//!
//! ```yaml
//! /items/{id}:
//!   methods: [get, post]
//!   params:
//!     id: { type: number, source: url|query }
//!     verbose: { type: boolean, required: false }
//!   callbacks: [echo]
//! ```
//!
//! A `{name}` path component is dynamic and binds positionally from the
//! trailing run of the request path; dynamic components may only trail.
//! Configuration errors (malformed paths, unknown methods/types/sources,
//! duplicate mount paths, unresolved callbacks, invalid patterns) fail table
//! construction atomically. Request-time failures are terminal 4xx/5xx
//! responses for that request only.
//!
//! ## Runtime Considerations
//!
//! Switchboard runs on the `may` coroutine runtime, not tokio. Callbacks may
//! block; the dispatcher imposes no timeout of its own and relies on the
//! listener's connection lifecycle for cancellation. Coroutine stack size is
//! tunable via `SWITCHBOARD_STACK_SIZE` (see [`runtime_config`]).

pub mod cli;
pub mod dispatcher;
pub mod echo;
pub mod error;
pub mod router;
pub mod routes;
pub mod runtime_config;
pub mod server;

pub use dispatcher::{dispatch, Callback, CallbackMap, CallbackResult, ParamMap};
pub use error::ConfigError;
pub use router::{Handler, RouteTable};
pub use routes::{
    analyze, load_routes_file, load_routes_str, HttpMethod, ParameterSource, ParameterType, Route,
    RouteParameter, SourceSet,
};
pub use server::{AppService, HttpServer, ParsedRequest, ResponseWriter, ServerHandle};
