//! # Routes Module
//!
//! Loading and compilation of the declarative route source.
//!
//! The route source is a YAML mapping from declared path to a descriptor of
//! accepted methods, named parameters and an ordered callback chain. This
//! module turns that document into immutable, validated values:
//!
//! 1. **Loading** ([`load_routes_str`] / [`load_routes_file`]) deserializes
//!    the document into [`RouteDoc`]s with all fields optional, so unset
//!    fields stay distinguishable from explicit values.
//! 2. **Path analysis** ([`analyze`]) splits a declared path into its static
//!    prefix and trailing dynamic run and derives the mount path.
//! 3. **Compilation** ([`compile_route`] / [`compile_parameter`]) resolves
//!    defaults and produces [`Route`]s with compiled validation patterns.
//!
//! All errors here are configuration-time [`crate::ConfigError`]s and fatal
//! to route-table construction.

mod compile;
mod load;
mod path;
mod types;

pub use compile::{compile_parameter, compile_route};
pub use load::{load_routes_file, load_routes_str, ParamDoc, RouteDoc};
pub use path::{analyze, PathPattern, DYNAMIC_SEGMENT_PATTERN};
pub use types::{HttpMethod, ParameterSource, ParameterType, Route, RouteParameter, SourceSet};
