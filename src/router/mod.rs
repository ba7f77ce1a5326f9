//! # Router Module
//!
//! The compiled route table and its mount-path lookup.
//!
//! [`RouteTable::build`] runs the whole compilation pipeline over a loaded
//! route source: path analysis, route compilation, callback resolution, and
//! mount-path derivation. Two declared paths that reduce to the same mount
//! path are rejected so that exactly one [`Handler`] backs each listener
//! registration.
//!
//! Lookups mirror coarse per-mount registration: an exact match wins,
//! otherwise the longest trailing-slash mount that prefixes the request path
//! does. The table is built once at startup and immutable for the life of
//! the process.

mod core;

pub use core::{Handler, RouteTable};
