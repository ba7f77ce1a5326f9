//! # Dispatcher Module
//!
//! The per-request dispatch state machine.
//!
//! Given a [`crate::router::Handler`] resolved by mount path, [`dispatch`]
//! runs a single pass with no retries:
//!
//! 1. Method check (405 on a miss)
//! 2. Dynamic-segment extraction from the request path
//! 3. Query-string extraction
//! 4. Form-body extraction (urlencoded POST bodies only)
//! 5. Precedence merge: form < URL < query
//! 6. Validation of every declared parameter
//! 7. The callback chain, short-circuiting on `Ok(false)` or `Err`
//!
//! The first failing step wins and writes a terminal 4xx/5xx JSON response;
//! later steps never run. All per-request state is request-local, so the
//! dispatcher needs no synchronization — the listener runs each request on
//! its own coroutine.

mod core;

pub use core::{
    dispatch, Callback, CallbackMap, CallbackResult, ParamMap, ParamVec, MAX_INLINE_PARAMS,
};
