//! Environment-variable configuration for the coroutine runtime.
//!
//! `SWITCHBOARD_STACK_SIZE` sets the stack size for request coroutines, in
//! decimal (`16384`) or hex (`0x4000`). Default: 16 KB. Total memory is
//! stack size × concurrent requests, so tune it to callback complexity.

use std::env;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Stack size for request coroutines in bytes (default: 16 KB / 0x4000).
    pub stack_size: usize,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let stack_size = match env::var("SWITCHBOARD_STACK_SIZE") {
            Ok(val) => {
                if let Some(hex) = val.strip_prefix("0x") {
                    usize::from_str_radix(hex, 16).unwrap_or(0x4000)
                } else {
                    val.parse().unwrap_or(0x4000)
                }
            }
            Err(_) => 0x4000,
        };
        RuntimeConfig { stack_size }
    }
}
