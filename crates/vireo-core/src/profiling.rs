//! Profiling utilities based on the `puffin` crate.
//!
//! With the `profiling` feature disabled, [`profile_function!`] and
//! [`profile_scope!`] expand to nothing so call sites never need `cfg`s.

#[cfg(feature = "profiling")]
pub use puffin::{profile_function, profile_scope};

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_function {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_scope {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "profiling"))]
pub use crate::{profile_function, profile_scope};

use crate::config::ProfilingMode;

/// Default address of the HTTP server started for [`ProfilingMode::WithWebserver`].
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8585";

#[cfg(feature = "profiling")]
static PROFILING_SERVER: std::sync::OnceLock<puffin_http::Server> = std::sync::OnceLock::new();

/// Turn profiling on according to `mode`.
///
/// # Example
/// ```no_run
/// use vireo_core::config::ProfilingMode;
/// use vireo_core::profiling::init_profiling;
///
/// init_profiling(ProfilingMode::WithWebserver);
/// ```
pub fn init_profiling(mode: ProfilingMode) {
    #[cfg(feature = "profiling")]
    match mode {
        ProfilingMode::Off => puffin::set_scopes_on(false),
        ProfilingMode::On => puffin::set_scopes_on(true),
        ProfilingMode::WithWebserver => {
            puffin::set_scopes_on(true);
            match puffin_http::Server::new(DEFAULT_SERVER_ADDR) {
                Ok(server) => {
                    tracing::info!(
                        "Puffin profiler server started on http://{DEFAULT_SERVER_ADDR}"
                    );
                    let _ = PROFILING_SERVER.set(server);
                }
                Err(e) => {
                    tracing::error!("Failed to start puffin server: {}", e);
                }
            }
        }
    }

    #[cfg(not(feature = "profiling"))]
    if mode != ProfilingMode::Off {
        tracing::warn!(
            "profiling requested but vireo-core was built without the `profiling` feature"
        );
    }
}

/// Mark the start of a new frame. Call once per pass of the host's event loop.
#[inline]
pub fn new_frame() {
    #[cfg(feature = "profiling")]
    puffin::GlobalProfiler::lock().new_frame();
}
