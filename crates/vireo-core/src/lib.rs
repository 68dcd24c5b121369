//! Vireo Core
//!
//! This crate contains the shared building blocks for the Vireo widget toolkit:
//! geometry, colors, hashed collections, logging and profiling setup.

pub mod alloc;
pub mod color;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;

pub use color::Color;
pub use geometry::Rect;

/// Install logging and start profiling as described by `config`.
///
/// Safe to call more than once; only the first call installs the
/// subscriber.
pub fn init(config: &config::Config) {
    if !logging::try_init_with(&config.log) {
        tracing::debug!("tracing subscriber already installed");
    }
    profiling::init_profiling(config.profiling);
}
