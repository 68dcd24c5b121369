//! Test utilities for Vireo crates.
//!
//! # Overview
//!
//! - [`EventScript`] - builder for input event sequences (clicks, drags,
//!   typing) so tests read as user actions
//! - [`CallRecorder`] - cloneable sink that widget callbacks write into
//!
//! # Example
//!
//! ```rust
//! use vireo_input::KeyCode;
//! use vireo_test_utils::{CallRecorder, EventScript};
//!
//! let events = EventScript::new().click(10.0, 10.0).key(KeyCode::Enter).build();
//! assert_eq!(events.len(), 4);
//!
//! let recorder = CallRecorder::new();
//! let sink = recorder.sink();
//! sink(3);
//! assert_eq!(recorder.calls(), vec![3]);
//! ```

mod recorder;
mod script;

pub use recorder::CallRecorder;
pub use script::EventScript;
