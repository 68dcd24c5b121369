//! Vireo input handling.
//!
//! The widget core never talks to a windowing backend. The host translates
//! its native events into [`InputEvent`]s, optionally queues them with
//! [`EventQueue`], and hands the drained [`EventBatch`] to the GUI, which
//! consumes what it handles and leaves the rest for the application.

pub mod event;
pub mod queue;
pub mod state;
#[cfg(feature = "winit")]
pub mod from_winit;

pub use event::{ElementState, InputEvent, KeyCode, Modifiers, MouseButton};
pub use queue::{EventBatch, EventQueue, EventStats, HandleStatus};
pub use state::InputState;
#[cfg(feature = "winit")]
pub use from_winit::WinitTranslator;
