//! Vireo UI - retained widgets with event routing and render-info export.
//!
//! This crate holds the widget core of the Vireo toolkit:
//! - A [`GuiContext`] that owns the widget tree and routes input with
//!   hit-testing, focus, pointer capture and modal confinement
//! - Eleven interactive widgets (buttons, sliders, lists, trees, menus,
//!   dialogs, property grids, tabs and pages)
//! - A plain-data [`RenderEntry`] list for an external renderer
//!
//! Nothing here draws or measures text. Layout is explicit: every widget
//! carries absolute bounds set by the application.
//!
//! ## Quick Start
//!
//! ```rust
//! use vireo_core::geometry::Rect;
//! use vireo_input::{InputEvent, MouseButton};
//! use vireo_ui::{Button, GuiContext, ViewportId};
//!
//! let mut ui = GuiContext::new();
//! let ok = ui.add_root(Button::new("OK").with_bounds(Rect::new(10.0, 10.0, 80.0, 24.0)));
//!
//! ui.handle_event(ViewportId::MAIN, &InputEvent::mouse_down(MouseButton::Left, 20.0, 20.0));
//! ui.handle_event(ViewportId::MAIN, &InputEvent::mouse_up(MouseButton::Left, 20.0, 20.0));
//! assert_eq!(ui.focused(), Some(ok));
//!
//! for entry in ui.render_list(ViewportId::MAIN) {
//!     // Hand `entry.info` to the renderer.
//!     let _ = entry.bounds;
//! }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod focus;
pub mod items;
pub mod render;
pub mod scroll;
pub mod theme;
pub mod widget;
pub mod widgets;

pub use config::GuiConfig;
pub use context::{GuiContext, ViewportId};
pub use error::{UiError, UiResult};
pub use focus::{FocusDirection, FocusEvent, FocusManager};
pub use items::{ItemId, ItemList, UserData};
pub use render::{ItemVisualState, RenderEntry, RenderInfo};
pub use scroll::ScrollState;
pub use theme::Palette;
pub use widget::{
    ClickCallback, Orientation, ValueCallback, WheelDelta, Widget, WidgetBase, WidgetId,
    WidgetKind, WidgetRequest,
};
pub use widgets::*;
