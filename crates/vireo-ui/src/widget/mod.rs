//! The widget capability set.
//!
//! Every concrete widget implements [`Widget`]: positional bounds and
//! visibility through [`WidgetBase`], event handling through the
//! `handle_*` methods, and render-info export through
//! [`Widget::render_info`]. Item-collection mutation lives on the concrete
//! types and is reached with [`GuiContext::get_mut`](crate::GuiContext::get_mut).
//!
//! Widgets never reach into other widgets. Effects that cross widget
//! boundaries (a tab showing its page, a dialog dragging its children, a menu
//! raising itself) are queued as [`WidgetRequest`]s on the base and applied
//! by the context after the handler returns.

pub mod base;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use vireo_core::geometry::Rect;
use vireo_core::math::Vec2;
use vireo_input::{ElementState, KeyCode, Modifiers, MouseButton};

use crate::render::RenderInfo;

pub use base::WidgetBase;

/// Identity of a widget inside a [`GuiContext`](crate::GuiContext).
///
/// Assigned on insertion and never reused by the same context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Id carried by widgets that have not been inserted yet.
    pub const DETACHED: WidgetId = WidgetId(u64::MAX);

    pub(crate) const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WidgetId({})", self.0)
    }
}

/// Closed set of widget kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Button,
    Slider,
    ScrollBar,
    ListBox,
    TreeView,
    Menu,
    Toolbar,
    Dialog,
    PropertyGrid,
    TabControl,
    Page,
}

impl WidgetKind {
    pub fn name(self) -> &'static str {
        match self {
            WidgetKind::Button => "Button",
            WidgetKind::Slider => "Slider",
            WidgetKind::ScrollBar => "ScrollBar",
            WidgetKind::ListBox => "ListBox",
            WidgetKind::TreeView => "TreeView",
            WidgetKind::Menu => "Menu",
            WidgetKind::Toolbar => "Toolbar",
            WidgetKind::Dialog => "Dialog",
            WidgetKind::PropertyGrid => "PropertyGrid",
            WidgetKind::TabControl => "TabControl",
            WidgetKind::Page => "Page",
        }
    }
}

/// Layout axis for sliders, scroll bars and toolbars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Component of `v` along this axis.
    pub fn along(self, v: Vec2) -> f32 {
        match self {
            Orientation::Horizontal => v.x,
            Orientation::Vertical => v.y,
        }
    }
}

/// Wheel movement, in lines and in pixels (lines × configured line height).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelDelta {
    pub lines: Vec2,
    pub pixels: Vec2,
}

/// Callback without arguments (button clicks).
pub type ClickCallback = Arc<dyn Fn() + Send + Sync>;

/// Callback receiving one value (value changes, item activation).
pub type ValueCallback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Deferred cross-widget effect, applied by the context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetRequest {
    /// Show or hide another widget (e.g. the page linked to a tab).
    SetVisible { target: WidgetId, visible: bool },
    /// Move every descendant by `delta` (dragging, scrolling).
    TranslateChildren(Vec2),
    /// Raise this widget above its siblings.
    BringToFront,
    /// Give this widget keyboard focus.
    Focus,
    /// Drop keyboard focus if this widget or a descendant holds it.
    ReleaseFocus,
}

/// Base trait for all widgets.
///
/// All `handle_*` methods return whether the event was consumed. An
/// unconsumed mouse or key event bubbles to the parent. Positions are in
/// absolute viewport coordinates.
pub trait Widget: Any + Send + Sync {
    fn base(&self) -> &WidgetBase;

    fn base_mut(&mut self) -> &mut WidgetBase;

    fn kind(&self) -> WidgetKind;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Get the widget's name for debugging.
    fn debug_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Whether `point` hits this widget's interactive area.
    fn hit_test(&self, point: Vec2) -> bool {
        self.base().hit_test(point)
    }

    fn handle_mouse_button(
        &mut self,
        _button: MouseButton,
        _state: ElementState,
        _position: Vec2,
        _modifiers: Modifiers,
    ) -> bool {
        false
    }

    fn handle_mouse_move(&mut self, _position: Vec2) -> bool {
        false
    }

    /// The cursor moved off this widget (or the window). Clears hover state.
    fn handle_mouse_leave(&mut self) {}

    fn handle_scroll(&mut self, _delta: WheelDelta, _position: Vec2) -> bool {
        false
    }

    fn handle_key(&mut self, _key: KeyCode, _state: ElementState, _modifiers: Modifiers) -> bool {
        false
    }

    fn handle_text_input(&mut self, _text: &str) -> bool {
        false
    }

    fn is_focusable(&self) -> bool {
        self.base().is_focusable()
    }

    /// A modal widget captures all input for its subtree while this is true.
    fn is_modal(&self) -> bool {
        false
    }

    /// Keyboard focus moved onto (`true`) or off (`false`) this widget.
    fn focus_changed(&mut self, _focused: bool) {}

    /// The context flipped this widget's own visibility flag.
    fn visibility_changed(&mut self, _visible: bool) {}

    /// Region descendants are clipped to when [`WidgetBase::clips_children`]
    /// is set.
    fn child_clip_rect(&self) -> Rect {
        self.base().bounds()
    }

    /// Called by the context after this widget's bounds or its children
    /// changed. `children_extent` is the union of the direct children's
    /// bounds, `None` without children.
    fn layout_changed(&mut self, _children_extent: Option<Rect>) {}

    /// Plain-data snapshot for an external renderer.
    fn render_info(&self) -> RenderInfo;

    /// Take the requests queued since the last drain.
    fn drain_requests(&mut self) -> Vec<WidgetRequest> {
        self.base_mut().take_requests()
    }
}

impl dyn Widget {
    pub fn downcast_ref<T: Widget>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Widget>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    pub fn id(&self) -> WidgetId {
        self.base().id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_along() {
        let v = Vec2::new(3.0, 7.0);
        assert_eq!(Orientation::Horizontal.along(v), 3.0);
        assert_eq!(Orientation::Vertical.along(v), 7.0);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(WidgetKind::PropertyGrid.name(), "PropertyGrid");
        assert_eq!(WidgetKind::TabControl.name(), "TabControl");
    }
}
