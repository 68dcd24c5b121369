//! Keyboard focus bookkeeping.
//!
//! The [`FocusManager`] only tracks which widget holds focus and queues
//! [`FocusEvent`]s. The focus ring itself is derived from the widget tree by
//! [`GuiContext`](crate::GuiContext) each time Tab is pressed, so it never
//! goes stale when widgets are added, hidden or removed.
//!
//! ```
//! use vireo_ui::{Button, FocusEvent, GuiContext};
//!
//! let mut ui = GuiContext::new();
//! let ok = ui.add_root(Button::new("OK"));
//! ui.set_focus(Some(ok));
//! assert_eq!(ui.drain_focus_events(), vec![FocusEvent::Gained(ok)]);
//! ```

use crate::widget::WidgetId;

/// Focus navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    /// Move focus forward (Tab)
    Next,
    /// Move focus backward (Shift+Tab)
    Previous,
}

/// Focus event indicating a change in focus state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEvent {
    /// Widget gained focus
    Gained(WidgetId),
    /// Widget lost focus
    Lost(WidgetId),
}

/// Single focus reference plus the pending event queue.
#[derive(Debug, Default)]
pub struct FocusManager {
    focused: Option<WidgetId>,
    events: Vec<FocusEvent>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    pub fn is_focused(&self, widget_id: WidgetId) -> bool {
        self.focused == Some(widget_id)
    }

    /// Move focus to `target`. Returns the widget that lost focus, or `None`
    /// if nothing changed or nothing was focused.
    ///
    /// `Lost` is queued before `Gained`.
    pub fn set_focus(&mut self, target: Option<WidgetId>) -> Option<WidgetId> {
        if self.focused == target {
            return None;
        }
        let old = std::mem::replace(&mut self.focused, target);
        if let Some(old) = old {
            self.events.push(FocusEvent::Lost(old));
        }
        if let Some(new) = target {
            self.events.push(FocusEvent::Gained(new));
        }
        old
    }

    pub fn clear_focus(&mut self) -> Option<WidgetId> {
        self.set_focus(None)
    }

    /// Pop all pending focus events.
    pub fn pop_events(&mut self) -> Vec<FocusEvent> {
        std::mem::take(&mut self.events)
    }

    /// Step through `ring` from the focused widget, wrapping at both ends.
    ///
    /// Without a focused widget in the ring, `Next` starts at the first
    /// entry and `Previous` at the last.
    pub fn next_in_ring(&self, ring: &[WidgetId], direction: FocusDirection) -> Option<WidgetId> {
        if ring.is_empty() {
            return None;
        }
        let count = ring.len();
        let current = self.focused.and_then(|f| ring.iter().position(|id| *id == f));
        let index = match (current, direction) {
            (None, FocusDirection::Next) => 0,
            (None, FocusDirection::Previous) => count - 1,
            (Some(i), FocusDirection::Next) => (i + 1) % count,
            (Some(i), FocusDirection::Previous) => (i + count - 1) % count,
        };
        ring.get(index).copied()
    }
}
