//! Render-info export.
//!
//! Widgets never draw. [`GuiContext::render_list`](crate::GuiContext::render_list)
//! walks the visible tree back to front and produces one [`RenderEntry`] per
//! widget; the entry carries the widget's [`RenderInfo`] snapshot with every
//! rectangle already in absolute viewport coordinates.

use vireo_core::geometry::Rect;

use crate::widget::{WidgetId, WidgetKind};
use crate::widgets::{
    ButtonRenderInfo, DialogRenderInfo, ListBoxRenderInfo, MenuRenderInfo, PageRenderInfo,
    PropertyGridRenderInfo, ScrollBarRenderInfo, SliderRenderInfo, TabControlRenderInfo,
    ToolbarRenderInfo, TreeViewRenderInfo,
};

bitflags::bitflags! {
    /// Visual state of a widget or one of its rows/items.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ItemVisualState: u8 {
        const HOVERED  = 1 << 0;
        const PRESSED  = 1 << 1;
        const SELECTED = 1 << 2;
        const DISABLED = 1 << 3;
        const CHECKED  = 1 << 4;
        const FOCUSED  = 1 << 5;
        const EXPANDED = 1 << 6;
    }
}

impl ItemVisualState {
    /// Build from the flags widgets commonly track.
    pub fn from_flags(hovered: bool, pressed: bool, selected: bool, enabled: bool) -> Self {
        let mut state = ItemVisualState::empty();
        state.set(ItemVisualState::HOVERED, hovered);
        state.set(ItemVisualState::PRESSED, pressed);
        state.set(ItemVisualState::SELECTED, selected);
        state.set(ItemVisualState::DISABLED, !enabled);
        state
    }

    pub fn with(mut self, flag: ItemVisualState, on: bool) -> Self {
        self.set(flag, on);
        self
    }
}

/// Per-kind snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderInfo {
    Button(ButtonRenderInfo),
    Slider(SliderRenderInfo),
    ScrollBar(ScrollBarRenderInfo),
    ListBox(ListBoxRenderInfo),
    TreeView(TreeViewRenderInfo),
    Menu(MenuRenderInfo),
    Toolbar(ToolbarRenderInfo),
    Dialog(DialogRenderInfo),
    PropertyGrid(PropertyGridRenderInfo),
    TabControl(TabControlRenderInfo),
    Page(PageRenderInfo),
}

impl RenderInfo {
    pub fn kind(&self) -> WidgetKind {
        match self {
            RenderInfo::Button(_) => WidgetKind::Button,
            RenderInfo::Slider(_) => WidgetKind::Slider,
            RenderInfo::ScrollBar(_) => WidgetKind::ScrollBar,
            RenderInfo::ListBox(_) => WidgetKind::ListBox,
            RenderInfo::TreeView(_) => WidgetKind::TreeView,
            RenderInfo::Menu(_) => WidgetKind::Menu,
            RenderInfo::Toolbar(_) => WidgetKind::Toolbar,
            RenderInfo::Dialog(_) => WidgetKind::Dialog,
            RenderInfo::PropertyGrid(_) => WidgetKind::PropertyGrid,
            RenderInfo::TabControl(_) => WidgetKind::TabControl,
            RenderInfo::Page(_) => WidgetKind::Page,
        }
    }
}

/// One widget in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderEntry {
    pub id: WidgetId,
    pub kind: WidgetKind,
    pub bounds: Rect,
    /// Scissor rect from clipping ancestors; `None` when unclipped.
    pub clip: Option<Rect>,
    /// Tree depth, 0 for viewport roots.
    pub depth: usize,
    pub focused: bool,
    /// Effective enabled state (ancestors included).
    pub enabled: bool,
    pub info: RenderInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_state_from_flags() {
        let s = ItemVisualState::from_flags(true, false, true, false);
        assert!(s.contains(ItemVisualState::HOVERED | ItemVisualState::SELECTED));
        assert!(s.contains(ItemVisualState::DISABLED));
        assert!(!s.contains(ItemVisualState::PRESSED));
        assert!(s.with(ItemVisualState::CHECKED, true).contains(ItemVisualState::CHECKED));
    }
}
