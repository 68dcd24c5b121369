//! Tab strip with optional linked pages.
//!
//! A tab may be linked to a page widget (usually a [`Page`](super::Page)
//! child of the tab control). Selecting a tab queues
//! [`WidgetRequest::SetVisible`] requests that show its page and hide every
//! other linked page.

use std::any::Any;
use std::sync::Arc;

use vireo_core::Color;
use vireo_core::geometry::Rect;
use vireo_core::math::Vec2;
use vireo_input::{ElementState, KeyCode, Modifiers, MouseButton};

use crate::items::{ItemId, ItemList, UserData};
use crate::render::{ItemVisualState, RenderInfo};
use crate::theme::Palette;
use crate::widget::{ValueCallback, Widget, WidgetBase, WidgetId, WidgetKind, WidgetRequest};

/// A tab.
#[derive(Clone)]
pub struct Tab {
    pub text: String,
    pub icon: Option<String>,
    pub enabled: bool,
    pub closable: bool,
    /// Widget shown while this tab is selected.
    pub page: Option<WidgetId>,
    pub user_data: Option<UserData>,
}

impl Tab {
    fn new(text: String, page: Option<WidgetId>) -> Self {
        Self {
            text,
            icon: None,
            enabled: true,
            closable: false,
            page,
            user_data: None,
        }
    }
}

/// Part of a tab under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabPart {
    Label,
    CloseButton,
}

/// Visual style for [`TabControl`].
#[derive(Debug, Clone, PartialEq)]
pub struct TabControlStyle {
    pub tab_bar_color: Color,
    pub active_tab_color: Color,
    pub inactive_tab_color: Color,
    pub hover_tab_color: Color,
    pub text_color: Color,
    pub disabled_text_color: Color,
    pub close_button_color: Color,
    pub close_hover_color: Color,
    pub content_color: Color,
    pub border_color: Color,
    pub tab_bar_height: f32,
    pub tab_width: f32,
    /// Gap between tabs.
    pub tab_spacing: f32,
    pub close_button_size: f32,
}

impl TabControlStyle {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            tab_bar_color: palette.surface_raised,
            active_tab_color: Color::from_rgb_u8(60, 60, 80),
            inactive_tab_color: Color::from_rgb_u8(50, 50, 60),
            hover_tab_color: Color::from_rgb_u8(70, 70, 90),
            text_color: palette.text,
            disabled_text_color: palette.text_disabled,
            close_button_color: palette.text_muted,
            close_hover_color: Color::from_rgb_u8(200, 60, 60),
            content_color: palette.background,
            border_color: palette.border,
            tab_bar_height: 28.0,
            tab_width: 120.0,
            tab_spacing: 2.0,
            close_button_size: 14.0,
        }
    }
}

impl Default for TabControlStyle {
    fn default() -> Self {
        Self::from_palette(&Palette::dark())
    }
}

/// Single-selection tab strip.
pub struct TabControl {
    base: WidgetBase,
    tabs: ItemList<Tab>,
    selected: Option<ItemId>,
    hovered: Option<(ItemId, TabPart)>,
    pressed: Option<(ItemId, TabPart)>,
    style: TabControlStyle,
    on_tab_selected: Option<ValueCallback<ItemId>>,
    on_tab_closed: Option<ValueCallback<ItemId>>,
}

impl TabControl {
    pub fn new() -> Self {
        let mut base = WidgetBase::new(Rect::new(0.0, 0.0, 400.0, 300.0));
        base.set_focusable(true);
        Self {
            base,
            tabs: ItemList::new(),
            selected: None,
            hovered: None,
            pressed: None,
            style: TabControlStyle::default(),
            on_tab_selected: None,
            on_tab_closed: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.set_bounds(bounds);
        self
    }

    pub fn with_style(mut self, style: TabControlStyle) -> Self {
        self.style = style;
        self
    }

    pub fn on_tab_selected<F>(mut self, callback: F) -> Self
    where
        F: Fn(ItemId) + Send + Sync + 'static,
    {
        self.on_tab_selected = Some(Arc::new(callback));
        self
    }

    /// Fired before a tab closed from its close button is removed.
    pub fn on_tab_closed<F>(mut self, callback: F) -> Self
    where
        F: Fn(ItemId) + Send + Sync + 'static,
    {
        self.on_tab_closed = Some(Arc::new(callback));
        self
    }

    pub fn style(&self) -> &TabControlStyle {
        &self.style
    }

    // Tabs

    /// Append a tab. The first tab added becomes selected.
    pub fn add_tab(&mut self, text: impl Into<String>) -> ItemId {
        self.push_tab(Tab::new(text.into(), None))
    }

    /// Append a tab linked to `page`.
    pub fn add_tab_with_page(&mut self, text: impl Into<String>, page: WidgetId) -> ItemId {
        self.push_tab(Tab::new(text.into(), Some(page)))
    }

    fn push_tab(&mut self, tab: Tab) -> ItemId {
        let id = self.tabs.push(tab);
        self.after_insert(id);
        id
    }

    pub fn insert_tab(&mut self, index: usize, text: impl Into<String>) -> ItemId {
        let id = self.tabs.insert(index, Tab::new(text.into(), None));
        self.after_insert(id);
        id
    }

    fn after_insert(&mut self, id: ItemId) {
        if self.selected.is_none() {
            self.select_tab(id);
        } else {
            self.sync_pages();
        }
    }

    /// Remove a tab. Removing the selected tab selects the tab that took its
    /// place, or the new last tab. Its page is hidden.
    pub fn remove_tab(&mut self, id: ItemId) -> bool {
        let Some(index) = self.tabs.index_of(id) else {
            return false;
        };
        let Some(tab) = self.tabs.remove(id) else {
            return false;
        };
        if let Some(page) = tab.page {
            self.base.request(WidgetRequest::SetVisible {
                target: page,
                visible: false,
            });
        }
        if self.hovered.is_some_and(|(h, _)| h == id) {
            self.hovered = None;
        }
        if self.pressed.is_some_and(|(p, _)| p == id) {
            self.pressed = None;
        }
        if self.selected == Some(id) {
            self.reselect_near(index);
        }
        true
    }

    /// Select the nearest enabled tab at or after `index`, else before it.
    /// With none left the selection clears and every linked page hides.
    fn reselect_near(&mut self, index: usize) {
        let enabled = |i: usize| {
            self.tabs
                .id_at(i)
                .filter(|id| self.tabs.get(*id).is_some_and(|t| t.enabled))
        };
        let next = (index..self.tabs.len())
            .find_map(enabled)
            .or_else(|| (0..index.min(self.tabs.len())).rev().find_map(enabled));
        self.selected = None;
        match next {
            Some(next) => {
                self.select_tab(next);
            }
            None => self.sync_pages(),
        }
    }

    pub fn clear(&mut self) {
        let ids: Vec<ItemId> = self.tabs.ids().collect();
        for id in ids {
            self.remove_tab(id);
        }
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn tab(&self, id: ItemId) -> Option<&Tab> {
        self.tabs.get(id)
    }

    pub fn tab_ids(&self) -> Vec<ItemId> {
        self.tabs.ids().collect()
    }

    pub fn get_tab_text(&self, id: ItemId) -> Option<&str> {
        self.tabs.get(id).map(|t| t.text.as_str())
    }

    pub fn set_tab_text(&mut self, id: ItemId, text: impl Into<String>) -> bool {
        match self.tabs.get_mut(id) {
            Some(tab) => {
                tab.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn set_tab_icon(&mut self, id: ItemId, icon: Option<String>) -> bool {
        match self.tabs.get_mut(id) {
            Some(tab) => {
                tab.icon = icon;
                true
            }
            None => false,
        }
    }

    pub fn set_tab_closable(&mut self, id: ItemId, closable: bool) -> bool {
        match self.tabs.get_mut(id) {
            Some(tab) => {
                tab.closable = closable;
                true
            }
            None => false,
        }
    }

    /// Disabling the selected tab moves the selection to the nearest
    /// enabled tab.
    pub fn set_tab_enabled(&mut self, id: ItemId, enabled: bool) -> bool {
        let Some(tab) = self.tabs.get_mut(id) else {
            return false;
        };
        tab.enabled = enabled;
        if !enabled && self.selected == Some(id) {
            if let Some(index) = self.tabs.index_of(id) {
                self.reselect_near(index);
            }
        } else if enabled && self.selected.is_none() {
            self.select_tab(id);
        }
        true
    }

    pub fn get_tab_page(&self, id: ItemId) -> Option<WidgetId> {
        self.tabs.get(id).and_then(|t| t.page)
    }

    /// Link or unlink a page. Visibility is re-synced.
    pub fn set_tab_page(&mut self, id: ItemId, page: Option<WidgetId>) -> bool {
        let Some(tab) = self.tabs.get_mut(id) else {
            return false;
        };
        let old = std::mem::replace(&mut tab.page, page);
        if let Some(old) = old.filter(|old| Some(*old) != page) {
            self.base.request(WidgetRequest::SetVisible {
                target: old,
                visible: false,
            });
        }
        self.sync_pages();
        true
    }

    // Selection

    pub fn selected_tab(&self) -> Option<ItemId> {
        self.selected
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected.and_then(|id| self.tabs.index_of(id))
    }

    /// Select an enabled tab and show its page. Does not fire callbacks.
    pub fn select_tab(&mut self, id: ItemId) -> bool {
        if !self.tabs.get(id).is_some_and(|t| t.enabled) {
            return false;
        }
        self.selected = Some(id);
        self.sync_pages();
        true
    }

    /// Queue visibility for every linked page.
    fn sync_pages(&mut self) {
        let requests: Vec<WidgetRequest> = self
            .tabs
            .iter()
            .filter_map(|(id, tab)| {
                tab.page.map(|page| WidgetRequest::SetVisible {
                    target: page,
                    visible: self.selected == Some(id),
                })
            })
            .collect();
        for request in requests {
            self.base.request(request);
        }
    }

    fn select_from_user(&mut self, id: ItemId) {
        if self.selected == Some(id) || !self.select_tab(id) {
            return;
        }
        tracing::debug!("TabControl: switched to tab {id}");
        if let Some(callback) = self.on_tab_selected.clone() {
            callback(id);
        }
    }

    fn close_from_user(&mut self, id: ItemId) {
        if let Some(callback) = self.on_tab_closed.clone() {
            callback(id);
        }
        let was_selected = self.selected == Some(id);
        self.remove_tab(id);
        tracing::debug!("TabControl: closed tab {id}");
        if was_selected {
            if let (Some(next), Some(callback)) = (self.selected, self.on_tab_selected.clone()) {
                callback(next);
            }
        }
    }

    /// Next enabled tab from the selected one, without wrapping.
    fn step(&self, forward: bool) -> Option<ItemId> {
        let start = self.selected_index()?;
        let enabled = |index: usize| {
            self.tabs
                .id_at(index)
                .filter(|id| self.tabs.get(*id).is_some_and(|t| t.enabled))
        };
        if forward {
            (start + 1..self.tabs.len()).find_map(enabled)
        } else {
            (0..start).rev().find_map(enabled)
        }
    }

    // Geometry

    pub fn tab_bar_rect(&self) -> Rect {
        let b = self.base.bounds();
        Rect::new(b.x, b.y, b.width, self.style.tab_bar_height)
    }

    /// Area below the tab strip where pages go.
    pub fn content_rect(&self) -> Rect {
        let b = self.base.bounds();
        let h = self.style.tab_bar_height.min(b.height);
        Rect::new(b.x, b.y + h, b.width, b.height - h)
    }

    fn tab_rect_at(&self, index: usize) -> Rect {
        let bar = self.tab_bar_rect();
        let step = self.style.tab_width + self.style.tab_spacing;
        Rect::new(bar.x + index as f32 * step, bar.y, self.style.tab_width, bar.height)
    }

    pub fn tab_rect(&self, id: ItemId) -> Option<Rect> {
        self.tabs.index_of(id).map(|index| self.tab_rect_at(index))
    }

    fn close_rect_in(&self, tab: Rect) -> Rect {
        let size = self.style.close_button_size;
        let margin = (tab.height - size) / 2.0;
        Rect::new(tab.right() - size - margin, tab.y + margin, size, size)
    }

    /// Close-button zone of a closable tab.
    pub fn close_button_rect(&self, id: ItemId) -> Option<Rect> {
        self.tabs.get(id).filter(|t| t.closable)?;
        self.tab_rect(id).map(|rect| self.close_rect_in(rect))
    }

    /// Tab and part under an absolute point.
    pub fn tab_at(&self, point: Vec2) -> Option<(ItemId, TabPart)> {
        if !self.tab_bar_rect().contains(point) {
            return None;
        }
        self.tabs.iter().enumerate().find_map(|(index, (id, tab))| {
            let rect = self.tab_rect_at(index);
            if !rect.contains(point) {
                return None;
            }
            let part = if tab.closable && self.close_rect_in(rect).contains(point) {
                TabPart::CloseButton
            } else {
                TabPart::Label
            };
            Some((id, part))
        })
    }
}

impl Default for TabControl {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TabControl {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::TabControl
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
        position: Vec2,
        _modifiers: Modifiers,
    ) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        let hit = self.tab_at(position);
        match state {
            ElementState::Pressed => {
                if !self.tab_bar_rect().contains(position) {
                    return false;
                }
                match hit {
                    Some((id, TabPart::Label)) => {
                        self.select_from_user(id);
                        self.pressed = Some((id, TabPart::Label));
                    }
                    Some((id, TabPart::CloseButton)) => {
                        self.pressed = Some((id, TabPart::CloseButton));
                    }
                    None => {}
                }
                true
            }
            ElementState::Released => {
                let Some(pressed) = self.pressed.take() else {
                    return false;
                };
                if pressed.1 == TabPart::CloseButton && hit == Some(pressed) {
                    self.close_from_user(pressed.0);
                }
                true
            }
        }
    }

    fn handle_mouse_move(&mut self, position: Vec2) -> bool {
        self.hovered = self.tab_at(position);
        self.tab_bar_rect().contains(position)
    }

    fn handle_mouse_leave(&mut self) {
        self.hovered = None;
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState, _modifiers: Modifiers) -> bool {
        if state != ElementState::Pressed {
            return false;
        }
        let target = match key {
            KeyCode::Left => self.step(false),
            KeyCode::Right => self.step(true),
            _ => return false,
        };
        if let Some(id) = target {
            self.select_from_user(id);
        }
        true
    }

    fn render_info(&self) -> RenderInfo {
        let bar = self.tab_bar_rect();
        let tabs = self
            .tabs
            .iter()
            .enumerate()
            .map(|(index, (id, tab))| {
                let rect = self.tab_rect_at(index);
                let hovered = self.hovered.is_some_and(|(h, _)| h == id);
                let state = ItemVisualState::from_flags(
                    hovered,
                    self.pressed.is_some_and(|(p, _)| p == id),
                    self.selected == Some(id),
                    tab.enabled,
                );
                TabInfo {
                    id,
                    rect,
                    close_button: tab.closable.then(|| self.close_rect_in(rect)),
                    close_hovered: self.hovered == Some((id, TabPart::CloseButton)),
                    text: tab.text.clone(),
                    icon: tab.icon.clone(),
                    state,
                    clipped: rect.right() > bar.right(),
                }
            })
            .collect();
        RenderInfo::TabControl(TabControlRenderInfo {
            bounds: self.base.bounds(),
            tab_bar: bar,
            content: self.content_rect(),
            tabs,
            selected: self.selected,
            style: self.style.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabInfo {
    pub id: ItemId,
    pub rect: Rect,
    pub close_button: Option<Rect>,
    pub close_hovered: bool,
    pub text: String,
    pub icon: Option<String>,
    pub state: ItemVisualState,
    /// Extends past the tab strip; renderers clip it.
    pub clipped: bool,
}

/// Render snapshot of a [`TabControl`].
#[derive(Debug, Clone, PartialEq)]
pub struct TabControlRenderInfo {
    pub bounds: Rect,
    pub tab_bar: Rect,
    pub content: Rect,
    pub tabs: Vec<TabInfo>,
    pub selected: Option<ItemId>,
    pub style: TabControlStyle,
}
