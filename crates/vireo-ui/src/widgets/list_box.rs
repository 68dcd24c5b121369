//! Scrollable list with single or multiple selection.

use std::any::Any;
use std::sync::Arc;

use indexmap::IndexSet;
use vireo_core::Color;
use vireo_core::geometry::Rect;
use vireo_core::math::Vec2;
use vireo_input::{ElementState, KeyCode, Modifiers, MouseButton};

use crate::items::{ItemId, ItemList, UserData};
use crate::render::{ItemVisualState, RenderInfo};
use crate::scroll::ScrollState;
use crate::theme::Palette;
use crate::widget::{ValueCallback, WheelDelta, Widget, WidgetBase, WidgetKind};

/// How many items may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Single,
    /// Ctrl toggles single items, Shift extends from the anchor.
    Multi,
}

/// A list entry.
#[derive(Clone)]
pub struct ListItem {
    pub text: String,
    pub icon: Option<String>,
    pub enabled: bool,
    pub user_data: Option<UserData>,
}

impl ListItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon: None,
            enabled: true,
            user_data: None,
        }
    }
}

/// Visual style for [`ListBox`].
#[derive(Debug, Clone, PartialEq)]
pub struct ListBoxStyle {
    pub background: Color,
    pub text_color: Color,
    pub disabled_text_color: Color,
    pub hover_color: Color,
    pub selection_color: Color,
    pub border_color: Color,
    /// Row height in pixels.
    pub item_height: f32,
    /// Inset between the border and the rows.
    pub padding: f32,
}

impl ListBoxStyle {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            background: palette.surface,
            text_color: palette.text,
            disabled_text_color: palette.text_disabled,
            hover_color: palette.hover,
            selection_color: palette.selection,
            border_color: palette.border,
            item_height: 22.0,
            padding: 2.0,
        }
    }
}

impl Default for ListBoxStyle {
    fn default() -> Self {
        Self::from_palette(&Palette::dark())
    }
}

/// Vertical list of text items.
///
/// Selection callbacks fire for user input only; programmatic selection and
/// pruning on removal are silent.
pub struct ListBox {
    base: WidgetBase,
    items: ItemList<ListItem>,
    selection: IndexSet<ItemId>,
    mode: SelectionMode,
    /// Start of a Shift range.
    anchor: Option<ItemId>,
    /// Keyboard position.
    cursor: Option<ItemId>,
    hovered: Option<ItemId>,
    scroll: ScrollState,
    style: ListBoxStyle,
    on_selection_changed: Option<ValueCallback<Vec<ItemId>>>,
    on_item_activated: Option<ValueCallback<ItemId>>,
}

impl ListBox {
    pub fn new() -> Self {
        let mut base = WidgetBase::new(Rect::new(0.0, 0.0, 200.0, 200.0));
        base.set_focusable(true);
        base.set_clip(true);
        Self {
            base,
            items: ItemList::new(),
            selection: IndexSet::new(),
            mode: SelectionMode::Single,
            anchor: None,
            cursor: None,
            hovered: None,
            scroll: ScrollState::new(),
            style: ListBoxStyle::default(),
            on_selection_changed: None,
            on_item_activated: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.set_bounds(bounds);
        self.sync_scroll();
        self
    }

    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.set_selection_mode(mode);
        self
    }

    pub fn with_style(mut self, style: ListBoxStyle) -> Self {
        self.style = style;
        self.sync_scroll();
        self
    }

    pub fn with_items<I, S>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for text in texts {
            self.add_item(text);
        }
        self
    }

    pub fn on_selection_changed<F>(mut self, callback: F) -> Self
    where
        F: Fn(Vec<ItemId>) + Send + Sync + 'static,
    {
        self.on_selection_changed = Some(Arc::new(callback));
        self
    }

    /// Fired by Enter on the keyboard cursor.
    pub fn on_item_activated<F>(mut self, callback: F) -> Self
    where
        F: Fn(ItemId) + Send + Sync + 'static,
    {
        self.on_item_activated = Some(Arc::new(callback));
        self
    }

    pub fn style(&self) -> &ListBoxStyle {
        &self.style
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switching to single mode keeps only the most recent selection.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        if mode == SelectionMode::Single && self.selection.len() > 1 {
            let keep = self.selection.last().copied();
            self.selection.retain(|id| Some(*id) == keep);
        }
    }

    // Items

    pub fn add_item(&mut self, text: impl Into<String>) -> ItemId {
        self.push_item(ListItem::new(text))
    }

    pub fn add_item_with_data(&mut self, text: impl Into<String>, data: UserData) -> ItemId {
        let mut item = ListItem::new(text);
        item.user_data = Some(data);
        self.push_item(item)
    }

    pub fn push_item(&mut self, item: ListItem) -> ItemId {
        let id = self.items.push(item);
        self.sync_scroll();
        id
    }

    /// Insert before the item currently at `index` (appends past the end).
    pub fn insert_item(&mut self, index: usize, text: impl Into<String>) -> ItemId {
        let id = self.items.insert(index, ListItem::new(text));
        self.sync_scroll();
        id
    }

    /// Remove an item, pruning it from the selection.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        if self.items.remove(id).is_none() {
            tracing::debug!("ListBox: remove of unknown item {id}");
            return false;
        }
        self.selection.shift_remove(&id);
        for slot in [&mut self.anchor, &mut self.cursor, &mut self.hovered] {
            if *slot == Some(id) {
                *slot = None;
            }
        }
        self.sync_scroll();
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selection.clear();
        self.anchor = None;
        self.cursor = None;
        self.hovered = None;
        self.sync_scroll();
    }

    pub fn get_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn contains_item(&self, id: ItemId) -> bool {
        self.items.contains(id)
    }

    pub fn item(&self, id: ItemId) -> Option<&ListItem> {
        self.items.get(id)
    }

    /// Item ids in display order.
    pub fn item_ids(&self) -> Vec<ItemId> {
        self.items.ids().collect()
    }

    pub fn get_item_text(&self, id: ItemId) -> Option<&str> {
        self.items.get(id).map(|item| item.text.as_str())
    }

    pub fn set_item_text(&mut self, id: ItemId, text: impl Into<String>) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn get_item_icon(&self, id: ItemId) -> Option<&str> {
        self.items.get(id).and_then(|item| item.icon.as_deref())
    }

    pub fn set_item_icon(&mut self, id: ItemId, icon: Option<String>) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.icon = icon;
                true
            }
            None => false,
        }
    }

    pub fn is_item_enabled(&self, id: ItemId) -> bool {
        self.items.get(id).is_some_and(|item| item.enabled)
    }

    /// Disabling an item also deselects it.
    pub fn set_item_enabled(&mut self, id: ItemId, enabled: bool) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.enabled = enabled;
                if !enabled {
                    self.selection.shift_remove(&id);
                }
                true
            }
            None => false,
        }
    }

    pub fn get_item_data(&self, id: ItemId) -> Option<&UserData> {
        self.items.get(id).and_then(|item| item.user_data.as_ref())
    }

    pub fn set_item_data(&mut self, id: ItemId, data: Option<UserData>) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.user_data = data;
                true
            }
            None => false,
        }
    }

    // Selection

    /// Select an item. In single mode this replaces the selection.
    pub fn select_item(&mut self, id: ItemId) -> bool {
        if !self.is_item_enabled(id) {
            return false;
        }
        if self.mode == SelectionMode::Single {
            self.selection.clear();
        }
        self.selection.insert(id);
        self.anchor = Some(id);
        self.cursor = Some(id);
        true
    }

    pub fn deselect_item(&mut self, id: ItemId) -> bool {
        self.selection.shift_remove(&id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn select_all(&mut self) {
        if self.mode == SelectionMode::Multi {
            self.selection = self
                .items
                .iter()
                .filter(|(_, item)| item.enabled)
                .map(|(id, _)| id)
                .collect();
        }
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selection.contains(&id)
    }

    /// Most recently selected item.
    pub fn selected_item(&self) -> Option<ItemId> {
        self.selection.last().copied()
    }

    /// Selected items in display order.
    pub fn selected_items(&self) -> Vec<ItemId> {
        self.items
            .ids()
            .filter(|id| self.selection.contains(id))
            .collect()
    }

    pub fn hovered_item(&self) -> Option<ItemId> {
        self.hovered
    }

    // Scrolling and geometry

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    pub fn set_scroll_offset(&mut self, offset: f32) -> bool {
        self.sync_scroll();
        self.scroll.set_offset(offset)
    }

    pub fn content_height(&self) -> f32 {
        self.items.len() as f32 * self.style.item_height
    }

    /// Rows area inside the padding.
    pub fn viewport_rect(&self) -> Rect {
        self.base.bounds().inset(self.style.padding)
    }

    fn sync_scroll(&mut self) {
        let viewport = self.viewport_rect().height;
        self.scroll.set_extents(self.content_height(), viewport);
    }

    /// Scroll the minimum distance that shows `id`.
    pub fn ensure_visible(&mut self, id: ItemId) -> bool {
        let Some(index) = self.items.index_of(id) else {
            return false;
        };
        self.sync_scroll();
        let h = self.style.item_height;
        self.scroll.ensure_visible(index as f32 * h, h)
    }

    /// Row rect of an item in absolute coordinates, visible or not.
    pub fn item_rect(&self, id: ItemId) -> Option<Rect> {
        let index = self.items.index_of(id)?;
        let viewport = self.viewport_rect();
        let h = self.style.item_height;
        Some(Rect::new(
            viewport.x,
            viewport.y + index as f32 * h - self.scroll.offset(),
            viewport.width,
            h,
        ))
    }

    /// Item under an absolute point.
    pub fn item_at(&self, point: Vec2) -> Option<ItemId> {
        let viewport = self.viewport_rect();
        if !viewport.contains(point) {
            return None;
        }
        let y = point.y - viewport.y + self.scroll.offset();
        let index = (y / self.style.item_height).floor();
        if index < 0.0 {
            return None;
        }
        self.items.id_at(index as usize)
    }

    // Interaction

    fn emit_selection(&self) {
        if let Some(callback) = self.on_selection_changed.clone() {
            callback(self.selected_items());
        }
    }

    /// Apply a click or keyboard move onto `id` with the given modifiers.
    fn select_with_modifiers(&mut self, id: ItemId, modifiers: Modifiers) {
        let before: Vec<ItemId> = self.selection.iter().copied().collect();
        match self.mode {
            SelectionMode::Multi if modifiers.control() => {
                if !self.selection.shift_remove(&id) {
                    self.selection.insert(id);
                }
                self.anchor = Some(id);
            }
            SelectionMode::Multi if modifiers.shift() && self.anchor.is_some() => {
                let anchor_index = self.anchor.and_then(|a| self.items.index_of(a));
                let target_index = self.items.index_of(id);
                if let (Some(a), Some(b)) = (anchor_index, target_index) {
                    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                    self.selection.clear();
                    for index in lo..=hi {
                        if let Some(item_id) = self.items.id_at(index) {
                            if self.is_item_enabled(item_id) {
                                self.selection.insert(item_id);
                            }
                        }
                    }
                }
            }
            _ => {
                self.selection.clear();
                self.selection.insert(id);
                self.anchor = Some(id);
            }
        }
        self.cursor = Some(id);
        let after: Vec<ItemId> = self.selection.iter().copied().collect();
        if before != after {
            tracing::trace!("ListBox selection: {:?}", after);
            self.emit_selection();
        }
    }

    /// Next enabled item from the cursor, moving `delta` rows.
    fn step_cursor(&self, delta: isize) -> Option<ItemId> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        let start = self.cursor.and_then(|id| self.items.index_of(id));
        let mut index = match start {
            Some(i) => i as isize + delta,
            None if delta >= 0 => 0,
            None => len as isize - 1,
        };
        index = index.clamp(0, len as isize - 1);
        // Skip disabled items in the direction of travel.
        let dir = if delta >= 0 { 1 } else { -1 };
        while (0..len as isize).contains(&index) {
            let id = self.items.id_at(index as usize)?;
            if self.is_item_enabled(id) {
                return Some(id);
            }
            index += dir;
        }
        None
    }

    fn first_enabled(&self, reverse: bool) -> Option<ItemId> {
        let enabled = |(id, item): (ItemId, &ListItem)| item.enabled.then_some(id);
        if reverse {
            self.items.iter().rev().find_map(enabled)
        } else {
            self.items.iter().find_map(enabled)
        }
    }

    fn rows_per_page(&self) -> isize {
        ((self.viewport_rect().height / self.style.item_height).floor() as isize).max(1)
    }
}

impl Default for ListBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for ListBox {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::ListBox
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
        modifiers: Modifiers,
    ) -> bool {
        if button != MouseButton::Left || !self.hit_test(position) {
            return false;
        }
        if state == ElementState::Pressed {
            self.sync_scroll();
            if let Some(id) = self.item_at(position) {
                if self.is_item_enabled(id) {
                    self.select_with_modifiers(id, modifiers);
                    self.ensure_visible(id);
                }
            }
        }
        true
    }

    fn handle_mouse_move(&mut self, position: Vec2) -> bool {
        self.hovered = self.item_at(position);
        self.hit_test(position)
    }

    fn handle_mouse_leave(&mut self) {
        self.hovered = None;
    }

    fn handle_scroll(&mut self, delta: WheelDelta, _position: Vec2) -> bool {
        self.sync_scroll();
        if !self.scroll.is_scrollable() {
            return false;
        }
        self.scroll.scroll_by(-delta.pixels.y);
        true
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState, modifiers: Modifiers) -> bool {
        if state != ElementState::Pressed {
            return false;
        }
        let target = match key {
            KeyCode::Up => self.step_cursor(-1),
            KeyCode::Down => self.step_cursor(1),
            KeyCode::PageUp => self.step_cursor(-self.rows_per_page()),
            KeyCode::PageDown => self.step_cursor(self.rows_per_page()),
            KeyCode::Home => self.first_enabled(false),
            KeyCode::End => self.first_enabled(true),
            KeyCode::Space if self.mode == SelectionMode::Multi => {
                if let Some(id) = self.cursor {
                    self.select_with_modifiers(id, Modifiers::CONTROL);
                }
                return true;
            }
            KeyCode::Enter => {
                if let (Some(id), Some(callback)) = (self.cursor, self.on_item_activated.clone()) {
                    callback(id);
                }
                return self.cursor.is_some();
            }
            _ => return false,
        };
        if let Some(id) = target {
            // Ctrl only moves the cursor in multi mode.
            if self.mode == SelectionMode::Multi && modifiers.control() {
                self.cursor = Some(id);
            } else {
                self.select_with_modifiers(id, modifiers & Modifiers::SHIFT);
            }
            self.ensure_visible(id);
        }
        true
    }

    fn render_info(&self) -> RenderInfo {
        let viewport = self.viewport_rect();
        let rows = self
            .items
            .iter()
            .filter_map(|(id, item)| {
                let rect = self.item_rect(id)?;
                if !rect.intersects(&viewport) {
                    return None;
                }
                let state = ItemVisualState::from_flags(
                    self.hovered == Some(id),
                    false,
                    self.selection.contains(&id),
                    item.enabled,
                )
                .with(ItemVisualState::FOCUSED, self.cursor == Some(id));
                Some(ListRowInfo {
                    id,
                    rect,
                    text: item.text.clone(),
                    icon: item.icon.clone(),
                    state,
                })
            })
            .collect();
        RenderInfo::ListBox(ListBoxRenderInfo {
            bounds: self.base.bounds(),
            viewport,
            rows,
            scroll_offset: self.scroll.offset(),
            content_height: self.content_height(),
            style: self.style.clone(),
        })
    }
}

/// One visible list row.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRowInfo {
    pub id: ItemId,
    pub rect: Rect,
    pub text: String,
    pub icon: Option<String>,
    pub state: ItemVisualState,
}

/// Render snapshot of a [`ListBox`].
#[derive(Debug, Clone, PartialEq)]
pub struct ListBoxRenderInfo {
    pub bounds: Rect,
    /// Rows area; renderers clip rows to it.
    pub viewport: Rect,
    /// Rows intersecting the viewport, top to bottom.
    pub rows: Vec<ListRowInfo>,
    pub scroll_offset: f32,
    pub content_height: f32,
    pub style: ListBoxStyle,
}
