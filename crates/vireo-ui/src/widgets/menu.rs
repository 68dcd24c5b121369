//! Popup menu with normal, separator, checkbox and radio items.
//!
//! A menu is hidden until shown with one of the `show_*` methods. While open
//! it is modal: any press outside its bounds closes it and is swallowed, and
//! every key goes to it. Activating an item fires `on_item_activated` once
//! and closes the menu.
//!
//! ```
//! use vireo_ui::widgets::Menu;
//! use vireo_core::math::Vec2;
//!
//! let mut menu = Menu::new();
//! let cut = menu.add_item("Cut");
//! menu.add_separator();
//! let wrap = menu.add_checkbox("Word wrap", false);
//! menu.show_at(Vec2::new(40.0, 60.0));
//! assert!(menu.is_open());
//! assert!(menu.item_rect(cut).is_some());
//! assert!(!menu.is_item_checked(wrap));
//! ```

use std::any::Any;
use std::sync::Arc;

use vireo_core::Color;
use vireo_core::geometry::Rect;
use vireo_core::math::Vec2;
use vireo_input::{ElementState, KeyCode, Modifiers, MouseButton};

use crate::items::{ItemId, ItemList, UserData};
use crate::render::{ItemVisualState, RenderInfo};
use crate::theme::Palette;
use crate::widget::{
    ClickCallback, ValueCallback, WheelDelta, Widget, WidgetBase, WidgetKind, WidgetRequest,
};

/// Menu item behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItemKind {
    Normal,
    Separator,
    Checkbox,
    /// Radio item; at most one item per group is checked.
    Radio { group: u32 },
}

/// A single menu item.
#[derive(Clone)]
pub struct MenuItem {
    pub kind: MenuItemKind,
    pub label: String,
    /// Display-only shortcut text, e.g. "Ctrl+C".
    pub shortcut: Option<String>,
    pub icon: Option<String>,
    pub enabled: bool,
    pub checked: bool,
    pub user_data: Option<UserData>,
}

impl MenuItem {
    fn new(kind: MenuItemKind, label: String, checked: bool) -> Self {
        Self {
            kind,
            label,
            shortcut: None,
            icon: None,
            enabled: true,
            checked,
            user_data: None,
        }
    }

    /// Whether hover and activation can land on this item.
    pub fn is_interactive(&self) -> bool {
        self.enabled && self.kind != MenuItemKind::Separator
    }
}

/// Menu styling configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuStyle {
    /// Background color.
    pub background_color: Color,
    /// Border color.
    pub border_color: Color,
    /// Border width.
    pub border_width: f32,
    /// Border radius.
    pub border_radius: f32,
    /// Item text color.
    pub text_color: Color,
    /// Disabled item text color.
    pub disabled_color: Color,
    /// Highlighted item background.
    pub highlight_color: Color,
    /// Separator color.
    pub separator_color: Color,
    /// Shortcut text color.
    pub shortcut_color: Color,
    /// Height of normal, checkbox and radio rows.
    pub item_height: f32,
    /// Height of separator rows.
    pub separator_height: f32,
    /// Horizontal padding.
    pub padding_x: f32,
    /// Vertical padding.
    pub padding_y: f32,
    /// Width reserved for check marks and icons.
    pub indicator_width: f32,
    /// Average glyph advance used to estimate label widths.
    pub char_width: f32,
    /// Minimum menu width.
    pub min_width: f32,
}

impl MenuStyle {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            background_color: palette.surface,
            border_color: palette.border,
            border_width: 1.0,
            border_radius: 4.0,
            text_color: palette.text,
            disabled_color: palette.text_disabled,
            highlight_color: palette.selection,
            separator_color: palette.divider,
            shortcut_color: palette.text_muted,
            item_height: 28.0,
            separator_height: 9.0,
            padding_x: 12.0,
            padding_y: 4.0,
            indicator_width: 20.0,
            char_width: 7.0,
            min_width: 150.0,
        }
    }

    fn row_height(&self, kind: MenuItemKind) -> f32 {
        match kind {
            MenuItemKind::Separator => self.separator_height,
            _ => self.item_height,
        }
    }
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self::from_palette(&Palette::dark())
    }
}

/// Where [`Menu::show_relative_to`] places the menu around its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuPlacement {
    /// Left edges aligned, menu under the anchor (drop-down).
    #[default]
    Below,
    Above,
    /// Top edges aligned, menu to the right (submenu style).
    Right,
    Left,
}

/// Popup menu widget.
pub struct Menu {
    base: WidgetBase,
    items: ItemList<MenuItem>,
    style: MenuStyle,
    open: bool,
    hovered: Option<ItemId>,
    /// Item under the press that may activate on release.
    pressed: Option<ItemId>,
    on_item_activated: Option<ValueCallback<ItemId>>,
    on_close: Option<ClickCallback>,
}

impl Menu {
    pub fn new() -> Self {
        let mut base = WidgetBase::new(Rect::ZERO);
        base.set_visible(false);
        base.set_focusable(true);
        Self {
            base,
            items: ItemList::new(),
            style: MenuStyle::default(),
            open: false,
            hovered: None,
            pressed: None,
            on_item_activated: None,
            on_close: None,
        }
    }

    pub fn with_style(mut self, style: MenuStyle) -> Self {
        self.style = style;
        self
    }

    pub fn on_item_activated<F>(mut self, callback: F) -> Self
    where
        F: Fn(ItemId) + Send + Sync + 'static,
    {
        self.on_item_activated = Some(Arc::new(callback));
        self
    }

    /// Fired whenever an open menu closes, for any reason.
    pub fn on_close<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_close = Some(Arc::new(callback));
        self
    }

    pub fn style(&self) -> &MenuStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: MenuStyle) {
        self.style = style;
    }

    // Items

    pub fn add_item(&mut self, label: impl Into<String>) -> ItemId {
        self.push(MenuItem::new(MenuItemKind::Normal, label.into(), false))
    }

    pub fn push(&mut self, item: MenuItem) -> ItemId {
        let id = self.items.push(item);
        self.relayout();
        id
    }

    pub fn add_item_with_shortcut(
        &mut self,
        label: impl Into<String>,
        shortcut: impl Into<String>,
    ) -> ItemId {
        let mut item = MenuItem::new(MenuItemKind::Normal, label.into(), false);
        item.shortcut = Some(shortcut.into());
        self.push(item)
    }

    pub fn add_separator(&mut self) -> ItemId {
        self.push(MenuItem::new(MenuItemKind::Separator, String::new(), false))
    }

    pub fn add_checkbox(&mut self, label: impl Into<String>, checked: bool) -> ItemId {
        self.push(MenuItem::new(MenuItemKind::Checkbox, label.into(), checked))
    }

    /// Add a radio item. Adding a checked item unchecks the rest of its group.
    pub fn add_radio(&mut self, label: impl Into<String>, group: u32, checked: bool) -> ItemId {
        let id = self.push(MenuItem::new(MenuItemKind::Radio { group }, label.into(), false));
        if checked {
            self.set_item_checked(id, true);
        }
        id
    }

    pub fn remove_item(&mut self, id: ItemId) -> bool {
        if self.items.remove(id).is_none() {
            return false;
        }
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        if self.pressed == Some(id) {
            self.pressed = None;
        }
        self.relayout();
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.hovered = None;
        self.pressed = None;
        self.relayout();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn item(&self, id: ItemId) -> Option<&MenuItem> {
        self.items.get(id)
    }

    pub fn item_ids(&self) -> Vec<ItemId> {
        self.items.ids().collect()
    }

    pub fn get_item_label(&self, id: ItemId) -> Option<&str> {
        self.items.get(id).map(|item| item.label.as_str())
    }

    pub fn set_item_label(&mut self, id: ItemId, label: impl Into<String>) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.label = label.into();
                true
            }
            None => false,
        }
    }

    pub fn set_item_shortcut(&mut self, id: ItemId, shortcut: Option<String>) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.shortcut = shortcut;
                true
            }
            None => false,
        }
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

    pub fn set_item_enabled(&mut self, id: ItemId, enabled: bool) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.enabled = enabled;
                if !enabled && self.hovered == Some(id) {
                    self.hovered = None;
                }
                true
            }
            None => false,
        }
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

    pub fn is_item_checked(&self, id: ItemId) -> bool {
        self.items.get(id).is_some_and(|item| item.checked)
    }

    /// Check or uncheck a checkbox or radio item. Checking a radio item
    /// unchecks every other item of its group. Normal items and separators
    /// are rejected.
    pub fn set_item_checked(&mut self, id: ItemId, checked: bool) -> bool {
        let Some(kind) = self.items.get(id).map(|item| item.kind) else {
            return false;
        };
        match kind {
            MenuItemKind::Checkbox => {}
            MenuItemKind::Radio { group } => {
                if checked {
                    for (other, item) in self.items.iter_mut() {
                        if other != id && item.kind == (MenuItemKind::Radio { group }) {
                            item.checked = false;
                        }
                    }
                }
            }
            MenuItemKind::Normal | MenuItemKind::Separator => return false,
        }
        if let Some(item) = self.items.get_mut(id) {
            item.checked = checked;
        }
        true
    }

    /// Checked item of a radio group.
    pub fn checked_radio(&self, group: u32) -> Option<ItemId> {
        self.items
            .iter()
            .find(|(_, item)| item.kind == MenuItemKind::Radio { group } && item.checked)
            .map(|(id, _)| id)
    }

    // Open / close

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn hovered_item(&self) -> Option<ItemId> {
        self.hovered
    }

    /// Width needed for the longest label and shortcut.
    pub fn preferred_size(&self) -> Vec2 {
        let s = &self.style;
        let label_chars = self
            .items
            .iter()
            .map(|(_, item)| item.label.chars().count())
            .max()
            .unwrap_or(0);
        let shortcut_chars = self
            .items
            .iter()
            .filter_map(|(_, item)| item.shortcut.as_ref().map(|sc| sc.chars().count()))
            .max()
            .unwrap_or(0);
        let mut width = s.padding_x * 2.0 + s.indicator_width + label_chars as f32 * s.char_width;
        if shortcut_chars > 0 {
            width += s.padding_x * 2.0 + shortcut_chars as f32 * s.char_width;
        }
        let height = s.padding_y * 2.0
            + self
                .items
                .iter()
                .map(|(_, item)| s.row_height(item.kind))
                .sum::<f32>();
        Vec2::new(width.max(s.min_width), height)
    }

    fn relayout(&mut self) {
        let position = self.base.bounds().position();
        self.base.set_bounds(Rect::from_pos_size(position, self.preferred_size()));
    }

    /// Open with the top-left corner at `position`.
    pub fn show_at(&mut self, position: Vec2) {
        self.base.set_bounds(Rect::from_pos_size(position, self.preferred_size()));
        self.open = true;
        self.hovered = None;
        self.pressed = None;
        self.base.set_visible(true);
        self.base.request(WidgetRequest::BringToFront);
        self.base.request(WidgetRequest::Focus);
        tracing::debug!("Menu opened at ({}, {})", position.x, position.y);
    }

    /// Open at `position`, flipping left/up where the menu would leave
    /// `screen`, then clamping to its top-left.
    pub fn show_at_within(&mut self, position: Vec2, screen: Rect) {
        let size = self.preferred_size();
        let mut pos = position;
        if pos.x + size.x > screen.right() {
            pos.x -= size.x;
        }
        if pos.y + size.y > screen.bottom() {
            pos.y -= size.y;
        }
        pos.x = pos.x.max(screen.x);
        pos.y = pos.y.max(screen.y);
        self.show_at(pos);
    }

    /// Open next to `anchor` (a button or parent menu row).
    pub fn show_relative_to(&mut self, anchor: Rect, placement: MenuPlacement) {
        let size = self.preferred_size();
        let pos = match placement {
            MenuPlacement::Below => Vec2::new(anchor.x, anchor.bottom()),
            MenuPlacement::Above => Vec2::new(anchor.x, anchor.y - size.y),
            MenuPlacement::Right => Vec2::new(anchor.right(), anchor.y),
            MenuPlacement::Left => Vec2::new(anchor.x - size.x, anchor.y),
        };
        self.show_at(pos);
    }

    /// Close the menu. No-op when already closed.
    pub fn hide(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.hovered = None;
        self.pressed = None;
        self.base.set_visible(false);
        self.base.request(WidgetRequest::ReleaseFocus);
        tracing::debug!("Menu closed");
        if let Some(callback) = self.on_close.clone() {
            callback();
        }
    }

    /// Activate an item as if clicked: toggles checkboxes, selects radios,
    /// fires `on_item_activated` and closes. Returns false for separators,
    /// disabled and unknown items.
    pub fn activate(&mut self, id: ItemId) -> bool {
        let Some((kind, checked)) = self
            .items
            .get(id)
            .filter(|item| item.is_interactive())
            .map(|item| (item.kind, item.checked))
        else {
            return false;
        };
        match kind {
            MenuItemKind::Checkbox => {
                self.set_item_checked(id, !checked);
            }
            MenuItemKind::Radio { .. } => {
                self.set_item_checked(id, true);
            }
            _ => {}
        }
        tracing::debug!("Menu item {id} activated");
        if let Some(callback) = self.on_item_activated.clone() {
            callback(id);
        }
        self.hide();
        true
    }

    // Geometry

    /// Rows in display order with their absolute rects.
    fn rows(&self) -> impl Iterator<Item = (ItemId, &MenuItem, Rect)> {
        let bounds = self.base.bounds();
        let mut y = bounds.y + self.style.padding_y;
        self.items.iter().map(move |(id, item)| {
            let h = self.style.row_height(item.kind);
            let rect = Rect::new(bounds.x, y, bounds.width, h);
            y += h;
            (id, item, rect)
        })
    }

    pub fn item_rect(&self, id: ItemId) -> Option<Rect> {
        self.rows().find(|(row, _, _)| *row == id).map(|(_, _, rect)| rect)
    }

    /// Interactive item under an absolute point.
    pub fn item_at(&self, point: Vec2) -> Option<ItemId> {
        self.rows()
            .find(|(_, _, rect)| rect.contains(point))
            .filter(|(_, item, _)| item.is_interactive())
            .map(|(id, _, _)| id)
    }

    /// Next interactive item from the hovered one, wrapping.
    fn step_hover(&self, forward: bool) -> Option<ItemId> {
        let ids: Vec<ItemId> = self
            .items
            .iter()
            .filter(|(_, item)| item.is_interactive())
            .map(|(id, _)| id)
            .collect();
        if ids.is_empty() {
            return None;
        }
        let current = self.hovered.and_then(|h| ids.iter().position(|id| *id == h));
        let index = match (current, forward) {
            (None, true) => 0,
            (None, false) => ids.len() - 1,
            (Some(i), true) => (i + 1) % ids.len(),
            (Some(i), false) => (i + ids.len() - 1) % ids.len(),
        };
        Some(ids[index])
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Menu {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Menu
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn is_modal(&self) -> bool {
        self.open && self.base.is_visible()
    }

    fn visibility_changed(&mut self, visible: bool) {
        if !visible {
            self.hide();
        }
    }

    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
        position: Vec2,
        _modifiers: Modifiers,
    ) -> bool {
        if !self.open {
            return false;
        }
        match state {
            ElementState::Pressed => {
                if !self.base.bounds().contains(position) {
                    self.hide();
                    return true;
                }
                self.pressed = if button == MouseButton::Left {
                    self.item_at(position)
                } else {
                    None
                };
            }
            ElementState::Released => {
                let pressed = self.pressed.take();
                if button == MouseButton::Left {
                    if let Some(id) = self.item_at(position).filter(|id| Some(*id) == pressed) {
                        self.activate(id);
                    }
                }
            }
        }
        true
    }

    fn handle_mouse_move(&mut self, position: Vec2) -> bool {
        if !self.open {
            return false;
        }
        self.hovered = self.item_at(position);
        true
    }

    fn handle_mouse_leave(&mut self) {
        self.hovered = None;
    }

    fn handle_scroll(&mut self, _delta: WheelDelta, _position: Vec2) -> bool {
        self.open
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState, _modifiers: Modifiers) -> bool {
        if !self.open {
            return false;
        }
        if state != ElementState::Pressed {
            return true;
        }
        match key {
            KeyCode::Escape => self.hide(),
            KeyCode::Down => self.hovered = self.step_hover(true),
            KeyCode::Up => self.hovered = self.step_hover(false),
            KeyCode::Home => {
                self.hovered = None;
                self.hovered = self.step_hover(true);
            }
            KeyCode::End => {
                self.hovered = None;
                self.hovered = self.step_hover(false);
            }
            KeyCode::Enter | KeyCode::Space => {
                if let Some(id) = self.hovered {
                    self.activate(id);
                }
            }
            _ => {}
        }
        true
    }

    fn handle_text_input(&mut self, _text: &str) -> bool {
        self.open
    }

    fn render_info(&self) -> RenderInfo {
        let rows = self
            .rows()
            .map(|(id, item, rect)| {
                let state = ItemVisualState::from_flags(
                    self.hovered == Some(id),
                    self.pressed == Some(id),
                    false,
                    item.enabled,
                )
                .with(ItemVisualState::CHECKED, item.checked);
                MenuRowInfo {
                    id,
                    rect,
                    kind: item.kind,
                    label: item.label.clone(),
                    shortcut: item.shortcut.clone(),
                    icon: item.icon.clone(),
                    state,
                }
            })
            .collect();
        RenderInfo::Menu(MenuRenderInfo {
            bounds: self.base.bounds(),
            open: self.open,
            rows,
            style: self.style.clone(),
        })
    }
}

/// One menu row.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuRowInfo {
    pub id: ItemId,
    pub rect: Rect,
    pub kind: MenuItemKind,
    pub label: String,
    pub shortcut: Option<String>,
    pub icon: Option<String>,
    pub state: ItemVisualState,
}

/// Render snapshot of a [`Menu`].
#[derive(Debug, Clone, PartialEq)]
pub struct MenuRenderInfo {
    pub bounds: Rect,
    pub open: bool,
    pub rows: Vec<MenuRowInfo>,
    pub style: MenuStyle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn click(menu: &mut Menu, point: Vec2) {
        let m = Modifiers::empty();
        menu.handle_mouse_button(MouseButton::Left, ElementState::Pressed, point, m);
        menu.handle_mouse_button(MouseButton::Left, ElementState::Released, point, m);
    }

    fn center_of(menu: &Menu, id: ItemId) -> Vec2 {
        menu.item_rect(id).unwrap().center()
    }

    #[test]
    fn test_menu_starts_hidden() {
        let menu = Menu::new();
        assert!(!menu.is_open());
        assert!(!menu.base().is_visible());
        assert!(!menu.is_modal());
    }

    #[test]
    fn test_layout_heights_per_kind() {
        let mut menu = Menu::new();
        let a = menu.add_item("Open");
        let sep = menu.add_separator();
        let b = menu.add_item("Save");
        menu.show_at(Vec2::new(10.0, 20.0));

        assert_eq!(menu.item_rect(a).unwrap().y, 24.0);
        assert_eq!(menu.item_rect(sep).unwrap().height, 9.0);
        assert_eq!(menu.item_rect(b).unwrap().y, 24.0 + 28.0 + 9.0);
        assert_eq!(menu.base().bounds().height, 4.0 * 2.0 + 28.0 * 2.0 + 9.0);
        assert_eq!(menu.base().bounds().width, 150.0);
    }

    #[test]
    fn test_radio_group_exclusive() {
        let mut menu = Menu::new();
        let small = menu.add_radio("Small", 1, true);
        let large = menu.add_radio("Large", 1, false);
        let other = menu.add_radio("Other group", 2, true);

        assert!(menu.set_item_checked(large, true));
        assert!(!menu.is_item_checked(small));
        assert!(menu.is_item_checked(large));
        assert!(menu.is_item_checked(other));
        assert_eq!(menu.checked_radio(1), Some(large));
    }

    #[test]
    fn test_click_activates_once_and_closes() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut menu = Menu::new().on_item_activated(move |id| sink.lock().unwrap().push(id));
        let wrap = menu.add_checkbox("Wrap", false);
        menu.show_at(Vec2::ZERO);

        let p = center_of(&menu, wrap);
        click(&mut menu, p);
        assert!(menu.is_item_checked(wrap));
        assert!(!menu.is_open());
        assert_eq!(*seen.lock().unwrap(), vec![wrap]);
    }

    #[test]
    fn test_separator_and_disabled_do_not_activate() {
        let mut menu = Menu::new();
        let sep = menu.add_separator();
        let off = menu.add_item("Off");
        menu.set_item_enabled(off, false);
        menu.show_at(Vec2::ZERO);

        let p = center_of(&menu, sep);
        click(&mut menu, p);
        let p = center_of(&menu, off);
        click(&mut menu, p);
        assert!(menu.is_open());
        assert!(!menu.activate(sep));
    }

    #[test]
    fn test_outside_press_closes_and_is_consumed() {
        let mut menu = Menu::new();
        menu.add_item("A");
        menu.show_at(Vec2::new(100.0, 100.0));
        let consumed = menu.handle_mouse_button(
            MouseButton::Left,
            ElementState::Pressed,
            Vec2::new(5.0, 5.0),
            Modifiers::empty(),
        );
        assert!(consumed);
        assert!(!menu.is_open());
        assert_eq!(menu.drain_requests().last(), Some(&WidgetRequest::ReleaseFocus));
    }

    #[test]
    fn test_keyboard_hover_skips_separators() {
        let mut menu = Menu::new();
        let a = menu.add_item("A");
        menu.add_separator();
        let b = menu.add_item("B");
        let c = menu.add_item("C");
        menu.set_item_enabled(c, false);
        menu.show_at(Vec2::ZERO);
        let m = Modifiers::empty();

        menu.handle_key(KeyCode::Down, ElementState::Pressed, m);
        assert_eq!(menu.hovered_item(), Some(a));
        menu.handle_key(KeyCode::Down, ElementState::Pressed, m);
        assert_eq!(menu.hovered_item(), Some(b));
        menu.handle_key(KeyCode::Down, ElementState::Pressed, m);
        assert_eq!(menu.hovered_item(), Some(a));
        menu.handle_key(KeyCode::Escape, ElementState::Pressed, m);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_show_at_within_flips() {
        let mut menu = Menu::new();
        menu.add_item("A");
        let screen = Rect::new(0.0, 0.0, 400.0, 300.0);
        menu.show_at_within(Vec2::new(350.0, 290.0), screen);
        let bounds = menu.base().bounds();
        assert_eq!(bounds.x, 200.0);
        assert_eq!(bounds.y, 290.0 - 36.0);
    }

    #[test]
    fn test_show_relative_to() {
        let mut menu = Menu::new();
        menu.add_item("A");
        let anchor = Rect::new(10.0, 10.0, 60.0, 20.0);
        menu.show_relative_to(anchor, MenuPlacement::Below);
        assert_eq!(menu.base().bounds().position(), Vec2::new(10.0, 30.0));
        menu.show_relative_to(anchor, MenuPlacement::Right);
        assert_eq!(menu.base().bounds().position(), Vec2::new(70.0, 10.0));
    }
}
