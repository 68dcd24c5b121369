//! Toolbar strip of buttons, toggles and separators.

use std::any::Any;
use std::sync::Arc;

use vireo_core::Color;
use vireo_core::geometry::Rect;
use vireo_core::math::Vec2;
use vireo_input::{ElementState, Modifiers, MouseButton};

use crate::items::{ItemId, ItemList, UserData};
use crate::render::{ItemVisualState, RenderInfo};
use crate::theme::Palette;
use crate::widget::{Orientation, ValueCallback, Widget, WidgetBase, WidgetKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarItemKind {
    Button,
    /// Latching button; `checked` flips on every click.
    Toggle,
    Separator,
}

/// A toolbar entry.
#[derive(Clone)]
pub struct ToolbarItem {
    pub kind: ToolbarItemKind,
    pub label: String,
    pub icon: Option<String>,
    pub tooltip: Option<String>,
    pub enabled: bool,
    pub checked: bool,
    pub user_data: Option<UserData>,
}

impl ToolbarItem {
    fn new(kind: ToolbarItemKind, label: String) -> Self {
        Self {
            kind,
            label,
            icon: None,
            tooltip: None,
            enabled: true,
            checked: false,
            user_data: None,
        }
    }

    fn is_interactive(&self) -> bool {
        self.enabled && self.kind != ToolbarItemKind::Separator
    }
}

/// Visual style for [`Toolbar`].
#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarStyle {
    pub background: Color,
    pub hover_color: Color,
    pub pressed_color: Color,
    pub checked_color: Color,
    pub text_color: Color,
    pub disabled_color: Color,
    pub separator_color: Color,
    /// Size of every button and toggle.
    pub item_size: Vec2,
    /// Extent of a separator along the toolbar axis.
    pub separator_thickness: f32,
    /// Gap between consecutive items.
    pub spacing: f32,
    /// Inset from the toolbar edges.
    pub padding: f32,
}

impl ToolbarStyle {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            background: palette.surface_raised,
            hover_color: palette.hover,
            pressed_color: palette.pressed,
            checked_color: palette.selection,
            text_color: palette.text,
            disabled_color: palette.text_disabled,
            separator_color: palette.divider,
            item_size: Vec2::new(28.0, 28.0),
            separator_thickness: 9.0,
            spacing: 2.0,
            padding: 4.0,
        }
    }
}

impl Default for ToolbarStyle {
    fn default() -> Self {
        Self::from_palette(&Palette::dark())
    }
}

/// Fixed-size items laid out along one axis.
pub struct Toolbar {
    base: WidgetBase,
    orientation: Orientation,
    items: ItemList<ToolbarItem>,
    style: ToolbarStyle,
    hovered: Option<ItemId>,
    pressed: Option<ItemId>,
    on_item_clicked: Option<ValueCallback<ItemId>>,
}

impl Toolbar {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            base: WidgetBase::new(Rect::new(0.0, 0.0, 400.0, 36.0)),
            orientation,
            items: ItemList::new(),
            style: ToolbarStyle::default(),
            hovered: None,
            pressed: None,
            on_item_clicked: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.set_bounds(bounds);
        self
    }

    pub fn with_style(mut self, style: ToolbarStyle) -> Self {
        self.style = style;
        self
    }

    pub fn on_item_clicked<F>(mut self, callback: F) -> Self
    where
        F: Fn(ItemId) + Send + Sync + 'static,
    {
        self.on_item_clicked = Some(Arc::new(callback));
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn style(&self) -> &ToolbarStyle {
        &self.style
    }

    pub fn add_button(&mut self, label: impl Into<String>) -> ItemId {
        self.items.push(ToolbarItem::new(ToolbarItemKind::Button, label.into()))
    }

    pub fn add_toggle(&mut self, label: impl Into<String>, checked: bool) -> ItemId {
        let mut item = ToolbarItem::new(ToolbarItemKind::Toggle, label.into());
        item.checked = checked;
        self.items.push(item)
    }

    pub fn add_separator(&mut self) -> ItemId {
        self.items
            .push(ToolbarItem::new(ToolbarItemKind::Separator, String::new()))
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
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.hovered = None;
        self.pressed = None;
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn item(&self, id: ItemId) -> Option<&ToolbarItem> {
        self.items.get(id)
    }

    pub fn set_item_enabled(&mut self, id: ItemId, enabled: bool) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn is_item_checked(&self, id: ItemId) -> bool {
        self.items.get(id).is_some_and(|item| item.checked)
    }

    /// Only toggles can be checked.
    pub fn set_item_checked(&mut self, id: ItemId, checked: bool) -> bool {
        match self.items.get_mut(id) {
            Some(item) if item.kind == ToolbarItemKind::Toggle => {
                item.checked = checked;
                true
            }
            _ => false,
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

    pub fn set_item_tooltip(&mut self, id: ItemId, tooltip: Option<String>) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.tooltip = tooltip;
                true
            }
            None => false,
        }
    }

    pub fn hovered_item(&self) -> Option<ItemId> {
        self.hovered
    }

    fn extent(&self, kind: ToolbarItemKind) -> f32 {
        match kind {
            ToolbarItemKind::Separator => self.style.separator_thickness,
            _ => self.orientation.along(self.style.item_size),
        }
    }

    /// Length along the axis needed to show every item.
    pub fn preferred_length(&self) -> f32 {
        let items: f32 = self.items.iter().map(|(_, item)| self.extent(item.kind)).sum();
        let gaps = self.items.len().saturating_sub(1) as f32 * self.style.spacing;
        items + gaps + self.style.padding * 2.0
    }

    fn layout(&self) -> impl Iterator<Item = (ItemId, &ToolbarItem, Rect)> {
        let bounds = self.base.bounds();
        let padding = self.style.padding;
        let mut cursor = self.orientation.along(bounds.position()) + padding;
        self.items.iter().map(move |(id, item)| {
            let extent = self.extent(item.kind);
            let rect = match self.orientation {
                Orientation::Horizontal => {
                    let height = match item.kind {
                        ToolbarItemKind::Separator => bounds.height - padding * 2.0,
                        _ => self.style.item_size.y,
                    };
                    Rect::new(cursor, bounds.y + padding, extent, height)
                }
                Orientation::Vertical => {
                    let width = match item.kind {
                        ToolbarItemKind::Separator => bounds.width - padding * 2.0,
                        _ => self.style.item_size.x,
                    };
                    Rect::new(bounds.x + padding, cursor, width, extent)
                }
            };
            cursor += extent + self.style.spacing;
            (id, item, rect)
        })
    }

    /// Absolute rect of an item.
    pub fn item_rect(&self, id: ItemId) -> Option<Rect> {
        self.layout().find(|(item, _, _)| *item == id).map(|(_, _, rect)| rect)
    }

    /// Item (separators included) under an absolute point.
    pub fn item_at(&self, point: Vec2) -> Option<ItemId> {
        self.layout()
            .find(|(_, _, rect)| rect.contains(point))
            .map(|(id, _, _)| id)
    }

    fn interactive_at(&self, point: Vec2) -> Option<ItemId> {
        self.item_at(point)
            .filter(|id| self.items.get(*id).is_some_and(|item| item.is_interactive()))
    }

    /// Click an item programmatically: flips a toggle and fires the callback.
    pub fn click(&mut self, id: ItemId) -> bool {
        let Some(item) = self.items.get_mut(id).filter(|item| item.is_interactive()) else {
            return false;
        };
        if item.kind == ToolbarItemKind::Toggle {
            item.checked = !item.checked;
        }
        tracing::trace!("Toolbar item {id} clicked");
        if let Some(callback) = self.on_item_clicked.clone() {
            callback(id);
        }
        true
    }
}

impl Widget for Toolbar {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Toolbar
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
        match state {
            ElementState::Pressed => {
                if !self.hit_test(position) {
                    return false;
                }
                self.pressed = self.interactive_at(position);
                true
            }
            ElementState::Released => {
                let Some(pressed) = self.pressed.take() else {
                    return self.hit_test(position);
                };
                if self.interactive_at(position) == Some(pressed) {
                    self.click(pressed);
                }
                true
            }
        }
    }

    fn handle_mouse_move(&mut self, position: Vec2) -> bool {
        self.hovered = self.interactive_at(position);
        self.hit_test(position)
    }

    fn handle_mouse_leave(&mut self) {
        self.hovered = None;
    }

    fn render_info(&self) -> RenderInfo {
        let items = self
            .layout()
            .map(|(id, item, rect)| {
                let state = ItemVisualState::from_flags(
                    self.hovered == Some(id),
                    self.pressed == Some(id),
                    false,
                    item.enabled,
                )
                .with(ItemVisualState::CHECKED, item.checked);
                ToolbarItemInfo {
                    id,
                    rect,
                    kind: item.kind,
                    label: item.label.clone(),
                    icon: item.icon.clone(),
                    tooltip: item.tooltip.clone(),
                    state,
                }
            })
            .collect();
        RenderInfo::Toolbar(ToolbarRenderInfo {
            bounds: self.base.bounds(),
            orientation: self.orientation,
            items,
            style: self.style.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarItemInfo {
    pub id: ItemId,
    pub rect: Rect,
    pub kind: ToolbarItemKind,
    pub label: String,
    pub icon: Option<String>,
    pub tooltip: Option<String>,
    pub state: ItemVisualState,
}

/// Render snapshot of a [`Toolbar`].
#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarRenderInfo {
    pub bounds: Rect,
    pub orientation: Orientation,
    pub items: Vec<ToolbarItemInfo>,
    pub style: ToolbarStyle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn toolbar() -> (Toolbar, [ItemId; 3]) {
        let mut bar =
            Toolbar::new(Orientation::Horizontal).with_bounds(Rect::new(0.0, 0.0, 300.0, 36.0));
        let new = bar.add_button("New");
        let sep = bar.add_separator();
        let bold = bar.add_toggle("Bold", false);
        (bar, [new, sep, bold])
    }

    fn click_at(bar: &mut Toolbar, point: Vec2) {
        let m = Modifiers::empty();
        bar.handle_mouse_button(MouseButton::Left, ElementState::Pressed, point, m);
        bar.handle_mouse_button(MouseButton::Left, ElementState::Released, point, m);
    }

    #[test]
    fn test_horizontal_layout() {
        let (bar, [new, sep, bold]) = toolbar();
        assert_eq!(bar.item_rect(new), Some(Rect::new(4.0, 4.0, 28.0, 28.0)));
        assert_eq!(bar.item_rect(sep), Some(Rect::new(34.0, 4.0, 9.0, 28.0)));
        assert_eq!(bar.item_rect(bold), Some(Rect::new(45.0, 4.0, 28.0, 28.0)));
        assert_eq!(bar.preferred_length(), 4.0 + 28.0 + 2.0 + 9.0 + 2.0 + 28.0 + 4.0);
    }

    #[test]
    fn test_vertical_layout() {
        let mut bar =
            Toolbar::new(Orientation::Vertical).with_bounds(Rect::new(10.0, 10.0, 36.0, 300.0));
        let a = bar.add_button("A");
        let b = bar.add_button("B");
        assert_eq!(bar.item_rect(a), Some(Rect::new(14.0, 14.0, 28.0, 28.0)));
        assert_eq!(bar.item_rect(b).map(|r| r.y), Some(44.0));
        assert_eq!(bar.item_at(Vec2::new(20.0, 50.0)), Some(b));
    }

    #[test]
    fn test_click_fires_and_toggles() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let (bar, [new, sep, bold]) = toolbar();
        let mut bar = bar.on_item_clicked(move |id| sink.lock().unwrap().push(id));

        click_at(&mut bar, Vec2::new(10.0, 10.0));
        click_at(&mut bar, Vec2::new(38.0, 10.0));
        click_at(&mut bar, Vec2::new(50.0, 10.0));
        assert!(bar.is_item_checked(bold));
        click_at(&mut bar, Vec2::new(50.0, 10.0));
        assert!(!bar.is_item_checked(bold));

        assert_eq!(*seen.lock().unwrap(), vec![new, bold, bold]);
        assert!(!bar.click(sep));
    }

    #[test]
    fn test_release_elsewhere_cancels() {
        let (mut bar, [new, ..]) = toolbar();
        let m = Modifiers::empty();
        bar.handle_mouse_button(MouseButton::Left, ElementState::Pressed, Vec2::new(10.0, 10.0), m);
        let RenderInfo::Toolbar(info) = bar.render_info() else {
            panic!("expected toolbar info");
        };
        assert!(info.items[0].state.contains(ItemVisualState::PRESSED));
        bar.handle_mouse_button(
            MouseButton::Left,
            ElementState::Released,
            Vec2::new(200.0, 10.0),
            m,
        );
        let RenderInfo::Toolbar(info) = bar.render_info() else {
            panic!("expected toolbar info");
        };
        assert!(!info.items[0].state.contains(ItemVisualState::PRESSED));
        assert_eq!(info.items[0].id, new);
    }

    #[test]
    fn test_disabled_items_ignore_hover() {
        let (mut bar, [new, ..]) = toolbar();
        bar.set_item_enabled(new, false);
        bar.handle_mouse_move(Vec2::new(10.0, 10.0));
        assert_eq!(bar.hovered_item(), None);
        assert!(!bar.set_item_checked(new, true));
    }
}
