//! Dialog window with title bar, close button and footer buttons.
//!
//! Children added under a dialog in the [`GuiContext`](crate::GuiContext)
//! form its content. Dragging the title bar moves the dialog and queues a
//! [`WidgetRequest::TranslateChildren`] so its children follow.

use std::any::Any;
use std::sync::Arc;

use vireo_core::Color;
use vireo_core::geometry::Rect;
use vireo_core::math::Vec2;
use vireo_input::{ElementState, KeyCode, Modifiers, MouseButton};

use crate::items::{ItemId, ItemList};
use crate::render::{ItemVisualState, RenderInfo};
use crate::theme::Palette;
use crate::widget::{ValueCallback, WheelDelta, Widget, WidgetBase, WidgetKind, WidgetRequest};

/// How a dialog was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogResult {
    Ok,
    /// Escape, the close button, or a cancel button.
    Cancelled,
    Yes,
    No,
    Apply,
    Custom(u32),
}

/// A footer button.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogButton {
    pub text: String,
    /// Result the dialog closes with when this button is clicked.
    pub result: DialogResult,
    pub enabled: bool,
}

/// Part of a dialog under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPart {
    TitleBar,
    CloseButton,
    Button(ItemId),
    Body,
}

/// Visual style for [`Dialog`].
#[derive(Debug, Clone, PartialEq)]
pub struct DialogStyle {
    pub background: Color,
    pub title_bar_color: Color,
    pub title_text_color: Color,
    pub border_color: Color,
    pub close_button_color: Color,
    pub close_hover_color: Color,
    pub footer_color: Color,
    pub button_color: Color,
    pub button_hover_color: Color,
    pub button_pressed_color: Color,
    pub button_text_color: Color,
    pub disabled_text_color: Color,
    pub title_bar_height: f32,
    pub close_button_size: f32,
    pub footer_height: f32,
    pub button_size: Vec2,
    pub button_spacing: f32,
    pub padding: f32,
    pub corner_radius: f32,
}

impl DialogStyle {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            background: palette.surface,
            title_bar_color: palette.surface_raised,
            title_text_color: palette.text,
            border_color: palette.border,
            close_button_color: palette.text_muted,
            close_hover_color: Color::from_rgb_u8(200, 60, 60),
            footer_color: palette.surface,
            button_color: palette.surface_raised,
            button_hover_color: palette.hover,
            button_pressed_color: palette.pressed,
            button_text_color: palette.text,
            disabled_text_color: palette.text_disabled,
            title_bar_height: 28.0,
            close_button_size: 20.0,
            footer_height: 44.0,
            button_size: Vec2::new(80.0, 28.0),
            button_spacing: 8.0,
            padding: 8.0,
            corner_radius: 6.0,
        }
    }
}

impl Default for DialogStyle {
    fn default() -> Self {
        Self::from_palette(&Palette::dark())
    }
}

/// Closable, draggable dialog.
pub struct Dialog {
    base: WidgetBase,
    title: String,
    style: DialogStyle,
    open: bool,
    modal: bool,
    closable: bool,
    buttons: ItemList<DialogButton>,
    result: Option<DialogResult>,
    /// Last cursor position while dragging the title bar.
    drag_from: Option<Vec2>,
    hovered: Option<DialogPart>,
    pressed: Option<DialogPart>,
    on_close: Option<ValueCallback<DialogResult>>,
}

impl Dialog {
    /// A closed, modal, closable dialog.
    pub fn new(title: impl Into<String>) -> Self {
        let mut base = WidgetBase::new(Rect::new(0.0, 0.0, 400.0, 300.0));
        base.set_visible(false);
        base.set_focusable(true);
        Self {
            base,
            title: title.into(),
            style: DialogStyle::default(),
            open: false,
            modal: true,
            closable: true,
            buttons: ItemList::new(),
            result: None,
            drag_from: None,
            hovered: None,
            pressed: None,
            on_close: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.set_bounds(bounds);
        self
    }

    pub fn with_style(mut self, style: DialogStyle) -> Self {
        self.style = style;
        self
    }

    pub fn modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn on_close<F>(mut self, callback: F) -> Self
    where
        F: Fn(DialogResult) + Send + Sync + 'static,
    {
        self.on_close = Some(Arc::new(callback));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn style(&self) -> &DialogStyle {
        &self.style
    }

    pub fn is_modal_dialog(&self) -> bool {
        self.modal
    }

    pub fn set_modal(&mut self, modal: bool) {
        self.modal = modal;
    }

    pub fn is_closable(&self) -> bool {
        self.closable
    }

    pub fn set_closable(&mut self, closable: bool) {
        self.closable = closable;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    /// Result of the last close; `None` while open or never closed.
    pub fn result(&self) -> Option<DialogResult> {
        self.result
    }

    // Buttons

    pub fn add_button(&mut self, text: impl Into<String>, result: DialogResult) -> ItemId {
        self.buttons.push(DialogButton {
            text: text.into(),
            result,
            enabled: true,
        })
    }

    pub fn remove_button(&mut self, id: ItemId) -> bool {
        self.buttons.remove(id).is_some()
    }

    pub fn button(&self, id: ItemId) -> Option<&DialogButton> {
        self.buttons.get(id)
    }

    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    pub fn set_button_enabled(&mut self, id: ItemId, enabled: bool) -> bool {
        match self.buttons.get_mut(id) {
            Some(button) => {
                button.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn set_button_text(&mut self, id: ItemId, text: impl Into<String>) -> bool {
        match self.buttons.get_mut(id) {
            Some(button) => {
                button.text = text.into();
                true
            }
            None => false,
        }
    }

    // Open / close

    pub fn open(&mut self) {
        self.open = true;
        self.result = None;
        self.hovered = None;
        self.pressed = None;
        self.drag_from = None;
        self.base.set_visible(true);
        self.base.request(WidgetRequest::BringToFront);
        self.base.request(WidgetRequest::Focus);
        tracing::debug!("Dialog '{}' opened", self.title);
    }

    /// Close with `result`. Returns false when already closed.
    pub fn close(&mut self, result: DialogResult) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.result = Some(result);
        self.drag_from = None;
        self.pressed = None;
        self.hovered = None;
        self.base.set_visible(false);
        self.base.request(WidgetRequest::ReleaseFocus);
        tracing::debug!("Dialog '{}' closed: {:?}", self.title, result);
        if let Some(callback) = self.on_close.clone() {
            callback(result);
        }
        true
    }

    /// Move the dialog so it is centered in `area`; children follow.
    pub fn center_in(&mut self, area: Rect) {
        let bounds = self.base.bounds();
        let delta = area.center() - bounds.center();
        self.move_by(delta);
    }

    fn move_by(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        let bounds = self.base.bounds().translate(delta);
        self.base.set_bounds(bounds);
        self.base.request(WidgetRequest::TranslateChildren(delta));
    }

    // Geometry

    pub fn title_bar_rect(&self) -> Rect {
        let b = self.base.bounds();
        Rect::new(b.x, b.y, b.width, self.style.title_bar_height)
    }

    pub fn close_button_rect(&self) -> Option<Rect> {
        if !self.closable {
            return None;
        }
        let bar = self.title_bar_rect();
        let size = self.style.close_button_size;
        Some(Rect::new(
            bar.right() - self.style.padding - size,
            bar.y + (bar.height - size) * 0.5,
            size,
            size,
        ))
    }

    pub fn footer_rect(&self) -> Option<Rect> {
        if self.buttons.is_empty() {
            return None;
        }
        let b = self.base.bounds();
        let h = self.style.footer_height;
        Some(Rect::new(b.x, b.bottom() - h, b.width, h))
    }

    /// Area between the title bar and the footer.
    pub fn content_rect(&self) -> Rect {
        let b = self.base.bounds();
        let top = b.y + self.style.title_bar_height;
        let bottom = self.footer_rect().map_or(b.bottom(), |f| f.y);
        Rect::new(b.x, top, b.width, (bottom - top).max(0.0))
    }

    /// Footer buttons, right-aligned, in insertion order.
    fn button_layout(&self) -> Vec<(ItemId, Rect)> {
        let Some(footer) = self.footer_rect() else {
            return Vec::new();
        };
        let size = self.style.button_size;
        let n = self.buttons.len() as f32;
        let total = n * size.x + (n - 1.0) * self.style.button_spacing;
        let mut x = footer.right() - self.style.padding - total;
        let y = footer.y + (footer.height - size.y) * 0.5;
        self.buttons
            .ids()
            .map(|id| {
                let rect = Rect::new(x, y, size.x, size.y);
                x += size.x + self.style.button_spacing;
                (id, rect)
            })
            .collect()
    }

    pub fn button_rect(&self, id: ItemId) -> Option<Rect> {
        self.button_layout()
            .into_iter()
            .find(|(button, _)| *button == id)
            .map(|(_, rect)| rect)
    }

    /// Which part of the dialog is under `point`.
    pub fn part_at(&self, point: Vec2) -> Option<DialogPart> {
        if !self.base.bounds().contains(point) {
            return None;
        }
        if self.close_button_rect().is_some_and(|r| r.contains(point)) {
            return Some(DialogPart::CloseButton);
        }
        if self.title_bar_rect().contains(point) {
            return Some(DialogPart::TitleBar);
        }
        for (id, rect) in self.button_layout() {
            if rect.contains(point) {
                return Some(DialogPart::Button(id));
            }
        }
        Some(DialogPart::Body)
    }

    fn is_part_enabled(&self, part: DialogPart) -> bool {
        match part {
            DialogPart::Button(id) => self.buttons.get(id).is_some_and(|b| b.enabled),
            _ => true,
        }
    }

    fn activate(&mut self, part: DialogPart) {
        match part {
            DialogPart::CloseButton => {
                self.close(DialogResult::Cancelled);
            }
            DialogPart::Button(id) => {
                if let Some(result) = self.buttons.get(id).filter(|b| b.enabled).map(|b| b.result) {
                    self.close(result);
                }
            }
            _ => {}
        }
    }

    /// First enabled button closing with `Ok`, triggered by Enter.
    fn default_button(&self) -> Option<ItemId> {
        self.buttons
            .iter()
            .find(|(_, b)| b.enabled && b.result == DialogResult::Ok)
            .map(|(id, _)| id)
    }

    fn swallows_outside(&self) -> bool {
        self.open && self.modal
    }
}

impl Widget for Dialog {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Dialog
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn is_modal(&self) -> bool {
        self.open && self.modal && self.base.is_visible()
    }

    /// Hiding an open dialog closes it as cancelled.
    fn visibility_changed(&mut self, visible: bool) {
        if !visible {
            self.close(DialogResult::Cancelled);
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
        let part = self.part_at(position);
        if button != MouseButton::Left {
            return part.is_some() || self.swallows_outside();
        }
        match state {
            ElementState::Pressed => {
                let Some(part) = part else {
                    return self.swallows_outside();
                };
                match part {
                    DialogPart::TitleBar => self.drag_from = Some(position),
                    DialogPart::Body => {}
                    _ if self.is_part_enabled(part) => self.pressed = Some(part),
                    _ => {}
                }
                true
            }
            ElementState::Released => {
                if self.drag_from.take().is_some() {
                    return true;
                }
                if let Some(pressed) = self.pressed.take() {
                    if part == Some(pressed) {
                        self.activate(pressed);
                    }
                    return true;
                }
                part.is_some() || self.swallows_outside()
            }
        }
    }

    fn handle_mouse_move(&mut self, position: Vec2) -> bool {
        if !self.open {
            return false;
        }
        if let Some(from) = self.drag_from {
            self.move_by(position - from);
            self.drag_from = Some(position);
            return true;
        }
        self.hovered = self.part_at(position);
        self.hovered.is_some() || self.swallows_outside()
    }

    fn handle_mouse_leave(&mut self) {
        self.hovered = None;
    }

    fn handle_scroll(&mut self, _delta: WheelDelta, position: Vec2) -> bool {
        self.open && (self.base.bounds().contains(position) || self.modal)
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState, _modifiers: Modifiers) -> bool {
        if !self.open {
            return false;
        }
        if state == ElementState::Pressed {
            match key {
                KeyCode::Escape => {
                    self.close(DialogResult::Cancelled);
                    return true;
                }
                KeyCode::Enter => {
                    if let Some(id) = self.default_button() {
                        self.activate(DialogPart::Button(id));
                        return true;
                    }
                }
                _ => {}
            }
        }
        // Tab stays unconsumed so focus can cycle inside the dialog.
        self.modal && key != KeyCode::Tab
    }

    fn handle_text_input(&mut self, _text: &str) -> bool {
        self.swallows_outside()
    }

    fn render_info(&self) -> RenderInfo {
        let part_state = |part: DialogPart| {
            ItemVisualState::from_flags(
                self.hovered == Some(part),
                self.pressed == Some(part),
                false,
                self.is_part_enabled(part),
            )
        };
        let buttons = self
            .button_layout()
            .into_iter()
            .filter_map(|(id, rect)| {
                let button = self.buttons.get(id)?;
                Some(DialogButtonInfo {
                    id,
                    rect,
                    text: button.text.clone(),
                    result: button.result,
                    state: part_state(DialogPart::Button(id)),
                })
            })
            .collect();
        RenderInfo::Dialog(DialogRenderInfo {
            bounds: self.base.bounds(),
            title: self.title.clone(),
            title_bar: self.title_bar_rect(),
            close_button: self.close_button_rect(),
            close_state: part_state(DialogPart::CloseButton),
            content: self.content_rect(),
            footer: self.footer_rect(),
            buttons,
            open: self.open,
            modal: self.modal,
            dragging: self.is_dragging(),
            style: self.style.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogButtonInfo {
    pub id: ItemId,
    pub rect: Rect,
    pub text: String,
    pub result: DialogResult,
    pub state: ItemVisualState,
}

/// Render snapshot of a [`Dialog`].
#[derive(Debug, Clone, PartialEq)]
pub struct DialogRenderInfo {
    pub bounds: Rect,
    pub title: String,
    pub title_bar: Rect,
    pub close_button: Option<Rect>,
    pub close_state: ItemVisualState,
    pub content: Rect,
    pub footer: Option<Rect>,
    pub buttons: Vec<DialogButtonInfo>,
    pub open: bool,
    pub modal: bool,
    pub dragging: bool,
    pub style: DialogStyle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn dialog() -> (Dialog, ItemId, ItemId) {
        let mut d = Dialog::new("Save changes?").with_bounds(Rect::new(100.0, 100.0, 400.0, 200.0));
        let ok = d.add_button("OK", DialogResult::Ok);
        let cancel = d.add_button("Cancel", DialogResult::Cancelled);
        d.open();
        (d, ok, cancel)
    }

    fn click(d: &mut Dialog, point: Vec2) {
        let m = Modifiers::empty();
        d.handle_mouse_button(MouseButton::Left, ElementState::Pressed, point, m);
        d.handle_mouse_button(MouseButton::Left, ElementState::Released, point, m);
    }

    #[test]
    fn test_geometry() {
        let (d, ok, cancel) = dialog();
        assert_eq!(d.close_button_rect(), Some(Rect::new(472.0, 104.0, 20.0, 20.0)));
        assert_eq!(d.footer_rect(), Some(Rect::new(100.0, 256.0, 400.0, 44.0)));
        assert_eq!(d.content_rect(), Rect::new(100.0, 128.0, 400.0, 128.0));
        // 80 + 8 + 80 wide, right edge at 500 - 8.
        assert_eq!(d.button_rect(ok), Some(Rect::new(324.0, 264.0, 80.0, 28.0)));
        assert_eq!(d.button_rect(cancel).map(|r| r.right()), Some(492.0));
    }

    #[test]
    fn test_footer_button_closes_with_its_result() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let (d, ok, _) = dialog();
        let mut d = d.on_close(move |r| sink.lock().unwrap().push(r));
        let center = d.button_rect(ok).unwrap().center();
        click(&mut d, center);
        assert!(!d.is_open());
        assert_eq!(d.result(), Some(DialogResult::Ok));
        assert_eq!(*seen.lock().unwrap(), vec![DialogResult::Ok]);
        assert!(!d.close(DialogResult::No));
    }

    #[test]
    fn test_close_button_and_escape_cancel() {
        let (mut d, _, _) = dialog();
        click(&mut d, Vec2::new(480.0, 110.0));
        assert_eq!(d.result(), Some(DialogResult::Cancelled));

        d.open();
        assert_eq!(d.result(), None);
        assert!(d.handle_key(KeyCode::Escape, ElementState::Pressed, Modifiers::empty()));
        assert_eq!(d.result(), Some(DialogResult::Cancelled));
    }

    #[test]
    fn test_enter_triggers_ok() {
        let (mut d, _, _) = dialog();
        d.handle_key(KeyCode::Enter, ElementState::Pressed, Modifiers::empty());
        assert_eq!(d.result(), Some(DialogResult::Ok));
    }

    #[test]
    fn test_title_drag_moves_and_requests_translation() {
        let (mut d, _, _) = dialog();
        d.drain_requests();
        let m = Modifiers::empty();
        d.handle_mouse_button(MouseButton::Left, ElementState::Pressed, Vec2::new(200.0, 110.0), m);
        assert!(d.is_dragging());
        d.handle_mouse_move(Vec2::new(230.0, 90.0));
        d.handle_mouse_move(Vec2::new(240.0, 95.0));
        d.handle_mouse_button(MouseButton::Left, ElementState::Released, Vec2::new(240.0, 95.0), m);

        assert_eq!(d.base().bounds().position(), Vec2::new(140.0, 85.0));
        assert_eq!(
            d.drain_requests(),
            vec![
                WidgetRequest::TranslateChildren(Vec2::new(30.0, -20.0)),
                WidgetRequest::TranslateChildren(Vec2::new(10.0, 5.0)),
            ]
        );
    }

    #[test]
    fn test_modal_swallows_outside_input() {
        let (mut d, _, _) = dialog();
        assert!(d.is_modal());
        let m = Modifiers::empty();
        assert!(d.handle_mouse_button(
            MouseButton::Left,
            ElementState::Pressed,
            Vec2::new(5.0, 5.0),
            m
        ));
        assert!(d.is_open());

        d.set_modal(false);
        assert!(!d.is_modal());
        assert!(!d.handle_mouse_button(
            MouseButton::Left,
            ElementState::Pressed,
            Vec2::new(5.0, 5.0),
            m
        ));
    }

    #[test]
    fn test_not_closable_has_no_close_button() {
        let d = Dialog::new("Progress").closable(false);
        assert_eq!(d.close_button_rect(), None);
        assert_eq!(d.footer_rect(), None);
        assert_eq!(d.content_rect().height, 300.0 - 28.0);
    }
}
