//! Push and toggle buttons.

use std::any::Any;
use std::sync::Arc;

use vireo_core::Color;
use vireo_core::geometry::Rect;
use vireo_core::math::Vec2;
use vireo_input::{ElementState, KeyCode, Modifiers, MouseButton};

use crate::render::{ItemVisualState, RenderInfo};
use crate::theme::Palette;
use crate::widget::{ClickCallback, ValueCallback, Widget, WidgetBase, WidgetKind};

/// Visual style for [`Button`].
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonStyle {
    pub background: Color,
    pub hover_background: Color,
    pub pressed_background: Color,
    /// Background of a toggle button in the checked state.
    pub checked_background: Color,
    pub text_color: Color,
    pub disabled_text_color: Color,
    pub border_color: Color,
    pub border_width: f32,
    pub corner_radius: f32,
}

impl ButtonStyle {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            background: palette.surface_raised,
            hover_background: Color::from_rgb_u8(70, 70, 90),
            pressed_background: Color::from_rgb_u8(90, 90, 110),
            checked_background: palette.accent,
            text_color: palette.text,
            disabled_text_color: palette.text_disabled,
            border_color: palette.border,
            border_width: 1.0,
            corner_radius: 4.0,
        }
    }
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self::from_palette(&Palette::dark())
    }
}

/// Clickable button, optionally latching (toggle mode).
///
/// A click is a left press inside followed by a left release inside.
/// Releasing outside cancels. Space or Enter activate a focused button.
pub struct Button {
    base: WidgetBase,
    label: String,
    icon: Option<String>,
    style: ButtonStyle,
    toggle: bool,
    checked: bool,
    hovered: bool,
    pressed: bool,
    on_click: Option<ClickCallback>,
    on_toggle: Option<ValueCallback<bool>>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        let mut base = WidgetBase::new(Rect::new(0.0, 0.0, 100.0, 28.0));
        base.set_focusable(true);
        Self {
            base,
            label: label.into(),
            icon: None,
            style: ButtonStyle::default(),
            toggle: false,
            checked: false,
            hovered: false,
            pressed: false,
            on_click: None,
            on_toggle: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.set_bounds(bounds);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// Make this a toggle button that latches `checked` on every click.
    pub fn toggle(mut self, toggle: bool) -> Self {
        self.toggle = toggle;
        self
    }

    pub fn on_click<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_click = Some(Arc::new(callback));
        self
    }

    pub fn on_toggle<F>(mut self, callback: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_toggle = Some(Arc::new(callback));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Set the label. Returns true if it changed.
    pub fn set_label(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        if self.label != label {
            self.label = label;
            true
        } else {
            false
        }
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn set_icon(&mut self, icon: Option<String>) {
        self.icon = icon;
    }

    pub fn style(&self) -> &ButtonStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: ButtonStyle) {
        self.style = style;
    }

    pub fn is_toggle(&self) -> bool {
        self.toggle
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set the checked state without firing callbacks. Ignored for push buttons.
    pub fn set_checked(&mut self, checked: bool) {
        if self.toggle {
            self.checked = checked;
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Activate as if clicked: flips a toggle and fires callbacks.
    pub fn click(&mut self) {
        if !self.base.is_enabled() {
            return;
        }
        if self.toggle {
            self.checked = !self.checked;
            if let Some(callback) = self.on_toggle.clone() {
                callback(self.checked);
            }
        }
        if let Some(callback) = self.on_click.clone() {
            callback();
        }
        tracing::debug!("Button clicked: {}", self.label);
    }

    fn current_background(&self) -> Color {
        if self.pressed && self.hovered {
            self.style.pressed_background
        } else if self.hovered {
            self.style.hover_background
        } else if self.checked {
            self.style.checked_background
        } else {
            self.style.background
        }
    }
}

impl Widget for Button {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Button
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
                self.pressed = true;
                self.hovered = true;
                true
            }
            ElementState::Released => {
                if !self.pressed {
                    return false;
                }
                self.pressed = false;
                if self.hit_test(position) {
                    self.click();
                }
                true
            }
        }
    }

    fn handle_mouse_move(&mut self, position: Vec2) -> bool {
        self.hovered = self.hit_test(position);
        self.hovered
    }

    fn handle_mouse_leave(&mut self) {
        self.hovered = false;
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState, _modifiers: Modifiers) -> bool {
        if state != ElementState::Pressed {
            return false;
        }
        match key {
            KeyCode::Space | KeyCode::Enter => {
                self.click();
                true
            }
            _ => false,
        }
    }

    fn render_info(&self) -> RenderInfo {
        let state = ItemVisualState::from_flags(
            self.hovered,
            self.pressed,
            false,
            self.base.is_enabled(),
        )
        .with(ItemVisualState::CHECKED, self.checked);
        let text_color = if self.base.is_enabled() {
            self.style.text_color
        } else {
            self.style.disabled_text_color
        };
        RenderInfo::Button(ButtonRenderInfo {
            bounds: self.base.bounds(),
            label: self.label.clone(),
            icon: self.icon.clone(),
            state,
            background: self.current_background(),
            text_color,
            border_color: self.style.border_color,
            border_width: self.style.border_width,
            corner_radius: self.style.corner_radius,
        })
    }
}

/// Render snapshot of a [`Button`].
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonRenderInfo {
    pub bounds: Rect,
    pub label: String,
    pub icon: Option<String>,
    pub state: ItemVisualState,
    /// Background already resolved for the current state.
    pub background: Color,
    pub text_color: Color,
    pub border_color: Color,
    pub border_width: f32,
    pub corner_radius: f32,
}
