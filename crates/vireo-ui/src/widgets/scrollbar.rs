//! Scroll bar widget.

use std::any::Any;
use std::sync::Arc;

use vireo_core::Color;
use vireo_core::geometry::Rect;
use vireo_core::math::{Vec2, clamp_f32};
use vireo_input::{ElementState, KeyCode, Modifiers, MouseButton};

use crate::render::{ItemVisualState, RenderInfo};
use crate::theme::Palette;
use crate::widget::{Orientation, ValueCallback, WheelDelta, Widget, WidgetBase, WidgetKind};

/// Visual theme for [`ScrollBar`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollBarStyle {
    /// Track background color.
    pub track_color: Color,
    /// Thumb color (normal state).
    pub thumb_color: Color,
    /// Thumb color when hovered.
    pub thumb_hover_color: Color,
    /// Thumb color when being dragged.
    pub thumb_active_color: Color,
    /// Border radius for the thumb.
    pub thumb_border_radius: f32,
    /// Minimum thumb length in pixels.
    pub min_thumb_length: f32,
    /// Scrollbar thickness in pixels.
    pub thickness: f32,
}

impl ScrollBarStyle {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            track_color: palette.track,
            thumb_color: palette.thumb,
            thumb_hover_color: Color::from_rgb_u8(100, 100, 110),
            thumb_active_color: Color::from_rgb_u8(120, 120, 130),
            thumb_border_radius: 3.0,
            min_thumb_length: 20.0,
            thickness: 8.0,
        }
    }
}

impl Default for ScrollBarStyle {
    fn default() -> Self {
        Self::from_palette(&Palette::dark())
    }
}

/// Scroll bar over a logical range `[min, max]`.
///
/// `page_size` is the visible portion of the scrolled content and sizes the
/// thumb. `value` is the position of the page start and always stays within
/// `[min, max]`. Vertical bars run top to bottom.
pub struct ScrollBar {
    base: WidgetBase,
    orientation: Orientation,
    min: f32,
    max: f32,
    value: f32,
    page_size: f32,
    step: f32,
    style: ScrollBarStyle,
    /// Anchor offset within the thumb while dragging.
    drag_anchor: Option<f32>,
    thumb_hovered: bool,
    on_change: Option<ValueCallback<f32>>,
}

impl ScrollBar {
    pub fn new(orientation: Orientation) -> Self {
        let style = ScrollBarStyle::default();
        let bounds = match orientation {
            Orientation::Horizontal => Rect::new(0.0, 0.0, 100.0, style.thickness),
            Orientation::Vertical => Rect::new(0.0, 0.0, style.thickness, 100.0),
        };
        Self {
            base: WidgetBase::new(bounds),
            orientation,
            min: 0.0,
            max: 100.0,
            value: 0.0,
            page_size: 10.0,
            step: 1.0,
            style,
            drag_anchor: None,
            thumb_hovered: false,
            on_change: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.set_bounds(bounds);
        self
    }

    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        self.set_range(min, max);
        self
    }

    pub fn with_page_size(mut self, page_size: f32) -> Self {
        self.set_page_size(page_size);
        self
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.set_step(step);
        self
    }

    pub fn with_style(mut self, style: ScrollBarStyle) -> Self {
        self.style = style;
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn get_value(&self) -> f32 {
        self.value
    }

    pub fn page_size(&self) -> f32 {
        self.page_size
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn style(&self) -> &ScrollBarStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: ScrollBarStyle) {
        self.style = style;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Set the range. A `max` below `min` collapses the range to `min`.
    pub fn set_range(&mut self, min: f32, max: f32) {
        self.min = min;
        self.max = max.max(min);
        self.value = clamp_f32(self.value, self.min, self.max);
    }

    pub fn set_page_size(&mut self, page_size: f32) {
        self.page_size = page_size.max(0.0);
    }

    pub fn set_step(&mut self, step: f32) {
        self.step = step.max(0.0);
    }

    /// Set scroll value, clamping to the range. Returns whether it moved.
    pub fn set_value(&mut self, value: f32) -> bool {
        if value.is_nan() {
            return false;
        }
        let old = self.value;
        self.value = clamp_f32(value, self.min, self.max);
        self.value != old
    }

    /// Adjust the value by a relative delta.
    pub fn scroll_by(&mut self, delta: f32) -> bool {
        self.set_value(self.value + delta)
    }

    pub fn line_up(&mut self) -> bool {
        self.scroll_by(-self.step)
    }

    pub fn line_down(&mut self) -> bool {
        self.scroll_by(self.step)
    }

    pub fn page_up(&mut self) -> bool {
        self.scroll_by(-self.page_increment())
    }

    pub fn page_down(&mut self) -> bool {
        self.scroll_by(self.page_increment())
    }

    fn page_increment(&self) -> f32 {
        if self.page_size > 0.0 { self.page_size } else { self.step }
    }

    fn scroll_from_user(&mut self, delta: f32) -> bool {
        let changed = self.scroll_by(delta);
        if changed {
            self.notify();
        }
        changed
    }

    fn notify(&self) {
        if let Some(callback) = self.on_change.clone() {
            callback(self.value);
        }
    }

    /// Track start and length along the axis.
    fn track(&self) -> (f32, f32) {
        let bounds = self.base.bounds();
        match self.orientation {
            Orientation::Horizontal => (bounds.x, bounds.width),
            Orientation::Vertical => (bounds.y, bounds.height),
        }
    }

    /// Ratio of page to the whole scrollable extent (0.0-1.0).
    pub fn thumb_ratio(&self) -> f32 {
        let total = (self.max - self.min) + self.page_size;
        if total <= 0.0 {
            return 1.0;
        }
        (self.page_size / total).clamp(0.0, 1.0)
    }

    /// Thumb length in pixels along the track.
    pub fn thumb_length(&self) -> f32 {
        let (_, track_length) = self.track();
        (self.thumb_ratio() * track_length)
            .max(self.style.min_thumb_length)
            .min(track_length)
    }

    /// Thumb start along the axis.
    fn thumb_start(&self) -> f32 {
        let (start, track_length) = self.track();
        let range = self.max - self.min;
        let frac = if range > 0.0 {
            (self.value - self.min) / range
        } else {
            0.0
        };
        start + frac * (track_length - self.thumb_length())
    }

    /// Thumb bounds in absolute coordinates.
    pub fn thumb_rect(&self) -> Rect {
        let bounds = self.base.bounds();
        let start = self.thumb_start();
        let length = self.thumb_length();
        match self.orientation {
            Orientation::Horizontal => Rect::new(start, bounds.y, length, bounds.height),
            Orientation::Vertical => Rect::new(bounds.x, start, bounds.width, length),
        }
    }

    /// Value whose thumb would start at `thumb_pos` along the axis.
    pub fn value_for_thumb_position(&self, thumb_pos: f32) -> f32 {
        let (start, track_length) = self.track();
        let available = track_length - self.thumb_length();
        if available <= 0.0 {
            return self.min;
        }
        let frac = ((thumb_pos - start) / available).clamp(0.0, 1.0);
        self.min + frac * (self.max - self.min)
    }

    /// Current thumb color based on state.
    pub fn current_thumb_color(&self) -> Color {
        if self.is_dragging() {
            self.style.thumb_active_color
        } else if self.thumb_hovered {
            self.style.thumb_hover_color
        } else {
            self.style.thumb_color
        }
    }
}

impl Widget for ScrollBar {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::ScrollBar
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
                let along = self.orientation.along(position);
                let thumb_start = self.thumb_start();
                if self.thumb_rect().contains(position) {
                    self.drag_anchor = Some(along - thumb_start);
                } else if along < thumb_start {
                    self.scroll_from_user(-self.page_increment());
                } else {
                    self.scroll_from_user(self.page_increment());
                }
                true
            }
            ElementState::Released => self.drag_anchor.take().is_some(),
        }
    }

    fn handle_mouse_move(&mut self, position: Vec2) -> bool {
        if let Some(anchor) = self.drag_anchor {
            let target = self.value_for_thumb_position(self.orientation.along(position) - anchor);
            if self.set_value(target) {
                self.notify();
            }
            return true;
        }
        self.thumb_hovered = self.thumb_rect().contains(position);
        self.hit_test(position)
    }

    fn handle_mouse_leave(&mut self) {
        self.thumb_hovered = false;
    }

    fn handle_scroll(&mut self, delta: WheelDelta, _position: Vec2) -> bool {
        let lines = match self.orientation {
            Orientation::Vertical => delta.lines.y,
            Orientation::Horizontal if delta.lines.x != 0.0 => delta.lines.x,
            Orientation::Horizontal => delta.lines.y,
        };
        if lines == 0.0 {
            return false;
        }
        self.scroll_from_user(-lines * self.step);
        true
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState, _modifiers: Modifiers) -> bool {
        if state != ElementState::Pressed {
            return false;
        }
        let delta = match (key, self.orientation) {
            (KeyCode::Up, Orientation::Vertical) | (KeyCode::Left, Orientation::Horizontal) => {
                -self.step
            }
            (KeyCode::Down, Orientation::Vertical) | (KeyCode::Right, Orientation::Horizontal) => {
                self.step
            }
            (KeyCode::PageUp, _) => -self.page_increment(),
            (KeyCode::PageDown, _) => self.page_increment(),
            (KeyCode::Home, _) => self.min - self.value,
            (KeyCode::End, _) => self.max - self.value,
            _ => return false,
        };
        self.scroll_from_user(delta);
        true
    }

    fn render_info(&self) -> RenderInfo {
        RenderInfo::ScrollBar(ScrollBarRenderInfo {
            bounds: self.base.bounds(),
            orientation: self.orientation,
            value: self.value,
            thumb: self.thumb_rect(),
            state: ItemVisualState::from_flags(
                self.thumb_hovered,
                self.is_dragging(),
                false,
                self.base.is_enabled(),
            ),
            track_color: self.style.track_color,
            thumb_color: self.current_thumb_color(),
            thumb_border_radius: self.style.thumb_border_radius,
        })
    }
}

/// Render snapshot of a [`ScrollBar`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollBarRenderInfo {
    /// Whole track.
    pub bounds: Rect,
    pub orientation: Orientation,
    pub value: f32,
    pub thumb: Rect,
    /// Thumb state.
    pub state: ItemVisualState,
    pub track_color: Color,
    pub thumb_color: Color,
    pub thumb_border_radius: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical() -> ScrollBar {
        // Range 0..=300 with a 100 page on a 200 px track: thumb is 50 px.
        ScrollBar::new(Orientation::Vertical)
            .with_bounds(Rect::new(0.0, 0.0, 10.0, 200.0))
            .with_range(0.0, 300.0)
            .with_page_size(100.0)
            .with_step(10.0)
    }

    #[test]
    fn test_set_value_clamps() {
        let mut bar = vertical();
        for v in [-50.0, 0.0, 120.5, 300.0, 1e9] {
            bar.set_value(v);
            assert_eq!(bar.get_value(), v.clamp(0.0, 300.0));
        }
        assert!(!bar.set_value(f32::NAN));
    }

    #[test]
    fn test_thumb_length_proportional_and_floored() {
        let mut bar = vertical();
        assert_eq!(bar.thumb_length(), 50.0);

        bar.set_range(0.0, 100_000.0);
        assert_eq!(bar.thumb_length(), bar.style().min_thumb_length);

        bar.set_range(0.0, 0.0);
        assert_eq!(bar.thumb_length(), 200.0);
    }

    #[test]
    fn test_thumb_position_tracks_value() {
        let mut bar = vertical();
        bar.set_value(150.0);
        assert_eq!(bar.thumb_rect(), Rect::new(0.0, 75.0, 10.0, 50.0));
        bar.set_value(300.0);
        assert_eq!(bar.thumb_rect().bottom(), 200.0);
    }

    #[test]
    fn test_thumb_drag_inverse_mapping() {
        let mut bar = vertical();
        let m = Modifiers::empty();
        assert!(bar.handle_mouse_button(
            MouseButton::Left,
            ElementState::Pressed,
            Vec2::new(5.0, 10.0),
            m
        ));
        assert!(bar.is_dragging());

        // Moving 75 px = half of the 150 px of travel.
        bar.handle_mouse_move(Vec2::new(5.0, 85.0));
        assert_eq!(bar.get_value(), 150.0);

        bar.handle_mouse_move(Vec2::new(5.0, 1000.0));
        assert_eq!(bar.get_value(), 300.0);

        assert!(bar.handle_mouse_button(
            MouseButton::Left,
            ElementState::Released,
            Vec2::new(5.0, 1000.0),
            m
        ));
        assert!(!bar.is_dragging());
    }

    #[test]
    fn test_track_click_pages_toward_click() {
        let mut bar = vertical();
        let m = Modifiers::empty();
        bar.handle_mouse_button(MouseButton::Left, ElementState::Pressed, Vec2::new(5.0, 190.0), m);
        assert_eq!(bar.get_value(), 100.0);
        bar.handle_mouse_button(
            MouseButton::Left,
            ElementState::Released,
            Vec2::new(5.0, 190.0),
            m,
        );

        bar.handle_mouse_button(MouseButton::Left, ElementState::Pressed, Vec2::new(5.0, 2.0), m);
        assert_eq!(bar.get_value(), 0.0);
        assert!(!bar.is_dragging());
    }

    #[test]
    fn test_wheel_steps() {
        let mut bar = vertical();
        let down = WheelDelta {
            lines: Vec2::new(0.0, -3.0),
            pixels: Vec2::new(0.0, -60.0),
        };
        assert!(bar.handle_scroll(down, Vec2::ZERO));
        assert_eq!(bar.get_value(), 30.0);
    }

    #[test]
    fn test_change_callback_fires_on_user_input_only() {
        let count = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = count.clone();
        let mut bar = vertical().on_change(move |_| {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });
        bar.set_value(20.0);
        bar.handle_key(KeyCode::Down, ElementState::Pressed, Modifiers::empty());
        bar.handle_key(KeyCode::Home, ElementState::Pressed, Modifiers::empty());
        bar.handle_key(KeyCode::Home, ElementState::Pressed, Modifiers::empty());
        assert_eq!(count.load(std::sync::atomic::Ordering::SeqCst), 2);
    }
}
