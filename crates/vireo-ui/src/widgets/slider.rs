//! Value slider.

use std::any::Any;
use std::sync::Arc;

use vireo_core::Color;
use vireo_core::geometry::Rect;
use vireo_core::math::{Vec2, clamp_f32};
use vireo_input::{ElementState, KeyCode, Modifiers, MouseButton};

use crate::render::{ItemVisualState, RenderInfo};
use crate::theme::Palette;
use crate::widget::{Orientation, ValueCallback, WheelDelta, Widget, WidgetBase, WidgetKind};

/// Visual style for [`Slider`].
#[derive(Debug, Clone, PartialEq)]
pub struct SliderStyle {
    pub track_color: Color,
    /// Portion of the track between min and the thumb.
    pub fill_color: Color,
    pub thumb_color: Color,
    pub thumb_hover_color: Color,
    pub thumb_active_color: Color,
    /// Track thickness across the axis.
    pub track_thickness: f32,
    /// Thumb extent along the axis.
    pub thumb_size: f32,
}

impl SliderStyle {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            track_color: palette.track,
            fill_color: palette.accent,
            thumb_color: palette.thumb,
            thumb_hover_color: Color::from_rgb_u8(100, 100, 110),
            thumb_active_color: palette.accent,
            track_thickness: 4.0,
            thumb_size: 12.0,
        }
    }
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self::from_palette(&Palette::dark())
    }
}

/// Picks a value in `[min, max]` by dragging a thumb.
///
/// Horizontal sliders grow left to right; vertical sliders grow bottom to
/// top. Programmatic setters never fire `on_change`; user input does.
pub struct Slider {
    base: WidgetBase,
    orientation: Orientation,
    min: f32,
    max: f32,
    value: f32,
    step: Option<f32>,
    style: SliderStyle,
    dragging: bool,
    drag_anchor: f32,
    thumb_hovered: bool,
    on_change: Option<ValueCallback<f32>>,
}

impl Slider {
    pub fn new(min: f32, max: f32) -> Self {
        let (min, max) = if max < min { (max, min) } else { (min, max) };
        let mut base = WidgetBase::new(Rect::new(0.0, 0.0, 160.0, 20.0));
        base.set_focusable(true);
        Self {
            base,
            orientation: Orientation::Horizontal,
            min,
            max,
            value: min,
            step: None,
            style: SliderStyle::default(),
            dragging: false,
            drag_anchor: 0.0,
            thumb_hovered: false,
            on_change: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.set_bounds(bounds);
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_value(mut self, value: f32) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.set_step(Some(step));
        self
    }

    pub fn with_style(mut self, style: SliderStyle) -> Self {
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

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn step(&self) -> Option<f32> {
        self.step
    }

    pub fn style(&self) -> &SliderStyle {
        &self.style
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Set the range (swapped if reversed) and re-clamp the value.
    pub fn set_range(&mut self, min: f32, max: f32) {
        let (min, max) = if max < min { (max, min) } else { (min, max) };
        self.min = min;
        self.max = max;
        self.value = self.constrain(self.value);
    }

    /// Step size for snapping. Non-positive or NaN steps disable snapping.
    pub fn set_step(&mut self, step: Option<f32>) {
        self.step = step.filter(|s| *s > 0.0);
        self.value = self.constrain(self.value);
    }

    /// Set the value, snapped and clamped. Returns whether it changed.
    pub fn set_value(&mut self, value: f32) -> bool {
        if value.is_nan() {
            return false;
        }
        let value = self.constrain(value);
        if value != self.value {
            self.value = value;
            true
        } else {
            false
        }
    }

    fn constrain(&self, value: f32) -> f32 {
        let value = match self.step {
            Some(step) => self.min + ((value - self.min) / step).round() * step,
            None => value,
        };
        clamp_f32(value, self.min, self.max)
    }

    /// Keyboard increment: the step, or 1% of the range without one.
    fn key_step(&self) -> f32 {
        self.step.unwrap_or((self.max - self.min) / 100.0)
    }

    fn set_value_from_user(&mut self, value: f32) -> bool {
        let changed = self.set_value(value);
        if changed {
            if let Some(callback) = self.on_change.clone() {
                callback(self.value);
            }
        }
        changed
    }

    /// Value position as a fraction of the range.
    pub fn fraction(&self) -> f32 {
        let range = self.max - self.min;
        if range <= 0.0 {
            0.0
        } else {
            (self.value - self.min) / range
        }
    }

    /// The span the thumb center can travel, along the axis.
    fn travel(&self) -> (f32, f32) {
        let bounds = self.base.bounds();
        let size = self.style.thumb_size;
        let half = size * 0.5;
        match self.orientation {
            Orientation::Horizontal => (bounds.x + half, (bounds.width - size).max(0.0)),
            Orientation::Vertical => (bounds.y + half, (bounds.height - size).max(0.0)),
        }
    }

    fn thumb_center(&self) -> f32 {
        let (start, length) = self.travel();
        match self.orientation {
            Orientation::Horizontal => start + self.fraction() * length,
            Orientation::Vertical => start + (1.0 - self.fraction()) * length,
        }
    }

    /// Thumb rectangle in absolute coordinates.
    pub fn thumb_rect(&self) -> Rect {
        let bounds = self.base.bounds();
        let size = self.style.thumb_size;
        let center = self.thumb_center();
        match self.orientation {
            Orientation::Horizontal => {
                Rect::new(center - size * 0.5, bounds.y, size, bounds.height)
            }
            Orientation::Vertical => Rect::new(bounds.x, center - size * 0.5, bounds.width, size),
        }
    }

    /// Track rectangle, centered across the axis.
    pub fn track_rect(&self) -> Rect {
        let bounds = self.base.bounds();
        let t = self.style.track_thickness;
        match self.orientation {
            Orientation::Horizontal => {
                Rect::new(bounds.x, bounds.y + (bounds.height - t) * 0.5, bounds.width, t)
            }
            Orientation::Vertical => {
                Rect::new(bounds.x + (bounds.width - t) * 0.5, bounds.y, t, bounds.height)
            }
        }
    }

    /// Map an axis coordinate of the thumb center to a value.
    pub fn value_at(&self, along: f32) -> f32 {
        let (start, length) = self.travel();
        let t = if length <= 0.0 {
            0.0
        } else {
            ((along - start) / length).clamp(0.0, 1.0)
        };
        let t = match self.orientation {
            Orientation::Horizontal => t,
            Orientation::Vertical => 1.0 - t,
        };
        self.min + t * (self.max - self.min)
    }

    fn current_thumb_color(&self) -> Color {
        if self.dragging {
            self.style.thumb_active_color
        } else if self.thumb_hovered {
            self.style.thumb_hover_color
        } else {
            self.style.thumb_color
        }
    }
}

impl Widget for Slider {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Slider
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
                if self.thumb_rect().contains(position) {
                    self.drag_anchor = along - self.thumb_center();
                } else {
                    self.drag_anchor = 0.0;
                    self.set_value_from_user(self.value_at(along));
                }
                self.dragging = true;
                true
            }
            ElementState::Released => {
                let was_dragging = self.dragging;
                self.dragging = false;
                was_dragging
            }
        }
    }

    fn handle_mouse_move(&mut self, position: Vec2) -> bool {
        if self.dragging {
            let along = self.orientation.along(position) - self.drag_anchor;
            self.set_value_from_user(self.value_at(along));
            return true;
        }
        self.thumb_hovered = self.thumb_rect().contains(position);
        self.hit_test(position)
    }

    fn handle_mouse_leave(&mut self) {
        self.thumb_hovered = false;
    }

    fn handle_scroll(&mut self, delta: WheelDelta, _position: Vec2) -> bool {
        let lines = if delta.lines.y != 0.0 { delta.lines.y } else { -delta.lines.x };
        if lines == 0.0 {
            return false;
        }
        self.set_value_from_user(self.value + lines * self.key_step());
        true
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState, _modifiers: Modifiers) -> bool {
        if state != ElementState::Pressed {
            return false;
        }
        let step = self.key_step();
        let page = (self.max - self.min) / 10.0;
        let target = match key {
            KeyCode::Left | KeyCode::Down => self.value - step,
            KeyCode::Right | KeyCode::Up => self.value + step,
            KeyCode::PageDown => self.value - page,
            KeyCode::PageUp => self.value + page,
            KeyCode::Home => self.min,
            KeyCode::End => self.max,
            _ => return false,
        };
        self.set_value_from_user(target);
        true
    }

    fn render_info(&self) -> RenderInfo {
        let track = self.track_rect();
        let thumb = self.thumb_rect();
        let center = self.thumb_center();
        let fill = match self.orientation {
            Orientation::Horizontal => {
                Rect::from_min_max(track.min(), Vec2::new(center, track.bottom()))
            }
            Orientation::Vertical => Rect::from_min_max(Vec2::new(track.x, center), track.max()),
        };
        RenderInfo::Slider(SliderRenderInfo {
            bounds: self.base.bounds(),
            orientation: self.orientation,
            value: self.value,
            min: self.min,
            max: self.max,
            track,
            fill,
            thumb,
            state: ItemVisualState::from_flags(
                self.thumb_hovered,
                self.dragging,
                false,
                self.base.is_enabled(),
            ),
            track_color: self.style.track_color,
            fill_color: self.style.fill_color,
            thumb_color: self.current_thumb_color(),
        })
    }
}

/// Render snapshot of a [`Slider`].
#[derive(Debug, Clone, PartialEq)]
pub struct SliderRenderInfo {
    pub bounds: Rect,
    pub orientation: Orientation,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub track: Rect,
    pub fill: Rect,
    pub thumb: Rect,
    pub state: ItemVisualState,
    pub track_color: Color,
    pub fill_color: Color,
    pub thumb_color: Color,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn slider() -> Slider {
        // 112 px wide, 12 px thumb: the center travels 100 px from x=6.
        Slider::new(0.0, 100.0).with_bounds(Rect::new(0.0, 0.0, 112.0, 20.0))
    }

    #[test]
    fn test_value_clamped_and_snapped() {
        let mut s = slider().with_step(10.0);
        assert!(s.set_value(47.0));
        assert_eq!(s.value(), 50.0);
        s.set_value(500.0);
        assert_eq!(s.value(), 100.0);
        s.set_value(-3.0);
        assert_eq!(s.value(), 0.0);
        assert!(!s.set_value(f32::NAN));
    }

    #[test]
    fn test_reversed_range_is_swapped() {
        let s = Slider::new(10.0, -10.0);
        assert_eq!((s.min(), s.max()), (-10.0, 10.0));
    }

    #[test]
    fn test_track_click_jumps_then_drags() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut s = slider().on_change(move |v| sink.lock().unwrap().push(v));
        let m = Modifiers::empty();

        assert!(s.handle_mouse_button(
            MouseButton::Left,
            ElementState::Pressed,
            Vec2::new(56.0, 10.0),
            m
        ));
        assert_eq!(s.value(), 50.0);
        assert!(s.is_dragging());

        s.handle_mouse_move(Vec2::new(86.0, 10.0));
        assert!(approx(s.value(), 80.0));
        s.handle_mouse_move(Vec2::new(500.0, 10.0));
        assert_eq!(s.value(), 100.0);

        assert!(s.handle_mouse_button(
            MouseButton::Left,
            ElementState::Released,
            Vec2::new(500.0, 10.0),
            m
        ));
        assert!(!s.is_dragging());
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(approx(seen[1], 80.0));
        assert_eq!(seen[2], 100.0);
    }

    #[test]
    fn test_thumb_drag_keeps_anchor() {
        let mut s = slider().with_value(50.0);
        let m = Modifiers::empty();
        // Thumb center at x=56; grab it 3 px right of center.
        s.handle_mouse_button(MouseButton::Left, ElementState::Pressed, Vec2::new(59.0, 10.0), m);
        assert_eq!(s.value(), 50.0);
        s.handle_mouse_move(Vec2::new(69.0, 10.0));
        assert!(approx(s.value(), 60.0));
    }

    #[test]
    fn test_vertical_grows_upward() {
        let s = Slider::new(0.0, 1.0)
            .with_orientation(Orientation::Vertical)
            .with_bounds(Rect::new(0.0, 0.0, 20.0, 112.0));
        assert_eq!(s.value_at(6.0), 1.0);
        assert_eq!(s.value_at(106.0), 0.0);
    }

    #[test]
    fn test_keys() {
        let mut s = slider().with_step(5.0);
        let m = Modifiers::empty();
        s.handle_key(KeyCode::Right, ElementState::Pressed, m);
        assert_eq!(s.value(), 5.0);
        s.handle_key(KeyCode::End, ElementState::Pressed, m);
        assert_eq!(s.value(), 100.0);
        s.handle_key(KeyCode::Down, ElementState::Pressed, m);
        assert_eq!(s.value(), 95.0);
        s.handle_key(KeyCode::Home, ElementState::Pressed, m);
        assert_eq!(s.value(), 0.0);
        assert!(!s.handle_key(KeyCode::Enter, ElementState::Pressed, m));
    }
}
