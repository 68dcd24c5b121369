//! Scripted input sequences.

use vireo_core::math::Vec2;
use vireo_input::{EventBatch, InputEvent, KeyCode, Modifiers, MouseButton};

/// Builds a list of [`InputEvent`]s from user-level actions.
///
/// Modifiers set with [`with_modifiers`](Self::with_modifiers) apply to the
/// key events added after it.
#[derive(Debug, Default, Clone)]
pub struct EventScript {
    events: Vec<InputEvent>,
    modifiers: Modifiers,
}

impl EventScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self.events.push(InputEvent::ModifiersChanged(modifiers));
        self
    }

    pub fn push(mut self, event: InputEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn move_to(self, x: f32, y: f32) -> Self {
        self.push(InputEvent::mouse_move(x, y))
    }

    pub fn press(self, x: f32, y: f32) -> Self {
        self.push(InputEvent::mouse_down(MouseButton::Left, x, y))
    }

    pub fn release(self, x: f32, y: f32) -> Self {
        self.push(InputEvent::mouse_up(MouseButton::Left, x, y))
    }

    /// Left press and release at one point.
    pub fn click(self, x: f32, y: f32) -> Self {
        self.press(x, y).release(x, y)
    }

    pub fn right_click(self, x: f32, y: f32) -> Self {
        self.push(InputEvent::mouse_down(MouseButton::Right, x, y))
            .push(InputEvent::mouse_up(MouseButton::Right, x, y))
    }

    /// Left drag from `from` to `to` in `steps` moves.
    pub fn drag(self, from: Vec2, to: Vec2, steps: u32) -> Self {
        let steps = steps.max(1);
        let mut script = self.press(from.x, from.y);
        for i in 1..=steps {
            let p = from.lerp(to, i as f32 / steps as f32);
            script = script.move_to(p.x, p.y);
        }
        script.release(to.x, to.y)
    }

    /// Wheel by `lines` (positive scrolls content up) at a point.
    pub fn wheel(self, x: f32, y: f32, lines: f32) -> Self {
        self.push(InputEvent::MouseWheel {
            delta: Vec2::new(0.0, lines),
            position: Vec2::new(x, y),
        })
    }

    /// Key press and release with the current modifiers.
    pub fn key(self, key: KeyCode) -> Self {
        let modifiers = self.modifiers;
        self.push(InputEvent::key_down(key, modifiers))
            .push(InputEvent::key_up(key, modifiers))
    }

    /// Committed text, without key events.
    pub fn text(self, text: &str) -> Self {
        self.push(InputEvent::text(text))
    }

    pub fn build(self) -> Vec<InputEvent> {
        self.events
    }

    pub fn into_batch(self) -> EventBatch {
        EventBatch::new(self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vireo_input::ElementState;

    #[test]
    fn test_drag_ends_at_target() {
        let events = EventScript::new()
            .drag(Vec2::ZERO, Vec2::new(10.0, 0.0), 2)
            .build();
        assert_eq!(events.len(), 4);
        assert_eq!(events[1], InputEvent::mouse_move(5.0, 0.0));
        assert_eq!(events[3], InputEvent::mouse_up(MouseButton::Left, 10.0, 0.0));
    }

    #[test]
    fn test_modifiers_apply_to_keys() {
        let events = EventScript::new()
            .with_modifiers(Modifiers::SHIFT)
            .key(KeyCode::Tab)
            .build();
        assert_eq!(
            events[1],
            InputEvent::Key {
                key: KeyCode::Tab,
                state: ElementState::Pressed,
                modifiers: Modifiers::SHIFT,
            }
        );
    }
}
