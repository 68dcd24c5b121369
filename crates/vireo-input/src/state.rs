use vireo_core::alloc::HashSet;
use vireo_core::math::Vec2;

use crate::event::{ElementState, InputEvent, KeyCode, Modifiers, MouseButton};

/// Snapshot of pointer and keyboard state, folded from input events.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    cursor: Option<Vec2>,
    buttons: HashSet<MouseButton>,
    keys: HashSet<KeyCode>,
    modifiers: Modifiers,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the state.
    pub fn update(&mut self, event: &InputEvent) {
        match event {
            InputEvent::MouseMoved { position } | InputEvent::MouseWheel { position, .. } => {
                self.cursor = Some(*position);
            }
            InputEvent::MouseButton {
                button,
                state,
                position,
            } => {
                self.cursor = Some(*position);
                match state {
                    ElementState::Pressed => {
                        self.buttons.insert(*button);
                    }
                    ElementState::Released => {
                        self.buttons.remove(button);
                    }
                }
            }
            InputEvent::Key {
                key,
                state,
                modifiers,
            } => {
                self.modifiers = *modifiers;
                match state {
                    ElementState::Pressed => {
                        self.keys.insert(*key);
                    }
                    ElementState::Released => {
                        self.keys.remove(key);
                    }
                }
            }
            InputEvent::ModifiersChanged(modifiers) => self.modifiers = *modifiers,
            InputEvent::CursorLeft => {
                self.cursor = None;
                self.buttons.clear();
            }
            InputEvent::Text { .. } => {}
        }
    }

    /// Last known cursor position, `None` while the cursor is outside the window.
    pub fn cursor_position(&self) -> Option<Vec2> {
        self.cursor
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    pub fn any_button_pressed(&self) -> bool {
        !self.buttons.is_empty()
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_buttons_and_cursor() {
        let mut state = InputState::new();
        state.update(&InputEvent::mouse_down(MouseButton::Left, 4.0, 5.0));
        assert!(state.is_button_pressed(MouseButton::Left));
        assert_eq!(state.cursor_position(), Some(Vec2::new(4.0, 5.0)));

        state.update(&InputEvent::mouse_up(MouseButton::Left, 6.0, 5.0));
        assert!(!state.any_button_pressed());
        assert_eq!(state.cursor_position(), Some(Vec2::new(6.0, 5.0)));
    }

    #[test]
    fn test_cursor_left_releases_buttons() {
        let mut state = InputState::new();
        state.update(&InputEvent::mouse_down(MouseButton::Right, 1.0, 1.0));
        state.update(&InputEvent::CursorLeft);
        assert_eq!(state.cursor_position(), None);
        assert!(!state.is_button_pressed(MouseButton::Right));
    }

    #[test]
    fn test_key_events_update_modifiers() {
        let mut state = InputState::new();
        state.update(&InputEvent::key_down(KeyCode::Char('a'), Modifiers::CONTROL));
        assert!(state.is_key_pressed(KeyCode::Char('a')));
        assert!(state.modifiers().control());

        state.update(&InputEvent::ModifiersChanged(Modifiers::empty()));
        assert!(!state.modifiers().control());
    }
}
