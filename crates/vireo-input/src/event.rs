use vireo_core::math::Vec2;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// Press/release state of a button or key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementState {
    Pressed,
    Released,
}

impl ElementState {
    pub fn is_pressed(self) -> bool {
        self == ElementState::Pressed
    }
}

bitflags::bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT   = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT     = 1 << 2;
        const SUPER   = 1 << 3;
    }
}

impl Modifiers {
    pub fn shift(self) -> bool {
        self.contains(Modifiers::SHIFT)
    }

    pub fn control(self) -> bool {
        self.contains(Modifiers::CONTROL)
    }

    pub fn alt(self) -> bool {
        self.contains(Modifiers::ALT)
    }
}

/// Keys the widget core reacts to.
///
/// Printable keys are reported as [`KeyCode::Char`] with the unshifted,
/// lowercase character so shortcuts compare independently of Shift. Text
/// entry uses [`InputEvent::Text`], not key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Insert,
    Space,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Char(char),
    Other,
}

/// An input event in logical window coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Cursor moved.
    MouseMoved { position: Vec2 },
    /// Mouse button pressed or released at `position`.
    MouseButton {
        button: MouseButton,
        state: ElementState,
        position: Vec2,
    },
    /// Wheel scrolled. `delta` is in lines; positive `y` scrolls content up
    /// (towards the start), matching the usual wheel-away-from-user gesture.
    MouseWheel { delta: Vec2, position: Vec2 },
    /// Key pressed or released.
    Key {
        key: KeyCode,
        state: ElementState,
        modifiers: Modifiers,
    },
    /// Committed text (after keyboard layout and IME processing).
    Text { text: String },
    /// Modifier state changed without a key event.
    ModifiersChanged(Modifiers),
    /// Cursor left the window.
    CursorLeft,
}

impl InputEvent {
    pub fn mouse_move(x: f32, y: f32) -> Self {
        InputEvent::MouseMoved {
            position: Vec2::new(x, y),
        }
    }

    pub fn mouse_down(button: MouseButton, x: f32, y: f32) -> Self {
        InputEvent::MouseButton {
            button,
            state: ElementState::Pressed,
            position: Vec2::new(x, y),
        }
    }

    pub fn mouse_up(button: MouseButton, x: f32, y: f32) -> Self {
        InputEvent::MouseButton {
            button,
            state: ElementState::Released,
            position: Vec2::new(x, y),
        }
    }

    pub fn key_down(key: KeyCode, modifiers: Modifiers) -> Self {
        InputEvent::Key {
            key,
            state: ElementState::Pressed,
            modifiers,
        }
    }

    pub fn key_up(key: KeyCode, modifiers: Modifiers) -> Self {
        InputEvent::Key {
            key,
            state: ElementState::Released,
            modifiers,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        InputEvent::Text { text: text.into() }
    }

    /// Cursor position carried by the event, if any.
    pub fn position(&self) -> Option<Vec2> {
        match self {
            InputEvent::MouseMoved { position }
            | InputEvent::MouseButton { position, .. }
            | InputEvent::MouseWheel { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub fn is_pointer(&self) -> bool {
        self.position().is_some() || matches!(self, InputEvent::CursorLeft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_only_for_pointer_events() {
        assert_eq!(
            InputEvent::mouse_move(3.0, 4.0).position(),
            Some(Vec2::new(3.0, 4.0))
        );
        assert_eq!(InputEvent::text("a").position(), None);
        assert!(InputEvent::CursorLeft.is_pointer());
        assert!(!InputEvent::key_down(KeyCode::Tab, Modifiers::empty()).is_pointer());
    }

    #[test]
    fn test_modifier_helpers() {
        let m = Modifiers::SHIFT | Modifiers::CONTROL;
        assert!(m.shift());
        assert!(m.control());
        assert!(!m.alt());
    }
}
