//! Translation from `winit` window events.

use vireo_core::math::Vec2;
use winit::event::{MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use crate::event::{ElementState, InputEvent, KeyCode, Modifiers, MouseButton};

/// Pixels per wheel line used to convert trackpad pixel deltas into lines.
const PIXELS_PER_LINE: f64 = 20.0;

impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => MouseButton::Left,
            winit::event::MouseButton::Right => MouseButton::Right,
            winit::event::MouseButton::Middle => MouseButton::Middle,
            winit::event::MouseButton::Back => MouseButton::Back,
            winit::event::MouseButton::Forward => MouseButton::Forward,
            winit::event::MouseButton::Other(n) => MouseButton::Other(n),
        }
    }
}

impl From<winit::event::ElementState> for ElementState {
    fn from(state: winit::event::ElementState) -> Self {
        match state {
            winit::event::ElementState::Pressed => ElementState::Pressed,
            winit::event::ElementState::Released => ElementState::Released,
        }
    }
}

impl From<winit::keyboard::ModifiersState> for Modifiers {
    fn from(state: winit::keyboard::ModifiersState) -> Self {
        let mut modifiers = Modifiers::empty();
        modifiers.set(Modifiers::SHIFT, state.shift_key());
        modifiers.set(Modifiers::CONTROL, state.control_key());
        modifiers.set(Modifiers::ALT, state.alt_key());
        modifiers.set(Modifiers::SUPER, state.super_key());
        modifiers
    }
}

fn key_code(key: &Key) -> KeyCode {
    match key {
        Key::Named(named) => match named {
            NamedKey::Enter => KeyCode::Enter,
            NamedKey::Escape => KeyCode::Escape,
            NamedKey::Tab => KeyCode::Tab,
            NamedKey::Backspace => KeyCode::Backspace,
            NamedKey::Delete => KeyCode::Delete,
            NamedKey::Insert => KeyCode::Insert,
            NamedKey::Space => KeyCode::Space,
            NamedKey::ArrowLeft => KeyCode::Left,
            NamedKey::ArrowRight => KeyCode::Right,
            NamedKey::ArrowUp => KeyCode::Up,
            NamedKey::ArrowDown => KeyCode::Down,
            NamedKey::Home => KeyCode::Home,
            NamedKey::End => KeyCode::End,
            NamedKey::PageUp => KeyCode::PageUp,
            NamedKey::PageDown => KeyCode::PageDown,
            _ => KeyCode::Other,
        },
        Key::Character(s) => s
            .chars()
            .next()
            .map(|c| KeyCode::Char(c.to_ascii_lowercase()))
            .unwrap_or(KeyCode::Other),
        _ => KeyCode::Other,
    }
}

/// Stateful `WindowEvent` → [`InputEvent`] translator for one window.
///
/// winit reports button presses without a position and key presses without
/// modifiers, so the translator remembers the last cursor position and
/// modifier state.
#[derive(Debug, Default)]
pub struct WinitTranslator {
    cursor: Vec2,
    modifiers: Modifiers,
}

impl WinitTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one window event. A key press with text yields both a key
    /// event and a text event.
    pub fn translate(&mut self, event: &WindowEvent, scale_factor: f64) -> Vec<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(
                    (position.x / scale_factor) as f32,
                    (position.y / scale_factor) as f32,
                );
                vec![InputEvent::MouseMoved {
                    position: self.cursor,
                }]
            }
            WindowEvent::CursorLeft { .. } => vec![InputEvent::CursorLeft],
            WindowEvent::MouseInput { state, button, .. } => vec![InputEvent::MouseButton {
                button: (*button).into(),
                state: (*state).into(),
                position: self.cursor,
            }],
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(x, y) => Vec2::new(*x, *y),
                    MouseScrollDelta::PixelDelta(p) => Vec2::new(
                        (p.x / scale_factor / PIXELS_PER_LINE) as f32,
                        (p.y / scale_factor / PIXELS_PER_LINE) as f32,
                    ),
                };
                vec![InputEvent::MouseWheel {
                    delta,
                    position: self.cursor,
                }]
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state().into();
                vec![InputEvent::ModifiersChanged(self.modifiers)]
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let state: ElementState = event.state.into();
                let mut out = vec![InputEvent::Key {
                    key: key_code(&event.logical_key),
                    state,
                    modifiers: self.modifiers,
                }];
                if state.is_pressed() {
                    let printable = event
                        .text
                        .as_ref()
                        .filter(|t| !t.chars().all(char::is_control));
                    if let Some(text) = printable {
                        out.push(InputEvent::Text {
                            text: text.to_string(),
                        });
                    }
                }
                out
            }
            _ => {
                tracing::trace!("ignoring window event: {:?}", event);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_code_lowercases_characters() {
        assert_eq!(key_code(&Key::Character("A".into())), KeyCode::Char('a'));
        assert_eq!(key_code(&Key::Named(NamedKey::Tab)), KeyCode::Tab);
    }

    #[test]
    fn test_button_conversion() {
        assert_eq!(
            MouseButton::from(winit::event::MouseButton::Other(7)),
            MouseButton::Other(7)
        );
    }
}
