/// Behaviour switches for a [`GuiContext`](crate::GuiContext).
#[derive(Debug, Clone)]
pub struct GuiConfig {
    /// Pressing a mouse button moves focus to the nearest focusable widget
    /// under the cursor.
    pub focus_on_click: bool,
    /// A press that lands on no focusable widget clears focus.
    pub clear_focus_on_background_click: bool,
    /// Unconsumed Tab / Shift+Tab cycle focus.
    pub tab_navigation: bool,
    /// Pixels scrolled per wheel line by scrollable widgets.
    pub wheel_line_height: f32,
}

impl Default for GuiConfig {
    fn default() -> Self {
        GuiConfig {
            focus_on_click: true,
            clear_focus_on_background_click: true,
            tab_navigation: true,
            wheel_line_height: 20.0,
        }
    }
}
