//! Color palettes that widget styles are derived from.
//!
//! Every widget style has a `Default` built from [`Palette::dark`] and a
//! `from_palette` constructor for other palettes:
//!
//! ```
//! use vireo_ui::theme::Palette;
//! use vireo_ui::widgets::ListBoxStyle;
//!
//! let style = ListBoxStyle::from_palette(&Palette::light());
//! assert_eq!(style.background, Palette::light().surface);
//! ```

use vireo_core::Color;

/// Color palette for a theme.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Window/page background
    pub background: Color,
    /// Widget surfaces (lists, grids, menus)
    pub surface: Color,
    /// Raised surfaces (title bars, headers, tab strips)
    pub surface_raised: Color,
    /// Accent color for the active element (selection, active tab, thumb drag)
    pub accent: Color,
    /// Primary text color
    pub text: Color,
    /// Secondary/muted text color (shortcuts, descriptions)
    pub text_muted: Color,
    /// Disabled text color
    pub text_disabled: Color,
    /// Border color
    pub border: Color,
    /// Separator lines
    pub divider: Color,
    /// Background under the hovered element
    pub hover: Color,
    /// Background under the pressed element
    pub pressed: Color,
    /// Background under selected rows
    pub selection: Color,
    /// Scroll/slider track
    pub track: Color,
    /// Scroll/slider thumb
    pub thumb: Color,
}

impl Palette {
    /// Create a dark color palette.
    pub fn dark() -> Self {
        Self {
            background: Color::from_rgb_u8(18, 18, 18),
            surface: Color::from_rgb_u8(30, 30, 30),
            surface_raised: Color::from_rgb_u8(40, 40, 50),
            accent: Color::from_rgb_u8(60, 120, 200),
            text: Color::from_rgb_u8(255, 255, 255),
            text_muted: Color::from_rgb_u8(180, 180, 180),
            text_disabled: Color::from_rgb_u8(100, 100, 100),
            border: Color::from_rgb_u8(60, 60, 60),
            divider: Color::from_rgb_u8(40, 40, 40),
            hover: Color::from_rgba_u8(255, 255, 255, 20),
            pressed: Color::from_rgba_u8(255, 255, 255, 40),
            selection: Color::rgba(0.2, 0.4, 0.8, 0.8),
            track: Color::from_rgba_u8(30, 30, 35, 100),
            thumb: Color::from_rgb_u8(80, 80, 90),
        }
    }

    /// Create a light color palette.
    pub fn light() -> Self {
        Self {
            background: Color::from_rgb_u8(250, 250, 250),
            surface: Color::from_rgb_u8(255, 255, 255),
            surface_raised: Color::from_rgb_u8(235, 235, 240),
            accent: Color::from_rgb_u8(50, 100, 200),
            text: Color::from_rgb_u8(0, 0, 0),
            text_muted: Color::from_rgb_u8(100, 100, 100),
            text_disabled: Color::from_rgb_u8(180, 180, 180),
            border: Color::from_rgb_u8(200, 200, 200),
            divider: Color::from_rgb_u8(230, 230, 230),
            hover: Color::from_rgba_u8(0, 0, 0, 15),
            pressed: Color::from_rgba_u8(0, 0, 0, 30),
            selection: Color::from_rgb_u8(180, 205, 240),
            track: Color::from_rgb_u8(225, 225, 230),
            thumb: Color::from_rgb_u8(160, 160, 170),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}
