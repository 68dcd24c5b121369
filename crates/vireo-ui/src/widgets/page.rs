//! Titled scrollable container.

use std::any::Any;

use vireo_core::Color;
use vireo_core::geometry::Rect;
use vireo_core::math::Vec2;

use crate::render::RenderInfo;
use crate::theme::Palette;
use crate::widget::{WheelDelta, Widget, WidgetBase, WidgetKind, WidgetRequest};

#[derive(Debug, Clone, PartialEq)]
pub struct PageStyle {
    pub background: Color,
    pub title_background: Color,
    pub title_color: Color,
    pub border_color: Color,
    pub border_width: f32,
    /// Header height; the header is only laid out when the title is non-empty.
    pub title_height: f32,
}

impl PageStyle {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            background: palette.background,
            title_background: palette.surface_raised,
            title_color: palette.text,
            border_color: palette.border,
            border_width: 0.0,
            title_height: 24.0,
        }
    }
}

impl Default for PageStyle {
    fn default() -> Self {
        Self::from_palette(&Palette::dark())
    }
}

/// A container whose children scroll under its viewport.
///
/// Children keep absolute bounds. Scrolling moves them with
/// [`WidgetRequest::TranslateChildren`], so a child's on-screen position is
/// always its stored position. The content size is either set explicitly or
/// fitted to the children the context reports through
/// [`Widget::layout_changed`].
pub struct Page {
    base: WidgetBase,
    title: String,
    offset: Vec2,
    explicit_content: Option<Vec2>,
    fitted_content: Vec2,
    style: PageStyle,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        let mut base = WidgetBase::new(Rect::new(0.0, 0.0, 300.0, 200.0));
        base.set_clip(true);
        Self {
            base,
            title: title.into(),
            offset: Vec2::ZERO,
            explicit_content: None,
            fitted_content: Vec2::ZERO,
            style: PageStyle::default(),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.set_bounds(bounds);
        self
    }

    pub fn with_style(mut self, style: PageStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_content_size(mut self, size: Vec2) -> Self {
        self.explicit_content = Some(size);
        self
    }

    pub fn with_clip(mut self, clip: bool) -> Self {
        self.base.set_clip(clip);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.reclamp();
    }

    pub fn style(&self) -> &PageStyle {
        &self.style
    }

    pub fn title_rect(&self) -> Option<Rect> {
        if self.title.is_empty() {
            return None;
        }
        let b = self.base.bounds();
        Some(Rect::new(b.x, b.y, b.width, self.style.title_height.min(b.height)))
    }

    /// Area children scroll under.
    pub fn viewport_rect(&self) -> Rect {
        let b = self.base.bounds();
        match self.title_rect() {
            Some(title) => Rect::new(b.x, title.bottom(), b.width, b.height - title.height),
            None => b,
        }
    }

    /// Scrollable content size: explicit when set, otherwise fitted.
    pub fn content_size(&self) -> Vec2 {
        self.explicit_content.unwrap_or(self.fitted_content)
    }

    /// Set an explicit content size, or `None` to fit to the children.
    pub fn set_content_size(&mut self, size: Option<Vec2>) {
        self.explicit_content = size;
        self.reclamp();
    }

    pub fn scroll_offset(&self) -> Vec2 {
        self.offset
    }

    pub fn max_scroll_offset(&self) -> Vec2 {
        let content = self.content_size();
        let viewport = self.viewport_rect().size();
        (content - viewport).max(Vec2::ZERO)
    }

    /// Scroll to `offset`, clamped. Returns whether the offset changed.
    pub fn set_scroll_offset(&mut self, offset: Vec2) -> bool {
        let offset = if offset.is_nan() { Vec2::ZERO } else { offset };
        let clamped = offset.clamp(Vec2::ZERO, self.max_scroll_offset());
        let delta = clamped - self.offset;
        if delta == Vec2::ZERO {
            return false;
        }
        self.offset = clamped;
        self.base.request(WidgetRequest::TranslateChildren(-delta));
        true
    }

    pub fn scroll_by(&mut self, delta: Vec2) -> bool {
        self.set_scroll_offset(self.offset + delta)
    }

    fn reclamp(&mut self) {
        self.set_scroll_offset(self.offset);
    }
}

impl Widget for Page {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Page
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn handle_scroll(&mut self, delta: WheelDelta, _position: Vec2) -> bool {
        self.scroll_by(-delta.pixels)
    }

    fn child_clip_rect(&self) -> Rect {
        self.viewport_rect()
    }

    fn layout_changed(&mut self, children_extent: Option<Rect>) {
        // Children sit at their scrolled position; measure from the
        // unscrolled content origin.
        self.fitted_content = match children_extent {
            Some(extent) => {
                let origin = self.viewport_rect().position() - self.offset;
                (extent.max() - origin).max(Vec2::ZERO)
            }
            None => Vec2::ZERO,
        };
        self.reclamp();
    }

    fn render_info(&self) -> RenderInfo {
        RenderInfo::Page(PageRenderInfo {
            bounds: self.base.bounds(),
            title: self.title.clone(),
            title_rect: self.title_rect(),
            viewport: self.viewport_rect(),
            scroll_offset: self.offset,
            content_size: self.content_size(),
            style: self.style.clone(),
        })
    }
}

/// Render snapshot of a [`Page`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageRenderInfo {
    pub bounds: Rect,
    pub title: String,
    pub title_rect: Option<Rect>,
    pub viewport: Rect,
    pub scroll_offset: Vec2,
    pub content_size: Vec2,
    pub style: PageStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(y: f32) -> WheelDelta {
        WheelDelta {
            lines: Vec2::new(0.0, y / 20.0),
            pixels: Vec2::new(0.0, y),
        }
    }

    #[test]
    fn test_clips_by_default() {
        let page = Page::new("General");
        assert!(page.base().clips_children());
        assert!(!Page::new("").with_clip(false).base().clips_children());
    }

    #[test]
    fn test_viewport_below_title() {
        let page = Page::new("General").with_bounds(Rect::new(10.0, 10.0, 200.0, 100.0));
        assert_eq!(page.viewport_rect(), Rect::new(10.0, 34.0, 200.0, 76.0));
        assert_eq!(page.child_clip_rect(), page.viewport_rect());

        let untitled = Page::new("").with_bounds(Rect::new(10.0, 10.0, 200.0, 100.0));
        assert_eq!(untitled.title_rect(), None);
        assert_eq!(untitled.viewport_rect(), untitled.base().bounds());
    }

    #[test]
    fn test_wheel_scroll_clamped_and_translates_children() {
        let mut page = Page::new("")
            .with_bounds(Rect::new(0.0, 0.0, 100.0, 100.0))
            .with_content_size(Vec2::new(100.0, 250.0));

        // Wheel down scrolls content up.
        assert!(page.handle_scroll(wheel(-60.0), Vec2::ZERO));
        assert_eq!(page.scroll_offset(), Vec2::new(0.0, 60.0));
        assert_eq!(
            page.drain_requests(),
            vec![WidgetRequest::TranslateChildren(Vec2::new(0.0, -60.0))]
        );

        assert!(page.handle_scroll(wheel(-500.0), Vec2::ZERO));
        assert_eq!(page.scroll_offset(), Vec2::new(0.0, 150.0));
        assert!(!page.handle_scroll(wheel(-20.0), Vec2::ZERO));

        assert!(page.handle_scroll(wheel(1000.0), Vec2::ZERO));
        assert_eq!(page.scroll_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_fitted_content_from_children() {
        let mut page = Page::new("").with_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(!page.scroll_by(Vec2::new(0.0, 10.0)));

        page.layout_changed(Some(Rect::new(0.0, 150.0, 80.0, 50.0)));
        assert_eq!(page.content_size(), Vec2::new(80.0, 200.0));
        assert!(page.scroll_by(Vec2::new(0.0, 100.0)));
        page.drain_requests();

        // After scrolling, the child moved up by 100 but the content is the same.
        page.layout_changed(Some(Rect::new(0.0, 50.0, 80.0, 50.0)));
        assert_eq!(page.content_size(), Vec2::new(80.0, 200.0));

        // Removing children shrinks the content and scrolls back.
        page.layout_changed(None);
        assert_eq!(page.scroll_offset(), Vec2::ZERO);
        assert_eq!(
            page.drain_requests(),
            vec![WidgetRequest::TranslateChildren(Vec2::new(0.0, 100.0))]
        );
    }
}
