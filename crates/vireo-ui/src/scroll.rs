//! Vertical scroll bookkeeping shared by list-like widgets.

/// Scroll offset into content taller than its viewport.
///
/// The offset is kept in `[0, content − viewport]`; every mutation
/// re-clamps, so growing the viewport or shrinking the content never leaves
/// the view past the end.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    offset: f32,
    content: f32,
    viewport: f32,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn content(&self) -> f32 {
        self.content
    }

    pub fn viewport(&self) -> f32 {
        self.viewport
    }

    /// Maximum scroll offset.
    pub fn max_offset(&self) -> f32 {
        (self.content - self.viewport).max(0.0)
    }

    /// Whether content exceeds the viewport.
    pub fn is_scrollable(&self) -> bool {
        self.content > self.viewport
    }

    /// Update content and viewport extents, re-clamping the offset.
    pub fn set_extents(&mut self, content: f32, viewport: f32) {
        self.content = content.max(0.0);
        self.viewport = viewport.max(0.0);
        self.clamp();
    }

    /// Set scroll offset, clamping to valid range. Returns whether it moved.
    pub fn set_offset(&mut self, offset: f32) -> bool {
        let old = self.offset;
        self.offset = if offset.is_nan() { 0.0 } else { offset };
        self.clamp();
        self.offset != old
    }

    /// Adjust scroll offset by a relative delta.
    pub fn scroll_by(&mut self, delta: f32) -> bool {
        self.set_offset(self.offset + delta)
    }

    /// Scroll the minimum distance that shows `[top, top + height)`.
    pub fn ensure_visible(&mut self, top: f32, height: f32) -> bool {
        if top < self.offset {
            self.set_offset(top)
        } else if top + height > self.offset + self.viewport {
            self.set_offset(top + height - self.viewport)
        } else {
            false
        }
    }

    fn clamp(&mut self) {
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }
}
