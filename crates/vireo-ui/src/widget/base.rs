//! State shared by every widget.

use vireo_core::geometry::Rect;
use vireo_core::math::Vec2;

use super::{WidgetId, WidgetRequest};
use crate::items::UserData;

/// Common widget state: bounds, flags, tree links and queued requests.
///
/// Tree links are maintained by the owning [`GuiContext`](crate::GuiContext);
/// widgets only read them.
pub struct WidgetBase {
    id: WidgetId,
    bounds: Rect,
    visible: bool,
    enabled: bool,
    clip: bool,
    focusable: bool,
    user_data: Option<UserData>,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    requests: Vec<WidgetRequest>,
}

impl WidgetBase {
    pub fn new(bounds: Rect) -> Self {
        Self {
            id: WidgetId::DETACHED,
            bounds,
            visible: true,
            enabled: true,
            clip: false,
            focusable: false,
            user_data: None,
            parent: None,
            children: Vec::new(),
            requests: Vec::new(),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: WidgetId) {
        self.id = id;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Replace the bounds. Children are not moved; use
    /// [`GuiContext::set_bounds`](crate::GuiContext::set_bounds) for that.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.bounds = self.bounds.with_position(position);
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.bounds = self.bounds.with_size(size);
    }

    /// Whether this widget's own flag is set. Ancestors may still hide it.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether descendants are clipped to these bounds.
    pub fn clips_children(&self) -> bool {
        self.clip
    }

    pub fn set_clip(&mut self, clip: bool) {
        self.clip = clip;
    }

    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    pub fn set_focusable(&mut self, focusable: bool) {
        self.focusable = focusable;
    }

    pub fn user_data(&self) -> Option<&UserData> {
        self.user_data.as_ref()
    }

    pub fn set_user_data(&mut self, data: Option<UserData>) {
        self.user_data = data;
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<WidgetId>) {
        self.parent = parent;
    }

    /// Children in z-order, back to front.
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<WidgetId> {
        &mut self.children
    }

    /// Default hit-test: point in bounds.
    pub fn hit_test(&self, point: Vec2) -> bool {
        self.bounds.contains(point)
    }

    /// Queue a request for the context.
    pub fn request(&mut self, request: WidgetRequest) {
        self.requests.push(request);
    }

    pub fn has_requests(&self) -> bool {
        !self.requests.is_empty()
    }

    pub(crate) fn take_requests(&mut self) -> Vec<WidgetRequest> {
        std::mem::take(&mut self.requests)
    }
}

impl std::fmt::Debug for WidgetBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetBase")
            .field("id", &self.id)
            .field("bounds", &self.bounds)
            .field("visible", &self.visible)
            .field("enabled", &self.enabled)
            .field("clip", &self.clip)
            .field("parent", &self.parent)
            .field("children", &self.children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let base = WidgetBase::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(base.id(), WidgetId::DETACHED);
        assert!(base.is_visible());
        assert!(base.is_enabled());
        assert!(!base.clips_children());
        assert!(base.parent().is_none());
        assert!(base.children().is_empty());
    }

    #[test]
    fn test_hit_test_and_requests() {
        let mut base = WidgetBase::new(Rect::new(5.0, 5.0, 10.0, 10.0));
        assert!(base.hit_test(Vec2::new(6.0, 6.0)));
        assert!(!base.hit_test(Vec2::new(1.0, 1.0)));

        base.request(WidgetRequest::BringToFront);
        assert!(base.has_requests());
        assert_eq!(base.take_requests(), vec![WidgetRequest::BringToFront]);
        assert!(!base.has_requests());
    }
}
