//! The widget tree and its event router.
//!
//! A [`GuiContext`] owns every widget in an arena keyed by [`WidgetId`].
//! Each viewport has an ordered list of roots; later roots and later
//! children are drawn on top and hit first.
//!
//! Input is routed as follows:
//!
//! * Pointer events go to the front-most widget under the cursor and bubble
//!   to its ancestors until one consumes them. A consumed press captures the
//!   pointer until the matching release.
//! * Keys and text go to the focused widget and bubble.
//! * While a modal widget (an open menu, a modal dialog) is visible, routing
//!   is confined to its subtree. Pointer events that hit nothing inside it
//!   are delivered to the modal widget itself.
//!
//! After every dispatch the context drains the [`WidgetRequest`]s widgets
//! queued and applies them.

use std::fmt;

use indexmap::IndexMap;
use vireo_core::alloc::HashMap;
use vireo_core::geometry::Rect;
use vireo_core::math::Vec2;
use vireo_core::profiling::{profile_function, profile_scope};
use vireo_input::{
    ElementState, EventBatch, HandleStatus, InputEvent, KeyCode, Modifiers, MouseButton,
};

use crate::config::GuiConfig;
use crate::error::{UiError, UiResult};
use crate::focus::{FocusDirection, FocusEvent, FocusManager};
use crate::render::RenderEntry;
use crate::widget::{WheelDelta, Widget, WidgetId, WidgetRequest};

/// Identity of a viewport (a window or an independent overlay surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewportId(u32);

impl ViewportId {
    /// The viewport every context starts with.
    pub const MAIN: ViewportId = ViewportId(0);

    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ViewportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewportId({})", self.0)
    }
}

/// Per-viewport routing state.
#[derive(Debug, Default)]
struct Viewport {
    roots: Vec<WidgetId>,
    hovered: Option<WidgetId>,
    capture: Option<(WidgetId, MouseButton)>,
    cursor: Option<Vec2>,
}

/// Upper bound on request cascades (a request whose side effect queues
/// another request).
const MAX_REQUEST_ROUNDS: usize = 32;

/// Narrow an inherited clip by `rect`. A fully clipped region becomes an
/// empty rectangle, which contains no point.
fn narrow_clip(clip: Option<Rect>, rect: Rect) -> Option<Rect> {
    Some(match clip {
        Some(clip) => clip
            .intersection(&rect)
            .unwrap_or(Rect::new(rect.x, rect.y, 0.0, 0.0)),
        None => rect,
    })
}

/// Retained widget tree with hit-testing, focus and modal handling.
pub struct GuiContext {
    widgets: HashMap<WidgetId, Box<dyn Widget>>,
    viewports: IndexMap<ViewportId, Viewport>,
    next_widget: u64,
    next_viewport: u32,
    focus: FocusManager,
    modifiers: Modifiers,
    config: GuiConfig,
    /// Widgets that may have queued requests since the last flush.
    touched: Vec<WidgetId>,
}

impl GuiContext {
    pub fn new() -> Self {
        Self::with_config(GuiConfig::default())
    }

    pub fn with_config(config: GuiConfig) -> Self {
        let mut viewports = IndexMap::new();
        viewports.insert(ViewportId::MAIN, Viewport::default());
        Self {
            widgets: HashMap::new(),
            viewports,
            next_widget: 0,
            next_viewport: 1,
            focus: FocusManager::new(),
            modifiers: Modifiers::empty(),
            config,
            touched: Vec::new(),
        }
    }

    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GuiConfig) {
        self.config = config;
    }

    /// Modifier state from the last key or modifier event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    // Viewports

    pub fn add_viewport(&mut self) -> ViewportId {
        let id = ViewportId(self.next_viewport);
        self.next_viewport += 1;
        self.viewports.insert(id, Viewport::default());
        tracing::debug!("Added {id}");
        id
    }

    /// Remove a viewport and every widget in it. The main viewport stays.
    pub fn remove_viewport(&mut self, viewport: ViewportId) -> bool {
        if viewport == ViewportId::MAIN {
            return false;
        }
        let Some(roots) = self.viewports.get(&viewport).map(|vp| vp.roots.clone()) else {
            return false;
        };
        for root in roots {
            self.remove_widget(root);
        }
        self.viewports.shift_remove(&viewport);
        true
    }

    pub fn viewport_ids(&self) -> Vec<ViewportId> {
        self.viewports.keys().copied().collect()
    }

    /// Roots of a viewport, back to front.
    pub fn roots(&self, viewport: ViewportId) -> &[WidgetId] {
        self.viewports
            .get(&viewport)
            .map(|vp| vp.roots.as_slice())
            .unwrap_or(&[])
    }

    /// Viewport whose tree contains `id`.
    pub fn viewport_of(&self, id: WidgetId) -> Option<ViewportId> {
        let root = self.root_of(id)?;
        self.viewports
            .iter()
            .find(|(_, vp)| vp.roots.contains(&root))
            .map(|(vid, _)| *vid)
    }

    pub fn cursor_position(&self, viewport: ViewportId) -> Option<Vec2> {
        self.viewports.get(&viewport).and_then(|vp| vp.cursor)
    }

    pub fn hovered(&self, viewport: ViewportId) -> Option<WidgetId> {
        self.viewports.get(&viewport).and_then(|vp| vp.hovered)
    }

    /// Widget holding the pointer capture.
    pub fn captured(&self, viewport: ViewportId) -> Option<WidgetId> {
        self.viewports
            .get(&viewport)
            .and_then(|vp| vp.capture.map(|(id, _)| id))
    }

    // Tree construction

    fn insert(&mut self, mut widget: Box<dyn Widget>, parent: Option<WidgetId>) -> WidgetId {
        let id = WidgetId::from_raw(self.next_widget);
        self.next_widget += 1;
        let base = widget.base_mut();
        base.set_id(id);
        base.set_parent(parent);
        base.children_mut().clear();
        self.widgets.insert(id, widget);
        self.touched.push(id);
        id
    }

    /// Add a root to the main viewport, in front of the existing roots.
    pub fn add_root<W: Widget>(&mut self, widget: W) -> WidgetId {
        let id = self.insert(Box::new(widget), None);
        self.viewports
            .entry(ViewportId::MAIN)
            .or_default()
            .roots
            .push(id);
        self.flush_requests();
        id
    }

    /// Add a root to another viewport. `None` for an unknown viewport.
    pub fn add_root_in<W: Widget>(&mut self, viewport: ViewportId, widget: W) -> Option<WidgetId> {
        if !self.viewports.contains_key(&viewport) {
            tracing::debug!("add_root_in: unknown {viewport}");
            return None;
        }
        let id = self.insert(Box::new(widget), None);
        if let Some(vp) = self.viewports.get_mut(&viewport) {
            vp.roots.push(id);
        }
        self.flush_requests();
        Some(id)
    }

    /// Add a child in front of `parent`'s existing children.
    pub fn add_child<W: Widget>(&mut self, parent: WidgetId, widget: W) -> Option<WidgetId> {
        if !self.widgets.contains_key(&parent) {
            tracing::debug!("add_child: unknown parent {parent}");
            return None;
        }
        let id = self.insert(Box::new(widget), Some(parent));
        if let Some(p) = self.widgets.get_mut(&parent) {
            p.base_mut().children_mut().push(id);
        }
        self.notify_layout(parent);
        self.flush_requests();
        Some(id)
    }

    /// Remove a widget and its whole subtree.
    pub fn remove_widget(&mut self, id: WidgetId) -> bool {
        let Some(parent) = self.widgets.get(&id).map(|w| w.base().parent()) else {
            return false;
        };
        self.drop_interaction_in(id);
        self.detach(id, parent);
        let subtree = self.subtree(id);
        for removed in &subtree {
            self.widgets.remove(removed);
        }
        tracing::debug!("Removed {id} ({} widgets)", subtree.len());
        if let Some(parent) = parent {
            self.notify_layout(parent);
        }
        self.flush_requests();
        true
    }

    fn detach(&mut self, id: WidgetId, parent: Option<WidgetId>) {
        match parent {
            Some(parent) => {
                if let Some(p) = self.widgets.get_mut(&parent) {
                    p.base_mut().children_mut().retain(|c| *c != id);
                }
            }
            None => {
                for vp in self.viewports.values_mut() {
                    vp.roots.retain(|r| *r != id);
                }
            }
        }
    }

    /// Move a widget under a new parent, or make it a root of its current
    /// viewport with `None`. Rejects making a widget its own descendant.
    pub fn reparent(&mut self, id: WidgetId, new_parent: Option<WidgetId>) -> bool {
        match self.try_reparent(id, new_parent) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!("reparent rejected: {err}");
                false
            }
        }
    }

    fn try_reparent(&mut self, id: WidgetId, new_parent: Option<WidgetId>) -> UiResult<()> {
        let old_parent = self
            .widgets
            .get(&id)
            .ok_or(UiError::UnknownWidget { id })?
            .base()
            .parent();
        if let Some(parent) = new_parent {
            if !self.widgets.contains_key(&parent) {
                return Err(UiError::UnknownWidget { id: parent });
            }
            if self.is_ancestor_or_self(id, parent) {
                return Err(UiError::InvalidArgument {
                    reason: format!("{id} cannot be moved under its own descendant {parent}"),
                });
            }
        }
        let viewport = self.viewport_of(id).unwrap_or(ViewportId::MAIN);
        self.detach(id, old_parent);
        match new_parent {
            Some(parent) => {
                if let Some(p) = self.widgets.get_mut(&parent) {
                    p.base_mut().children_mut().push(id);
                }
            }
            None => {
                if let Some(vp) = self.viewports.get_mut(&viewport) {
                    vp.roots.push(id);
                }
            }
        }
        if let Some(w) = self.widgets.get_mut(&id) {
            w.base_mut().set_parent(new_parent);
        }
        for parent in [old_parent, new_parent].into_iter().flatten() {
            self.notify_layout(parent);
        }
        self.flush_requests();
        Ok(())
    }

    // Lookup

    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.widgets.get(&id).map(|w| w.as_ref())
    }

    /// Mutable access. Requests queued through it are applied on the next
    /// dispatch or [`apply_requests`](Self::apply_requests).
    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut dyn Widget> {
        let widget = self.widgets.get_mut(&id)?;
        self.touched.push(id);
        Some(widget.as_mut())
    }

    pub fn get<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.widgets.get(&id)?.downcast_ref::<T>()
    }

    /// Typed mutable access; see [`widget_mut`](Self::widget_mut).
    pub fn get_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        let widget = self.widgets.get_mut(&id)?;
        self.touched.push(id);
        widget.downcast_mut::<T>()
    }

    /// Run `f` on a widget of type `T` and apply the requests it queued.
    ///
    /// ```
    /// use vireo_ui::{GuiContext, Menu};
    /// use vireo_core::math::Vec2;
    ///
    /// let mut ui = GuiContext::new();
    /// let menu = ui.add_root(Menu::new());
    /// ui.with_widget::<Menu, _>(menu, |m| {
    ///     m.add_item("Open");
    ///     m.show_at(Vec2::new(10.0, 10.0));
    /// });
    /// assert_eq!(ui.focused(), Some(menu));
    /// ```
    pub fn with_widget<T: Widget, R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut T) -> R,
    ) -> Option<R> {
        let widget = match self.typed_mut::<T>(id) {
            Ok(widget) => widget,
            Err(e) => {
                tracing::debug!("with_widget: {e}");
                return None;
            }
        };
        let result = f(widget);
        self.touched.push(id);
        self.flush_requests();
        Some(result)
    }

    fn typed_mut<T: Widget>(&mut self, id: WidgetId) -> UiResult<&mut T> {
        self.widgets
            .get_mut(&id)
            .ok_or(UiError::UnknownWidget { id })?
            .downcast_mut::<T>()
            .ok_or(UiError::WrongKind {
                id,
                expected: std::any::type_name::<T>(),
            })
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.widgets
            .get(&id)
            .map(|w| w.base().children())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.widgets.get(&id).and_then(|w| w.base().parent())
    }

    fn root_of(&self, id: WidgetId) -> Option<WidgetId> {
        let mut current = id;
        loop {
            match self.widgets.get(&current)?.base().parent() {
                Some(parent) => current = parent,
                None => return Some(current),
            }
        }
    }

    /// `id` and its ancestors, innermost first.
    fn ancestors_inclusive(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            let Some(widget) = self.widgets.get(&node) else {
                break;
            };
            chain.push(node);
            current = widget.base().parent();
        }
        chain
    }

    fn is_ancestor_or_self(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        self.ancestors_inclusive(id).contains(&ancestor)
    }

    /// `id` and its descendants in tree order.
    fn subtree(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            let Some(widget) = self.widgets.get(&node) else {
                continue;
            };
            out.push(node);
            stack.extend(widget.base().children().iter().rev().copied());
        }
        out
    }

    // Geometry and flags

    /// Replace a widget's bounds, moving its descendants by the same offset.
    pub fn set_bounds(&mut self, id: WidgetId, bounds: Rect) -> bool {
        let Some((old, parent)) = self
            .widgets
            .get(&id)
            .map(|w| (w.base().bounds(), w.base().parent()))
        else {
            return false;
        };
        if let Some(w) = self.widgets.get_mut(&id) {
            w.base_mut().set_bounds(bounds);
        }
        let delta = bounds.position() - old.position();
        if delta != Vec2::ZERO {
            self.translate_descendants(id, delta);
        }
        self.notify_layout(id);
        if let Some(parent) = parent {
            self.notify_layout(parent);
        }
        self.flush_requests();
        true
    }

    /// Move a widget and its subtree to `position`.
    pub fn move_widget(&mut self, id: WidgetId, position: Vec2) -> bool {
        match self.widgets.get(&id).map(|w| w.base().bounds()) {
            Some(bounds) => self.set_bounds(id, bounds.with_position(position)),
            None => false,
        }
    }

    fn translate_descendants(&mut self, id: WidgetId, delta: Vec2) {
        for descendant in self.subtree(id).into_iter().skip(1) {
            if let Some(w) = self.widgets.get_mut(&descendant) {
                let bounds = w.base().bounds().translate(delta);
                w.base_mut().set_bounds(bounds);
            }
        }
    }

    /// Set a widget's own visibility flag. Hiding drops focus, hover and
    /// capture held inside the subtree.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> bool {
        let applied = self.set_visible_inner(id, visible);
        self.flush_requests();
        applied
    }

    fn set_visible_inner(&mut self, id: WidgetId, visible: bool) -> bool {
        let Some(w) = self.widgets.get_mut(&id) else {
            return false;
        };
        let changed = w.base().is_visible() != visible;
        w.base_mut().set_visible(visible);
        if changed {
            w.visibility_changed(visible);
            self.touched.push(id);
        }
        if !visible {
            self.drop_interaction_in(id);
        }
        true
    }

    /// Set a widget's own enabled flag. Disabling drops focus, hover and
    /// capture held inside the subtree.
    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) -> bool {
        let Some(w) = self.widgets.get_mut(&id) else {
            return false;
        };
        w.base_mut().set_enabled(enabled);
        if !enabled {
            self.drop_interaction_in(id);
        }
        self.flush_requests();
        true
    }

    /// Effective visibility: the widget and all of its ancestors are visible.
    pub fn is_visible(&self, id: WidgetId) -> bool {
        let chain = self.ancestors_inclusive(id);
        !chain.is_empty()
            && chain
                .iter()
                .all(|a| self.widgets.get(a).is_some_and(|w| w.base().is_visible()))
    }

    /// Effective enabled state: the widget and all of its ancestors are enabled.
    pub fn is_enabled(&self, id: WidgetId) -> bool {
        let chain = self.ancestors_inclusive(id);
        !chain.is_empty()
            && chain
                .iter()
                .all(|a| self.widgets.get(a).is_some_and(|w| w.base().is_enabled()))
    }

    /// Raise a widget above its siblings (or a root above the other roots).
    pub fn bring_to_front(&mut self, id: WidgetId) -> bool {
        let Some(parent) = self.widgets.get(&id).map(|w| w.base().parent()) else {
            return false;
        };
        let siblings = match parent {
            Some(parent) => match self.widgets.get_mut(&parent) {
                Some(p) => p.base_mut().children_mut(),
                None => return false,
            },
            None => match self
                .viewports
                .values_mut()
                .find(|vp| vp.roots.contains(&id))
            {
                Some(vp) => &mut vp.roots,
                None => return false,
            },
        };
        siblings.retain(|s| *s != id);
        siblings.push(id);
        true
    }

    fn drop_interaction_in(&mut self, id: WidgetId) {
        if self
            .focus
            .focused()
            .is_some_and(|f| self.is_ancestor_or_self(id, f))
        {
            self.change_focus(None);
        }
        let viewports: Vec<ViewportId> = self.viewports.keys().copied().collect();
        for viewport in viewports {
            let (hovered, capture) = match self.viewports.get(&viewport) {
                Some(vp) => (vp.hovered, vp.capture),
                None => continue,
            };
            if hovered.is_some_and(|h| self.is_ancestor_or_self(id, h)) {
                self.set_hovered(viewport, None);
            }
            if capture.is_some_and(|(c, _)| self.is_ancestor_or_self(id, c)) {
                if let Some(vp) = self.viewports.get_mut(&viewport) {
                    vp.capture = None;
                }
            }
        }
    }

    /// Tell a widget its bounds or children changed.
    fn notify_layout(&mut self, id: WidgetId) {
        let Some(widget) = self.widgets.get(&id) else {
            return;
        };
        let extent = widget
            .base()
            .children()
            .iter()
            .filter_map(|c| self.widgets.get(c).map(|w| w.base().bounds()))
            .reduce(|a, b| a.union(&b));
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.layout_changed(extent);
            self.touched.push(id);
        }
    }

    // Focus

    pub fn focused(&self) -> Option<WidgetId> {
        self.focus.focused()
    }

    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.focus.is_focused(id)
    }

    fn can_focus(&self, id: WidgetId) -> bool {
        self.widgets.get(&id).is_some_and(|w| w.is_focusable())
            && self.is_visible(id)
            && self.is_enabled(id)
    }

    /// Focus a widget, or clear focus with `None`. Fails for widgets that
    /// are not focusable, visible and enabled.
    pub fn set_focus(&mut self, target: Option<WidgetId>) -> bool {
        if let Some(id) = target {
            if !self.can_focus(id) {
                tracing::debug!("set_focus: {id} cannot take focus");
                return false;
            }
        }
        self.change_focus(target);
        self.flush_requests();
        true
    }

    fn change_focus(&mut self, target: Option<WidgetId>) {
        let previous = self.focus.focused();
        if previous == target {
            return;
        }
        self.focus.set_focus(target);
        if let Some(old) = previous {
            if let Some(w) = self.widgets.get_mut(&old) {
                w.focus_changed(false);
                self.touched.push(old);
            }
        }
        if let Some(new) = target {
            if let Some(w) = self.widgets.get_mut(&new) {
                w.focus_changed(true);
                self.touched.push(new);
            }
        }
        tracing::debug!("Focus moved from {previous:?} to {target:?}");
    }

    /// Move focus to the next or previous focusable widget in tree order,
    /// confined to the active modal widget if there is one.
    pub fn cycle_focus(&mut self, viewport: ViewportId, direction: FocusDirection) -> bool {
        let ring = self.focus_ring(viewport);
        match self.focus.next_in_ring(&ring, direction) {
            Some(next) => {
                self.change_focus(Some(next));
                self.flush_requests();
                true
            }
            None => false,
        }
    }

    /// Focusable, visible and enabled widgets in tree order.
    pub fn focus_ring(&self, viewport: ViewportId) -> Vec<WidgetId> {
        let scope = match self.modal_root(viewport) {
            Some(modal) => vec![modal],
            None => self.roots(viewport).to_vec(),
        };
        let mut ring = Vec::new();
        for root in scope {
            let mut stack = vec![root];
            while let Some(id) = stack.pop() {
                let Some(widget) = self.widgets.get(&id) else {
                    continue;
                };
                let base = widget.base();
                if !base.is_visible() || !base.is_enabled() {
                    continue;
                }
                if widget.is_focusable() {
                    ring.push(id);
                }
                stack.extend(base.children().iter().rev().copied());
            }
        }
        ring
    }

    /// Take the focus events queued since the last call.
    pub fn drain_focus_events(&mut self) -> Vec<FocusEvent> {
        self.focus.pop_events()
    }

    // Hit-testing

    /// Visible widgets of a viewport, back to front.
    fn paint_order(&self, viewport: ViewportId) -> Vec<WidgetId> {
        let mut order = Vec::new();
        let mut stack: Vec<WidgetId> = self.roots(viewport).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(widget) = self.widgets.get(&id) else {
                continue;
            };
            if !widget.base().is_visible() {
                continue;
            }
            order.push(id);
            stack.extend(widget.base().children().iter().rev().copied());
        }
        order
    }

    /// Front-most visible widget reporting [`Widget::is_modal`].
    pub fn modal_root(&self, viewport: ViewportId) -> Option<WidgetId> {
        self.paint_order(viewport)
            .into_iter()
            .rev()
            .find(|id| self.widgets.get(id).is_some_and(|w| w.is_modal()))
    }

    /// Clip inherited from a widget's ancestors.
    fn ancestor_clip(&self, id: WidgetId) -> Option<Rect> {
        let mut clip = None;
        for ancestor in self.ancestors_inclusive(id).into_iter().skip(1).rev() {
            if let Some(w) = self.widgets.get(&ancestor) {
                if w.base().clips_children() {
                    clip = narrow_clip(clip, w.child_clip_rect());
                }
            }
        }
        clip
    }

    /// Front-most widget under `point`, honouring clipping and the active
    /// modal widget.
    pub fn hit_test(&self, viewport: ViewportId, point: Vec2) -> Option<WidgetId> {
        profile_function!();
        match self.modal_root(viewport) {
            Some(modal) => Some(
                self.hit_subtree(modal, point, self.ancestor_clip(modal))
                    .unwrap_or(modal),
            ),
            None => self
                .roots(viewport)
                .iter()
                .rev()
                .find_map(|root| self.hit_subtree(*root, point, None)),
        }
    }

    fn hit_subtree(&self, id: WidgetId, point: Vec2, clip: Option<Rect>) -> Option<WidgetId> {
        let widget = self.widgets.get(&id)?;
        let base = widget.base();
        if !base.is_visible() || clip.is_some_and(|c| c.is_empty()) {
            return None;
        }
        let child_clip = if base.clips_children() {
            narrow_clip(clip, widget.child_clip_rect())
        } else {
            clip
        };
        for child in base.children().iter().rev() {
            if let Some(hit) = self.hit_subtree(*child, point, child_clip) {
                return Some(hit);
            }
        }
        let in_clip = clip.is_none_or(|c| c.contains(point));
        (in_clip && widget.hit_test(point)).then_some(id)
    }

    // Event routing

    /// Route one event. Returns whether a widget consumed it.
    pub fn handle_event(&mut self, viewport: ViewportId, event: &InputEvent) -> bool {
        profile_function!();
        if !self.viewports.contains_key(&viewport) {
            tracing::debug!("handle_event: unknown {viewport}");
            return false;
        }
        let consumed = match event {
            InputEvent::MouseMoved { position } => self.on_mouse_move(viewport, *position),
            InputEvent::MouseButton {
                button,
                state,
                position,
            } => self.on_mouse_button(viewport, *button, *state, *position),
            InputEvent::MouseWheel { delta, position } => {
                self.on_mouse_wheel(viewport, *delta, *position)
            }
            InputEvent::Key {
                key,
                state,
                modifiers,
            } => {
                self.modifiers = *modifiers;
                self.on_key(viewport, *key, *state, *modifiers)
            }
            InputEvent::Text { text } => self.on_text(viewport, text),
            InputEvent::ModifiersChanged(modifiers) => {
                self.modifiers = *modifiers;
                false
            }
            InputEvent::CursorLeft => {
                if let Some(vp) = self.viewports.get_mut(&viewport) {
                    vp.cursor = None;
                }
                self.set_hovered(viewport, None);
                false
            }
        };
        self.flush_requests();
        consumed
    }

    /// Route a batch, leaving only the events no widget consumed.
    pub fn handle_events(&mut self, viewport: ViewportId, events: &mut EventBatch) {
        profile_function!();
        events.dispatch(|event| HandleStatus::from_consumed(self.handle_event(viewport, event)));
    }

    /// Target and its ancestors up to `stop` (inclusive).
    fn bubble_chain(&self, target: WidgetId, stop: Option<WidgetId>) -> Vec<WidgetId> {
        let mut chain = self.ancestors_inclusive(target);
        if let Some(stop) = stop {
            if let Some(index) = chain.iter().position(|id| *id == stop) {
                chain.truncate(index + 1);
            }
        }
        chain
    }

    /// Offer an event along `chain` until a widget consumes it. Disabled
    /// widgets are skipped.
    fn dispatch<F>(&mut self, chain: &[WidgetId], mut handler: F) -> Option<WidgetId>
    where
        F: FnMut(&mut dyn Widget) -> bool,
    {
        profile_scope!("dispatch");
        for &id in chain {
            if !self.is_enabled(id) {
                continue;
            }
            let Some(widget) = self.widgets.get_mut(&id) else {
                continue;
            };
            let consumed = handler(widget.as_mut());
            self.touched.push(id);
            if consumed {
                tracing::trace!("Event consumed by {id} ({})", widget.debug_name());
                return Some(id);
            }
        }
        None
    }

    fn set_hovered(&mut self, viewport: ViewportId, target: Option<WidgetId>) {
        let Some(vp) = self.viewports.get_mut(&viewport) else {
            return;
        };
        if vp.hovered == target {
            return;
        }
        let old = std::mem::replace(&mut vp.hovered, target);
        if let Some(old) = old {
            if let Some(w) = self.widgets.get_mut(&old) {
                w.handle_mouse_leave();
                self.touched.push(old);
            }
        }
    }

    fn move_over(&mut self, viewport: ViewportId, position: Vec2) -> bool {
        let target = self.hit_test(viewport, position);
        self.set_hovered(viewport, target);
        let Some(target) = target else {
            return false;
        };
        let chain = self.bubble_chain(target, self.modal_root(viewport));
        self.dispatch(&chain, |w| w.handle_mouse_move(position))
            .is_some()
    }

    fn on_mouse_move(&mut self, viewport: ViewportId, position: Vec2) -> bool {
        let capture = match self.viewports.get_mut(&viewport) {
            Some(vp) => {
                vp.cursor = Some(position);
                vp.capture
            }
            None => return false,
        };
        match capture {
            Some((captured, _)) if self.widgets.contains_key(&captured) => {
                self.dispatch(&[captured], |w| w.handle_mouse_move(position));
                true
            }
            _ => self.move_over(viewport, position),
        }
    }

    fn on_mouse_button(
        &mut self,
        viewport: ViewportId,
        button: MouseButton,
        state: ElementState,
        position: Vec2,
    ) -> bool {
        let modifiers = self.modifiers;
        let modal = self.modal_root(viewport);
        match state {
            ElementState::Pressed => {
                let target = self.hit_test(viewport, position);
                self.set_hovered(viewport, target);
                if self.config.focus_on_click {
                    self.focus_from_click(target);
                }
                let Some(target) = target else {
                    return false;
                };
                let chain = self.bubble_chain(target, modal);
                let consumer = self.dispatch(&chain, |w| {
                    w.handle_mouse_button(button, state, position, modifiers)
                });
                if let (Some(consumer), Some(vp)) = (consumer, self.viewports.get_mut(&viewport)) {
                    vp.capture = Some((consumer, button));
                }
                consumer.is_some()
            }
            ElementState::Released => {
                let capture = self
                    .viewports
                    .get(&viewport)
                    .and_then(|vp| vp.capture)
                    .filter(|(_, b)| *b == button);
                let Some((captured, _)) = capture else {
                    let Some(target) = self.hit_test(viewport, position) else {
                        return false;
                    };
                    let chain = self.bubble_chain(target, modal);
                    return self
                        .dispatch(&chain, |w| {
                            w.handle_mouse_button(button, state, position, modifiers)
                        })
                        .is_some();
                };
                if let Some(vp) = self.viewports.get_mut(&viewport) {
                    vp.capture = None;
                }
                let chain = self.bubble_chain(captured, modal);
                self.dispatch(&chain, |w| {
                    w.handle_mouse_button(button, state, position, modifiers)
                });
                // Hover was frozen during the drag.
                self.flush_requests();
                self.move_over(viewport, position);
                true
            }
        }
    }

    fn focus_from_click(&mut self, target: Option<WidgetId>) {
        let focusable = target.and_then(|t| {
            self.ancestors_inclusive(t)
                .into_iter()
                .find(|id| self.can_focus(*id))
        });
        match focusable {
            Some(id) => self.change_focus(Some(id)),
            None if self.config.clear_focus_on_background_click => self.change_focus(None),
            None => {}
        }
    }

    fn on_mouse_wheel(&mut self, viewport: ViewportId, lines: Vec2, position: Vec2) -> bool {
        let delta = WheelDelta {
            lines,
            pixels: lines * self.config.wheel_line_height,
        };
        let Some(target) = self.hit_test(viewport, position) else {
            return false;
        };
        let chain = self.bubble_chain(target, self.modal_root(viewport));
        self.dispatch(&chain, |w| w.handle_scroll(delta, position))
            .is_some()
    }

    /// Keyboard target: the focused widget, or the modal widget when focus
    /// is outside it.
    fn key_target(&self, viewport: ViewportId) -> (Option<WidgetId>, Option<WidgetId>) {
        let modal = self.modal_root(viewport);
        let focused = self
            .focus
            .focused()
            .filter(|f| self.viewport_of(*f) == Some(viewport) && self.is_visible(*f));
        let target = match (focused, modal) {
            (Some(f), Some(m)) if self.is_ancestor_or_self(m, f) => Some(f),
            (_, Some(m)) => Some(m),
            (f, None) => f,
        };
        (target, modal)
    }

    fn on_key(
        &mut self,
        viewport: ViewportId,
        key: KeyCode,
        state: ElementState,
        modifiers: Modifiers,
    ) -> bool {
        let (target, modal) = self.key_target(viewport);
        if let Some(target) = target {
            let chain = self.bubble_chain(target, modal);
            if self
                .dispatch(&chain, |w| w.handle_key(key, state, modifiers))
                .is_some()
            {
                return true;
            }
        }
        if key == KeyCode::Tab && state == ElementState::Pressed && self.config.tab_navigation {
            let direction = if modifiers.shift() {
                FocusDirection::Previous
            } else {
                FocusDirection::Next
            };
            return self.cycle_focus(viewport, direction);
        }
        false
    }

    fn on_text(&mut self, viewport: ViewportId, text: &str) -> bool {
        let (Some(target), modal) = self.key_target(viewport) else {
            return false;
        };
        let chain = self.bubble_chain(target, modal);
        self.dispatch(&chain, |w| w.handle_text_input(text)).is_some()
    }

    // Requests

    /// Apply every request queued on any widget.
    pub fn apply_requests(&mut self) {
        let pending: Vec<WidgetId> = self
            .widgets
            .iter()
            .filter(|(_, w)| w.base().has_requests())
            .map(|(id, _)| *id)
            .collect();
        self.touched.extend(pending);
        self.flush_requests();
    }

    fn flush_requests(&mut self) {
        for _ in 0..MAX_REQUEST_ROUNDS {
            if self.touched.is_empty() {
                return;
            }
            let touched = std::mem::take(&mut self.touched);
            for id in touched {
                let requests = match self.widgets.get_mut(&id) {
                    Some(widget) => widget.drain_requests(),
                    None => continue,
                };
                for request in requests {
                    self.apply_request(id, request);
                }
            }
        }
        tracing::warn!("Widget requests still pending after {MAX_REQUEST_ROUNDS} rounds");
    }

    fn apply_request(&mut self, source: WidgetId, request: WidgetRequest) {
        tracing::trace!("Applying {request:?} from {source}");
        match request {
            WidgetRequest::SetVisible { target, visible } => {
                if !self.set_visible_inner(target, visible) {
                    tracing::debug!("{source} requested visibility of unknown {target}");
                }
            }
            WidgetRequest::TranslateChildren(delta) => self.translate_descendants(source, delta),
            WidgetRequest::BringToFront => {
                self.bring_to_front(source);
            }
            WidgetRequest::Focus => {
                if self.can_focus(source) {
                    self.change_focus(Some(source));
                } else {
                    tracing::debug!("{source} requested focus but cannot take it");
                }
            }
            WidgetRequest::ReleaseFocus => {
                if self
                    .focus
                    .focused()
                    .is_some_and(|f| self.is_ancestor_or_self(source, f))
                {
                    self.change_focus(None);
                }
            }
        }
    }

    // Render export

    /// Visible widgets of a viewport, back to front.
    pub fn render_list(&self, viewport: ViewportId) -> Vec<RenderEntry> {
        profile_function!();
        let mut entries = Vec::with_capacity(self.widgets.len());
        for root in self.roots(viewport) {
            self.collect_render(*root, None, 0, true, &mut entries);
        }
        entries
    }

    fn collect_render(
        &self,
        id: WidgetId,
        clip: Option<Rect>,
        depth: usize,
        parent_enabled: bool,
        entries: &mut Vec<RenderEntry>,
    ) {
        let Some(widget) = self.widgets.get(&id) else {
            return;
        };
        let base = widget.base();
        if !base.is_visible() || clip.is_some_and(|c| c.is_empty()) {
            return;
        }
        let enabled = parent_enabled && base.is_enabled();
        entries.push(RenderEntry {
            id,
            kind: widget.kind(),
            bounds: base.bounds(),
            clip,
            depth,
            focused: self.focus.is_focused(id),
            enabled,
            info: widget.render_info(),
        });
        let child_clip = if base.clips_children() {
            narrow_clip(clip, widget.child_clip_rect())
        } else {
            clip
        };
        for child in base.children() {
            self.collect_render(*child, child_clip, depth + 1, enabled, entries);
        }
    }
}

impl Default for GuiContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GuiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuiContext")
            .field("widgets", &self.widgets.len())
            .field("viewports", &self.viewports.len())
            .field("focused", &self.focus.focused())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Button, Dialog, DialogResult, Menu, Page, TabControl};
    use std::sync::{Arc, Mutex};

    fn click(ui: &mut GuiContext, x: f32, y: f32) -> bool {
        let down = ui.handle_event(
            ViewportId::MAIN,
            &InputEvent::mouse_down(MouseButton::Left, x, y),
        );
        ui.handle_event(
            ViewportId::MAIN,
            &InputEvent::mouse_up(MouseButton::Left, x, y),
        );
        down
    }

    fn key(ui: &mut GuiContext, key: KeyCode, modifiers: Modifiers) -> bool {
        ui.handle_event(ViewportId::MAIN, &InputEvent::key_down(key, modifiers))
    }

    fn button_at(x: f32, y: f32) -> Button {
        Button::new("b").with_bounds(Rect::new(x, y, 50.0, 20.0))
    }

    #[test]
    fn test_ids_never_reused() {
        let mut ui = GuiContext::new();
        let a = ui.add_root(button_at(0.0, 0.0));
        assert!(ui.remove_widget(a));
        let b = ui.add_root(button_at(0.0, 0.0));
        assert_ne!(a, b);
        assert!(!ui.contains(a));
        assert!(!ui.remove_widget(a));
    }

    #[test]
    fn test_typed_access_checks_kind() {
        let mut ui = GuiContext::new();
        let button = ui.add_root(button_at(0.0, 0.0));
        assert!(ui.get::<Page>(button).is_none());
        assert_eq!(ui.with_widget::<Page, _>(button, |p| p.title().to_string()), None);
        assert!(matches!(
            ui.typed_mut::<Page>(button),
            Err(UiError::WrongKind { id, .. }) if id == button
        ));
        assert_eq!(ui.with_widget::<Button, _>(button, |_| 7), Some(7));
    }

    #[test]
    fn test_remove_subtree() {
        let mut ui = GuiContext::new();
        let page = ui.add_root(Page::new("p").with_bounds(Rect::new(0.0, 0.0, 200.0, 200.0)));
        let child = ui.add_child(page, button_at(10.0, 40.0)).unwrap();
        ui.set_focus(Some(child));
        ui.drain_focus_events();

        assert!(ui.remove_widget(page));
        assert_eq!(ui.widget_count(), 0);
        assert!(ui.roots(ViewportId::MAIN).is_empty());
        assert_eq!(ui.focused(), None);
        assert_eq!(ui.drain_focus_events(), vec![FocusEvent::Lost(child)]);
    }

    #[test]
    fn test_hit_test_front_to_back_and_invisible() {
        let mut ui = GuiContext::new();
        let back = ui.add_root(button_at(0.0, 0.0));
        let front = ui.add_root(button_at(25.0, 0.0));
        assert_eq!(ui.hit_test(ViewportId::MAIN, Vec2::new(30.0, 10.0)), Some(front));
        assert_eq!(ui.hit_test(ViewportId::MAIN, Vec2::new(10.0, 10.0)), Some(back));

        ui.bring_to_front(back);
        assert_eq!(ui.hit_test(ViewportId::MAIN, Vec2::new(30.0, 10.0)), Some(back));

        ui.set_visible(back, false);
        assert_eq!(ui.hit_test(ViewportId::MAIN, Vec2::new(30.0, 10.0)), Some(front));
        assert_eq!(ui.hit_test(ViewportId::MAIN, Vec2::new(200.0, 10.0)), None);
    }

    #[test]
    fn test_clipping_restricts_descendants() {
        let mut ui = GuiContext::new();
        let page = ui.add_root(Page::new("").with_bounds(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let inside = ui.add_child(page, button_at(80.0, 10.0)).unwrap();
        // Visible part of the button is x in [80, 100).
        assert_eq!(ui.hit_test(ViewportId::MAIN, Vec2::new(90.0, 15.0)), Some(inside));
        assert_eq!(ui.hit_test(ViewportId::MAIN, Vec2::new(110.0, 15.0)), None);

        let entries = ui.render_list(ViewportId::MAIN);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].clip, Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(entries[1].depth, 1);
    }

    #[test]
    fn test_click_focuses_and_fires() {
        let clicks = Arc::new(Mutex::new(0));
        let sink = clicks.clone();
        let mut ui = GuiContext::new();
        let button = ui.add_root(button_at(0.0, 0.0).on_click(move || *sink.lock().unwrap() += 1));

        assert!(click(&mut ui, 10.0, 10.0));
        assert_eq!(*clicks.lock().unwrap(), 1);
        assert_eq!(ui.focused(), Some(button));

        // Background click clears focus.
        assert!(!click(&mut ui, 300.0, 300.0));
        assert_eq!(ui.focused(), None);
    }

    #[test]
    fn test_capture_routes_release_to_pressed_widget() {
        let clicks = Arc::new(Mutex::new(0));
        let sink = clicks.clone();
        let mut ui = GuiContext::new();
        let button = ui.add_root(button_at(0.0, 0.0).on_click(move || *sink.lock().unwrap() += 1));
        let other = ui.add_root(button_at(100.0, 0.0));

        ui.handle_event(ViewportId::MAIN, &InputEvent::mouse_down(MouseButton::Left, 10.0, 10.0));
        assert_eq!(ui.captured(ViewportId::MAIN), Some(button));
        ui.handle_event(ViewportId::MAIN, &InputEvent::mouse_move(110.0, 10.0));
        assert_eq!(ui.hovered(ViewportId::MAIN), Some(button));
        ui.handle_event(ViewportId::MAIN, &InputEvent::mouse_up(MouseButton::Left, 110.0, 10.0));

        // Released outside: no click, capture gone, hover follows the cursor.
        assert_eq!(*clicks.lock().unwrap(), 0);
        assert_eq!(ui.captured(ViewportId::MAIN), None);
        assert_eq!(ui.hovered(ViewportId::MAIN), Some(other));
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut ui = GuiContext::new();
        let a = ui.add_root(button_at(0.0, 0.0));
        let b = ui.add_root(button_at(60.0, 0.0));
        let c = ui.add_root(button_at(120.0, 0.0));
        ui.set_enabled(b, false);

        assert!(key(&mut ui, KeyCode::Tab, Modifiers::empty()));
        assert_eq!(ui.focused(), Some(a));
        key(&mut ui, KeyCode::Tab, Modifiers::empty());
        assert_eq!(ui.focused(), Some(c));
        key(&mut ui, KeyCode::Tab, Modifiers::empty());
        assert_eq!(ui.focused(), Some(a));
        key(&mut ui, KeyCode::Tab, Modifiers::SHIFT);
        assert_eq!(ui.focused(), Some(c));

        let mut quiet = GuiContext::with_config(GuiConfig {
            tab_navigation: false,
            ..GuiConfig::default()
        });
        quiet.add_root(button_at(0.0, 0.0));
        assert!(!key(&mut quiet, KeyCode::Tab, Modifiers::empty()));
        assert_eq!(quiet.focused(), None);
    }

    #[test]
    fn test_modal_dialog_confines_input() {
        let clicks = Arc::new(Mutex::new(0));
        let sink = clicks.clone();
        let mut ui = GuiContext::new();
        ui.add_root(button_at(0.0, 0.0).on_click(move || *sink.lock().unwrap() += 1));
        let dialog = ui.add_root(
            Dialog::new("Confirm").with_bounds(Rect::new(100.0, 100.0, 300.0, 200.0)),
        );
        let inner = ui.add_child(dialog, button_at(120.0, 140.0)).unwrap();

        ui.with_widget::<Dialog, _>(dialog, |d| d.open());
        assert_eq!(ui.modal_root(ViewportId::MAIN), Some(dialog));
        assert_eq!(ui.focused(), Some(dialog));

        // The button behind the dialog is unreachable.
        assert!(click(&mut ui, 10.0, 10.0));
        assert_eq!(*clicks.lock().unwrap(), 0);
        assert_eq!(ui.hit_test(ViewportId::MAIN, Vec2::new(10.0, 10.0)), Some(dialog));

        // Tab stays inside the dialog.
        key(&mut ui, KeyCode::Tab, Modifiers::empty());
        assert_eq!(ui.focused(), Some(inner));
        key(&mut ui, KeyCode::Tab, Modifiers::empty());
        assert_eq!(ui.focused(), Some(dialog));

        key(&mut ui, KeyCode::Escape, Modifiers::empty());
        assert_eq!(
            ui.get::<Dialog>(dialog).and_then(|d| d.result()),
            Some(DialogResult::Cancelled)
        );
        assert_eq!(ui.modal_root(ViewportId::MAIN), None);
        assert_eq!(ui.focused(), None);
    }

    #[test]
    fn test_menu_closes_on_outside_click() {
        let mut ui = GuiContext::new();
        let behind = ui.add_root(button_at(300.0, 300.0));
        let menu = ui.add_root(Menu::new());
        ui.with_widget::<Menu, _>(menu, |m| {
            m.add_item("Open");
            m.show_at(Vec2::new(0.0, 0.0));
        });
        assert_eq!(ui.focused(), Some(menu));

        assert!(click(&mut ui, 310.0, 310.0));
        assert!(!ui.get::<Menu>(menu).is_some_and(|m| m.is_open()));
        assert_eq!(ui.focused(), None);
        assert_ne!(ui.focused(), Some(behind));
    }

    #[test]
    fn test_hiding_menu_closes_it() {
        let closed = Arc::new(Mutex::new(0));
        let mut ui = GuiContext::new();
        let behind = ui.add_root(button_at(300.0, 300.0));
        let sink = closed.clone();
        let menu = ui.add_root(Menu::new().on_close(move || *sink.lock().unwrap() += 1));
        ui.with_widget::<Menu, _>(menu, |m| {
            m.add_item("Open");
            m.show_at(Vec2::new(0.0, 0.0));
        });
        assert_eq!(ui.modal_root(ViewportId::MAIN), Some(menu));

        assert!(ui.set_visible(menu, false));
        assert_eq!(ui.get::<Menu>(menu).map(|m| m.is_open()), Some(false));
        assert_eq!(*closed.lock().unwrap(), 1);
        assert_eq!(ui.focused(), None);

        // Showing the widget again does not reopen the menu.
        ui.set_visible(menu, true);
        assert_eq!(ui.modal_root(ViewportId::MAIN), None);
        assert!(click(&mut ui, 310.0, 310.0));
        assert_eq!(ui.focused(), Some(behind));
        assert_eq!(*closed.lock().unwrap(), 1);
    }

    #[test]
    fn test_hiding_dialog_cancels_it() {
        let mut ui = GuiContext::new();
        let dialog = ui.add_root(Dialog::new("Ask").with_bounds(Rect::new(0.0, 0.0, 200.0, 120.0)));
        ui.with_widget::<Dialog, _>(dialog, |d| d.open());
        assert_eq!(ui.modal_root(ViewportId::MAIN), Some(dialog));

        ui.set_visible(dialog, false);
        let state = ui.get::<Dialog>(dialog).map(|d| (d.is_open(), d.result()));
        assert_eq!(state, Some((false, Some(DialogResult::Cancelled))));

        ui.set_visible(dialog, true);
        assert_eq!(ui.modal_root(ViewportId::MAIN), None);
    }

    #[test]
    fn test_tab_control_toggles_pages() {
        let mut ui = GuiContext::new();
        let tabs = ui.add_root(TabControl::new().with_bounds(Rect::new(0.0, 0.0, 400.0, 300.0)));
        let p1 = ui.add_child(tabs, Page::new("one")).unwrap();
        let p2 = ui.add_child(tabs, Page::new("two")).unwrap();
        let (_, second) = ui
            .with_widget::<TabControl, _>(tabs, |t| {
                (t.add_tab_with_page("One", p1), t.add_tab_with_page("Two", p2))
            })
            .unwrap();
        assert!(ui.is_visible(p1));
        assert!(!ui.is_visible(p2));

        ui.with_widget::<TabControl, _>(tabs, |t| t.select_tab(second));
        assert!(!ui.is_visible(p1));
        assert!(ui.is_visible(p2));
    }

    #[test]
    fn test_set_bounds_moves_subtree() {
        let mut ui = GuiContext::new();
        let page = ui.add_root(Page::new("").with_bounds(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let child = ui.add_child(page, button_at(10.0, 10.0)).unwrap();
        ui.move_widget(page, Vec2::new(50.0, 20.0));
        assert_eq!(
            ui.widget(child).map(|w| w.base().bounds()),
            Some(Rect::new(60.0, 30.0, 50.0, 20.0))
        );
    }

    #[test]
    fn test_page_wheel_scrolls_children() {
        let mut ui = GuiContext::new();
        let page = ui.add_root(Page::new("").with_bounds(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let child = ui.add_child(page, button_at(0.0, 180.0)).unwrap();

        // Content is 200 high; one wheel line is 20 px.
        let consumed = ui.handle_event(
            ViewportId::MAIN,
            &InputEvent::MouseWheel {
                delta: Vec2::new(0.0, -3.0),
                position: Vec2::new(50.0, 50.0),
            },
        );
        assert!(consumed);
        assert_eq!(ui.get::<Page>(page).map(|p| p.scroll_offset().y), Some(60.0));
        assert_eq!(ui.widget(child).map(|w| w.base().bounds().y), Some(120.0));
    }

    #[test]
    fn test_reparent_rejects_cycles() {
        let mut ui = GuiContext::new();
        let outer = ui.add_root(Page::new("outer"));
        let inner = ui.add_child(outer, Page::new("inner")).unwrap();
        assert!(!ui.reparent(outer, Some(inner)));
        assert!(ui.reparent(inner, None));
        assert_eq!(ui.roots(ViewportId::MAIN), &[outer, inner]);
        assert!(ui.reparent(outer, Some(inner)));
        assert_eq!(ui.parent(outer), Some(inner));
    }

    #[test]
    fn test_effective_flags_follow_ancestors() {
        let mut ui = GuiContext::new();
        let page = ui.add_root(Page::new(""));
        let child = ui.add_child(page, button_at(0.0, 30.0)).unwrap();
        ui.set_enabled(page, false);
        assert!(!ui.is_enabled(child));
        assert!(!ui.set_focus(Some(child)));
        ui.set_enabled(page, true);
        ui.set_visible(page, false);
        assert!(!ui.is_visible(child));
        assert!(ui.render_list(ViewportId::MAIN).is_empty());
    }

    #[test]
    fn test_viewports_are_independent() {
        let mut ui = GuiContext::new();
        let second = ui.add_viewport();
        let a = ui.add_root(button_at(0.0, 0.0));
        let b = ui.add_root_in(second, button_at(0.0, 0.0)).unwrap();
        assert_eq!(ui.hit_test(ViewportId::MAIN, Vec2::new(5.0, 5.0)), Some(a));
        assert_eq!(ui.hit_test(second, Vec2::new(5.0, 5.0)), Some(b));
        assert!(ui.remove_viewport(second));
        assert!(!ui.contains(b));
        assert!(!ui.remove_viewport(ViewportId::MAIN));
        assert_eq!(ui.add_root_in(second, button_at(0.0, 0.0)), None);
    }

    #[test]
    fn test_handle_events_keeps_unconsumed() {
        let mut ui = GuiContext::new();
        ui.add_root(button_at(0.0, 0.0));
        let mut batch = EventBatch::new(vec![
            InputEvent::mouse_down(MouseButton::Left, 5.0, 5.0),
            InputEvent::mouse_down(MouseButton::Left, 500.0, 500.0),
        ]);
        ui.handle_events(ViewportId::MAIN, &mut batch);
        assert_eq!(batch.len(), 1);
    }
}
