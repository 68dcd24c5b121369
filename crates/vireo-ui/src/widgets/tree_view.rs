//! Hierarchical tree view.
//!
//! Nodes live in one flat [`ItemList`]; each node records its parent id and
//! its ordered child ids. Visible rows are produced by a depth-first walk
//! that skips the children of collapsed nodes.

use std::any::Any;
use std::sync::Arc;

use vireo_core::Color;
use vireo_core::geometry::Rect;
use vireo_core::math::Vec2;
use vireo_input::{ElementState, KeyCode, Modifiers, MouseButton};

use crate::items::{ItemId, ItemList, UserData};
use crate::render::{ItemVisualState, RenderInfo};
use crate::scroll::ScrollState;
use crate::theme::Palette;
use crate::widget::{ValueCallback, WheelDelta, Widget, WidgetBase, WidgetKind};

/// A node in a [`TreeView`].
#[derive(Clone)]
pub struct TreeNode {
    pub text: String,
    pub icon: Option<String>,
    pub parent: Option<ItemId>,
    pub children: Vec<ItemId>,
    pub expanded: bool,
    pub enabled: bool,
    pub user_data: Option<UserData>,
}

impl TreeNode {
    fn new(text: String, parent: Option<ItemId>) -> Self {
        Self {
            text,
            icon: None,
            parent,
            children: Vec::new(),
            expanded: false,
            enabled: true,
            user_data: None,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A row produced by the visibility walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleTreeItem {
    pub id: ItemId,
    /// 0 for roots.
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}

/// Which part of a row a point falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeHitZone {
    /// The expand/collapse column at the node's depth.
    Toggle,
    /// Anywhere else on the row.
    Row,
}

/// Visual style for [`TreeView`].
#[derive(Debug, Clone, PartialEq)]
pub struct TreeViewStyle {
    pub background: Color,
    pub text_color: Color,
    pub disabled_text_color: Color,
    pub hover_color: Color,
    pub selection_color: Color,
    /// Expand/collapse arrow.
    pub toggle_color: Color,
    pub border_color: Color,
    pub item_height: f32,
    /// Horizontal offset per depth level; also the toggle column width.
    pub indent: f32,
    pub padding: f32,
}

impl TreeViewStyle {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            background: palette.surface,
            text_color: palette.text,
            disabled_text_color: palette.text_disabled,
            hover_color: palette.hover,
            selection_color: palette.selection,
            toggle_color: palette.text_muted,
            border_color: palette.border,
            item_height: 22.0,
            indent: 16.0,
            padding: 2.0,
        }
    }
}

impl Default for TreeViewStyle {
    fn default() -> Self {
        Self::from_palette(&Palette::dark())
    }
}

/// Tree of text nodes with single selection.
pub struct TreeView {
    base: WidgetBase,
    nodes: ItemList<TreeNode>,
    roots: Vec<ItemId>,
    selected: Option<ItemId>,
    hovered: Option<ItemId>,
    scroll: ScrollState,
    style: TreeViewStyle,
    on_selection_changed: Option<ValueCallback<Option<ItemId>>>,
    on_expanded_changed: Option<ValueCallback<(ItemId, bool)>>,
}

impl TreeView {
    pub fn new() -> Self {
        let mut base = WidgetBase::new(Rect::new(0.0, 0.0, 240.0, 300.0));
        base.set_focusable(true);
        base.set_clip(true);
        Self {
            base,
            nodes: ItemList::new(),
            roots: Vec::new(),
            selected: None,
            hovered: None,
            scroll: ScrollState::new(),
            style: TreeViewStyle::default(),
            on_selection_changed: None,
            on_expanded_changed: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.set_bounds(bounds);
        self.sync_scroll();
        self
    }

    pub fn with_style(mut self, style: TreeViewStyle) -> Self {
        self.style = style;
        self.sync_scroll();
        self
    }

    pub fn on_selection_changed<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<ItemId>) + Send + Sync + 'static,
    {
        self.on_selection_changed = Some(Arc::new(callback));
        self
    }

    /// Receives `(node, expanded)` when the user expands or collapses a node.
    pub fn on_expanded_changed<F>(mut self, callback: F) -> Self
    where
        F: Fn((ItemId, bool)) + Send + Sync + 'static,
    {
        self.on_expanded_changed = Some(Arc::new(callback));
        self
    }

    pub fn style(&self) -> &TreeViewStyle {
        &self.style
    }

    // Structure

    /// Add a node under `parent` (or as a root). Returns `None` if the
    /// parent does not exist.
    pub fn add_node(&mut self, parent: Option<ItemId>, text: impl Into<String>) -> Option<ItemId> {
        if let Some(parent) = parent {
            if !self.nodes.contains(parent) {
                tracing::debug!("TreeView: add_node under unknown parent {parent}");
                return None;
            }
        }
        let id = self.nodes.push(TreeNode::new(text.into(), parent));
        match parent.and_then(|p| self.nodes.get_mut(p)) {
            Some(parent_node) => parent_node.children.push(id),
            None => self.roots.push(id),
        }
        self.sync_scroll();
        Some(id)
    }

    /// Remove a node and all its descendants.
    pub fn remove_node(&mut self, id: ItemId) -> bool {
        let Some(parent) = self.nodes.get(id).map(|n| n.parent) else {
            return false;
        };
        match parent.and_then(|p| self.nodes.get_mut(p)) {
            Some(parent) => parent.children.retain(|c| *c != id),
            None => self.roots.retain(|r| *r != id),
        }
        let removed = self.subtree(id);
        for node_id in &removed {
            self.nodes.remove(*node_id);
        }
        if self.selected.is_some_and(|s| removed.contains(&s)) {
            self.selected = None;
        }
        if self.hovered.is_some_and(|h| removed.contains(&h)) {
            self.hovered = None;
        }
        tracing::trace!("TreeView: removed {} node(s) under {id}", removed.len());
        self.sync_scroll();
        true
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.selected = None;
        self.hovered = None;
        self.sync_scroll();
    }

    /// `id` and every descendant, pre-order.
    fn subtree(&self, id: ItemId) -> Vec<ItemId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            if let Some(node) = self.nodes.get(current) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains_node(&self, id: ItemId) -> bool {
        self.nodes.contains(id)
    }

    pub fn node(&self, id: ItemId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn roots(&self) -> &[ItemId] {
        &self.roots
    }

    pub fn get_node_parent(&self, id: ItemId) -> Option<ItemId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Children of a node; empty for leaves and unknown ids.
    pub fn get_node_children(&self, id: ItemId) -> &[ItemId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn get_node_text(&self, id: ItemId) -> Option<&str> {
        self.nodes.get(id).map(|n| n.text.as_str())
    }

    pub fn set_node_text(&mut self, id: ItemId, text: impl Into<String>) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn set_node_icon(&mut self, id: ItemId, icon: Option<String>) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.icon = icon;
                true
            }
            None => false,
        }
    }

    pub fn set_node_enabled(&mut self, id: ItemId, enabled: bool) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn get_node_data(&self, id: ItemId) -> Option<&UserData> {
        self.nodes.get(id).and_then(|n| n.user_data.as_ref())
    }

    pub fn set_node_data(&mut self, id: ItemId, data: Option<UserData>) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.user_data = data;
                true
            }
            None => false,
        }
    }

    /// Depth of a node, 0 for roots.
    pub fn depth(&self, id: ItemId) -> Option<usize> {
        let mut node = self.nodes.get(id)?;
        let mut depth = 0;
        while let Some(parent) = node.parent {
            node = self.nodes.get(parent)?;
            depth += 1;
        }
        Some(depth)
    }

    // Expansion

    fn set_expanded(&mut self, id: ItemId, expanded: bool) -> bool {
        let changed = match self.nodes.get_mut(id) {
            Some(node) if node.expanded != expanded => {
                node.expanded = expanded;
                true
            }
            _ => false,
        };
        if changed {
            self.sync_scroll();
        }
        changed
    }

    pub fn expand(&mut self, id: ItemId) -> bool {
        self.set_expanded(id, true)
    }

    pub fn collapse(&mut self, id: ItemId) -> bool {
        self.set_expanded(id, false)
    }

    pub fn toggle(&mut self, id: ItemId) -> bool {
        let Some(expanded) = self.nodes.get(id).map(|n| n.expanded) else {
            return false;
        };
        self.set_expanded(id, !expanded)
    }

    pub fn is_expanded(&self, id: ItemId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.expanded)
    }

    pub fn expand_all(&mut self) {
        for (_, node) in self.nodes.iter_mut() {
            node.expanded = true;
        }
        self.sync_scroll();
    }

    pub fn collapse_all(&mut self) {
        for (_, node) in self.nodes.iter_mut() {
            node.expanded = false;
        }
        self.sync_scroll();
    }

    /// Expand every ancestor of `id` and scroll it into view.
    pub fn reveal(&mut self, id: ItemId) -> bool {
        if !self.nodes.contains(id) {
            return false;
        }
        let mut parent = self.get_node_parent(id);
        while let Some(p) = parent {
            if let Some(node) = self.nodes.get_mut(p) {
                node.expanded = true;
            }
            parent = self.get_node_parent(p);
        }
        self.sync_scroll();
        self.ensure_visible(id);
        true
    }

    /// Rows currently shown, top to bottom.
    pub fn get_visible_tree_items(&self) -> Vec<VisibleTreeItem> {
        let mut rows = Vec::new();
        let mut stack: Vec<(ItemId, usize)> = self.roots.iter().rev().map(|id| (*id, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            rows.push(VisibleTreeItem {
                id,
                depth,
                has_children: node.has_children(),
                expanded: node.expanded,
            });
            if node.expanded {
                stack.extend(node.children.iter().rev().map(|c| (*c, depth + 1)));
            }
        }
        rows
    }

    fn visible_row_count(&self) -> usize {
        self.get_visible_tree_items().len()
    }

    // Selection

    pub fn selected_node(&self) -> Option<ItemId> {
        self.selected
    }

    /// Select without firing callbacks. `None` clears.
    pub fn select_node(&mut self, id: Option<ItemId>) -> bool {
        match id {
            Some(id) if !self.nodes.contains(id) => false,
            _ => {
                self.selected = id;
                true
            }
        }
    }

    fn select_from_user(&mut self, id: ItemId) {
        if self.selected == Some(id) {
            return;
        }
        self.selected = Some(id);
        self.ensure_visible(id);
        if let Some(callback) = self.on_selection_changed.clone() {
            callback(Some(id));
        }
    }

    fn toggle_from_user(&mut self, id: ItemId) {
        let has_children = self.nodes.get(id).is_some_and(|n| n.has_children());
        if has_children && self.toggle(id) {
            let expanded = self.is_expanded(id);
            tracing::trace!("TreeView: node {id} expanded={expanded}");
            if let Some(callback) = self.on_expanded_changed.clone() {
                callback((id, expanded));
            }
        }
    }

    pub fn hovered_node(&self) -> Option<ItemId> {
        self.hovered
    }

    // Scrolling and geometry

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    pub fn set_scroll_offset(&mut self, offset: f32) -> bool {
        self.sync_scroll();
        self.scroll.set_offset(offset)
    }

    pub fn viewport_rect(&self) -> Rect {
        self.base.bounds().inset(self.style.padding)
    }

    pub fn content_height(&self) -> f32 {
        self.visible_row_count() as f32 * self.style.item_height
    }

    fn sync_scroll(&mut self) {
        let viewport = self.viewport_rect().height;
        self.scroll.set_extents(self.content_height(), viewport);
    }

    /// Scroll the minimum distance that shows `id`, if its row is visible.
    pub fn ensure_visible(&mut self, id: ItemId) -> bool {
        let rows = self.get_visible_tree_items();
        let Some(index) = rows.iter().position(|r| r.id == id) else {
            return false;
        };
        self.sync_scroll();
        let h = self.style.item_height;
        self.scroll.ensure_visible(index as f32 * h, h)
    }

    fn row_rect(&self, index: usize) -> Rect {
        let viewport = self.viewport_rect();
        let h = self.style.item_height;
        Rect::new(
            viewport.x,
            viewport.y + index as f32 * h - self.scroll.offset(),
            viewport.width,
            h,
        )
    }

    fn toggle_rect(&self, row: Rect, depth: usize) -> Rect {
        let indent = self.style.indent;
        Rect::new(row.x + depth as f32 * indent, row.y, indent, row.height)
    }

    /// Node under an absolute point and which zone of its row was hit.
    pub fn node_at(&self, point: Vec2) -> Option<(ItemId, TreeHitZone)> {
        let viewport = self.viewport_rect();
        if !viewport.contains(point) {
            return None;
        }
        let y = point.y - viewport.y + self.scroll.offset();
        let index = (y / self.style.item_height).floor();
        if index < 0.0 {
            return None;
        }
        let rows = self.get_visible_tree_items();
        let row = rows.get(index as usize)?;
        let rect = self.row_rect(index as usize);
        let zone = if row.has_children && self.toggle_rect(rect, row.depth).contains(point) {
            TreeHitZone::Toggle
        } else {
            TreeHitZone::Row
        };
        Some((row.id, zone))
    }

    fn move_selection(&mut self, delta: isize) {
        let rows = self.get_visible_tree_items();
        if rows.is_empty() {
            return;
        }
        let current = self.selected.and_then(|s| rows.iter().position(|r| r.id == s));
        let index = match current {
            Some(i) => (i as isize + delta).clamp(0, rows.len() as isize - 1) as usize,
            None => 0,
        };
        self.select_from_user(rows[index].id);
    }
}

impl Default for TreeView {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TreeView {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::TreeView
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
        position: Vec2,
        _modifiers: Modifiers,
    ) -> bool {
        if button != MouseButton::Left || !self.hit_test(position) {
            return false;
        }
        if state == ElementState::Pressed {
            self.sync_scroll();
            match self.node_at(position) {
                Some((id, TreeHitZone::Toggle)) => self.toggle_from_user(id),
                Some((id, TreeHitZone::Row)) => {
                    if self.nodes.get(id).is_some_and(|n| n.enabled) {
                        self.select_from_user(id);
                    }
                }
                None => {}
            }
        }
        true
    }

    fn handle_mouse_move(&mut self, position: Vec2) -> bool {
        self.hovered = self.node_at(position).map(|(id, _)| id);
        self.hit_test(position)
    }

    fn handle_mouse_leave(&mut self) {
        self.hovered = None;
    }

    fn handle_scroll(&mut self, delta: WheelDelta, _position: Vec2) -> bool {
        self.sync_scroll();
        if !self.scroll.is_scrollable() {
            return false;
        }
        self.scroll.scroll_by(-delta.pixels.y);
        true
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState, _modifiers: Modifiers) -> bool {
        if state != ElementState::Pressed {
            return false;
        }
        match key {
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Home => self.move_selection(isize::MIN / 2),
            KeyCode::End => self.move_selection(isize::MAX / 2),
            KeyCode::Left => {
                let Some(id) = self.selected else {
                    return true;
                };
                if self.is_expanded(id) && !self.get_node_children(id).is_empty() {
                    self.toggle_from_user(id);
                } else if let Some(parent) = self.get_node_parent(id) {
                    self.select_from_user(parent);
                }
            }
            KeyCode::Right => {
                let Some(id) = self.selected else {
                    return true;
                };
                let first_child = self.get_node_children(id).first().copied();
                match first_child {
                    Some(_) if !self.is_expanded(id) => self.toggle_from_user(id),
                    Some(child) => self.select_from_user(child),
                    None => {}
                }
            }
            KeyCode::Enter | KeyCode::Space => {
                if let Some(id) = self.selected {
                    self.toggle_from_user(id);
                }
            }
            _ => return false,
        }
        true
    }

    fn render_info(&self) -> RenderInfo {
        let viewport = self.viewport_rect();
        let mut rows = Vec::new();
        for (index, item) in self.get_visible_tree_items().into_iter().enumerate() {
            let rect = self.row_rect(index);
            if !rect.intersects(&viewport) {
                continue;
            }
            let Some(node) = self.nodes.get(item.id) else {
                continue;
            };
            let toggle = self.toggle_rect(rect, item.depth);
            let state = ItemVisualState::from_flags(
                self.hovered == Some(item.id),
                false,
                self.selected == Some(item.id),
                node.enabled,
            )
            .with(ItemVisualState::EXPANDED, item.expanded);
            rows.push(TreeRowInfo {
                id: item.id,
                rect,
                depth: item.depth,
                toggle: item.has_children.then_some(toggle),
                text_origin: Vec2::new(toggle.right(), rect.y),
                text: node.text.clone(),
                icon: node.icon.clone(),
                state,
            });
        }
        RenderInfo::TreeView(TreeViewRenderInfo {
            bounds: self.base.bounds(),
            viewport,
            rows,
            scroll_offset: self.scroll.offset(),
            content_height: self.content_height(),
            style: self.style.clone(),
        })
    }
}

/// One visible tree row.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRowInfo {
    pub id: ItemId,
    pub rect: Rect,
    pub depth: usize,
    /// Expand/collapse arrow area; `None` for leaves.
    pub toggle: Option<Rect>,
    /// Top-left of the icon and label.
    pub text_origin: Vec2,
    pub text: String,
    pub icon: Option<String>,
    pub state: ItemVisualState,
}

/// Render snapshot of a [`TreeView`].
#[derive(Debug, Clone, PartialEq)]
pub struct TreeViewRenderInfo {
    pub bounds: Rect,
    pub viewport: Rect,
    pub rows: Vec<TreeRowInfo>,
    pub scroll_offset: f32,
    pub content_height: f32,
    pub style: TreeViewStyle,
}
