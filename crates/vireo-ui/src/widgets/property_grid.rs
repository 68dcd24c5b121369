//! Two-column property editor grouped into collapsible categories.
//!
//! Rows are category headers followed, when the category is expanded, by its
//! properties. The value column edits in place:
//!
//! * Text, Int, Float and Range values open a text buffer. Enter commits,
//!   Escape cancels, and an input that does not parse leaves the old value.
//! * Bool values toggle and Choice values cycle on click.
//! * Read-only properties never change from input.

use std::any::Any;
use std::sync::Arc;

use vireo_core::Color;
use vireo_core::geometry::Rect;
use vireo_core::math::{Vec2, clamp_f32, clamp_f64};
use vireo_input::{ElementState, KeyCode, Modifiers, MouseButton};

use crate::error::{UiError, UiResult};
use crate::items::{ItemId, ItemList, UserData};
use crate::render::{ItemVisualState, RenderInfo};
use crate::scroll::ScrollState;
use crate::theme::Palette;
use crate::widget::{WheelDelta, Widget, WidgetBase, WidgetKind};

/// Typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Range { value: f64, min: f64, max: f64 },
    Choice { options: Vec<String>, selected: usize },
}

impl PropertyValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Text(_) => "text",
            PropertyValue::Int(_) => "integer",
            PropertyValue::Float(_) => "number",
            PropertyValue::Bool(_) => "boolean",
            PropertyValue::Range { .. } => "number",
            PropertyValue::Choice { .. } => "option",
        }
    }

    /// Text shown in the value column.
    pub fn format(&self) -> String {
        match self {
            PropertyValue::Text(text) => text.clone(),
            PropertyValue::Int(value) => value.to_string(),
            PropertyValue::Float(value) => value.to_string(),
            PropertyValue::Bool(value) => value.to_string(),
            PropertyValue::Range { value, .. } => value.to_string(),
            PropertyValue::Choice { options, selected } => {
                options.get(*selected).cloned().unwrap_or_default()
            }
        }
    }

    /// Whether the value is edited through a text buffer.
    pub fn is_text_editable(&self) -> bool {
        matches!(
            self,
            PropertyValue::Text(_)
                | PropertyValue::Int(_)
                | PropertyValue::Float(_)
                | PropertyValue::Range { .. }
        )
    }

    /// Parse `input` into a value of the same type.
    pub fn parse(&self, input: &str) -> UiResult<PropertyValue> {
        let trimmed = input.trim();
        let error = || UiError::Parse {
            input: input.to_string(),
            expected: self.type_name(),
        };
        match self {
            PropertyValue::Text(_) => Ok(PropertyValue::Text(input.to_string())),
            PropertyValue::Int(_) => trimmed
                .parse::<i64>()
                .map(PropertyValue::Int)
                .map_err(|_| error()),
            PropertyValue::Float(_) => parse_finite(trimmed)
                .map(PropertyValue::Float)
                .ok_or_else(error),
            PropertyValue::Range { min, max, .. } => parse_finite(trimmed)
                .map(|value| PropertyValue::Range {
                    value: clamp_f64(value, *min, *max),
                    min: *min,
                    max: *max,
                })
                .ok_or_else(error),
            PropertyValue::Bool(_) => {
                if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
                    Ok(PropertyValue::Bool(true))
                } else if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
                    Ok(PropertyValue::Bool(false))
                } else {
                    Err(error())
                }
            }
            PropertyValue::Choice { options, .. } => options
                .iter()
                .position(|option| option == trimmed)
                .map(|selected| PropertyValue::Choice {
                    options: options.clone(),
                    selected,
                })
                .ok_or_else(error),
        }
    }
}

fn parse_finite(input: &str) -> Option<f64> {
    input.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A collapsible group of properties.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub expanded: bool,
    properties: Vec<ItemId>,
}

impl Category {
    /// Properties in display order.
    pub fn properties(&self) -> &[ItemId] {
        &self.properties
    }
}

/// A named, typed value.
#[derive(Clone)]
pub struct Property {
    pub category: ItemId,
    pub name: String,
    pub value: PropertyValue,
    pub description: Option<String>,
    pub read_only: bool,
    pub user_data: Option<UserData>,
}

/// A row in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridRow {
    Category(ItemId),
    Property(ItemId),
}

/// Text-editing state of the grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing { property: ItemId, buffer: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyGridStyle {
    pub background: Color,
    pub category_background: Color,
    pub category_text_color: Color,
    pub name_color: Color,
    pub value_color: Color,
    pub read_only_color: Color,
    pub hover_color: Color,
    pub selection_color: Color,
    pub edit_background: Color,
    pub grid_line_color: Color,
    pub row_height: f32,
    /// Horizontal text inset inside each column.
    pub cell_padding: f32,
}

impl PropertyGridStyle {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            background: palette.surface,
            category_background: palette.surface_raised,
            category_text_color: palette.text,
            name_color: palette.text,
            value_color: palette.text,
            read_only_color: palette.text_muted,
            hover_color: palette.hover,
            selection_color: palette.selection,
            edit_background: palette.background,
            grid_line_color: palette.divider,
            row_height: 22.0,
            cell_padding: 4.0,
        }
    }
}

impl Default for PropertyGridStyle {
    fn default() -> Self {
        Self::from_palette(&Palette::dark())
    }
}

type PropertyChangedCallback = Arc<dyn Fn(ItemId, &PropertyValue) + Send + Sync>;

pub struct PropertyGrid {
    base: WidgetBase,
    categories: ItemList<Category>,
    properties: ItemList<Property>,
    selected: Option<ItemId>,
    hovered: Option<GridRow>,
    edit: EditState,
    scroll: ScrollState,
    split_ratio: f32,
    style: PropertyGridStyle,
    on_property_changed: Option<PropertyChangedCallback>,
}

impl PropertyGrid {
    pub fn new() -> Self {
        let mut base = WidgetBase::new(Rect::new(0.0, 0.0, 300.0, 400.0));
        base.set_focusable(true);
        base.set_clip(true);
        let mut grid = Self {
            base,
            categories: ItemList::new(),
            properties: ItemList::new(),
            selected: None,
            hovered: None,
            edit: EditState::Idle,
            scroll: ScrollState::new(),
            split_ratio: 0.4,
            style: PropertyGridStyle::default(),
            on_property_changed: None,
        };
        grid.sync_scroll();
        grid
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.base.set_bounds(bounds);
        self.sync_scroll();
        self
    }

    pub fn with_style(mut self, style: PropertyGridStyle) -> Self {
        self.style = style;
        self.sync_scroll();
        self
    }

    pub fn with_split_ratio(mut self, ratio: f32) -> Self {
        self.set_split_ratio(ratio);
        self
    }

    /// Fired when input (a committed edit, a Bool toggle, a Choice cycle)
    /// changes a value.
    pub fn on_property_changed<F>(mut self, callback: F) -> Self
    where
        F: Fn(ItemId, &PropertyValue) + Send + Sync + 'static,
    {
        self.on_property_changed = Some(Arc::new(callback));
        self
    }

    pub fn style(&self) -> &PropertyGridStyle {
        &self.style
    }

    pub fn split_ratio(&self) -> f32 {
        self.split_ratio
    }

    /// Fraction of the width given to the name column, clamped to `[0.1, 0.9]`.
    pub fn set_split_ratio(&mut self, ratio: f32) {
        self.split_ratio = clamp_f32(ratio, 0.1, 0.9);
    }

    // Categories

    pub fn add_category(&mut self, name: impl Into<String>) -> ItemId {
        let id = self.categories.push(Category {
            name: name.into(),
            expanded: true,
            properties: Vec::new(),
        });
        self.sync_scroll();
        id
    }

    /// Remove a category and all of its properties.
    pub fn remove_category(&mut self, id: ItemId) -> bool {
        let Some(category) = self.categories.remove(id) else {
            return false;
        };
        for property in category.properties {
            self.forget_property(property);
        }
        if self.hovered == Some(GridRow::Category(id)) {
            self.hovered = None;
        }
        self.sync_scroll();
        true
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn category(&self, id: ItemId) -> Option<&Category> {
        self.categories.get(id)
    }

    pub fn category_ids(&self) -> Vec<ItemId> {
        self.categories.ids().collect()
    }

    pub fn is_category_expanded(&self, id: ItemId) -> bool {
        self.categories.get(id).is_some_and(|c| c.expanded)
    }

    pub fn set_category_expanded(&mut self, id: ItemId, expanded: bool) -> bool {
        let Some(category) = self.categories.get_mut(id) else {
            return false;
        };
        category.expanded = expanded;
        if !expanded {
            let hidden = category.properties.clone();
            let editing_hidden = matches!(
                &self.edit,
                EditState::Editing { property, .. } if hidden.contains(property)
            );
            if editing_hidden {
                self.edit = EditState::Idle;
            }
            if self
                .hovered
                .is_some_and(|row| matches!(row, GridRow::Property(p) if hidden.contains(&p)))
            {
                self.hovered = None;
            }
        }
        self.sync_scroll();
        true
    }

    pub fn toggle_category(&mut self, id: ItemId) -> bool {
        let expanded = self.is_category_expanded(id);
        self.set_category_expanded(id, !expanded)
    }

    // Properties

    /// Add a property to a category. `None` for an unknown category.
    pub fn add_property(
        &mut self,
        category: ItemId,
        name: impl Into<String>,
        value: PropertyValue,
    ) -> Option<ItemId> {
        if !self.categories.contains(category) {
            tracing::debug!("PropertyGrid: add_property to unknown category {category}");
            return None;
        }
        let id = self.properties.push(Property {
            category,
            name: name.into(),
            value,
            description: None,
            read_only: false,
            user_data: None,
        });
        if let Some(c) = self.categories.get_mut(category) {
            c.properties.push(id);
        }
        self.sync_scroll();
        Some(id)
    }

    pub fn remove_property(&mut self, id: ItemId) -> bool {
        let Some(category) = self.properties.get(id).map(|p| p.category) else {
            return false;
        };
        if let Some(c) = self.categories.get_mut(category) {
            c.properties.retain(|p| *p != id);
        }
        self.forget_property(id);
        self.sync_scroll();
        true
    }

    fn forget_property(&mut self, id: ItemId) {
        self.properties.remove(id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.hovered == Some(GridRow::Property(id)) {
            self.hovered = None;
        }
        if matches!(&self.edit, EditState::Editing { property, .. } if *property == id) {
            self.edit = EditState::Idle;
        }
    }

    pub fn clear(&mut self) {
        self.categories.clear();
        self.properties.clear();
        self.selected = None;
        self.hovered = None;
        self.edit = EditState::Idle;
        self.sync_scroll();
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn property(&self, id: ItemId) -> Option<&Property> {
        self.properties.get(id)
    }

    pub fn get_property_value(&self, id: ItemId) -> Option<&PropertyValue> {
        self.properties.get(id).map(|p| &p.value)
    }

    /// Formatted value, as shown in the value column.
    pub fn get_property_string(&self, id: ItemId) -> Option<String> {
        self.properties.get(id).map(|p| p.value.format())
    }

    /// Replace a value. Does not fire callbacks; an open edit of the
    /// property is discarded.
    pub fn set_property_value(&mut self, id: ItemId, value: PropertyValue) -> bool {
        let Some(property) = self.properties.get_mut(id) else {
            return false;
        };
        property.value = value;
        if matches!(&self.edit, EditState::Editing { property, .. } if *property == id) {
            self.edit = EditState::Idle;
        }
        true
    }

    /// Parse `input` with the property's own type and store it. Read-only
    /// properties accept values set this way.
    pub fn set_property_from_string(&mut self, id: ItemId, input: &str) -> bool {
        match self.parse_for(id, input) {
            Ok(value) => self.set_property_value(id, value),
            Err(err) => {
                tracing::warn!("PropertyGrid: rejected value for {id}: {err}");
                false
            }
        }
    }

    fn parse_for(&self, id: ItemId, input: &str) -> UiResult<PropertyValue> {
        self.properties.try_get(id)?.value.parse(input)
    }

    pub fn is_property_read_only(&self, id: ItemId) -> bool {
        self.properties.get(id).is_some_and(|p| p.read_only)
    }

    pub fn set_property_read_only(&mut self, id: ItemId, read_only: bool) -> bool {
        let Some(property) = self.properties.get_mut(id) else {
            return false;
        };
        property.read_only = read_only;
        if read_only
            && matches!(&self.edit, EditState::Editing { property, .. } if *property == id)
        {
            self.edit = EditState::Idle;
        }
        true
    }

    pub fn set_property_description(&mut self, id: ItemId, description: Option<String>) -> bool {
        match self.properties.get_mut(id) {
            Some(property) => {
                property.description = description;
                true
            }
            None => false,
        }
    }

    pub fn set_property_data(&mut self, id: ItemId, data: Option<UserData>) -> bool {
        match self.properties.get_mut(id) {
            Some(property) => {
                property.user_data = data;
                true
            }
            None => false,
        }
    }

    pub fn get_property_data(&self, id: ItemId) -> Option<&UserData> {
        self.properties.get(id).and_then(|p| p.user_data.as_ref())
    }

    // Selection

    pub fn selected_property(&self) -> Option<ItemId> {
        self.selected
    }

    pub fn select_property(&mut self, id: Option<ItemId>) -> bool {
        match id {
            Some(id) if !self.properties.contains(id) => false,
            _ => {
                self.selected = id;
                true
            }
        }
    }

    // Editing

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.edit, EditState::Editing { .. })
    }

    /// Open a text edit of a writable text-like property. Any edit in
    /// progress is committed first.
    pub fn begin_edit(&mut self, id: ItemId) -> bool {
        let Some(property) = self.properties.get(id) else {
            return false;
        };
        if property.read_only || !property.value.is_text_editable() {
            return false;
        }
        if !self.is_category_expanded(property.category) {
            return false;
        }
        let buffer = property.value.format();
        self.commit_edit();
        self.selected = Some(id);
        self.edit = EditState::Editing {
            property: id,
            buffer,
        };
        true
    }

    pub fn edit_buffer(&self) -> Option<&str> {
        match &self.edit {
            EditState::Editing { buffer, .. } => Some(buffer),
            EditState::Idle => None,
        }
    }

    /// Replace the edit buffer. No-op when idle.
    pub fn set_edit_buffer(&mut self, text: impl Into<String>) -> bool {
        match &mut self.edit {
            EditState::Editing { buffer, .. } => {
                *buffer = text.into();
                true
            }
            EditState::Idle => false,
        }
    }

    /// Parse the buffer into the property and return to idle. On a parse
    /// failure the old value is kept and `false` is returned.
    pub fn commit_edit(&mut self) -> bool {
        let EditState::Editing { property, buffer } = std::mem::take(&mut self.edit) else {
            return false;
        };
        match self.parse_for(property, &buffer) {
            Ok(value) => {
                self.change_from_user(property, value);
                true
            }
            Err(err) => {
                tracing::warn!("PropertyGrid: edit of {property} rejected: {err}");
                false
            }
        }
    }

    pub fn cancel_edit(&mut self) -> bool {
        !matches!(std::mem::take(&mut self.edit), EditState::Idle)
    }

    fn change_from_user(&mut self, id: ItemId, value: PropertyValue) {
        let Some(property) = self.properties.get_mut(id) else {
            return;
        };
        if property.value == value {
            return;
        }
        property.value = value;
        tracing::debug!("PropertyGrid: {} = {}", property.name, property.value.format());
        if let Some(callback) = self.on_property_changed.clone() {
            callback(id, &property.value);
        }
    }

    /// Toggle a Bool or cycle a Choice. Other types and read-only
    /// properties are left alone.
    fn activate_value(&mut self, id: ItemId) -> bool {
        let Some(property) = self.properties.get(id).filter(|p| !p.read_only) else {
            return false;
        };
        let next = match &property.value {
            PropertyValue::Bool(value) => PropertyValue::Bool(!value),
            PropertyValue::Choice { options, selected } if !options.is_empty() => {
                PropertyValue::Choice {
                    options: options.clone(),
                    selected: (selected + 1) % options.len(),
                }
            }
            _ => return false,
        };
        self.change_from_user(id, next);
        true
    }

    // Rows and geometry

    /// Rows in display order.
    pub fn visible_rows(&self) -> Vec<GridRow> {
        let mut rows = Vec::with_capacity(self.categories.len() + self.properties.len());
        for (id, category) in self.categories.iter() {
            rows.push(GridRow::Category(id));
            if category.expanded {
                rows.extend(category.properties.iter().copied().map(GridRow::Property));
            }
        }
        rows
    }

    pub fn content_height(&self) -> f32 {
        self.visible_rows().len() as f32 * self.style.row_height
    }

    pub fn viewport_rect(&self) -> Rect {
        self.base.bounds()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    pub fn set_scroll_offset(&mut self, offset: f32) -> bool {
        self.scroll.set_offset(offset)
    }

    fn sync_scroll(&mut self) {
        let content = self.content_height();
        let viewport = self.viewport_rect().height;
        self.scroll.set_extents(content, viewport);
    }

    /// X coordinate of the column divider.
    pub fn split_x(&self) -> f32 {
        let b = self.base.bounds();
        b.x + b.width * self.split_ratio
    }

    fn row_rect_at(&self, index: usize) -> Rect {
        let viewport = self.viewport_rect();
        let h = self.style.row_height;
        Rect::new(
            viewport.x,
            viewport.y + index as f32 * h - self.scroll.offset(),
            viewport.width,
            h,
        )
    }

    pub fn row_rect(&self, row: GridRow) -> Option<Rect> {
        self.visible_rows()
            .iter()
            .position(|r| *r == row)
            .map(|index| self.row_rect_at(index))
    }

    /// Value-column rectangle of a visible property.
    pub fn value_rect(&self, id: ItemId) -> Option<Rect> {
        self.row_rect(GridRow::Property(id)).map(|row| {
            let split = self.split_x();
            Rect::new(split, row.y, row.right() - split, row.height)
        })
    }

    pub fn row_at(&self, point: Vec2) -> Option<GridRow> {
        let viewport = self.viewport_rect();
        if !viewport.contains(point) || self.style.row_height <= 0.0 {
            return None;
        }
        let offset = point.y - viewport.y + self.scroll.offset();
        let index = (offset / self.style.row_height) as usize;
        self.visible_rows().get(index).copied()
    }

    fn ensure_row_visible(&mut self, row: GridRow) {
        if let Some(index) = self.visible_rows().iter().position(|r| *r == row) {
            let h = self.style.row_height;
            self.scroll.ensure_visible(index as f32 * h, h);
        }
    }

    /// Next visible property row above or below the selection.
    fn step_selection(&self, forward: bool) -> Option<ItemId> {
        let properties: Vec<ItemId> = self
            .visible_rows()
            .into_iter()
            .filter_map(|row| match row {
                GridRow::Property(id) => Some(id),
                GridRow::Category(_) => None,
            })
            .collect();
        let current = self
            .selected
            .and_then(|id| properties.iter().position(|p| *p == id));
        match (current, forward) {
            (None, true) => properties.first().copied(),
            (None, false) => properties.last().copied(),
            (Some(i), true) => properties.get(i + 1).copied(),
            (Some(i), false) => i.checked_sub(1).and_then(|i| properties.get(i).copied()),
        }
    }
}

impl Default for PropertyGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for PropertyGrid {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::PropertyGrid
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
        if button != MouseButton::Left || state != ElementState::Pressed {
            return false;
        }
        self.sync_scroll();
        let Some(row) = self.row_at(position) else {
            self.commit_edit();
            return self.viewport_rect().contains(position);
        };
        match row {
            GridRow::Category(id) => {
                self.commit_edit();
                self.toggle_category(id);
            }
            GridRow::Property(id) => {
                let editing_this =
                    matches!(&self.edit, EditState::Editing { property, .. } if *property == id);
                if editing_this {
                    return true;
                }
                self.commit_edit();
                self.selected = Some(id);
                if position.x >= self.split_x() && !self.activate_value(id) {
                    self.begin_edit(id);
                }
            }
        }
        true
    }

    fn handle_mouse_move(&mut self, position: Vec2) -> bool {
        self.hovered = self.row_at(position);
        self.hovered.is_some()
    }

    fn handle_mouse_leave(&mut self) {
        self.hovered = None;
    }

    fn handle_scroll(&mut self, delta: WheelDelta, _position: Vec2) -> bool {
        self.sync_scroll();
        self.scroll.scroll_by(-delta.pixels.y)
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState, _modifiers: Modifiers) -> bool {
        if state != ElementState::Pressed {
            return false;
        }
        if self.is_editing() {
            match key {
                KeyCode::Enter => {
                    self.commit_edit();
                }
                KeyCode::Escape => {
                    self.cancel_edit();
                }
                KeyCode::Backspace => {
                    if let EditState::Editing { buffer, .. } = &mut self.edit {
                        buffer.pop();
                    }
                }
                // Tab leaves the editor so focus can move on.
                KeyCode::Tab => {
                    self.commit_edit();
                    return false;
                }
                _ => {}
            }
            return true;
        }
        match key {
            KeyCode::Up | KeyCode::Down => {
                if let Some(id) = self.step_selection(key == KeyCode::Down) {
                    self.selected = Some(id);
                    self.sync_scroll();
                    self.ensure_row_visible(GridRow::Property(id));
                }
                true
            }
            KeyCode::Enter | KeyCode::Space => match self.selected {
                Some(id) => {
                    if !self.activate_value(id) && key == KeyCode::Enter {
                        self.begin_edit(id);
                    }
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn handle_text_input(&mut self, text: &str) -> bool {
        match &mut self.edit {
            EditState::Editing { buffer, .. } => {
                buffer.extend(text.chars().filter(|c| !c.is_control()));
                true
            }
            EditState::Idle => false,
        }
    }

    fn focus_changed(&mut self, focused: bool) {
        if !focused {
            self.commit_edit();
        }
    }

    fn render_info(&self) -> RenderInfo {
        let viewport = self.viewport_rect();
        let split = self.split_x();
        let rows = self
            .visible_rows()
            .into_iter()
            .enumerate()
            .filter_map(|(index, row)| {
                let rect = self.row_rect_at(index);
                if !rect.intersects(&viewport) {
                    return None;
                }
                let hovered = self.hovered == Some(row);
                match row {
                    GridRow::Category(id) => {
                        let category = self.categories.get(id)?;
                        Some(PropertyRowInfo::Category {
                            id,
                            rect,
                            name: category.name.clone(),
                            state: ItemVisualState::from_flags(hovered, false, false, true)
                                .with(ItemVisualState::EXPANDED, category.expanded),
                        })
                    }
                    GridRow::Property(id) => {
                        let property = self.properties.get(id)?;
                        let editing = match &self.edit {
                            EditState::Editing { property, buffer } if *property == id => {
                                Some(buffer.clone())
                            }
                            _ => None,
                        };
                        let checked = matches!(property.value, PropertyValue::Bool(true));
                        Some(PropertyRowInfo::Property {
                            id,
                            rect,
                            name_rect: Rect::new(rect.x, rect.y, split - rect.x, rect.height),
                            value_rect: Rect::new(split, rect.y, rect.right() - split, rect.height),
                            name: property.name.clone(),
                            value: editing
                                .clone()
                                .unwrap_or_else(|| property.value.format()),
                            editing: editing.is_some(),
                            read_only: property.read_only,
                            state: ItemVisualState::from_flags(
                                hovered,
                                false,
                                self.selected == Some(id),
                                true,
                            )
                            .with(ItemVisualState::CHECKED, checked),
                        })
                    }
                }
            })
            .collect();
        RenderInfo::PropertyGrid(PropertyGridRenderInfo {
            bounds: self.base.bounds(),
            viewport,
            split_x: split,
            rows,
            scroll_offset: self.scroll.offset(),
            content_height: self.content_height(),
            style: self.style.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyRowInfo {
    Category {
        id: ItemId,
        rect: Rect,
        name: String,
        state: ItemVisualState,
    },
    Property {
        id: ItemId,
        rect: Rect,
        name_rect: Rect,
        value_rect: Rect,
        name: String,
        /// Formatted value, or the edit buffer while editing.
        value: String,
        editing: bool,
        read_only: bool,
        state: ItemVisualState,
    },
}

/// Render snapshot of a [`PropertyGrid`].
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyGridRenderInfo {
    pub bounds: Rect,
    pub viewport: Rect,
    pub split_x: f32,
    /// Rows intersecting the viewport.
    pub rows: Vec<PropertyRowInfo>,
    pub scroll_offset: f32,
    pub content_height: f32,
    pub style: PropertyGridStyle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn press(grid: &mut PropertyGrid, at: Vec2) -> bool {
        grid.handle_mouse_button(MouseButton::Left, ElementState::Pressed, at, Modifiers::empty())
    }

    fn key(grid: &mut PropertyGrid, key: KeyCode) -> bool {
        grid.handle_key(key, ElementState::Pressed, Modifiers::empty())
    }

    /// Grid at the origin, 200 wide, split at x = 80, rows 22 high.
    fn sample() -> (PropertyGrid, ItemId, [ItemId; 4]) {
        let mut grid = PropertyGrid::new().with_bounds(Rect::new(0.0, 0.0, 200.0, 200.0));
        let cat = grid.add_category("Transform");
        let name = grid
            .add_property(cat, "Name", PropertyValue::Text("box".into()))
            .unwrap();
        let count = grid.add_property(cat, "Count", PropertyValue::Int(3)).unwrap();
        let visible = grid
            .add_property(cat, "Visible", PropertyValue::Bool(true))
            .unwrap();
        let opacity = grid
            .add_property(
                cat,
                "Opacity",
                PropertyValue::Range {
                    value: 0.5,
                    min: 0.0,
                    max: 1.0,
                },
            )
            .unwrap();
        (grid, cat, [name, count, visible, opacity])
    }

    #[test]
    fn test_parse_per_type() {
        assert_eq!(PropertyValue::Int(0).parse(" 42 "), Ok(PropertyValue::Int(42)));
        assert!(PropertyValue::Int(0).parse("4.2").is_err());
        assert_eq!(PropertyValue::Float(0.0).parse("2.5"), Ok(PropertyValue::Float(2.5)));
        assert!(PropertyValue::Float(0.0).parse("nan").is_err());
        assert_eq!(
            PropertyValue::Range { value: 0.0, min: 0.0, max: 10.0 }.parse("25"),
            Ok(PropertyValue::Range { value: 10.0, min: 0.0, max: 10.0 })
        );
        assert_eq!(PropertyValue::Bool(false).parse("1"), Ok(PropertyValue::Bool(true)));
        assert_eq!(PropertyValue::Bool(true).parse("False"), Ok(PropertyValue::Bool(false)));
        assert!(PropertyValue::Bool(true).parse("yes").is_err());

        let choice = PropertyValue::Choice {
            options: vec!["Low".into(), "High".into()],
            selected: 0,
        };
        assert_eq!(
            choice.parse("High"),
            Ok(PropertyValue::Choice {
                options: vec!["Low".into(), "High".into()],
                selected: 1
            })
        );
        assert_eq!(
            choice.parse("Medium"),
            Err(UiError::Parse {
                input: "Medium".into(),
                expected: "option"
            })
        );
    }

    #[test]
    fn test_range_commit_clamps_to_bounds() {
        let (mut grid, _, [.., opacity]) = sample();
        let range = |value| PropertyValue::Range { value, min: 0.0, max: 1.0 };

        assert!(grid.begin_edit(opacity));
        assert!(grid.set_edit_buffer("3"));
        assert!(grid.commit_edit());
        assert_eq!(grid.get_property_value(opacity), Some(&range(1.0)));

        grid.begin_edit(opacity);
        grid.set_edit_buffer("-2");
        assert!(grid.commit_edit());
        assert_eq!(grid.get_property_value(opacity), Some(&range(0.0)));
    }

    #[test]
    fn test_rows_only_under_expanded_categories() {
        let (mut grid, cat, [name, ..]) = sample();
        let other = grid.add_category("Other");
        assert_eq!(grid.visible_rows().len(), 6);
        assert_eq!(grid.visible_rows()[1], GridRow::Property(name));

        grid.set_category_expanded(cat, false);
        assert_eq!(
            grid.visible_rows(),
            vec![GridRow::Category(cat), GridRow::Category(other)]
        );
    }

    #[test]
    fn test_edit_commit_and_cancel() {
        let (mut grid, _, [_, count, ..]) = sample();
        assert!(grid.begin_edit(count));
        assert_eq!(grid.edit_buffer(), Some("3"));
        key(&mut grid, KeyCode::Backspace);
        grid.handle_text_input("17");
        key(&mut grid, KeyCode::Enter);
        assert!(!grid.is_editing());
        assert_eq!(grid.get_property_value(count), Some(&PropertyValue::Int(17)));

        grid.begin_edit(count);
        grid.handle_text_input("9");
        key(&mut grid, KeyCode::Escape);
        assert_eq!(grid.get_property_string(count).as_deref(), Some("17"));
    }

    #[test]
    fn test_failed_parse_keeps_old_value() {
        let (mut grid, _, [_, count, _, opacity]) = sample();
        grid.begin_edit(count);
        grid.set_edit_buffer("abc");
        assert!(!grid.commit_edit());
        assert!(!grid.is_editing());
        assert_eq!(grid.get_property_value(count), Some(&PropertyValue::Int(3)));

        grid.begin_edit(opacity);
        grid.set_edit_buffer("7");
        assert!(grid.commit_edit());
        assert_eq!(grid.get_property_string(opacity).as_deref(), Some("1"));
    }

    #[test]
    fn test_click_toggles_bool_and_cycles_choice() {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = changes.clone();
        let (grid, cat, [_, _, visible, _]) = sample();
        let mut grid = grid.on_property_changed(move |id, value| {
            sink.lock().unwrap().push((id, value.clone()));
        });
        let quality = grid
            .add_property(
                cat,
                "Quality",
                PropertyValue::Choice {
                    options: vec!["Low".into(), "High".into()],
                    selected: 1,
                },
            )
            .unwrap();

        // Visible is the fourth row: y in [66, 88).
        assert!(press(&mut grid, Vec2::new(150.0, 70.0)));
        assert_eq!(grid.get_property_value(visible), Some(&PropertyValue::Bool(false)));
        assert!(!grid.is_editing());

        // Quality is the sixth row: y in [110, 132). Cycling wraps.
        press(&mut grid, Vec2::new(150.0, 120.0));
        assert_eq!(grid.get_property_string(quality).as_deref(), Some("Low"));
        assert_eq!(changes.lock().unwrap().len(), 2);
        assert_eq!(changes.lock().unwrap()[0], (visible, PropertyValue::Bool(false)));
    }

    #[test]
    fn test_click_value_opens_editor_but_not_for_read_only() {
        let (mut grid, _, [name, count, ..]) = sample();
        grid.set_property_read_only(count, true);

        press(&mut grid, Vec2::new(150.0, 30.0));
        assert_eq!(
            grid.edit_state(),
            &EditState::Editing {
                property: name,
                buffer: "box".into()
            }
        );

        // Clicking another row commits the edit.
        grid.handle_text_input("!");
        press(&mut grid, Vec2::new(150.0, 50.0));
        assert!(!grid.is_editing());
        assert_eq!(grid.get_property_string(name).as_deref(), Some("box!"));
        assert_eq!(grid.selected_property(), Some(count));
        assert!(!grid.begin_edit(count));
    }

    #[test]
    fn test_category_click_collapses() {
        let (mut grid, cat, _) = sample();
        press(&mut grid, Vec2::new(10.0, 5.0));
        assert!(!grid.is_category_expanded(cat));
        assert_eq!(grid.content_height(), 22.0);
    }

    #[test]
    fn test_remove_category_cascades() {
        let (mut grid, cat, [name, ..]) = sample();
        grid.begin_edit(name);
        assert!(grid.remove_category(cat));
        assert_eq!(grid.property_count(), 0);
        assert!(!grid.is_editing());
        assert_eq!(grid.get_property_value(name), None);
        assert!(grid.add_property(cat, "Late", PropertyValue::Int(1)).is_none());
    }

    #[test]
    fn test_scroll_clamped() {
        let (mut grid, cat, _) = sample();
        for i in 0..20 {
            grid.add_property(cat, format!("p{i}"), PropertyValue::Int(i));
        }
        // 25 rows of 22 in a 200 high viewport.
        assert!(grid.set_scroll_offset(10_000.0));
        assert_eq!(grid.scroll_offset(), 350.0);
        grid.set_category_expanded(cat, false);
        assert_eq!(grid.scroll_offset(), 0.0);
    }

    #[test]
    fn test_keyboard_selection() {
        let (mut grid, _, [name, count, ..]) = sample();
        key(&mut grid, KeyCode::Down);
        assert_eq!(grid.selected_property(), Some(name));
        key(&mut grid, KeyCode::Down);
        assert_eq!(grid.selected_property(), Some(count));
        key(&mut grid, KeyCode::Enter);
        assert!(grid.is_editing());
    }
}
