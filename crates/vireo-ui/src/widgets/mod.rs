//! Concrete widgets.
//!
//! Every widget owns a [`WidgetBase`](crate::widget::WidgetBase), a style
//! derived from a [`Palette`](crate::theme::Palette) and optional callbacks.
//! Callbacks fire only for user input; the programmatic setters that change
//! the same state stay silent.
//!
//! # Widgets
//!
//! - [`Button`] - push or toggle button
//! - [`Slider`] - value in a continuous range
//! - [`ScrollBar`] - range with a proportional thumb
//! - [`ListBox`] - flat list with single or multi selection
//! - [`TreeView`] - hierarchical, collapsible rows
//! - [`Menu`] - popup with normal, checkbox and radio items
//! - [`Toolbar`] - strip of icon buttons and toggles
//! - [`Dialog`] - titled, draggable, optionally modal window
//! - [`PropertyGrid`] - typed name/value editor
//! - [`TabControl`] - tab strip that switches linked pages
//! - [`Page`] - titled scrollable container

mod button;
mod dialog;
mod list_box;
mod menu;
mod page;
mod property_grid;
mod scrollbar;
mod slider;
mod tab_control;
mod toolbar;
mod tree_view;

pub use button::{Button, ButtonRenderInfo, ButtonStyle};
pub use dialog::{
    Dialog, DialogButton, DialogButtonInfo, DialogPart, DialogRenderInfo, DialogResult,
    DialogStyle,
};
pub use list_box::{ListBox, ListBoxRenderInfo, ListBoxStyle, ListItem, ListRowInfo, SelectionMode};
pub use menu::{Menu, MenuItem, MenuItemKind, MenuPlacement, MenuRenderInfo, MenuRowInfo, MenuStyle};
pub use page::{Page, PageRenderInfo, PageStyle};
pub use property_grid::{
    Category, EditState, GridRow, Property, PropertyGrid, PropertyGridRenderInfo,
    PropertyGridStyle, PropertyRowInfo, PropertyValue,
};
pub use scrollbar::{ScrollBar, ScrollBarRenderInfo, ScrollBarStyle};
pub use slider::{Slider, SliderRenderInfo, SliderStyle};
pub use tab_control::{Tab, TabControl, TabControlRenderInfo, TabControlStyle, TabInfo, TabPart};
pub use toolbar::{
    Toolbar, ToolbarItem, ToolbarItemInfo, ToolbarItemKind, ToolbarRenderInfo, ToolbarStyle,
};
pub use tree_view::{
    TreeHitZone, TreeNode, TreeView, TreeViewRenderInfo, TreeViewStyle, VisibleTreeItem,
    TreeRowInfo,
};
