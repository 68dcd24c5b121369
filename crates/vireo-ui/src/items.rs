//! Id-indexed item collections shared by list-like widgets.
//!
//! Menu items, list entries, tree nodes, tabs, toolbar items and properties
//! are all stored in an [`ItemList`]: an insertion-ordered map from a
//! monotonically increasing [`ItemId`] to the item record. Ids start at 0 and
//! are never handed out twice by the same list, not even after
//! [`ItemList::clear`], so a stale id can never alias a newer item.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{UiError, UiResult};

/// Opaque caller data attached to widgets and items.
pub type UserData = Arc<dyn Any + Send + Sync>;

/// Stable identity of an item inside one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

impl ItemId {
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered, id-indexed item storage.
#[derive(Debug, Clone)]
pub struct ItemList<T> {
    items: IndexMap<ItemId, T>,
    next_id: u32,
}

impl<T> ItemList<T> {
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
            next_id: 0,
        }
    }

    fn allocate_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append an item and return its new id.
    pub fn push(&mut self, item: T) -> ItemId {
        let id = self.allocate_id();
        self.items.insert(id, item);
        id
    }

    /// Insert an item at `index` (clamped to the end) and return its new id.
    pub fn insert(&mut self, index: usize, item: T) -> ItemId {
        let id = self.allocate_id();
        let index = index.min(self.items.len());
        self.items.shift_insert(index, id, item);
        id
    }

    /// Remove an item, preserving the order of the rest.
    pub fn remove(&mut self, id: ItemId) -> Option<T> {
        self.items.shift_remove(&id)
    }

    /// Remove every item. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, id: ItemId) -> Option<&T> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut T> {
        self.items.get_mut(&id)
    }

    /// Like [`get`](Self::get) but reports the missing id.
    pub fn try_get(&self, id: ItemId) -> UiResult<&T> {
        self.items.get(&id).ok_or(UiError::UnknownItem { id })
    }

    /// Like [`get_mut`](Self::get_mut) but reports the missing id.
    pub fn try_get_mut(&mut self, id: ItemId) -> UiResult<&mut T> {
        self.items.get_mut(&id).ok_or(UiError::UnknownItem { id })
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Position of an item in display order.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.get_index_of(&id)
    }

    /// Id of the item at a display position.
    pub fn id_at(&self, index: usize) -> Option<ItemId> {
        self.items.get_index(index).map(|(id, _)| *id)
    }

    pub fn first_id(&self) -> Option<ItemId> {
        self.id_at(0)
    }

    pub fn last_id(&self) -> Option<ItemId> {
        self.items.last().map(|(id, _)| *id)
    }

    /// Move an existing item to a new display position.
    pub fn move_to(&mut self, id: ItemId, index: usize) -> UiResult<()> {
        let from = self.index_of(id).ok_or(UiError::UnknownItem { id })?;
        let len = self.items.len();
        if index >= len {
            return Err(UiError::OutOfRange { index, len });
        }
        self.items.move_index(from, index);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Id the next inserted item will receive.
    pub fn next_id(&self) -> ItemId {
        ItemId(self.next_id)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (ItemId, &T)> + ExactSizeIterator {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = (ItemId, &mut T)> {
        self.items.iter_mut().map(|(id, item)| (*id, item))
    }

    pub fn ids(&self) -> impl DoubleEndedIterator<Item = ItemId> + '_ {
        self.items.keys().copied()
    }

    /// Remove every item for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(ItemId, &T) -> bool) {
        self.items.retain(|id, item| keep(*id, item));
    }
}

impl<T> Default for ItemList<T> {
    fn default() -> Self {
        Self::new()
    }
}
