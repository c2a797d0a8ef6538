//! The monument's collection of placed items.

use serde::Serialize;

use crate::models::artwork::{Artwork, ArtworkSnapshot};
use crate::models::item::{ItemCore, ItemError, ItemState};
use crate::models::photo::{Photo, PhotoSnapshot};

/// A placed item of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DesignItem {
    /// Uploaded photo
    Photo(Photo),
    /// Motif or emblem
    Artwork(Artwork),
}

impl DesignItem {
    /// Id on the monument.
    #[must_use]
    pub const fn item_id(&self) -> u32 {
        match self {
            Self::Photo(photo) => photo.item_id(),
            Self::Artwork(artwork) => artwork.item_id(),
        }
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ItemState {
        match self {
            Self::Photo(photo) => photo.state(),
            Self::Artwork(artwork) => artwork.state(),
        }
    }

    const fn core(&self) -> &ItemCore {
        match self {
            Self::Photo(photo) => photo.core(),
            Self::Artwork(artwork) => artwork.core(),
        }
    }

    fn core_mut(&mut self) -> &mut ItemCore {
        match self {
            Self::Photo(photo) => photo.core_mut(),
            Self::Artwork(artwork) => artwork.core_mut(),
        }
    }

    fn duplicate(&self, item_id: u32) -> Result<Self, ItemError> {
        Ok(match self {
            Self::Photo(photo) => Self::Photo(photo.duplicate(item_id)?),
            Self::Artwork(artwork) => Self::Artwork(artwork.duplicate(item_id)?),
        })
    }

    /// Snapshot for saved designs.
    #[must_use]
    pub fn serialize(&self) -> ItemSnapshot {
        match self {
            Self::Photo(photo) => ItemSnapshot::Photo(photo.serialize()),
            Self::Artwork(artwork) => ItemSnapshot::Artwork(artwork.serialize()),
        }
    }
}

/// Serialized form of any placed item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItemSnapshot {
    /// Photo snapshot
    Photo(PhotoSnapshot),
    /// Motif or emblem snapshot
    Artwork(ArtworkSnapshot),
}

/// Items placed on the monument being designed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Monument {
    items: Vec<DesignItem>,
}

impl Monument {
    /// An empty monument.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next free item id: one above the highest id in use (1 when empty).
    #[must_use]
    pub fn next_item_id(&self) -> u32 {
        self.items
            .iter()
            .map(DesignItem::item_id)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Places an item.
    pub fn add(&mut self, item: DesignItem) {
        self.items.push(item);
    }

    /// Items in placement order, deleted ones included.
    #[must_use]
    pub fn items(&self) -> &[DesignItem] {
        &self.items
    }

    /// Item by id.
    #[must_use]
    pub fn get(&self, item_id: u32) -> Option<&DesignItem> {
        self.items.iter().find(|item| item.item_id() == item_id)
    }

    /// Mutable item by id.
    pub fn get_mut(&mut self, item_id: u32) -> Option<&mut DesignItem> {
        self.items.iter_mut().find(|item| item.item_id() == item_id)
    }

    /// Number of items, deleted ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing was ever placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Selects one item, deselecting whichever item was selected before.
    ///
    /// A failed select leaves the current selection untouched.
    ///
    /// # Errors
    ///
    /// Fails for unknown ids and items that were never rendered.
    pub fn select(&mut self, item_id: u32) -> Result<(), ItemError> {
        self.get(item_id)
            .ok_or(ItemError::NotFound(item_id))?
            .core()
            .ensure_selectable()?;
        self.deselect_all();
        self.get_mut(item_id)
            .ok_or(ItemError::NotFound(item_id))?
            .core_mut()
            .select()
    }

    /// Deselects every selected item.
    pub fn deselect_all(&mut self) {
        for item in &mut self.items {
            if item.state() == ItemState::Selected {
                // selected items are alive, so this cannot fail
                let _ = item.core_mut().deselect();
            }
        }
    }

    /// Id of the selected item, if any.
    #[must_use]
    pub fn selected(&self) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.state() == ItemState::Selected)
            .map(DesignItem::item_id)
    }

    /// Marks an item deleted and removes it from the collection.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::NotFound`] for unknown ids.
    pub fn remove(&mut self, item_id: u32) -> Result<DesignItem, ItemError> {
        let index = self
            .items
            .iter()
            .position(|item| item.item_id() == item_id)
            .ok_or(ItemError::NotFound(item_id))?;
        let mut item = self.items.remove(index);
        item.core_mut().delete()?;
        Ok(item)
    }

    /// Duplicates an item under the next free id and adds the copy.
    ///
    /// The source is deselected. Returns the copy's item id.
    ///
    /// # Errors
    ///
    /// Fails for unknown ids or items that were never rendered.
    pub fn duplicate(&mut self, item_id: u32) -> Result<u32, ItemError> {
        let new_id = self.next_item_id();
        let source = self.get_mut(item_id).ok_or(ItemError::NotFound(item_id))?;
        let copy = source.duplicate(new_id)?;
        if source.state() == ItemState::Selected {
            source.core_mut().deselect()?;
        }
        self.items.push(copy);
        Ok(new_id)
    }

    /// Snapshots of every item, in placement order.
    #[must_use]
    pub fn serialize(&self) -> Vec<ItemSnapshot> {
        self.items.iter().map(DesignItem::serialize).collect()
    }
}
