//! Self-persisting grocery list.
//!
//! [`GroceryList`] pairs a [`List`] snapshot with the storage it belongs to.
//! Every mutation runs the matching primitive on a copy of the snapshot and
//! writes the whole copy back (write-through, no batching). The in-memory
//! snapshot only changes once that write succeeds.
//!
//! # Example
//!
//! ```
//! use grocery_core::list::GroceryList;
//! use grocery_core::storage::MemoryStorage;
//!
//! let storage = MemoryStorage::new();
//! let mut list = GroceryList::load(&storage, "0f8fad5b-d9cb-469f-a165-70867728950e").unwrap();
//!
//! list.add_item("Milk", 1, "ea").unwrap();
//! list.add_item("milk", 1, "ea").unwrap();
//! assert_eq!(list.items()[0].qty, 2);
//! ```

use serde_json::Value;

use crate::error::{GroceryError, Result};
use crate::id;
use crate::model::{ItemStatus, List, ListItem};
use crate::storage::ListStorage;

/// Name of a list created because the requested id was unusable.
pub const NEW_LIST_NAME: &str = "New Grocery List";

/// A grocery list bound to its storage slot.
#[derive(Debug)]
pub struct GroceryList<'a, S: ListStorage + ?Sized> {
    storage: &'a S,
    list: List,
}

/// Read and parse a stored snapshot without creating anything.
///
/// Records that no longer parse are reported as [`GroceryError::CorruptList`].
pub fn read_list<S: ListStorage + ?Sized>(storage: &S, list_id: &str) -> Result<Option<List>> {
    let Some(raw) = storage.get(list_id)? else {
        return Ok(None);
    };

    let value: Value =
        serde_json::from_str(&raw).map_err(|_| GroceryError::CorruptList(list_id.to_string()))?;
    let list =
        List::from_value(&value).map_err(|_| GroceryError::CorruptList(list_id.to_string()))?;

    Ok(Some(list))
}

impl<'a, S: ListStorage + ?Sized> GroceryList<'a, S> {
    /// Load a list from storage.
    ///
    /// If no usable record exists, a new empty list is created and persisted
    /// right away: under `list_id` when it is a valid identifier, otherwise
    /// under a fresh random id.
    pub fn load(storage: &'a S, list_id: &str) -> Result<Self> {
        match read_list(storage, list_id) {
            Ok(Some(list)) => return Ok(Self { storage, list }),
            Ok(None) => {}
            Err(GroceryError::CorruptList(id)) => {
                log::warn!("Stored list {} is unreadable, starting over", id);
            }
            Err(e) => return Err(e),
        }

        let list = if id::is_list_id(list_id) {
            List::new(list_id, "")
        } else {
            List::new(id::new_id(), NEW_LIST_NAME)
        };
        log::debug!("Creating list {}", list.id);

        let created = Self { storage, list };
        created.save()?;
        Ok(created)
    }

    /// Wrap a snapshot without persisting it.
    pub fn from_list(storage: &'a S, list: List) -> Self {
        Self { storage, list }
    }

    /// Save the list to storage.
    pub fn save(&self) -> Result<()> {
        let json = self.list.to_json()?;
        self.storage.put(&self.list.id, &json)
    }

    /// The list's id.
    pub fn id(&self) -> &str {
        &self.list.id
    }

    /// The list's name.
    pub fn name(&self) -> &str {
        &self.list.name
    }

    /// Items in display order.
    pub fn items(&self) -> &[ListItem] {
        &self.list.items
    }

    /// An owned copy of the current snapshot.
    pub fn snapshot(&self) -> List {
        self.list.clone()
    }

    /// Give up the binding and keep the snapshot.
    pub fn into_list(self) -> List {
        self.list
    }

    /// Resolve an item by id first, then by case-insensitive name.
    pub fn find_item_by_id_or_name(&self, item_id: &str, name: &str) -> Option<&str> {
        self.list.find_item_by_id_or_name(item_id, name)
    }

    /// Rename the list. A blank name becomes the default name.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.commit(|list| {
            list.set_name(name);
            Ok(((), true))
        })
    }

    /// Add an item, or increase the quantity of an item with the same name.
    pub fn add_item(&mut self, name: &str, qty: u32, unit: &str) -> Result<ListItem> {
        self.commit(|list| Ok((list.add_item(name, qty, unit)?, true)))
    }

    /// Increase an item's quantity. Fails if the item doesn't exist.
    pub fn increase_qty(&mut self, item_id: &str, step: u32) -> Result<ListItem> {
        self.commit(|list| Ok((list.increase_qty(item_id, step)?, true)))
    }

    /// Decrease an item's quantity. The item is removed when it reaches zero.
    ///
    /// Returns `None` if the item was removed or never existed.
    pub fn decrease_qty(&mut self, item_id: &str, step: u32) -> Result<Option<ListItem>> {
        if self.list.item(item_id).is_none() {
            return Ok(None);
        }

        self.commit(|list| Ok((list.decrease_qty(item_id, step), true)))
    }

    /// Remove an item.
    pub fn remove_item(&mut self, item_id: &str) -> Result<()> {
        self.commit(|list| {
            list.remove_item(item_id);
            Ok(((), true))
        })
    }

    /// Rename an item. A blank name keeps the old one.
    pub fn rename_item(&mut self, item_id: &str, new_name: &str) -> Result<Option<ListItem>> {
        self.mutate_item(|list| list.rename_item(item_id, new_name))
    }

    /// Set an item's status.
    pub fn set_item_status(
        &mut self,
        item_id: &str,
        status: ItemStatus,
    ) -> Result<Option<ListItem>> {
        self.mutate_item(|list| list.set_item_status(item_id, status))
    }

    /// Mark an item as in the basket.
    pub fn item_acquired(&mut self, item_id: &str) -> Result<Option<ListItem>> {
        self.set_item_status(item_id, ItemStatus::Completed)
    }

    /// Un-mark an item, like it was put back on the shelf.
    pub fn put_item_back(&mut self, item_id: &str) -> Result<Option<ListItem>> {
        self.set_item_status(item_id, ItemStatus::Pending)
    }

    /// Flip an item between pending and completed.
    pub fn toggle_item(&mut self, item_id: &str) -> Result<Option<ListItem>> {
        self.mutate_item(|list| list.toggle_item(item_id))
    }

    /// Move an item to a new position. Fails if the item doesn't exist.
    pub fn move_item(&mut self, item_id: &str, new_order: u32) -> Result<ListItem> {
        self.commit(|list| Ok((list.move_item(item_id, new_order)?, true)))
    }

    fn mutate_item<F>(&mut self, f: F) -> Result<Option<ListItem>>
    where
        F: FnOnce(&mut List) -> Option<ListItem>,
    {
        self.commit(|list| {
            let item = f(list);
            let changed = item.is_some();
            Ok((item, changed))
        })
    }

    /// Apply `f` to a copy of the snapshot and keep the copy only once it is
    /// stored. `f` reports whether anything changed; unchanged copies are
    /// dropped without a write.
    fn commit<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut List) -> Result<(T, bool)>,
    {
        let mut next = self.list.clone();
        let (out, changed) = f(&mut next)?;
        if changed {
            self.storage.put(&next.id, &next.to_json()?)?;
            self.list = next;
        }
        Ok(out)
    }
}
