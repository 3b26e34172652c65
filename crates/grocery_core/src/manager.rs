//! Top level management for grocery lists.
//!
//! A [`ListManager`] owns the storage for one application session. Create it
//! once and hand it to whatever needs lists (the import flow, a CLI command,
//! a UI layer) instead of reaching for a global.

use std::cmp::Ordering;

use serde::Serialize;

use crate::error::{GroceryError, Result};
use crate::id;
use crate::import::ImportOutcome;
use crate::list::{GroceryList, read_list};
use crate::merge::{MergeReport, merge_into};
use crate::model::List;
use crate::storage::ListStorage;

/// Name given to lists made with [`ListManager::create_new_list`].
pub const CREATED_LIST_NAME: &str = "New List";

/// Name shown for a list id with no stored record.
pub const UNKNOWN_LIST_NAME: &str = "Grocery List (New)";

/// Overview of one stored list, for list pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOverview {
    /// List identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// ISO-8601 creation timestamp
    pub created_at: String,
    /// Number of items
    pub item_count: usize,
    /// Number of items not yet acquired
    pub remaining_count: usize,
}

impl ListOverview {
    fn from_list(list: &List) -> Self {
        Self {
            id: list.id.clone(),
            name: list.name.clone(),
            created_at: list.created_at.clone(),
            item_count: list.items.len(),
            remaining_count: list.remaining_count(),
        }
    }

    /// Picker order: most remaining first, then most items, then by name.
    pub fn picker_order(a: &Self, b: &Self) -> Ordering {
        b.remaining_count
            .cmp(&a.remaining_count)
            .then_with(|| b.item_count.cmp(&a.item_count))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    }
}

/// Session-scoped access to all stored lists.
#[derive(Debug)]
pub struct ListManager<S: ListStorage> {
    storage: S,
}

impl<S: ListStorage> ListManager<S> {
    /// Create a manager over the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Ids of all stored lists. Storage keys that are not list ids are ignored.
    pub fn available_list_ids(&self) -> Result<Vec<String>> {
        Ok(self
            .storage
            .list_keys()?
            .into_iter()
            .filter(|key| id::is_list_id(key))
            .collect())
    }

    /// Is a list with this id stored?
    pub fn is_list_available(&self, list_id: &str) -> Result<bool> {
        if !id::is_list_id(list_id) {
            return Ok(false);
        }
        self.storage.contains(list_id)
    }

    /// Load a list, creating it if it doesn't exist.
    pub fn get_list(&self, list_id: &str) -> Result<GroceryList<'_, S>> {
        GroceryList::load(&self.storage, list_id)
    }

    /// Load a list that must already be stored.
    ///
    /// Unlike [`ListManager::get_list`] nothing is created: a malformed id is
    /// [`GroceryError::InvalidListId`] and an unknown one is
    /// [`GroceryError::ListNotFound`].
    pub fn open_existing_list(&self, list_id: &str) -> Result<GroceryList<'_, S>> {
        if !id::is_list_id(list_id) {
            return Err(GroceryError::InvalidListId(list_id.to_string()));
        }
        if !self.storage.contains(list_id)? {
            return Err(GroceryError::ListNotFound(list_id.to_string()));
        }
        GroceryList::load(&self.storage, list_id)
    }

    /// Read a stored list without creating it.
    pub fn peek_list(&self, list_id: &str) -> Result<Option<List>> {
        read_list(&self.storage, list_id)
    }

    /// Create and persist a new empty list.
    pub fn create_new_list(&self) -> Result<GroceryList<'_, S>> {
        let mut list = GroceryList::load(&self.storage, &id::new_id())?;
        list.set_name(CREATED_LIST_NAME)?;
        Ok(list)
    }

    /// Remove a list. Failures are logged and otherwise ignored.
    pub fn remove_list(&self, list_id: &str) {
        if let Err(e) = self.storage.remove(list_id) {
            log::warn!("Failed to remove list {}: {}", list_id, e);
        }
    }

    /// Id of the list to open when none was asked for.
    ///
    /// Creates a list if none exist.
    pub fn default_list_id(&self) -> Result<String> {
        if let Some(first) = self.available_list_ids()?.into_iter().next() {
            return Ok(first);
        }

        Ok(self.create_new_list()?.id().to_string())
    }

    /// Use `candidate` if it is a valid list id, the default list otherwise.
    pub fn valid_list_id_or_default(&self, candidate: Option<&str>) -> Result<String> {
        match candidate {
            Some(id) if id::is_list_id(id) => Ok(id.to_string()),
            _ => self.default_list_id(),
        }
    }

    /// Import a list. If a list with the same id exists, the items are merged.
    ///
    /// The existing list is read once, merged in memory and written once; on
    /// any error nothing is written.
    pub fn import_list(&self, incoming: List) -> Result<ImportOutcome> {
        let stored = match self.peek_list(&incoming.id) {
            Ok(stored) => stored,
            Err(GroceryError::CorruptList(id)) => {
                log::warn!("Stored list {} is unreadable, replacing it with the import", id);
                None
            }
            Err(e) => return Err(e),
        };

        let Some(mut existing) = stored else {
            GroceryList::from_list(&self.storage, incoming.clone()).save()?;
            log::info!("Imported new list {} ({} items)", incoming.id, incoming.items.len());

            return Ok(ImportOutcome {
                list: incoming,
                created: true,
                report: MergeReport::default(),
            });
        };

        let report = merge_into(&mut existing, &incoming)?;
        GroceryList::from_list(&self.storage, existing.clone()).save()?;
        log::info!(
            "Merged list {}: {} renamed, {} added, {} unchanged",
            existing.id,
            report.renamed.len(),
            report.added.len(),
            report.unchanged
        );

        Ok(ImportOutcome {
            list: existing,
            created: false,
            report,
        })
    }

    /// Display name of a list, or a placeholder if it isn't stored.
    pub fn list_name(&self, list_id: &str) -> Result<String> {
        Ok(self
            .stored(list_id)?
            .map(|l| l.name)
            .unwrap_or_else(|| UNKNOWN_LIST_NAME.to_string()))
    }

    /// Number of items in a list; 0 if it isn't stored.
    pub fn item_count(&self, list_id: &str) -> Result<usize> {
        Ok(self.stored(list_id)?.map_or(0, |l| l.items.len()))
    }

    /// Number of items not yet acquired; 0 if it isn't stored.
    pub fn remaining_count(&self, list_id: &str) -> Result<usize> {
        Ok(self.stored(list_id)?.map_or(0, |l| l.remaining_count()))
    }

    /// Short progress text for a list picker.
    pub fn items_text(&self, list_id: &str) -> Result<String> {
        let Some(list) = self.stored(list_id)? else {
            return Ok("No items".to_string());
        };

        let total = list.items.len();
        let remaining = list.remaining_count();
        let text = if total == 0 {
            "No items".to_string()
        } else if remaining == 0 {
            "Finished".to_string()
        } else {
            format!("{}/{} :Remaining", remaining, total)
        };

        Ok(format!("({})", text))
    }

    /// Overviews of all stored lists in picker order.
    ///
    /// Lists whose records can't be read are skipped.
    pub fn summaries(&self) -> Result<Vec<ListOverview>> {
        let mut overviews = Vec::new();
        for list_id in self.available_list_ids()? {
            match self.peek_list(&list_id) {
                Ok(Some(list)) => overviews.push(ListOverview::from_list(&list)),
                Ok(None) => {}
                Err(e) => log::warn!("Skipping list {}: {}", list_id, e),
            }
        }

        overviews.sort_by(ListOverview::picker_order);
        Ok(overviews)
    }

    fn stored(&self, list_id: &str) -> Result<Option<List>> {
        if !id::is_list_id(list_id) {
            return Ok(None);
        }
        self.peek_list(list_id)
    }
}
