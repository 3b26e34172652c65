//! List and item value types.
//!
//! A [`List`] is a plain snapshot. Every mutation primitive here works on the
//! in-memory value only; persisting is the job of
//! [`GroceryList`](crate::list::GroceryList) (write-through, one call at a
//! time) and the merge engine (one write per merge).
//!
//! Snapshots coming from outside (storage records, decoded share tokens) go
//! through [`List::from_value`], which never panics and normalizes what it
//! can: missing `order` becomes the array index, missing `createdAt` becomes
//! now, malformed items are skipped.

use std::cmp::Ordering;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::{GroceryError, Result};
use crate::id;

/// Name given to a list whose name is empty.
pub const DEFAULT_LIST_NAME: &str = "Grocery List";

/// Unit given to an item when none is supplied.
pub const DEFAULT_UNIT: &str = "ea";

/// Shopping state of an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Still needed
    #[default]
    Pending,
    /// In the basket
    Completed,
}

impl ItemStatus {
    /// The opposite status.
    pub fn toggled(self) -> Self {
        match self {
            ItemStatus::Pending => ItemStatus::Completed,
            ItemStatus::Completed => ItemStatus::Pending,
        }
    }
}

/// A single entry on a grocery list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Stable identity, used as the join key when merging
    pub id: String,
    /// Display name, trimmed and non-empty
    pub name: String,
    /// Quantity, at least 1
    pub qty: u32,
    /// Unit of measure
    pub unit: String,
    /// Shopping state
    pub status: ItemStatus,
    /// Sort position within the list
    pub order: u32,
}

/// A named, ordered collection of grocery items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    /// List identifier (UUID)
    pub id: String,
    /// Display name
    pub name: String,
    /// ISO-8601 creation timestamp
    pub created_at: String,
    /// Items, kept sorted by `order`
    pub items: Vec<ListItem>,
}

/// Why a JSON value was not accepted as a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidShape {
    #[error("not a JSON object")]
    NotAnObject,

    #[error("missing or invalid list id")]
    MissingId,

    #[error("items is not a sequence")]
    ItemsNotSequence,
}

/// Current time in the same format browsers produce for `toISOString()`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn list_name_or_default(name: &str) -> String {
    match name.trim() {
        "" => DEFAULT_LIST_NAME.to_string(),
        trimmed => trimmed.to_string(),
    }
}

fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl ListItem {
    /// Build an item from untrusted JSON.
    ///
    /// Returns `None` when the value is not an object or has no usable name.
    /// `index` is the item's position in the source array and stands in for
    /// a missing `order`.
    pub fn from_value(value: &Value, index: usize) -> Option<Self> {
        let obj = value.as_object()?;

        let name = obj.get("name")?.as_str()?.trim();
        if name.is_empty() {
            return None;
        }

        let id = match obj.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => id::new_id(),
        };

        let qty = obj.get("qty").and_then(quantity_from_value).unwrap_or(1);

        let unit = match obj.get("unit").and_then(Value::as_str).map(str::trim) {
            Some(unit) if !unit.is_empty() => unit.to_string(),
            _ => DEFAULT_UNIT.to_string(),
        };

        let status = match obj.get("status").and_then(Value::as_str) {
            Some("completed") => ItemStatus::Completed,
            _ => ItemStatus::Pending,
        };

        let order = obj
            .get("order")
            .and_then(Value::as_u64)
            .and_then(|o| u32::try_from(o).ok())
            .unwrap_or_else(|| u32::try_from(index).unwrap_or(u32::MAX));

        Some(Self {
            id,
            name: name.to_string(),
            qty,
            unit,
            status,
            order,
        })
    }
}

/// Lenient quantity parsing: numbers and numeric strings, floored, at least 1.
fn quantity_from_value(value: &Value) -> Option<u32> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if !raw.is_finite() || raw < 1.0 {
        return Some(1);
    }

    Some(raw.min(f64::from(u32::MAX)) as u32)
}

impl List {
    /// Create an empty list.
    pub fn new(id: impl Into<String>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: list_name_or_default(name),
            created_at: now_timestamp(),
            items: Vec::new(),
        }
    }

    /// Build a list from untrusted JSON.
    ///
    /// The decoded `id` is kept as-is; it is the join key for merging and is
    /// never regenerated.
    pub fn from_value(value: &Value) -> std::result::Result<Self, InvalidShape> {
        let obj = value.as_object().ok_or(InvalidShape::NotAnObject)?;

        let id = obj
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| id::is_list_id(id))
            .ok_or(InvalidShape::MissingId)?;

        let raw_items = obj
            .get("items")
            .and_then(Value::as_array)
            .ok_or(InvalidShape::ItemsNotSequence)?;

        let name = obj.get("name").and_then(Value::as_str).unwrap_or_default();

        let created_at = match obj.get("createdAt").and_then(Value::as_str) {
            Some(ts) if !ts.is_empty() => ts.to_string(),
            _ => now_timestamp(),
        };

        let mut items = Vec::with_capacity(raw_items.len());
        for (index, raw) in raw_items.iter().enumerate() {
            match ListItem::from_value(raw, index) {
                Some(item) => items.push(item),
                None => log::warn!("Skipping malformed item #{} in list {}", index, id),
            }
        }

        let mut list = Self {
            id: id.to_string(),
            name: list_name_or_default(name),
            created_at,
            items,
        };
        list.sort_items();

        Ok(list)
    }

    /// Serialize to the JSON form used for storage and share tokens.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Number of items not yet acquired.
    pub fn remaining_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.status != ItemStatus::Completed)
            .count()
    }

    /// Look up an item by id.
    pub fn item(&self, item_id: &str) -> Option<&ListItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    fn item_mut(&mut self, item_id: &str) -> Option<&mut ListItem> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }

    /// Look up an item by case-insensitive name.
    pub fn item_by_name(&self, name: &str) -> Option<&ListItem> {
        self.items.iter().find(|i| names_match(&i.name, name))
    }

    /// Resolve an item by identity first, then by name.
    ///
    /// A name match is only consulted when no item in the list carries `id`.
    /// Empty arguments never match. Returns the matched item's id.
    pub fn find_item_by_id_or_name(&self, id: &str, name: &str) -> Option<&str> {
        if !id.is_empty()
            && let Some(item) = self.item(id)
        {
            return Some(&item.id);
        }

        if name.trim().is_empty() {
            return None;
        }

        self.item_by_name(name).map(|item| item.id.as_str())
    }

    /// Change the list name. Blank names fall back to the default.
    pub fn set_name(&mut self, name: &str) {
        self.name = list_name_or_default(name);
    }

    /// Add an item, or top up an existing item of the same name.
    pub fn add_item(&mut self, name: &str, qty: u32, unit: &str) -> Result<ListItem> {
        self.add_item_with_id(None, name, qty, unit)
    }

    /// Like [`List::add_item`], keeping `preferred_id` for a new item when it
    /// is not already taken.
    pub fn add_item_with_id(
        &mut self,
        preferred_id: Option<&str>,
        name: &str,
        qty: u32,
        unit: &str,
    ) -> Result<ListItem> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GroceryError::EmptyItemName);
        }

        if let Some(existing_id) = self.item_by_name(name).map(|i| i.id.clone()) {
            return self.increase_qty(&existing_id, qty);
        }

        let id = match preferred_id {
            Some(id) if !id.is_empty() && self.item(id).is_none() => id.to_string(),
            _ => id::new_id(),
        };

        if self.items.iter().any(|i| i.order == u32::MAX) {
            self.renumber_orders();
        }
        let order = self
            .items
            .iter()
            .map(|i| i.order)
            .max()
            .map_or(0, |max| max + 1);

        let unit = match unit.trim() {
            "" => DEFAULT_UNIT,
            unit => unit,
        };

        let item = ListItem {
            id,
            name: name.to_string(),
            qty: qty.max(1),
            unit: unit.to_string(),
            status: ItemStatus::Pending,
            order,
        };
        self.items.push(item.clone());
        self.sort_items();

        Ok(item)
    }

    /// Rewrite orders as 0..n, keeping the current sequence.
    fn renumber_orders(&mut self) {
        self.sort_items();
        for (index, item) in self.items.iter_mut().enumerate() {
            item.order = u32::try_from(index).unwrap_or(u32::MAX);
        }
    }

    /// Increase an item's quantity. The item must exist.
    pub fn increase_qty(&mut self, item_id: &str, step: u32) -> Result<ListItem> {
        let item = self
            .item_mut(item_id)
            .ok_or_else(|| GroceryError::ItemNotFound(item_id.to_string()))?;

        item.qty = item.qty.saturating_add(step.max(1));
        Ok(item.clone())
    }

    /// Decrease an item's quantity, removing it once it reaches zero.
    ///
    /// Returns `None` when the item is missing or was removed.
    pub fn decrease_qty(&mut self, item_id: &str, step: u32) -> Option<ListItem> {
        let step = step.max(1);
        let item = self.item_mut(item_id)?;

        if item.qty <= step {
            self.remove_item(item_id);
            return None;
        }

        item.qty -= step;
        Some(item.clone())
    }

    /// Remove an item. Missing ids are ignored.
    pub fn remove_item(&mut self, item_id: &str) {
        self.items.retain(|i| i.id != item_id);
    }

    /// Rename an item. A blank name keeps the old one.
    pub fn rename_item(&mut self, item_id: &str, new_name: &str) -> Option<ListItem> {
        let item = self.item_mut(item_id)?;

        let new_name = new_name.trim();
        if !new_name.is_empty() {
            item.name = new_name.to_string();
        }

        Some(item.clone())
    }

    /// Set an item's shopping state.
    pub fn set_item_status(&mut self, item_id: &str, status: ItemStatus) -> Option<ListItem> {
        let item = self.item_mut(item_id)?;
        item.status = status;
        Some(item.clone())
    }

    /// Flip an item between pending and completed.
    pub fn toggle_item(&mut self, item_id: &str) -> Option<ListItem> {
        let item = self.item_mut(item_id)?;
        item.status = item.status.toggled();
        Some(item.clone())
    }

    /// Move an item to `new_order`, shifting the items in between by one.
    pub fn move_item(&mut self, item_id: &str, new_order: u32) -> Result<ListItem> {
        let old_order = self
            .item(item_id)
            .map(|i| i.order)
            .ok_or_else(|| GroceryError::ItemNotFound(item_id.to_string()))?;

        match new_order.cmp(&old_order) {
            Ordering::Equal => {}
            Ordering::Greater => {
                for item in &mut self.items {
                    if item.order > old_order && item.order <= new_order {
                        item.order -= 1;
                    }
                }
            }
            Ordering::Less => {
                for item in &mut self.items {
                    if item.order >= new_order && item.order < old_order {
                        item.order += 1;
                    }
                }
            }
        }

        let item = self
            .item_mut(item_id)
            .ok_or_else(|| GroceryError::ItemNotFound(item_id.to_string()))?;
        item.order = new_order;
        let moved = item.clone();
        self.sort_items();

        Ok(moved)
    }

    /// Stable sort by `order`; ties keep insertion order.
    pub fn sort_items(&mut self) {
        self.items.sort_by_key(|i| i.order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{LIST_ID, list_with_items};
    use serde_json::json;

    fn orders(list: &List) -> Vec<u32> {
        list.items.iter().map(|i| i.order).collect()
    }

    fn names(list: &List) -> Vec<&str> {
        list.items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_add_item_defaults() {
        let mut list = List::new(LIST_ID, "");
        assert_eq!(list.name, DEFAULT_LIST_NAME);

        let item = list.add_item("  Milk ", 2, "gal").unwrap();
        assert_eq!(item.name, "Milk");
        assert_eq!(item.qty, 2);
        assert_eq!(item.unit, "gal");
        assert_eq!(item.status, ItemStatus::Pending);
        assert_eq!(item.order, 0);

        let bread = list.add_item("Bread", 0, "").unwrap();
        assert_eq!(bread.qty, 1);
        assert_eq!(bread.unit, DEFAULT_UNIT);
        assert_eq!(bread.order, 1);
    }

    #[test]
    fn test_add_item_rejects_blank_name() {
        let mut list = List::new(LIST_ID, "Test");
        assert!(matches!(
            list.add_item("   ", 1, "ea"),
            Err(GroceryError::EmptyItemName)
        ));
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_duplicate_name_collapses() {
        let mut list = List::new(LIST_ID, "Test");
        list.add_item("Milk", 1, "ea").unwrap();
        let item = list.add_item("milk", 1, "ea").unwrap();

        assert_eq!(list.items.len(), 1);
        assert_eq!(item.name, "Milk");
        assert_eq!(item.qty, 2);
    }

    #[test]
    fn test_add_item_keeps_free_preferred_id() {
        let mut list = list_with_items(&["Eggs"]);
        let taken = list.items[0].id.clone();

        let kept = list
            .add_item_with_id(Some("11111111-2222-4333-8444-555555555555"), "Jam", 1, "ea")
            .unwrap();
        assert_eq!(kept.id, "11111111-2222-4333-8444-555555555555");

        let fresh = list.add_item_with_id(Some(&taken), "Tea", 1, "ea").unwrap();
        assert_ne!(fresh.id, taken);
        assert!(id::is_list_id(&fresh.id));
    }

    #[test]
    fn test_find_item_by_id_or_name() {
        let list = list_with_items(&["Milk", "Eggs"]);
        let milk = list.items[0].id.clone();
        let eggs = list.items[1].id.clone();

        assert_eq!(list.find_item_by_id_or_name(&milk, ""), Some(milk.as_str()));
        assert_eq!(list.find_item_by_id_or_name("", "MILK"), Some(milk.as_str()));
        assert_eq!(list.find_item_by_id_or_name("unknown", "eggs"), Some(eggs.as_str()));
        assert_eq!(list.find_item_by_id_or_name("", ""), None);
        assert_eq!(list.find_item_by_id_or_name("unknown", "Jam"), None);
    }

    #[test]
    fn test_identity_beats_name() {
        let list = list_with_items(&["Milk", "Eggs"]);
        let milk = list.items[0].id.clone();

        // The id points at Milk even though the name matches Eggs.
        assert_eq!(
            list.find_item_by_id_or_name(&milk, "Eggs"),
            Some(milk.as_str())
        );
    }

    #[test]
    fn test_increase_and_decrease() {
        let mut list = list_with_items(&["Apples"]);
        let id = list.items[0].id.clone();

        assert_eq!(list.increase_qty(&id, 3).unwrap().qty, 4);
        assert_eq!(list.increase_qty(&id, 0).unwrap().qty, 5);
        assert_eq!(list.decrease_qty(&id, 2).unwrap().qty, 3);
        assert_eq!(list.decrease_qty(&id, 0).unwrap().qty, 2);

        assert!(list.decrease_qty(&id, 5).is_none());
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_missing_item_asymmetry() {
        let mut list = list_with_items(&["Apples"]);

        assert!(matches!(
            list.increase_qty("nope", 1),
            Err(GroceryError::ItemNotFound(_))
        ));
        assert!(matches!(
            list.move_item("nope", 0),
            Err(GroceryError::ItemNotFound(_))
        ));
        assert!(list.decrease_qty("nope", 1).is_none());
        assert!(list.rename_item("nope", "x").is_none());
        assert!(list.set_item_status("nope", ItemStatus::Completed).is_none());
    }

    #[test]
    fn test_rename_blank_keeps_name() {
        let mut list = list_with_items(&["Rice"]);
        let id = list.items[0].id.clone();

        assert_eq!(list.rename_item(&id, " Brown Rice ").unwrap().name, "Brown Rice");
        assert_eq!(list.rename_item(&id, "   ").unwrap().name, "Brown Rice");
    }

    #[test]
    fn test_status_changes() {
        let mut list = list_with_items(&["Cheese"]);
        let id = list.items[0].id.clone();

        let item = list.set_item_status(&id, ItemStatus::Completed).unwrap();
        assert_eq!(item.status, ItemStatus::Completed);
        assert_eq!(list.remaining_count(), 0);

        assert_eq!(list.toggle_item(&id).unwrap().status, ItemStatus::Pending);
        assert_eq!(list.remaining_count(), 1);
    }

    #[test]
    fn test_move_item_down() {
        let mut list = list_with_items(&["A", "B", "C", "D"]);
        let a = list.items[0].id.clone();

        list.move_item(&a, 2).unwrap();
        assert_eq!(names(&list), vec!["B", "C", "A", "D"]);
        assert_eq!(orders(&list), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_move_item_up() {
        let mut list = list_with_items(&["A", "B", "C", "D"]);
        let d = list.items[3].id.clone();

        list.move_item(&d, 1).unwrap();
        assert_eq!(names(&list), vec!["A", "D", "B", "C"]);
        assert_eq!(orders(&list), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_move_item_same_order_is_noop() {
        let mut list = list_with_items(&["A", "B", "C"]);
        let before = list.clone();
        let b = list.items[1].id.clone();

        list.move_item(&b, 1).unwrap();
        assert_eq!(list, before);
    }

    #[test]
    fn test_orders_stay_unique_across_moves() {
        let mut list = list_with_items(&["A", "B", "C", "D", "E"]);
        let ids: Vec<String> = list.items.iter().map(|i| i.id.clone()).collect();

        let moves = [(0, 4), (3, 0), (2, 2), (4, 1), (1, 3), (0, 0), (2, 4)];
        for (which, to) in moves {
            list.move_item(&ids[which], to).unwrap();

            let mut seen = orders(&list);
            seen.dedup();
            assert_eq!(seen.len(), ids.len(), "duplicate order after move");
            for id in &ids {
                assert_eq!(list.items.iter().filter(|i| &i.id == id).count(), 1);
            }
        }
    }

    #[test]
    fn test_from_value_normalizes() {
        let value = json!({
            "id": LIST_ID,
            "name": "  ",
            "items": [
                { "id": "a", "name": "First", "qty": 2.7, "unit": "lb" },
                { "id": "b", "name": "Second", "qty": "3", "status": "completed" },
                { "name": "   " },
                42
            ]
        });

        let list = List::from_value(&value).unwrap();
        assert_eq!(list.id, LIST_ID);
        assert_eq!(list.name, DEFAULT_LIST_NAME);
        assert!(!list.created_at.is_empty());
        assert_eq!(names(&list), vec!["First", "Second"]);

        let second = list.item("b").unwrap();
        assert_eq!(second.order, 1);
        assert_eq!(second.qty, 3);
        assert_eq!(second.status, ItemStatus::Completed);
        assert_eq!(second.unit, DEFAULT_UNIT);

        let first = list.item("a").unwrap();
        assert_eq!(first.order, 0);
        assert_eq!(first.qty, 2);
        assert_eq!(first.unit, "lb");
    }

    #[test]
    fn test_from_value_rejects_bad_shapes() {
        assert_eq!(
            List::from_value(&json!([1, 2])).unwrap_err(),
            InvalidShape::NotAnObject
        );
        assert_eq!(
            List::from_value(&json!({ "items": [] })).unwrap_err(),
            InvalidShape::MissingId
        );
        assert_eq!(
            List::from_value(&json!({ "id": "not-a-uuid", "items": [] })).unwrap_err(),
            InvalidShape::MissingId
        );
        assert_eq!(
            List::from_value(&json!({ "id": LIST_ID, "items": {} })).unwrap_err(),
            InvalidShape::ItemsNotSequence
        );
    }

    #[test]
    fn test_from_value_empty_items() {
        let list = List::from_value(&json!({
            "id": LIST_ID,
            "name": "Empty",
            "createdAt": "2025-01-31T12:00:00.000Z",
            "items": []
        }))
        .unwrap();

        assert!(list.items.is_empty());
        assert_eq!(list.created_at, "2025-01-31T12:00:00.000Z");
    }

    #[test]
    fn test_json_field_names() {
        let list = list_with_items(&["Milk"]);
        let value: Value = serde_json::from_str(&list.to_json().unwrap()).unwrap();

        assert!(value.get("createdAt").is_some());
        assert_eq!(value["items"][0]["status"], "pending");
        assert_eq!(value["items"][0]["unit"], "ea");
        assert_eq!(List::from_value(&value).unwrap(), list);
    }

    #[test]
    fn test_add_item_after_max_order_keeps_orders_unique() {
        let mut list = List::from_value(&json!({
            "id": LIST_ID,
            "items": [
                { "id": "a", "name": "A", "order": 3 },
                { "id": "z", "name": "Z", "order": u32::MAX }
            ]
        }))
        .unwrap();

        let added = list.add_item("B", 1, "ea").unwrap();

        assert_eq!(orders(&list), vec![0, 1, 2]);
        assert_eq!(added.order, 2);
        let names: Vec<&str> = list.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A", "Z", "B"]);
    }
}
