//! Importing shared lists.
//!
//! The flow is: token → decode → shape check → merge → one write. Every
//! failure before the write leaves storage untouched, and every failure maps
//! to a short message through [`GroceryError::user_message`].
//!
//! # Example
//!
//! ```
//! use grocery_core::import::ImportFlow;
//! use grocery_core::manager::ListManager;
//! use grocery_core::model::List;
//! use grocery_core::share::{ShareEncoding, share_link};
//! use grocery_core::storage::MemoryStorage;
//!
//! let mut list = List::new("0f8fad5b-d9cb-469f-a165-70867728950e", "Weekly");
//! list.add_item("Milk", 2, "gal").unwrap();
//! let link = share_link("https://grocerease.app", &list, ShareEncoding::Compressed).unwrap();
//!
//! let manager = ListManager::new(MemoryStorage::new());
//! let outcome = ImportFlow::new(&manager).import_link(&link).unwrap();
//!
//! assert!(outcome.created);
//! assert_eq!(outcome.redirect_path(), "/shopping?id=0f8fad5b-d9cb-469f-a165-70867728950e");
//! ```

use serde_json::Value;

use crate::codec;
use crate::error::{GroceryError, Result};
use crate::manager::ListManager;
use crate::merge::MergeReport;
use crate::model::{InvalidShape, List};
use crate::share::parse_share_link;
use crate::storage::ListStorage;

/// Route the UI opens after a successful import.
pub const SHOPPING_PATH: &str = "/shopping";

/// A completed import.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// The stored list after the import
    pub list: List,
    /// True if no readable list with this id existed before
    pub created: bool,
    /// Changes applied to an existing list (empty when `created`)
    pub report: MergeReport,
}

impl ImportOutcome {
    /// Where to send the user next.
    pub fn redirect_path(&self) -> String {
        format!("{}?id={}", SHOPPING_PATH, urlencoding::encode(&self.list.id))
    }
}

/// Turn decoded JSON into a candidate list.
pub fn validate_shape(value: &Value) -> std::result::Result<List, InvalidShape> {
    List::from_value(value)
}

/// Decode a token into a candidate list, or `None` if it isn't one.
pub fn list_from_data(token: &str) -> Option<List> {
    let value = codec::auto_detect_and_decode(token).ok()?;
    validate_shape(&value).ok()
}

/// Imports tokens and share links through a [`ListManager`].
pub struct ImportFlow<'a, S: ListStorage> {
    manager: &'a ListManager<S>,
}

impl<'a, S: ListStorage> ImportFlow<'a, S> {
    /// Create an import flow over a manager.
    pub fn new(manager: &'a ListManager<S>) -> Self {
        Self { manager }
    }

    /// Import a raw token (the `data` query parameter).
    pub fn import_token(&self, token: &str) -> Result<ImportOutcome> {
        let token = token.trim();
        if token.is_empty() {
            return Err(GroceryError::MissingImportData);
        }

        let value = codec::auto_detect_and_decode(token)?;
        let incoming = validate_shape(&value)?;

        self.manager.import_list(incoming)
    }

    /// Import pasted text: a share link, a query string or a raw token.
    pub fn import_link(&self, text: &str) -> Result<ImportOutcome> {
        let parts = parse_share_link(text);
        let token = parts.data.ok_or(GroceryError::MissingImportData)?;

        let outcome = self.import_token(&token)?;
        if let Some(id) = parts.id
            && !id.eq_ignore_ascii_case(&outcome.list.id)
        {
            log::warn!(
                "Link id {} differs from payload id {}, used the payload",
                id,
                outcome.list.id
            );
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::{ShareEncoding, share_link};
    use crate::storage::MemoryStorage;
    use crate::test_utils::{LIST_ID, list_with_items};

    fn manager() -> ListManager<MemoryStorage> {
        ListManager::new(MemoryStorage::new())
    }

    #[test]
    fn test_validate_shape_rejections() {
        assert_eq!(
            validate_shape(&serde_json::json!([1, 2])),
            Err(InvalidShape::NotAnObject)
        );
        assert_eq!(
            validate_shape(&serde_json::json!({"id": "nope", "items": []})),
            Err(InvalidShape::MissingId)
        );
        assert_eq!(
            validate_shape(&serde_json::json!({"id": LIST_ID, "items": {}})),
            Err(InvalidShape::ItemsNotSequence)
        );
    }

    #[test]
    fn test_validate_shape_stamps_created_at() {
        let list = validate_shape(&serde_json::json!({"id": LIST_ID, "items": []})).unwrap();
        assert_eq!(list.id, LIST_ID);
        assert!(!list.created_at.is_empty());
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_list_from_data() {
        let list = list_with_items(&["A"]);
        let token = codec::encode(&list.to_json().unwrap());

        assert_eq!(list_from_data(&token), Some(list));
        assert_eq!(list_from_data("garbage!"), None);
        assert_eq!(list_from_data(&codec::encode(r#"{"id":"x","items":[]}"#)), None);
    }

    #[test]
    fn test_import_link_creates_list() {
        let manager = manager();
        let list = list_with_items(&["Milk", "Eggs"]);
        let link = share_link("https://grocerease.app", &list, ShareEncoding::Plain).unwrap();

        let outcome = ImportFlow::new(&manager).import_link(&link).unwrap();

        assert!(outcome.created);
        assert_eq!(outcome.redirect_path(), format!("/shopping?id={}", LIST_ID));
        assert_eq!(manager.item_count(LIST_ID).unwrap(), 2);
    }

    #[test]
    fn test_missing_data() {
        let manager = manager();
        let flow = ImportFlow::new(&manager);

        let err = flow.import_link("https://grocerease.app/import?id=x").unwrap_err();
        assert_eq!(err.user_message(), "Missing data in query params");
        assert!(matches!(
            flow.import_token("  "),
            Err(GroceryError::MissingImportData)
        ));
    }

    #[test]
    fn test_failures_leave_storage_untouched() {
        let manager = manager();
        let flow = ImportFlow::new(&manager);

        let err = flow.import_token("H4sI!!!!").unwrap_err();
        assert_eq!(err.user_message(), "Failed to decode import data");

        let no_id = codec::encode(r#"{"name":"x","items":[]}"#);
        let err = flow.import_token(&no_id).unwrap_err();
        assert_eq!(err.user_message(), "Imported data is missing a valid list ID");

        let bad_items = codec::encode(&format!(r#"{{"id":"{}","items":3}}"#, LIST_ID));
        let err = flow.import_token(&bad_items).unwrap_err();
        assert_eq!(err.user_message(), "Imported data is not a valid grocery list");

        assert!(manager.storage().is_empty());
    }

    #[test]
    fn test_reimport_merges() {
        let manager = manager();
        let flow = ImportFlow::new(&manager);
        let mut list = list_with_items(&["Milk"]);
        let token = codec::encode(&list.to_json().unwrap());
        flow.import_token(&token).unwrap();

        list.add_item("Bread", 1, "loaf").unwrap();
        let token = codec::encode_compressed(&list.to_json().unwrap()).unwrap();
        let outcome = flow.import_token(&token).unwrap();

        assert!(!outcome.created);
        assert_eq!(outcome.report.added.len(), 1);
        assert_eq!(outcome.list.items.len(), 2);
    }
}
