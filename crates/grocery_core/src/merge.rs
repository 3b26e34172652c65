//! Reconciling an imported list with the stored copy of the same list.
//!
//! The merge is built for one user editing a list on two devices: the
//! importer's structural edits (renames, new items) land, while shopping
//! progress on the receiving side (quantities, completion, order) is never
//! overwritten by the imported snapshot.
//!
//! For every incoming item, in the incoming order:
//!
//! 1. Look for an existing item with the same id anywhere in the list.
//! 2. Only if there is none, look for an existing item with the same name,
//!    ignoring case.
//! 3. On a match, the incoming name replaces the existing name. Nothing else
//!    about the existing item changes.
//! 4. Without a match, the item is added as a new pending item. Its id is
//!    kept when free, so a later import can match it by identity.
//!
//! Items present locally but absent from the import are kept. Merging the
//! same snapshot twice changes nothing the second time.
//!
//! Matching relies on item ids being stable across exports. Payloads that
//! regenerate ids fall back to name matching, which can bring back a stale
//! name as a new item.

use serde::Serialize;

use crate::error::Result;
use crate::model::List;

/// What a merge did to the existing list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Ids of existing items whose name changed
    pub renamed: Vec<String>,
    /// Ids of items added from the import
    pub added: Vec<String>,
    /// Incoming items that matched and changed nothing
    pub unchanged: usize,
}

impl MergeReport {
    /// Whether the merge changed anything.
    pub fn is_noop(&self) -> bool {
        self.renamed.is_empty() && self.added.is_empty()
    }
}

/// Merge `incoming` into `existing` in memory.
///
/// `existing` keeps its id, name and creation time. Never fails for
/// well-formed lists; the result is only an error if an add is rejected,
/// which cannot happen for items that passed shape validation.
pub fn merge_into(existing: &mut List, incoming: &List) -> Result<MergeReport> {
    let mut report = MergeReport::default();

    for item in &incoming.items {
        let matched = existing
            .find_item_by_id_or_name(&item.id, &item.name)
            .map(str::to_string);

        match matched {
            Some(existing_id) => {
                let before = existing.item(&existing_id).map(|i| i.name.clone());
                let after = existing.rename_item(&existing_id, &item.name);

                match (before, after) {
                    (Some(before), Some(after)) if before != after.name => {
                        log::debug!("Merge: renamed '{}' to '{}'", before, after.name);
                        report.renamed.push(existing_id);
                    }
                    _ => report.unchanged += 1,
                }
            }
            None => {
                let added =
                    existing.add_item_with_id(Some(&item.id), &item.name, item.qty, &item.unit)?;
                log::debug!("Merge: added '{}'", added.name);
                report.added.push(added.id);
            }
        }
    }

    Ok(report)
}
