//! Shared utilities for CLI commands

use std::io::{self, Write};

use grocery_core::config::Config;
use grocery_core::error::GroceryError;
use grocery_core::list::GroceryList;
use grocery_core::model::{ItemStatus, ListItem};

use crate::cli::{CliManager, CliStorage};

/// Load config, printing an error on failure
pub fn load_config() -> Option<Config> {
    match Config::load() {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("✗ Error loading config: {}", e);
            if let Some(path) = Config::config_path() {
                eprintln!("  Fix or remove {}", path.display());
            }
            None
        }
    }
}

/// Load the list a command works on.
///
/// An explicit `--list` must name a stored list. Without one, the configured
/// default list is used if valid, otherwise the first stored list (created if
/// there are none).
pub fn open_list<'a>(
    manager: &'a CliManager,
    config: &Config,
    explicit: Option<&str>,
) -> Option<GroceryList<'a, CliStorage>> {
    let result = match explicit {
        Some(list_id) => manager.open_existing_list(list_id),
        None => manager
            .valid_list_id_or_default(config.default_list.as_deref())
            .and_then(|list_id| manager.get_list(&list_id)),
    };

    match result {
        Ok(list) => Some(list),
        Err(e @ GroceryError::ListNotFound(_)) => {
            eprintln!("✗ {}", e);
            eprintln!("  Run 'grocery lists' to see available lists");
            None
        }
        Err(e) => {
            eprintln!("✗ Could not open list: {}", e);
            None
        }
    }
}

/// Resolve an ITEM argument (id or case-insensitive name) to an item id.
pub fn resolve_item(list: &GroceryList<'_, CliStorage>, item: &str) -> Option<String> {
    match list.find_item_by_id_or_name(item, item) {
        Some(item_id) => Some(item_id.to_string()),
        None => {
            eprintln!("✗ No item '{}' in {}", item, list.name());
            None
        }
    }
}

/// One line per item: `[x]  2 ea  Milk`
pub fn format_item(item: &ListItem) -> String {
    let mark = match item.status {
        ItemStatus::Completed => 'x',
        ItemStatus::Pending => ' ',
    };
    format!("[{}] {:>3} {:<5} {}", mark, item.qty, item.unit, item.name)
}

/// Prompt user for a yes/no answer. Anything but yes is no.
pub fn prompt_yes(message: &str) -> bool {
    print!("{} [y/N] ", message);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }

    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(status: ItemStatus) -> ListItem {
        ListItem {
            id: "a".to_string(),
            name: "Milk".to_string(),
            qty: 2,
            unit: "gal".to_string(),
            status,
            order: 0,
        }
    }

    #[test]
    fn test_format_item() {
        assert_eq!(format_item(&item(ItemStatus::Pending)), "[ ]   2 gal   Milk");
        assert_eq!(format_item(&item(ItemStatus::Completed)), "[x]   2 gal   Milk");
    }
}
