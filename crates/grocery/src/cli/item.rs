//! Item command handlers

use grocery_core::model::ItemStatus;

use crate::cli::CliContext;
use crate::cli::util::{format_item, open_list, resolve_item};

/// Handle the add command
pub fn handle_add(ctx: &CliContext, name: &str, qty: u32, unit: &str) -> bool {
    let Some(mut list) = open_list(&ctx.manager, &ctx.config, ctx.list.as_deref()) else {
        return false;
    };

    let before = list.items().len();
    match list.add_item(name, qty, unit) {
        Ok(item) if list.items().len() > before => {
            println!("✓ Added {}", format_item(&item));
            true
        }
        Ok(item) => {
            println!("✓ Already listed, now {}", format_item(&item));
            true
        }
        Err(e) => {
            eprintln!("✗ Error adding item: {}", e);
            false
        }
    }
}

/// Handle the inc command
pub fn handle_inc(ctx: &CliContext, item: &str, step: u32) -> bool {
    let Some(mut list) = open_list(&ctx.manager, &ctx.config, ctx.list.as_deref()) else {
        return false;
    };
    let Some(item_id) = resolve_item(&list, item) else {
        return false;
    };

    match list.increase_qty(&item_id, step) {
        Ok(item) => {
            println!("✓ {}", format_item(&item));
            true
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            false
        }
    }
}

/// Handle the dec command
pub fn handle_dec(ctx: &CliContext, item: &str, step: u32) -> bool {
    let Some(mut list) = open_list(&ctx.manager, &ctx.config, ctx.list.as_deref()) else {
        return false;
    };
    let Some(item_id) = resolve_item(&list, item) else {
        return false;
    };

    match list.decrease_qty(&item_id, step) {
        Ok(Some(item)) => {
            println!("✓ {}", format_item(&item));
            true
        }
        Ok(None) => {
            println!("✓ Removed '{}'", item);
            true
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            false
        }
    }
}

/// Handle the rename command
pub fn handle_rename(ctx: &CliContext, item: &str, new_name: &str) -> bool {
    let Some(mut list) = open_list(&ctx.manager, &ctx.config, ctx.list.as_deref()) else {
        return false;
    };
    let Some(item_id) = resolve_item(&list, item) else {
        return false;
    };

    if new_name.trim().is_empty() {
        eprintln!("✗ Item name cannot be empty");
        return false;
    }

    match list.rename_item(&item_id, new_name) {
        Ok(Some(renamed)) => {
            println!("✓ Renamed '{}' to '{}'", item, renamed.name);
            true
        }
        Ok(None) => {
            eprintln!("✗ No item '{}'", item);
            false
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            false
        }
    }
}

/// Handle the check and uncheck commands
pub fn handle_check(ctx: &CliContext, item: &str, acquired: bool) -> bool {
    let Some(mut list) = open_list(&ctx.manager, &ctx.config, ctx.list.as_deref()) else {
        return false;
    };
    let Some(item_id) = resolve_item(&list, item) else {
        return false;
    };

    let result = if acquired {
        list.item_acquired(&item_id)
    } else {
        list.put_item_back(&item_id)
    };

    match result {
        Ok(Some(item)) => {
            println!("✓ {}", format_item(&item));
            if item.status == ItemStatus::Completed && list.snapshot().remaining_count() == 0 {
                println!("  All done!");
            }
            true
        }
        Ok(None) => {
            eprintln!("✗ No item '{}'", item);
            false
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            false
        }
    }
}

/// Handle the move command
pub fn handle_move(ctx: &CliContext, item: &str, order: u32) -> bool {
    let Some(mut list) = open_list(&ctx.manager, &ctx.config, ctx.list.as_deref()) else {
        return false;
    };
    let Some(item_id) = resolve_item(&list, item) else {
        return false;
    };

    // Positions past the end clamp to the last slot
    let last = list.items().iter().map(|i| i.order).max().unwrap_or(0);
    match list.move_item(&item_id, order.min(last)) {
        Ok(moved) => {
            println!("✓ Moved '{}' to position {}", moved.name, moved.order);
            true
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            false
        }
    }
}

/// Handle the remove command
pub fn handle_remove(ctx: &CliContext, item: &str) -> bool {
    let Some(mut list) = open_list(&ctx.manager, &ctx.config, ctx.list.as_deref()) else {
        return false;
    };
    let Some(item_id) = resolve_item(&list, item) else {
        return false;
    };

    match list.remove_item(&item_id) {
        Ok(()) => {
            println!("✓ Removed '{}'", item);
            true
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            false
        }
    }
}
