//! List command handlers

use crate::cli::CliContext;
use crate::cli::util::{format_item, open_list, prompt_yes};

/// Handle the lists command
/// Returns true on success, false on error
pub fn handle_lists(ctx: &CliContext) -> bool {
    let lists = match ctx.manager.summaries() {
        Ok(lists) => lists,
        Err(e) => {
            eprintln!("✗ Error reading lists: {}", e);
            return false;
        }
    };

    if lists.is_empty() {
        println!("No lists yet. Create one with 'grocery new'.");
        return true;
    }

    for overview in &lists {
        // Reuse the manager's progress wording
        let progress = ctx
            .manager
            .items_text(&overview.id)
            .unwrap_or_else(|_| String::new());
        let marker = if ctx.config.default_list.as_deref() == Some(overview.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{} {}  {} {}", marker, overview.id, overview.name, progress);
    }

    true
}

/// Handle the new command
pub fn handle_new(ctx: &CliContext, name: Option<&str>) -> bool {
    let mut list = match ctx.manager.create_new_list() {
        Ok(list) => list,
        Err(e) => {
            eprintln!("✗ Error creating list: {}", e);
            return false;
        }
    };

    if let Some(name) = name
        && let Err(e) = list.set_name(name)
    {
        eprintln!("✗ Error naming list: {}", e);
        return false;
    }

    println!("✓ Created list '{}'", list.name());
    println!("  Id: {}", list.id());
    true
}

/// Handle the show command
pub fn handle_show(ctx: &CliContext) -> bool {
    let Some(list) = open_list(&ctx.manager, &ctx.config, ctx.list.as_deref()) else {
        return false;
    };

    println!("{}", list.name());
    println!("{}", "=".repeat(list.name().chars().count()));

    if list.items().is_empty() {
        println!("(No items)");
        return true;
    }

    for item in list.items() {
        println!("{:>3}. {}", item.order, format_item(item));
    }

    let remaining = list.snapshot().remaining_count();
    println!();
    println!("{} of {} remaining", remaining, list.items().len());
    true
}

/// Handle the rename-list command
pub fn handle_rename_list(ctx: &CliContext, name: &str) -> bool {
    let Some(mut list) = open_list(&ctx.manager, &ctx.config, ctx.list.as_deref()) else {
        return false;
    };

    let old_name = list.name().to_string();
    match list.set_name(name) {
        Ok(()) => {
            println!("✓ Renamed '{}' to '{}'", old_name, list.name());
            true
        }
        Err(e) => {
            eprintln!("✗ Error renaming list: {}", e);
            false
        }
    }
}

/// Handle the delete-list command
pub fn handle_delete_list(ctx: &CliContext, list_id: &str, yes: bool) -> bool {
    let name = match ctx.manager.open_existing_list(list_id) {
        Ok(list) => list.name().to_string(),
        Err(e) => {
            eprintln!("✗ {}", e);
            return false;
        }
    };

    if !yes && !prompt_yes(&format!("Delete list '{}'?", name)) {
        println!("Delete cancelled.");
        return true;
    }

    ctx.manager.remove_list(list_id);

    // Removal is best-effort, so check what actually happened
    match ctx.manager.is_list_available(list_id) {
        Ok(false) => {
            println!("✓ Deleted list '{}'", name);
            true
        }
        _ => {
            eprintln!("✗ Could not delete list '{}'", name);
            false
        }
    }
}
