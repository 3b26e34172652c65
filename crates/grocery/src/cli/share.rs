//! Share and import command handlers

use grocery_core::import::ImportFlow;
use grocery_core::share::{ShareEncoding, share_link, share_token};

use crate::cli::CliContext;
use crate::cli::util::open_list;

/// Handle the share command
pub fn handle_share(
    ctx: &CliContext,
    compressed: bool,
    origin: Option<&str>,
    token_only: bool,
) -> bool {
    let Some(list) = open_list(&ctx.manager, &ctx.config, ctx.list.as_deref()) else {
        return false;
    };

    let encoding = if compressed {
        ShareEncoding::Compressed
    } else {
        ctx.config.share_encoding
    };
    let snapshot = list.snapshot();

    let result = if token_only {
        share_token(&snapshot, encoding)
    } else {
        let origin = origin.unwrap_or(&ctx.config.share_origin);
        share_link(origin, &snapshot, encoding)
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            true
        }
        Err(e) => {
            eprintln!("✗ Failed to build share link: {}", e);
            false
        }
    }
}

/// Handle the import command
pub fn handle_import(ctx: &CliContext, link: &str) -> bool {
    let flow = ImportFlow::new(&ctx.manager);

    match flow.import_link(link) {
        Ok(outcome) if outcome.created => {
            println!("✓ List imported: '{}'", outcome.list.name);
            println!("  {} items, id {}", outcome.list.items.len(), outcome.list.id);
            true
        }
        Ok(outcome) => {
            let report = &outcome.report;
            println!("✓ Merged into '{}'", outcome.list.name);
            if report.is_noop() {
                println!("  Already up to date");
            } else {
                println!(
                    "  {} renamed, {} added, {} unchanged",
                    report.renamed.len(),
                    report.added.len(),
                    report.unchanged
                );
            }
            true
        }
        Err(e) => {
            log::debug!("Import failed: {:?}", e);
            eprintln!("✗ {}", e.user_message());
            false
        }
    }
}
