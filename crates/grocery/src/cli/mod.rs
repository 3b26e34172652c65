/// Clap argument definitions
mod args;

/// Config command handlers
mod config;

/// Item commands: add, inc, dec, rename, check, uncheck, move, remove
mod item;

/// List commands: lists, new, show, rename-list, delete-list
mod list;

/// `share` and `import` commands
mod share;

/// Shared CLI utilities
mod util;

use clap::Parser;
use std::path::PathBuf;

use grocery_core::config::Config;
use grocery_core::fs::RealFileSystem;
use grocery_core::manager::ListManager;
use grocery_core::storage::FileStorage;

/// Storage used by the CLI: one JSON file per list in the data directory.
pub type CliStorage = FileStorage<RealFileSystem>;

/// List manager over the CLI's storage.
pub type CliManager = ListManager<CliStorage>;

use args::{Cli, Commands};

/// Everything a list or item command needs.
pub struct CliContext {
    pub manager: CliManager,
    pub config: Config,
    pub list: Option<String>,
}

/// Main entry point for the CLI
pub fn run_cli() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Config commands work even when the config file is broken
    let success = match cli.command {
        Commands::Config { command } => config::handle_config_command(command),
        command => match open_context(cli.data_dir, cli.list) {
            Some(ctx) => run_command(&ctx, command),
            None => false,
        },
    };

    if !success {
        std::process::exit(1);
    }
}

fn open_context(data_dir: Option<PathBuf>, list: Option<String>) -> Option<CliContext> {
    let config = util::load_config()?;

    let data_dir = data_dir.unwrap_or_else(|| config.data_dir.clone());
    log::debug!("Using data directory {}", data_dir.display());

    Some(CliContext {
        manager: ListManager::new(FileStorage::new(RealFileSystem, data_dir)),
        config,
        list,
    })
}

/// Execute a command, returning true on success
fn run_command(ctx: &CliContext, command: Commands) -> bool {
    match command {
        Commands::Lists => list::handle_lists(ctx),

        Commands::New { name } => list::handle_new(ctx, name.as_deref()),

        Commands::Show => list::handle_show(ctx),

        Commands::RenameList { name } => list::handle_rename_list(ctx, &name),

        Commands::DeleteList { id, yes } => list::handle_delete_list(ctx, &id, yes),

        Commands::Add { name, qty, unit } => item::handle_add(ctx, &name, qty, &unit),

        Commands::Inc { item, step } => item::handle_inc(ctx, &item, step),

        Commands::Dec { item, step } => item::handle_dec(ctx, &item, step),

        Commands::Rename { item, new_name } => item::handle_rename(ctx, &item, &new_name),

        Commands::Check { item } => item::handle_check(ctx, &item, true),

        Commands::Uncheck { item } => item::handle_check(ctx, &item, false),

        Commands::Move { item, order } => item::handle_move(ctx, &item, order),

        Commands::Remove { item } => item::handle_remove(ctx, &item),

        Commands::Share {
            compressed,
            origin,
            token_only,
        } => share::handle_share(ctx, compressed, origin.as_deref(), token_only),

        Commands::Import { link } => share::handle_import(ctx, &link),

        Commands::Config { command } => config::handle_config_command(command),
    }
}
