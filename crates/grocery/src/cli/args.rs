//! Command-line argument structures and enums

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grocery")]
#[command(version)]
#[command(about = "Manage grocery lists and share them as links", long_about = None)]
pub struct Cli {
    /// Override the directory lists are stored in
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// List to work on (default: config's default_list, then the first list)
    #[arg(short, long, global = true)]
    pub list: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show all lists, most remaining items first
    #[command(alias = "ls")]
    Lists,

    /// Create a new list
    New {
        /// Name for the list (default: "New List")
        name: Option<String>,
    },

    /// Show the items of a list
    Show,

    /// Rename a list
    RenameList {
        /// New name (blank resets to "Grocery List")
        name: String,
    },

    /// Add an item, or top up an item with the same name
    #[command(alias = "a")]
    Add {
        /// Item name
        name: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        qty: u32,

        /// Unit of measure
        #[arg(short, long, default_value = "ea")]
        unit: String,
    },

    /// Increase an item's quantity
    Inc {
        /// Item id or name
        item: String,

        /// Amount to add
        #[arg(short, long, default_value_t = 1)]
        step: u32,
    },

    /// Decrease an item's quantity (removes it at zero)
    Dec {
        /// Item id or name
        item: String,

        /// Amount to subtract
        #[arg(short, long, default_value_t = 1)]
        step: u32,
    },

    /// Rename an item
    Rename {
        /// Item id or name
        item: String,

        /// New name
        new_name: String,
    },

    /// Mark an item as in the basket
    #[command(alias = "got")]
    Check {
        /// Item id or name
        item: String,
    },

    /// Put an item back on the list
    Uncheck {
        /// Item id or name
        item: String,
    },

    /// Move an item to a new position
    #[command(alias = "mv")]
    Move {
        /// Item id or name
        item: String,

        /// New position (0 is the top)
        order: u32,
    },

    /// Remove an item
    #[command(alias = "rm")]
    Remove {
        /// Item id or name
        item: String,
    },

    /// Delete a whole list
    DeleteList {
        /// Id of the list to delete
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print a share link for a list
    Share {
        /// Use gzip-compressed tokens (overrides config)
        #[arg(short, long)]
        compressed: bool,

        /// Origin for the link (overrides config)
        #[arg(long)]
        origin: Option<String>,

        /// Print only the token, not a full link
        #[arg(long)]
        token_only: bool,
    },

    /// Import a share link, query string or raw token
    Import {
        /// The link or token to import
        link: String,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the config file location
    Path,

    /// Set a configuration value
    Set {
        /// Key to set
        key: ConfigKey,

        /// New value (for default_list, "none" clears it)
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum ConfigKey {
    /// Directory lists are stored in
    DataDir,
    /// Origin for share links
    ShareOrigin,
    /// plain or compressed
    ShareEncoding,
    /// List used when --list is omitted
    DefaultList,
}
