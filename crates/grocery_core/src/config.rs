//! Configuration types for the grocery tools.
//!
//! This module provides the [`Config`] struct which stores where lists live
//! and how share links are built. Configuration is persisted as TOML
//! (typically at `~/.config/grocery/config.toml` on Unix systems).
//!
//! # Key Configuration Fields
//!
//! - `data_dir`: Directory holding one `<list id>.json` record per list
//! - `share_origin`: Origin used to build share links
//! - `share_encoding`: `plain` or `compressed` share tokens
//! - `default_list`: List opened when a command names none
//!
//! # Example
//!
//! ```ignore
//! use grocery_core::config::Config;
//!
//! // Load from default location (native only)
//! let config = Config::load()?;
//!
//! println!("Lists are stored in {}", config.data_dir.display());
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GroceryError, Result};
use crate::fs::FileSystem;
use crate::share::ShareEncoding;

/// Origin of the hosted app, used for share links by default.
pub const DEFAULT_SHARE_ORIGIN: &str = "https://grocerease.app";

/// `Config` holds the parts of the grocery tools that the user can configure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory where list records are stored
    pub data_dir: PathBuf,

    /// Origin for share links, e.g. "https://grocerease.app"
    #[serde(default = "default_share_origin")]
    pub share_origin: String,

    /// Token encoding used when sharing
    #[serde(default, skip_serializing_if = "is_default_encoding")]
    pub share_encoding: ShareEncoding,

    /// List used when a command doesn't name one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_list: Option<String>,
}

fn default_share_origin() -> String {
    DEFAULT_SHARE_ORIGIN.to_string()
}

fn is_default_encoding(encoding: &ShareEncoding) -> bool {
    *encoding == ShareEncoding::default()
}

impl Config {
    /// Create a new config storing lists in `data_dir`
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            share_origin: default_share_origin(),
            share_encoding: ShareEncoding::default(),
            default_list: None,
        }
    }

    /// Load config from a specific path.
    pub fn load_from<FS: FileSystem>(fs: &FS, path: &Path) -> Result<Self> {
        let contents = fs
            .read_to_string(path)
            .map_err(|e| GroceryError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to a specific path.
    pub fn save_to<FS: FileSystem>(&self, fs: &FS, path: &Path) -> Result<()> {
        // Create parent directory if needed
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs.create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs.write_file(path, &contents)?;
        Ok(())
    }

    /// Load config from a path, returning `default` if it can't be read.
    pub fn load_from_or<FS: FileSystem>(fs: &FS, path: &Path, default: Config) -> Self {
        match Self::load_from(fs, path) {
            Ok(config) => config,
            Err(e) => {
                if fs.exists(path) {
                    log::warn!("Ignoring unreadable config {}: {}", path.display(), e);
                }
                default
            }
        }
    }
}

// ============================================================================
// Native-only implementation (not available in WASM)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("grocery");

        Self::new(data_dir)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Config {
    /// Get the config file path (~/.config/grocery/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("grocery").join("config.toml"))
    }

    /// Load config from default location, or return default if file doesn't exist
    pub fn load() -> Result<Self> {
        let fs = crate::fs::RealFileSystem;
        if let Some(path) = Self::config_path()
            && fs.exists(&path)
        {
            return Self::load_from(&fs, &path);
        }

        Ok(Config::default())
    }

    /// Save config to default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or(GroceryError::NoConfigDir)?;
        self.save_to(&crate::fs::RealFileSystem, &path)
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for Config {
    fn default() -> Self {
        Self::new(PathBuf::from("/grocery"))
    }
}
