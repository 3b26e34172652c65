//! Config command handlers

use std::path::PathBuf;

use grocery_core::config::Config;
use grocery_core::id;
use grocery_core::share::ShareEncoding;

use crate::cli::args::{ConfigCommands, ConfigKey};
use crate::cli::util::load_config;

/// Handle the config command
/// Returns true on success, false on error
pub fn handle_config_command(command: Option<ConfigCommands>) -> bool {
    match command {
        None | Some(ConfigCommands::Show) => show_config(),
        Some(ConfigCommands::Path) => match Config::config_path() {
            Some(path) => {
                println!("{}", path.display());
                true
            }
            None => {
                eprintln!("✗ Could not determine config directory");
                false
            }
        },
        Some(ConfigCommands::Set { key, value }) => set_config_value(key, &value),
    }
}

/// Show the grocery configuration
fn show_config() -> bool {
    let Some(cfg) = load_config() else {
        return false;
    };

    println!("Grocery Configuration");
    println!("=====================");
    println!("Data directory: {}", cfg.data_dir.display());
    println!("Share origin: {}", cfg.share_origin);
    println!("Share encoding: {}", encoding_name(cfg.share_encoding));
    if let Some(ref list) = cfg.default_list {
        println!("Default list: {}", list);
    }
    if let Some(config_path) = Config::config_path() {
        println!("Config file: {}", config_path.display());
    }
    true
}

/// Set one value and save the config file
fn set_config_value(key: ConfigKey, value: &str) -> bool {
    let Some(mut cfg) = load_config() else {
        return false;
    };

    if let Err(msg) = apply_value(&mut cfg, key, value) {
        eprintln!("✗ {}", msg);
        return false;
    }

    match cfg.save() {
        Ok(()) => {
            println!("✓ Saved configuration");
            true
        }
        Err(e) => {
            eprintln!("✗ Error saving config: {}", e);
            false
        }
    }
}

fn apply_value(cfg: &mut Config, key: ConfigKey, value: &str) -> Result<(), String> {
    let value = value.trim();
    match key {
        ConfigKey::DataDir => {
            if value.is_empty() {
                return Err("Data directory cannot be empty".to_string());
            }
            cfg.data_dir = PathBuf::from(value);
        }
        ConfigKey::ShareOrigin => {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(format!("Share origin must start with http:// or https://: {}", value));
            }
            cfg.share_origin = value.trim_end_matches('/').to_string();
        }
        ConfigKey::ShareEncoding => {
            cfg.share_encoding = parse_encoding(value)
                .ok_or_else(|| format!("Invalid share encoding: {} (plain, compressed)", value))?;
        }
        ConfigKey::DefaultList => {
            if value.is_empty() || value.eq_ignore_ascii_case("none") {
                cfg.default_list = None;
            } else if id::is_list_id(value) {
                cfg.default_list = Some(value.to_string());
            } else {
                return Err(format!("'{}' is not a list id", value));
            }
        }
    }
    Ok(())
}

/// Parse a share encoding name
fn parse_encoding(s: &str) -> Option<ShareEncoding> {
    match s.to_lowercase().as_str() {
        "plain" => Some(ShareEncoding::Plain),
        "compressed" | "gzip" => Some(ShareEncoding::Compressed),
        _ => None,
    }
}

/// Format a share encoding for display
fn encoding_name(encoding: ShareEncoding) -> &'static str {
    match encoding {
        ShareEncoding::Plain => "plain",
        ShareEncoding::Compressed => "compressed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_encoding() {
        assert_eq!(parse_encoding("Plain"), Some(ShareEncoding::Plain));
        assert_eq!(parse_encoding("gzip"), Some(ShareEncoding::Compressed));
        assert_eq!(parse_encoding("zip"), None);
    }

    #[test]
    fn test_apply_values() {
        let mut cfg = Config::new(PathBuf::from("/lists"));

        apply_value(&mut cfg, ConfigKey::ShareOrigin, "http://localhost:5173/").unwrap();
        assert_eq!(cfg.share_origin, "http://localhost:5173");

        apply_value(
            &mut cfg,
            ConfigKey::DefaultList,
            "0f8fad5b-d9cb-469f-a165-70867728950e",
        )
        .unwrap();
        assert!(cfg.default_list.is_some());
        apply_value(&mut cfg, ConfigKey::DefaultList, "none").unwrap();
        assert!(cfg.default_list.is_none());

        assert!(apply_value(&mut cfg, ConfigKey::DefaultList, "groceries").is_err());
        assert!(apply_value(&mut cfg, ConfigKey::ShareOrigin, "ftp://x").is_err());
        assert!(apply_value(&mut cfg, ConfigKey::DataDir, " ").is_err());
    }
}
