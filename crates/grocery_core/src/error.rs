use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::codec::DecodeError;
use crate::model::InvalidShape;

/// Unified error type for grocery list operations
#[derive(Debug, Error)]
pub enum GroceryError {
    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read record '{key}': {source}")]
    StorageRead {
        key: String,
        source: std::io::Error,
    },

    #[error("Failed to write record '{key}': {source}")]
    StorageWrite {
        key: String,
        source: std::io::Error,
    },

    // Snapshot errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stored list '{0}' is corrupt")]
    CorruptList(String),

    // Import errors
    #[error("Missing data in query params")]
    MissingImportData,

    #[error("Failed to decode import data: {0}")]
    Decode(#[from] DecodeError),

    #[error("Imported data is not a valid grocery list: {0}")]
    InvalidShape(#[from] InvalidShape),

    // Identity errors
    #[error("'{0}' is not a valid list id")]
    InvalidListId(String),

    #[error("List '{0}' not found")]
    ListNotFound(String),

    #[error("Item '{0}' not found")]
    ItemNotFound(String),

    #[error("Item name cannot be empty")]
    EmptyItemName,

    // Config errors
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias for grocery list operations
pub type Result<T> = std::result::Result<T, GroceryError>;

impl GroceryError {
    /// Short text suitable for a user-facing notification.
    ///
    /// Import failures collapse into the handful of messages the share flow
    /// shows; everything else falls back to the display string.
    pub fn user_message(&self) -> String {
        match self {
            GroceryError::MissingImportData => "Missing data in query params".to_string(),
            GroceryError::Decode(_) => "Failed to decode import data".to_string(),
            GroceryError::InvalidShape(InvalidShape::MissingId) => {
                "Imported data is missing a valid list ID".to_string()
            }
            GroceryError::InvalidShape(_) => "Imported data is not a valid grocery list".to_string(),
            GroceryError::StorageWrite { .. } => "Failed to save imported list".to_string(),
            other => other.to_string(),
        }
    }

    /// Convert to a serializable representation for front ends
    pub fn to_serializable(&self) -> SerializableError {
        SerializableError::from(self)
    }
}

/// A serializable representation of GroceryError
#[derive(Debug, Clone, Serialize)]
pub struct SerializableError {
    /// Error kind/variant name
    pub kind: String,
    /// Human-readable error message
    pub message: String,
}

impl From<&GroceryError> for SerializableError {
    fn from(err: &GroceryError) -> Self {
        let kind = match err {
            GroceryError::Io(_) => "Io",
            GroceryError::StorageRead { .. } => "StorageRead",
            GroceryError::StorageWrite { .. } => "StorageWrite",
            GroceryError::Json(_) => "Json",
            GroceryError::CorruptList(_) => "CorruptList",
            GroceryError::MissingImportData => "MissingImportData",
            GroceryError::Decode(_) => "Decode",
            GroceryError::InvalidShape(_) => "InvalidShape",
            GroceryError::InvalidListId(_) => "InvalidListId",
            GroceryError::ListNotFound(_) => "ListNotFound",
            GroceryError::ItemNotFound(_) => "ItemNotFound",
            GroceryError::EmptyItemName => "EmptyItemName",
            GroceryError::ConfigParse(_) => "ConfigParse",
            GroceryError::ConfigSerialize(_) => "ConfigSerialize",
            GroceryError::NoConfigDir => "NoConfigDir",
            GroceryError::FileRead { .. } => "FileRead",
        }
        .to_string();

        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<GroceryError> for SerializableError {
    fn from(err: GroceryError) -> Self {
        SerializableError::from(&err)
    }
}
