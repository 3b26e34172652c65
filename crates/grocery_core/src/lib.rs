#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Transport codec (share tokens)
pub mod codec;

/// Configuration options
pub mod config;

/// Error (common error types)
pub mod error;

/// Filesystem abstraction
pub mod fs;

/// List identifiers
pub mod id;

/// Import flow (token to stored list)
pub mod import;

/// Self-persisting list entity
pub mod list;

/// List manager (session object owning storage)
pub mod manager;

/// Merge engine
pub mod merge;

/// List and item value types
pub mod model;

/// Share links
pub mod share;

/// Keyed list storage
pub mod storage;

#[cfg(test)]
pub mod test_utils;
