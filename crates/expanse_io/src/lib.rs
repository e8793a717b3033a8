//! # Expanse IO
//!
//! I/O layer for the Expanse simulation.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - JSON serialization helpers
//! - Atomic replace-on-write for save documents, with optional gzip framing

/// Error types and result aliases for I/O operations
pub mod error;
/// Validated serialization helpers and atomic document files
pub mod serialization;

pub use error::{IoError, Result};
pub use serialization::{
    from_json, is_gzip, read_document, temp_path_for, to_json, to_json_pretty, write_atomic,
    write_document,
};
