//! Error types for snapshot decoding.

use std::io;
use thiserror::Error;

/// Errors raised while reading a graph snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to read snapshot: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

pub type Result<T> = std::result::Result<T, SnapshotError>;
