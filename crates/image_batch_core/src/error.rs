//! Error types surfaced by the processor and the exporter.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a path was rejected before any processing happened.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("unsupported file type: {}", .path.display())]
    UnsupportedExtension { path: PathBuf },
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },
}

/// Failure while turning one file into a record. Non-fatal for a batch.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("cannot read metadata of {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure of a single export attempt. No file is left at the destination.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no data to export")]
    Empty,
    #[error("record {index} does not have the same fields as the first record")]
    InconsistentSchema { index: usize },
    #[error("cannot write {}: {source}", .path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
}
