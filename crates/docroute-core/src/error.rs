// SPDX-License-Identifier: MIT
//
// Unified error types for docroute.

use thiserror::Error;

/// Top-level error type for all docroute operations.
#[derive(Debug, Error)]
pub enum DocrouteError {
    // -- Document resolution --
    #[error("document resolution failed: {0}")]
    DocumentFetch(String),

    #[error("resolved document is empty")]
    EmptyDocument,

    // -- Printer plumbing --
    #[error("printer registry lookup failed: {0}")]
    PrinterRegistry(String),

    #[error("printer version check failed: {0}")]
    VersionSource(String),

    #[error("printer config catalog fetch failed: {0}")]
    ConfigCatalog(String),

    #[error("print transport failed: {0}")]
    Transport(String),

    // -- Raster pipeline --
    #[error("rasterization failed: {0}")]
    Rasterize(String),

    #[error("image encoding failed: {0}")]
    ImageEncode(String),

    // -- Storage / persistence --
    #[error("key-value store error: {0}")]
    Store(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocrouteError>;
