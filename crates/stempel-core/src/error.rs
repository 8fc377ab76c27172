// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Stempel.

use thiserror::Error;

use crate::types::{OverlayId, OverlayKind};

/// Top-level error type for all Stempel operations.
///
/// Every variant is recoverable: the operation that raised it leaves the
/// session state as it was.
#[derive(Debug, Error)]
pub enum StempelError {
    // -- Image errors --
    #[error("invalid image: {0}")]
    InvalidImage(String),

    // -- Session errors --
    #[error("no document loaded")]
    NoDocument,

    #[error("no {0} image loaded")]
    MissingSource(OverlayKind),

    #[error("unknown overlay {0}")]
    UnknownOverlay(OverlayId),

    #[error("invalid size {input:?}, keeping {last_valid} mm")]
    InvalidSizeInput { input: String, last_valid: u32 },

    // -- Storage / persistence --
    #[error("no cache directory available on this system")]
    CacheDirUnavailable,

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, StempelError>;
