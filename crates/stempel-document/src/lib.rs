// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// stempel-document: The document-compositing engine.
//
// Sizes overlays from millimetres, tracks where they are placed on the
// preview, maps preview geometry back to the original's pixel space, and
// renders the flattened full-resolution result.

pub mod compositor;
pub mod context;
pub mod export;
pub mod image;
pub mod mapping;
pub mod placement;
pub mod sizing;

// Re-export the primary types so callers can use `stempel_document::DocumentContext` etc.
pub use crate::image::processor::{ImageProcessor, save_image};
pub use compositor::{OverlaySources, render, render_preview};
pub use context::{DEFAULT_PREVIEW_WIDTH, DocumentContext};
pub use export::{SIGNED_SUFFIX, signed_output_path, write_composite};
pub use mapping::CoordinateMapper;
pub use placement::{PlacedOverlay, PlacementState, clamp_to_bounds};
