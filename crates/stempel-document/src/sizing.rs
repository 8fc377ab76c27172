// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sizing policy - converts a real-world overlay size in millimetres into
// preview pixels, assuming the document is an A4 page.

use stempel_core::error::{Result, StempelError};
use stempel_core::{Orientation, OverlayKind, SizeSettings, Size};
use tracing::debug;

/// Pixel size for a new overlay of `kind` on a preview `preview_width` pixels
/// wide.
///
/// The page is treated as 210 mm wide in portrait and 297 mm wide in
/// landscape. The configured size sets the overlay width; the height follows
/// the source's aspect ratio. Both values are truncated toward zero.
pub fn target_size(
    kind: OverlayKind,
    orientation: Orientation,
    settings: &SizeSettings,
    source: Size,
    preview_width: u32,
) -> Result<Size> {
    if source.is_empty() {
        return Err(StempelError::InvalidImage(format!(
            "{kind} source has no pixels ({source})"
        )));
    }

    let page_width_mm = orientation.a4_width_mm() as f64;
    let size_mm = settings.size_mm(kind) as f64;

    // mm * (px / page_mm), multiplied first so exact ratios stay exact.
    let width = (size_mm * preview_width as f64 / page_width_mm) as u32;
    let height = (width as f64 * source.height as f64 / source.width as f64) as u32;

    debug!(%kind, ?orientation, size_mm, width, height, "overlay size computed");
    Ok(Size::new(width, height))
}
