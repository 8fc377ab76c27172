// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export - naming and writing the signed copy of a document.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use stempel_core::error::Result;
use tracing::info;

use crate::image::save_image;

/// Inserted between the file stem and extension of a signed copy ("signed").
pub const SIGNED_SUFFIX: &str = "_подписано";

/// Path of the signed copy that sits next to `document`:
/// `scans/invoice.png` becomes `scans/invoice_подписано.png`.
pub fn signed_output_path(document: &Path) -> PathBuf {
    let stem = document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{stem}{SIGNED_SUFFIX}");
    if let Some(ext) = document.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    document.with_file_name(name)
}

/// Write a composite to `path`, in the format its extension names.
pub fn write_composite(image: &DynamicImage, path: &Path) -> Result<()> {
    save_image(image, path)?;
    info!(path = %path.display(), "signed document saved");
    Ok(())
}
