// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compositor - flattens the document and its placed overlays into one image.
//
// Export renders at the original document's resolution: every overlay's
// display geometry is mapped into document space and the full-resolution
// source is scaled to fit. The preview render draws the same overlays at
// display scale on top of the preview, outlined, for on-screen feedback.

use image::{DynamicImage, Rgba, RgbaImage, imageops};
use imageproc::drawing::draw_hollow_rect_mut;
use stempel_core::error::{Result, StempelError};
use stempel_core::{OverlayKind, Rect};
use tracing::{debug, info, instrument};

use crate::context::DocumentContext;
use crate::image::processor::FILTER;
use crate::placement::PlacedOverlay;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const OUTLINE: Rgba<u8> = Rgba([136, 136, 136, 255]);

/// Full-resolution source images, by kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlaySources<'a> {
    pub stamp: Option<&'a DynamicImage>,
    pub signature: Option<&'a DynamicImage>,
}

impl<'a> OverlaySources<'a> {
    pub fn get(&self, kind: OverlayKind) -> Option<&'a DynamicImage> {
        match kind {
            OverlayKind::Stamp => self.stamp,
            OverlayKind::Signature => self.signature,
        }
    }
}

/// Render the signed document at full resolution.
///
/// The canvas is exactly the original's size, white, with the original drawn
/// over it. Stamps are drawn in placement order, then signatures, so later
/// overlays cover earlier ones. Overlays whose source is missing, or whose
/// mapped size is empty, are skipped.
#[instrument(skip_all, fields(stamps = stamps.len(), signatures = signatures.len()))]
pub fn render(
    document: Option<&DocumentContext>,
    stamps: &[PlacedOverlay],
    signatures: &[PlacedOverlay],
    stamp_source: Option<&DynamicImage>,
    signature_source: Option<&DynamicImage>,
) -> Result<DynamicImage> {
    let document = document.ok_or(StempelError::NoDocument)?;
    let sources = OverlaySources {
        stamp: stamp_source,
        signature: signature_source,
    };

    let size = document.original_size();
    let mut canvas = RgbaImage::from_pixel(size.width, size.height, BACKGROUND);
    imageops::overlay(&mut canvas, &document.original().to_rgba8(), 0, 0);

    let mapper = document.mapper();
    let mut drawn = 0usize;
    for overlay in stamps.iter().chain(signatures) {
        let target = mapper.to_document(overlay.display_rect());
        if draw_scaled(&mut canvas, overlay, sources.get(overlay.kind), target) {
            drawn += 1;
        }
    }

    info!(drawn, width = size.width, height = size.height, "document composited");
    Ok(DynamicImage::ImageRgba8(canvas))
}

/// Render the preview with overlays at display scale, each outlined.
///
/// Display positions are viewport coordinates, so they are shifted by the
/// preview origin. Outlines are drawn even when a source is missing.
#[instrument(skip_all, fields(stamps = stamps.len(), signatures = signatures.len()))]
pub fn render_preview(
    document: Option<&DocumentContext>,
    stamps: &[PlacedOverlay],
    signatures: &[PlacedOverlay],
    sources: OverlaySources<'_>,
) -> Result<DynamicImage> {
    let document = document.ok_or(StempelError::NoDocument)?;
    let mut canvas = document.preview().to_rgba8();
    let origin = document.preview_origin();

    for overlay in stamps.iter().chain(signatures) {
        let target = Rect::new(overlay.display_position - origin, overlay.display_size);
        draw_scaled(&mut canvas, overlay, sources.get(overlay.kind), target);
        if !target.size.is_empty() {
            let outline = imageproc::rect::Rect::at(target.origin.x, target.origin.y)
                .of_size(target.size.width, target.size.height);
            draw_hollow_rect_mut(&mut canvas, outline, OUTLINE);
        }
    }

    debug!(width = canvas.width(), height = canvas.height(), "preview rendered");
    Ok(DynamicImage::ImageRgba8(canvas))
}

/// Scale `source` to fit `target` (aspect preserved) and draw it at the
/// target's origin, clipped to the canvas. Returns whether anything was drawn.
fn draw_scaled(
    canvas: &mut RgbaImage,
    overlay: &PlacedOverlay,
    source: Option<&DynamicImage>,
    target: Rect,
) -> bool {
    let Some(source) = source else {
        debug!(id = %overlay.id, kind = %overlay.kind, "source missing, overlay skipped");
        return false;
    };
    if target.size.is_empty() {
        debug!(id = %overlay.id, "empty target, overlay skipped");
        return false;
    }

    let scaled = source
        .resize(target.size.width, target.size.height, FILTER)
        .to_rgba8();
    imageops::overlay(
        canvas,
        &scaled,
        i64::from(target.origin.x),
        i64::from(target.origin.y),
    );
    true
}
