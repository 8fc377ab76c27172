// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the stempel-document crate. Measures a full export
// render of an A4 scan at 300 dpi with one stamp and one signature.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

use stempel_core::{OverlayKind, SizeSettings, Size};
use stempel_document::{DEFAULT_PREVIEW_WIDTH, DocumentContext, PlacementState, render};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark compositing onto a 2480x3508 document.
///
/// The stamp and signature sources are larger than their on-page size, so
/// each render also pays for downscaling them, which is the usual case for
/// photographed seals.
fn bench_render_a4(c: &mut Criterion) {
    let document = DynamicImage::ImageRgb8(RgbImage::from_pixel(2480, 3508, Rgb([250, 250, 245])));
    let document = DocumentContext::new(document, DEFAULT_PREVIEW_WIDTH).expect("document");
    let stamp = DynamicImage::ImageRgba8(RgbaImage::from_pixel(800, 800, Rgba([30, 60, 200, 180])));
    let signature =
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(1200, 400, Rgba([10, 10, 10, 220])));

    let viewport = Size::new(DEFAULT_PREVIEW_WIDTH, document.preview_size().height);
    let settings = SizeSettings::default();
    let mut placement = PlacementState::new();
    placement
        .add_overlay(OverlayKind::Stamp, Some(&stamp), Some(&document), &settings, viewport)
        .expect("stamp");
    placement
        .add_overlay(OverlayKind::Signature, Some(&signature), Some(&document), &settings, viewport)
        .expect("signature");

    c.bench_function("render (2480x3508, 2 overlays)", |b| {
        b.iter(|| {
            let out = render(
                Some(black_box(&document)),
                placement.overlays(OverlayKind::Stamp),
                placement.overlays(OverlayKind::Signature),
                Some(&stamp),
                Some(&signature),
            )
            .expect("render");
            black_box(out);
        });
    });
}

criterion_group!(benches, bench_render_a4);
criterion_main!(benches);
