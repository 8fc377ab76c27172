// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document context - the loaded original, its fixed-width preview, and the
// scale factors between them.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use stempel_core::error::{Result, StempelError};
use stempel_core::{Orientation, Point, Rect, Size};
use tracing::{info, instrument};

use crate::image::ImageProcessor;
use crate::mapping::CoordinateMapper;

/// Width in pixels of the on-screen document preview.
pub const DEFAULT_PREVIEW_WIDTH: u32 = 600;

/// An open document.
///
/// The preview is built once, in [`DocumentContext::new`], together with the
/// scale factors. Loading another document means building a new context.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    original: DynamicImage,
    preview: DynamicImage,
    preview_origin: Point,
    scale_x: f64,
    scale_y: f64,
    source_path: Option<PathBuf>,
}

impl DocumentContext {
    /// Build a context with a preview `preview_width` pixels wide and a
    /// proportional height (at least one pixel).
    #[instrument(skip(original), fields(width = original.width(), height = original.height()))]
    pub fn new(original: DynamicImage, preview_width: u32) -> Result<Self> {
        let (width, height) = (original.width(), original.height());
        if width == 0 || height == 0 {
            return Err(StempelError::InvalidImage("document has no pixels".into()));
        }
        if preview_width == 0 {
            return Err(StempelError::InvalidImage("preview width must be positive".into()));
        }

        let preview_height =
            ((preview_width as f64 / width as f64) * height as f64).max(1.0) as u32;
        let preview = ImageProcessor::from_dynamic(original.clone())
            .resize_exact(preview_width, preview_height)
            .into_dynamic();

        let scale_x = width as f64 / preview.width() as f64;
        let scale_y = height as f64 / preview.height() as f64;
        info!(preview_width, preview_height, scale_x, scale_y, "document preview built");

        Ok(Self {
            original,
            preview,
            preview_origin: Point::ORIGIN,
            scale_x,
            scale_y,
            source_path: None,
        })
    }

    /// Decode `path` and build a context for it.
    pub fn open(path: impl AsRef<Path>, preview_width: u32) -> Result<Self> {
        let original = ImageProcessor::open(path.as_ref())?.into_dynamic();
        let mut ctx = Self::new(original, preview_width)?;
        ctx.source_path = Some(path.as_ref().to_path_buf());
        Ok(ctx)
    }

    pub fn original(&self) -> &DynamicImage {
        &self.original
    }

    pub fn preview(&self) -> &DynamicImage {
        &self.preview
    }

    /// File the document was read from, if it came from disk.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn original_size(&self) -> Size {
        Size::new(self.original.width(), self.original.height())
    }

    pub fn preview_size(&self) -> Size {
        Size::new(self.preview.width(), self.preview.height())
    }

    /// Page orientation, judged from the displayed preview.
    pub fn orientation(&self) -> Orientation {
        Orientation::of(self.preview.width(), self.preview.height())
    }

    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    pub fn preview_origin(&self) -> Point {
        self.preview_origin
    }

    /// Record where the presentation layer drew the preview.
    pub fn set_preview_origin(&mut self, origin: Point) {
        self.preview_origin = origin;
    }

    /// Centre the preview in `viewport`. A preview larger than the viewport
    /// is pinned to the top-left edge on that axis.
    pub fn center_in(&mut self, viewport: Size) {
        let preview = self.preview_size();
        let offset = |outer: u32, inner: u32| (outer.saturating_sub(inner) / 2) as i32;
        self.preview_origin = Point::new(
            offset(viewport.width, preview.width),
            offset(viewport.height, preview.height),
        );
    }

    /// Preview's on-screen rectangle in viewport coordinates.
    pub fn preview_rect(&self) -> Rect {
        Rect::new(self.preview_origin, self.preview_size())
    }

    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.preview_origin, self.scale_x, self.scale_y)
    }
}
