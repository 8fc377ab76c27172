// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signing service - owns the open document, the stamp and signature sources,
// the size settings and the placed overlays, and exposes every action a front
// end can take on them.
//
// Everything runs on the caller's thread. Each method either completes or
// returns an error with the state left as it was.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use stempel_core::error::{Result, StempelError};
use stempel_core::{OverlayId, OverlayKind, Point, SizeSettings, Size};
use stempel_document::{
    DEFAULT_PREVIEW_WIDTH, DocumentContext, ImageProcessor, OverlaySources, PlacementState,
    clamp_to_bounds, render, render_preview, signed_output_path, write_composite,
};
use stempel_store::CacheStore;
use tracing::{info, instrument, warn};

use crate::state::AppState;

pub struct SigningService {
    store: CacheStore,
    settings: SizeSettings,
    document: Option<DocumentContext>,
    stamp: Option<DynamicImage>,
    signature: Option<DynamicImage>,
    placement: PlacementState,
    /// Edit area size reported by the front end. `None` means the viewport
    /// is exactly the preview.
    viewport: Option<Size>,
    preview_width: u32,
}

// Not every front-end action is reachable from the command line.
#[allow(dead_code)]
impl SigningService {
    /// Start a session backed by `store`.
    ///
    /// Loads the size settings and any cached stamp and signature. A damaged
    /// settings file or cached image is logged and ignored.
    pub fn start(store: CacheStore) -> Self {
        let settings = match store.load() {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "settings unreadable, using defaults");
                SizeSettings::default()
            }
        };

        let mut service = Self {
            store,
            settings,
            document: None,
            stamp: None,
            signature: None,
            placement: PlacementState::new(),
            viewport: None,
            preview_width: DEFAULT_PREVIEW_WIDTH,
        };

        for kind in OverlayKind::ALL {
            match service.store.load_cached_image(kind) {
                Ok(Some(img)) => *service.source_slot(kind) = Some(img),
                Ok(None) => {}
                Err(e) => warn!(%kind, error = %e, "ignoring cached image"),
            }
        }

        info!(
            stamp = service.stamp.is_some(),
            signature = service.signature.is_some(),
            "signing session started"
        );
        service
    }

    /// Use a different preview width for documents loaded from now on.
    pub fn with_preview_width(mut self, width: u32) -> Self {
        self.preview_width = width;
        self
    }

    // -- Accessors -----------------------------------------------------------

    pub fn settings(&self) -> SizeSettings {
        self.settings
    }

    pub fn document(&self) -> Option<&DocumentContext> {
        self.document.as_ref()
    }

    pub fn placement(&self) -> &PlacementState {
        &self.placement
    }

    pub fn source(&self, kind: OverlayKind) -> Option<&DynamicImage> {
        match kind {
            OverlayKind::Stamp => self.stamp.as_ref(),
            OverlayKind::Signature => self.signature.as_ref(),
        }
    }

    fn source_slot(&mut self, kind: OverlayKind) -> &mut Option<DynamicImage> {
        match kind {
            OverlayKind::Stamp => &mut self.stamp,
            OverlayKind::Signature => &mut self.signature,
        }
    }

    /// Area overlays are centred in and dragged within.
    pub fn viewport(&self) -> Size {
        match (self.viewport, &self.document) {
            (Some(v), _) => v,
            (None, Some(doc)) => doc.preview_size(),
            (None, None) => Size::default(),
        }
    }

    /// Snapshot for enabling and disabling front-end controls.
    pub fn state(&self) -> AppState {
        AppState {
            document_loaded: self.document.is_some(),
            stamp_loaded: self.stamp.is_some(),
            signature_loaded: self.signature.is_some(),
            stamp_count: self.placement.overlays(OverlayKind::Stamp).len(),
            signature_count: self.placement.overlays(OverlayKind::Signature).len(),
            settings: self.settings,
        }
    }

    // -- Layout --------------------------------------------------------------

    /// The edit area changed size; the preview is re-centred in it.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = Some(viewport);
        if let Some(doc) = self.document.as_mut() {
            doc.center_in(viewport);
        }
    }

    /// The front end placed the preview somewhere other than centred.
    pub fn set_preview_origin(&mut self, origin: Point) -> Result<()> {
        let doc = self.document.as_mut().ok_or(StempelError::NoDocument)?;
        doc.set_preview_origin(origin);
        Ok(())
    }

    // -- Document ------------------------------------------------------------

    /// Open a document from disk. On failure the current document stays.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn load_document(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let ctx = DocumentContext::open(path.as_ref(), self.preview_width)?;
        self.install_document(ctx);
        Ok(())
    }

    /// Open an already-decoded document.
    pub fn load_document_image(&mut self, image: DynamicImage) -> Result<()> {
        let ctx = DocumentContext::new(image, self.preview_width)?;
        self.install_document(ctx);
        Ok(())
    }

    fn install_document(&mut self, mut ctx: DocumentContext) {
        self.clear_document();
        if let Some(viewport) = self.viewport {
            ctx.center_in(viewport);
        }
        info!(
            original = %ctx.original_size(),
            preview = %ctx.preview_size(),
            "document loaded"
        );
        self.document = Some(ctx);
    }

    /// Close the document. Every placed overlay goes with it.
    pub fn clear_document(&mut self) {
        self.placement.clear_all();
        self.document = None;
    }

    // -- Sources -------------------------------------------------------------

    /// Load a stamp or signature from disk and remember it for next time.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn load_source(&mut self, kind: OverlayKind, path: impl AsRef<Path>) -> Result<()> {
        let img = ImageProcessor::open(path.as_ref())?.into_dynamic();
        self.load_source_image(kind, img)
    }

    /// Replace the source for `kind` and write it to the cache.
    ///
    /// Already-placed overlays of this kind will render with the new source.
    /// A cache write failure is logged; the source is still used.
    pub fn load_source_image(&mut self, kind: OverlayKind, image: DynamicImage) -> Result<()> {
        if image.width() == 0 || image.height() == 0 {
            return Err(StempelError::InvalidImage(format!("{kind} image has no pixels")));
        }
        if let Err(e) = self.store.cache_image(kind, &image) {
            warn!(%kind, error = %e, "could not cache source image");
        }
        info!(%kind, width = image.width(), height = image.height(), "source loaded");
        *self.source_slot(kind) = Some(image);
        Ok(())
    }

    /// Unload the source for `kind`. Placed overlays stay but are not drawn
    /// until a source is loaded again.
    pub fn clear_source(&mut self, kind: OverlayKind) {
        *self.source_slot(kind) = None;
    }

    // -- Overlays ------------------------------------------------------------

    /// Place a new overlay of `kind` at the centre of the viewport.
    pub fn add_overlay(&mut self, kind: OverlayKind) -> Result<OverlayId> {
        let viewport = self.viewport();
        let source = match kind {
            OverlayKind::Stamp => self.stamp.as_ref(),
            OverlayKind::Signature => self.signature.as_ref(),
        };
        self.placement.add_overlay(
            kind,
            source,
            self.document.as_ref(),
            &self.settings,
            viewport,
        )
    }

    /// Drag an overlay. The position is kept inside the viewport; the
    /// position actually applied is returned.
    pub fn move_overlay(&mut self, id: OverlayId, position: Point) -> Result<Point> {
        let size = self
            .placement
            .get(id)
            .ok_or(StempelError::UnknownOverlay(id))?
            .display_size;
        let clamped = clamp_to_bounds(position, size, self.viewport());
        self.placement.move_overlay(id, clamped)?;
        Ok(clamped)
    }

    pub fn resize_overlay(&mut self, id: OverlayId, size: Size) -> Result<()> {
        self.placement.resize_overlay(id, size)
    }

    // -- Settings ------------------------------------------------------------

    /// Apply text typed into the size field for `kind`.
    ///
    /// Valid input is stored and persisted. Invalid input returns
    /// `InvalidSizeInput` carrying the value to put back in the field;
    /// nothing is written.
    pub fn apply_size_input(&mut self, kind: OverlayKind, input: &str) -> Result<u32> {
        let mm = self.settings.parse_size_input(kind, input)?;
        self.settings.set_size_mm(kind, mm);
        self.store.save(&self.settings)?;
        info!(%kind, mm, "size updated");
        Ok(mm)
    }

    // -- Output --------------------------------------------------------------

    /// Composite the document with every placed overlay.
    pub fn sign(&self) -> Result<DynamicImage> {
        render(
            self.document.as_ref(),
            self.placement.overlays(OverlayKind::Stamp),
            self.placement.overlays(OverlayKind::Signature),
            self.stamp.as_ref(),
            self.signature.as_ref(),
        )
    }

    /// Preview with overlays outlined, as the front end shows it.
    pub fn preview(&self) -> Result<DynamicImage> {
        render_preview(
            self.document.as_ref(),
            self.placement.overlays(OverlayKind::Stamp),
            self.placement.overlays(OverlayKind::Signature),
            OverlaySources {
                stamp: self.stamp.as_ref(),
                signature: self.signature.as_ref(),
            },
        )
    }

    /// Sign and write the result, next to the document unless `output` is
    /// given. Nothing is written if compositing fails.
    pub fn export(&self, output: Option<&Path>) -> Result<PathBuf> {
        let doc = self.document.as_ref().ok_or(StempelError::NoDocument)?;
        let path = match (output, doc.source_path()) {
            (Some(out), _) => out.to_path_buf(),
            (None, Some(src)) => signed_output_path(src),
            (None, None) => {
                return Err(StempelError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "document was not opened from a file; an output path is required",
                )));
            }
        };

        let composite = self.sign()?;
        write_composite(&composite, &path)?;
        Ok(path)
    }
}
