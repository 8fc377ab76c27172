// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Placement state - the stamps and signatures placed on the current document,
// in display coordinates.

use image::DynamicImage;
use stempel_core::error::{Result, StempelError};
use stempel_core::{OverlayId, OverlayKind, Point, Rect, SizeSettings, Size};
use tracing::{debug, info};

use crate::context::DocumentContext;
use crate::sizing;

/// One overlay instance on the preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOverlay {
    pub id: OverlayId,
    pub kind: OverlayKind,
    /// Top-left corner in viewport coordinates.
    pub display_position: Point,
    pub display_size: Size,
}

impl PlacedOverlay {
    pub fn display_rect(&self) -> Rect {
        Rect::new(self.display_position, self.display_size)
    }
}

/// Ordered overlay lists, one per kind.
///
/// Insertion order is kept because it is also the drawing order.
#[derive(Debug, Default, Clone)]
pub struct PlacementState {
    stamps: Vec<PlacedOverlay>,
    signatures: Vec<PlacedOverlay>,
}

impl PlacementState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new overlay of `kind`, centred in `viewport`.
    ///
    /// Needs an open document and a loaded source of that kind. The size
    /// comes from the sizing policy applied to the preview width.
    pub fn add_overlay(
        &mut self,
        kind: OverlayKind,
        source: Option<&DynamicImage>,
        document: Option<&DocumentContext>,
        settings: &SizeSettings,
        viewport: Size,
    ) -> Result<OverlayId> {
        let document = document.ok_or(StempelError::NoDocument)?;
        let source = source.ok_or(StempelError::MissingSource(kind))?;

        let size = sizing::target_size(
            kind,
            document.orientation(),
            settings,
            Size::new(source.width(), source.height()),
            document.preview_size().width,
        )?;
        let position = Point::new(
            centered(viewport.width, size.width),
            centered(viewport.height, size.height),
        );

        let id = self.insert(kind, position, size);
        info!(%id, %kind, x = position.x, y = position.y, %size, "overlay placed");
        Ok(id)
    }

    fn insert(&mut self, kind: OverlayKind, display_position: Point, display_size: Size) -> OverlayId {
        let overlay = PlacedOverlay {
            id: OverlayId::new(),
            kind,
            display_position,
            display_size,
        };
        let id = overlay.id;
        self.list_mut(kind).push(overlay);
        id
    }

    /// Write back a new display position (drag).
    pub fn move_overlay(&mut self, id: OverlayId, position: Point) -> Result<()> {
        let overlay = self.get_mut(id).ok_or(StempelError::UnknownOverlay(id))?;
        overlay.display_position = position;
        debug!(%id, x = position.x, y = position.y, "overlay moved");
        Ok(())
    }

    /// Write back a new display size (resize handle).
    pub fn resize_overlay(&mut self, id: OverlayId, size: Size) -> Result<()> {
        let overlay = self.get_mut(id).ok_or(StempelError::UnknownOverlay(id))?;
        overlay.display_size = size;
        debug!(%id, %size, "overlay resized");
        Ok(())
    }

    /// Remove every overlay of both kinds.
    pub fn clear_all(&mut self) {
        let removed = self.len();
        self.stamps.clear();
        self.signatures.clear();
        debug!(removed, "overlays cleared");
    }

    pub fn get(&self, id: OverlayId) -> Option<&PlacedOverlay> {
        self.iter().find(|o| o.id == id)
    }

    fn get_mut(&mut self, id: OverlayId) -> Option<&mut PlacedOverlay> {
        self.stamps
            .iter_mut()
            .chain(self.signatures.iter_mut())
            .find(|o| o.id == id)
    }

    /// Overlays of `kind` in placement order.
    pub fn overlays(&self, kind: OverlayKind) -> &[PlacedOverlay] {
        match kind {
            OverlayKind::Stamp => &self.stamps,
            OverlayKind::Signature => &self.signatures,
        }
    }

    /// All overlays in drawing order: stamps first, then signatures.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedOverlay> {
        self.stamps.iter().chain(self.signatures.iter())
    }

    pub fn len(&self) -> usize {
        self.stamps.len() + self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn list_mut(&mut self, kind: OverlayKind) -> &mut Vec<PlacedOverlay> {
        match kind {
            OverlayKind::Stamp => &mut self.stamps,
            OverlayKind::Signature => &mut self.signatures,
        }
    }
}

/// Top-left coordinate that centres `inner` in `outer`, flooring like the
/// layout it mirrors (negative when `inner` is larger).
fn centered(outer: u32, inner: u32) -> i32 {
    (outer as i64 - inner as i64).div_euclid(2) as i32
}

/// Keep an element of `size` inside `bounds`, the way a dragged widget is
/// held inside its parent. An element larger than the bounds is pinned to 0.
pub fn clamp_to_bounds(position: Point, size: Size, bounds: Size) -> Point {
    let clamp = |v: i32, extent: u32, limit: u32| {
        let max = limit as i64 - extent as i64;
        (v as i64).min(max).max(0) as i32
    };
    Point::new(
        clamp(position.x, size.width, bounds.width),
        clamp(position.y, size.height, bounds.height),
    )
}
