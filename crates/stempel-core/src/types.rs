// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Stempel.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Short edge of an ISO A4 sheet in millimetres.
pub const A4_SHORT_EDGE_MM: u32 = 210;
/// Long edge of an ISO A4 sheet in millimetres.
pub const A4_LONG_EDGE_MM: u32 = 297;

/// Handle for a placed overlay instance.
///
/// Handles are never reused, so one kept across a document clear no longer
/// resolves instead of pointing at a newer overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlayId(pub Uuid);

impl OverlayId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OverlayId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OverlayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two kinds of image that can be placed on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverlayKind {
    /// Round company seal, sized by its diameter.
    Stamp,
    /// Handwritten signature, sized by its width.
    Signature,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 2] = [OverlayKind::Stamp, OverlayKind::Signature];

    /// File name used when this kind's source image is cached.
    pub fn cache_file_name(&self) -> &'static str {
        match self {
            Self::Stamp => "stamp.png",
            Self::Signature => "signature.png",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Stamp => "stamp",
            Self::Signature => "signature",
        }
    }
}

impl std::fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Page orientation, derived from pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    /// Strictly wider than tall.
    Landscape,
}

impl Orientation {
    /// Square pages count as portrait.
    pub fn of(width: u32, height: u32) -> Self {
        if width > height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }

    /// Physical width of an A4 page in this orientation.
    ///
    /// Only the horizontal edge is used when converting millimetres to
    /// pixels; the vertical scale is assumed to match.
    pub fn a4_width_mm(&self) -> u32 {
        match self {
            Self::Portrait => A4_SHORT_EDGE_MM,
            Self::Landscape => A4_LONG_EDGE_MM,
        }
    }
}

/// Integer pixel position. May be negative when an element sits left of or
/// above the reference origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Integer pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned rectangle in some pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }
}
