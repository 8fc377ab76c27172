// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application state snapshot - what the front end needs to decide which
// actions are available.

use stempel_core::{OverlayKind, SizeSettings};

/// Read-only view of a signing session.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub document_loaded: bool,
    pub stamp_loaded: bool,
    pub signature_loaded: bool,
    /// Stamps placed on the current document.
    pub stamp_count: usize,
    /// Signatures placed on the current document.
    pub signature_count: usize,
    pub settings: SizeSettings,
}

impl AppState {
    /// Signing is offered once the document and both sources are loaded.
    pub fn can_sign(&self) -> bool {
        self.document_loaded && self.stamp_loaded && self.signature_loaded
    }

    /// Adding an overlay needs the document and that kind's source.
    pub fn can_add(&self, kind: OverlayKind) -> bool {
        self.document_loaded
            && match kind {
                OverlayKind::Stamp => self.stamp_loaded,
                OverlayKind::Signature => self.signature_loaded,
            }
    }
}

impl std::fmt::Display for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let yes_no = |b: bool| if b { "loaded" } else { "none" };
        writeln!(f, "document:  {}", yes_no(self.document_loaded))?;
        writeln!(
            f,
            "stamp:     {} ({} placed, {} mm)",
            yes_no(self.stamp_loaded),
            self.stamp_count,
            self.settings.stamp_diameter_mm
        )?;
        write!(
            f,
            "signature: {} ({} placed, {} mm)",
            yes_no(self.signature_loaded),
            self.signature_count,
            self.settings.signature_width_mm
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(document: bool, stamp: bool, signature: bool) -> AppState {
        AppState {
            document_loaded: document,
            stamp_loaded: stamp,
            signature_loaded: signature,
            stamp_count: 0,
            signature_count: 0,
            settings: SizeSettings::default(),
        }
    }

    #[test]
    fn sign_needs_everything() {
        assert!(state(true, true, true).can_sign());
        assert!(!state(true, true, false).can_sign());
        assert!(!state(false, true, true).can_sign());
    }

    #[test]
    fn add_needs_document_and_that_source() {
        let s = state(true, true, false);
        assert!(s.can_add(OverlayKind::Stamp));
        assert!(!s.can_add(OverlayKind::Signature));
        assert!(!state(false, true, true).can_add(OverlayKind::Stamp));
    }
}
