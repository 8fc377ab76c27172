// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Persistent overlay size settings.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StempelError};
use crate::types::OverlayKind;

/// Default stamp diameter in millimetres.
pub const DEFAULT_STAMP_DIAMETER_MM: u32 = 42;
/// Default signature width in millimetres.
pub const DEFAULT_SIGNATURE_WIDTH_MM: u32 = 20;

/// Real-world overlay sizes, shared by every placement in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeSettings {
    /// Diameter of the stamp on paper.
    #[serde(rename = "stamp_size")]
    pub stamp_diameter_mm: u32,
    /// Width of the signature on paper.
    #[serde(rename = "sign_size")]
    pub signature_width_mm: u32,
}

impl Default for SizeSettings {
    fn default() -> Self {
        Self {
            stamp_diameter_mm: DEFAULT_STAMP_DIAMETER_MM,
            signature_width_mm: DEFAULT_SIGNATURE_WIDTH_MM,
        }
    }
}

impl SizeSettings {
    /// Configured size for `kind`, in millimetres.
    pub fn size_mm(&self, kind: OverlayKind) -> u32 {
        match kind {
            OverlayKind::Stamp => self.stamp_diameter_mm,
            OverlayKind::Signature => self.signature_width_mm,
        }
    }

    pub fn set_size_mm(&mut self, kind: OverlayKind, mm: u32) {
        match kind {
            OverlayKind::Stamp => self.stamp_diameter_mm = mm,
            OverlayKind::Signature => self.signature_width_mm = mm,
        }
    }

    /// Both sizes are positive.
    pub fn is_valid(&self) -> bool {
        self.stamp_diameter_mm > 0 && self.signature_width_mm > 0
    }

    /// Parse free-form text typed into a size field.
    ///
    /// Surrounding whitespace is ignored. Anything that is not a positive
    /// integer is rejected with `InvalidSizeInput`, carrying the current
    /// value for `kind` so the field can be reverted.
    pub fn parse_size_input(&self, kind: OverlayKind, input: &str) -> Result<u32> {
        match input.trim().parse::<u32>() {
            Ok(mm) if mm > 0 => Ok(mm),
            _ => Err(StempelError::InvalidSizeInput {
                input: input.to_owned(),
                last_valid: self.size_mm(kind),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_persisted_format() {
        let json = serde_json::to_value(SizeSettings::default()).unwrap();
        assert_eq!(json, serde_json::json!({"stamp_size": 42, "sign_size": 20}));
    }

    #[test]
    fn deserializes_on_disk_names() {
        let parsed: SizeSettings =
            serde_json::from_str(r#"{"stamp_size": 40, "sign_size": 35}"#).unwrap();
        assert_eq!(parsed.size_mm(OverlayKind::Stamp), 40);
        assert_eq!(parsed.size_mm(OverlayKind::Signature), 35);
    }

    #[test]
    fn parse_accepts_padded_integers() {
        let settings = SizeSettings::default();
        assert_eq!(settings.parse_size_input(OverlayKind::Stamp, " 45 ").unwrap(), 45);
        assert_eq!(settings.parse_size_input(OverlayKind::Signature, "+30").unwrap(), 30);
    }

    #[test]
    fn parse_rejects_malformed_input_with_last_valid() {
        let settings = SizeSettings::default();
        for bad in ["", "4.2", "abc", "-3", "0"] {
            match settings.parse_size_input(OverlayKind::Signature, bad) {
                Err(StempelError::InvalidSizeInput { input, last_valid }) => {
                    assert_eq!(input, bad);
                    assert_eq!(last_valid, 20);
                }
                other => panic!("expected InvalidSizeInput for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn zero_size_is_not_valid() {
        assert!(SizeSettings::default().is_valid());
        let zero_stamp = SizeSettings {
            stamp_diameter_mm: 0,
            signature_width_mm: 20,
        };
        assert!(!zero_stamp.is_valid());
    }

    #[test]
    fn set_size_updates_only_that_kind() {
        let mut settings = SizeSettings::default();
        settings.set_size_mm(OverlayKind::Stamp, 50);
        assert_eq!(settings.stamp_diameter_mm, 50);
        assert_eq!(settings.signature_width_mm, 20);
    }
}
